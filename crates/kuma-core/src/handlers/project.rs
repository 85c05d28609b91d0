// crates/kuma-core/src/handlers/project.rs - project-* commands

use crate::args::FlagArgs;
use crate::i18n::Label;
use crate::model::ProjectPatch;
use crate::registry::{CommandHandler, ExecutionContext};
use crate::result::{CommandResult, Component, DisplayInstruction};

use super::{HandlerError, HandlerResult, finish};

#[derive(Debug, Default)]
pub struct ProjectList;

impl CommandHandler for ProjectList {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, list(ctx, args))
    }
}

fn list(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    FlagArgs::parse(args, &[])?;

    let mut overviews: Vec<_> = ctx
        .workbench
        .projects()
        .iter()
        .map(|p| ctx.workbench.project_overview(p))
        .collect();
    overviews.sort_by_key(|o| o.project.id);

    Ok(CommandResult::display(DisplayInstruction::inline(
        Component::ProjectList(overviews),
    )))
}

#[derive(Debug, Default)]
pub struct ProjectCreate;

impl CommandHandler for ProjectCreate {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, create(ctx, args))
    }
}

fn create(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-n", "-d"])?;
    let name = flags.require("-n")?;

    if ctx.workbench.project_by_name(name).is_some() {
        return Err(HandlerError::ProjectExists(name.to_string()));
    }

    let project = ctx.workbench.add_project(
        name.to_string(),
        flags.get("-d").unwrap_or_default().to_string(),
        ctx.now,
    );

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::ProjectCreate(project),
        Some(Label::ProjectCreated.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct ProjectUpdate;

impl CommandHandler for ProjectUpdate {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, update(ctx, args))
    }
}

fn update(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i", "-n", "-d"])?;
    let id: u64 = flags.require_value("-i")?;

    let patch = ProjectPatch {
        name: flags.get("-n").map(str::to_string),
        description: flags.get("-d").map(str::to_string),
    };
    if patch.is_empty() {
        return Err(HandlerError::NothingToUpdate);
    }

    let current = ctx
        .workbench
        .project(id)
        .ok_or_else(|| HandlerError::ProjectNotFound(id.to_string()))?;

    if let Some(name) = &patch.name {
        if *name != current.name && ctx.workbench.project_by_name(name).is_some() {
            return Err(HandlerError::ProjectExists(name.clone()));
        }
    }

    let project = ctx
        .workbench
        .update_project(id, patch, ctx.now)
        .ok_or_else(|| HandlerError::ProjectNotFound(id.to_string()))?;

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::ProjectUpdate(project),
        Some(Label::ProjectUpdated.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct ProjectDelete;

impl CommandHandler for ProjectDelete {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, delete(ctx, args))
    }
}

/// Projects that still own tasks are kept; the tasks must go first
fn delete(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i"])?;
    let id: u64 = flags.require_value("-i")?;

    let project = ctx
        .workbench
        .project(id)
        .ok_or_else(|| HandlerError::ProjectNotFound(id.to_string()))?;

    let count = ctx.workbench.tasks_in_project(&project.name).len();
    if count > 0 {
        return Err(HandlerError::ProjectHasTasks {
            name: project.name.clone(),
            count,
        });
    }

    let project = ctx
        .workbench
        .remove_project(id)
        .ok_or_else(|| HandlerError::ProjectNotFound(id.to_string()))?;

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::ProjectDelete(project),
        Some(Label::ProjectDeleted.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct ProjectDetail;

impl CommandHandler for ProjectDetail {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, detail(ctx, args))
    }
}

fn detail(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i"])?;
    let id: u64 = flags.require_value("-i")?;

    let project = ctx
        .workbench
        .project(id)
        .ok_or_else(|| HandlerError::ProjectNotFound(id.to_string()))?;

    Ok(CommandResult::display(DisplayInstruction::gui(
        Component::ProjectDetail {
            overview: ctx.workbench.project_overview(project),
            tasks: ctx.workbench.tasks_in_project(&project.name),
        },
        true,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::task::{TaskCreate, TaskUpdate};
    use crate::handlers::testing::run;
    use crate::result::ShowWay;
    use crate::store::Workbench;

    fn component(result: &CommandResult) -> &Component {
        result
            .modification()
            .and_then(|m| m.display())
            .map(|d| d.component())
            .unwrap_or_else(|| panic!("expected a component, got {:?}", result))
    }

    #[test]
    fn test_create_and_list() {
        let mut wb = Workbench::default();
        let created = run(&ProjectCreate, &mut wb, "-n kuma -d task manager");
        assert!(matches!(component(&created), Component::ProjectCreate(p) if p.description == "task manager"));

        run(&TaskCreate, &mut wb, "-n a -p kuma");
        run(&TaskCreate, &mut wb, "-n b -p kuma");
        run(&TaskUpdate, &mut wb, "-i 2 -s done");

        match component(&run(&ProjectList, &mut wb, "")) {
            Component::ProjectList(list) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].task_count, 2);
                assert_eq!(list[0].done_count, 1);
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&ProjectCreate, &mut wb, "-n other");

        assert_eq!(
            run(&ProjectCreate, &mut wb, "-n kuma").error_message(),
            Some("项目kuma已存在")
        );
        assert!(run(&ProjectUpdate, &mut wb, "-i 2 -n kuma").is_error());
        // renaming to its own name is fine
        assert!(!run(&ProjectUpdate, &mut wb, "-i 1 -n kuma").is_error());
    }

    #[test]
    fn test_rename_carries_tasks() {
        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&TaskCreate, &mut wb, "-n a -p kuma");

        let result = run(&ProjectUpdate, &mut wb, "-i 1 -n bear");
        assert!(matches!(component(&result), Component::ProjectUpdate(p) if p.name == "bear"));
        assert_eq!(wb.task(1).unwrap().project.as_deref(), Some("bear"));
    }

    #[test]
    fn test_delete_refuses_non_empty_project() {
        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&TaskCreate, &mut wb, "-n a -p kuma");

        assert_eq!(
            run(&ProjectDelete, &mut wb, "-i 1").error_message(),
            Some("项目kuma下仍有1个任务，无法删除")
        );

        wb.remove_task(1);
        assert!(!run(&ProjectDelete, &mut wb, "-i 1").is_error());
        assert!(wb.projects().is_empty());
        assert!(run(&ProjectDelete, &mut wb, "-i 1").is_error());
    }

    #[test]
    fn test_delete_clears_default_project() {
        use crate::handlers::setting::SettingUpdate;
        use crate::model::SettingKey;

        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&SettingUpdate, &mut wb, "-k default_project -v kuma");

        assert!(!run(&ProjectDelete, &mut wb, "-i 1").is_error());
        assert_eq!(wb.setting_opt(SettingKey::DefaultProject), None);

        let created = run(&TaskCreate, &mut wb, "-n Foo");
        assert!(!created.is_error(), "{:?}", created);
        assert_eq!(wb.task(1).unwrap().project, None);
    }

    #[test]
    fn test_detail_is_gui_with_return() {
        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&TaskCreate, &mut wb, "-n a -p kuma");

        let result = run(&ProjectDetail, &mut wb, "-i 1");
        let display = result.modification().and_then(|m| m.display()).unwrap();
        assert_eq!(display.show_way(), ShowWay::Gui);
        assert!(display.allow_return());
        match display.component() {
            Component::ProjectDetail { overview, tasks } => {
                assert_eq!(overview.project.name, "kuma");
                assert_eq!(tasks.len(), 1);
            }
            other => panic!("unexpected component {:?}", other),
        }
    }

    #[test]
    fn test_list_takes_no_arguments() {
        let mut wb = Workbench::default();
        assert!(run(&ProjectList, &mut wb, "extra").is_error());
    }
}
