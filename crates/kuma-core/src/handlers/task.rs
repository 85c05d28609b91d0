// crates/kuma-core/src/handlers/task.rs - task-* commands
//
// FLAGS:
//   -i  task id            -n  name          -d  description
//   -s  status             -p  project name  -u  user
//   -over  finished (boolean), task-list only
//
// Lists render inline, create/update/delete confirm in a modal, and the
// detail view takes over the screen with a way back.

use crate::args::{ArgError, FlagArgs, parse_bool};
use crate::i18n::Label;
use crate::model::{NewTask, SettingKey, TaskFilter, TaskPatch, TaskStatus};
use crate::registry::{CommandHandler, ExecutionContext};
use crate::result::{CommandResult, Component, DisplayInstruction};
use crate::store::Workbench;

use super::{HandlerError, HandlerResult, finish};

#[derive(Debug, Default)]
pub struct TaskList;

impl CommandHandler for TaskList {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, list(ctx, args))
    }
}

fn list(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-u", "-s", "-p", "-over"])?;

    let over = flags
        .get("-over")
        .map(|raw| {
            parse_bool(raw).ok_or_else(|| ArgError::InvalidValue {
                flag: "-over".to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()?;

    let mut filter = TaskFilter {
        user: flags.get("-u").map(str::to_string),
        status: flags.parse_value::<TaskStatus>("-s")?,
        project: flags.get("-p").map(str::to_string),
        over,
    };

    if let Some(project) = &filter.project {
        ensure_project(ctx.workbench, project)?;
    }

    // Hide finished tasks when the user asked for that and gave no status filter
    if filter.status.is_none()
        && filter.over.is_none()
        && parse_bool(ctx.workbench.setting(SettingKey::ListDone)) == Some(false)
    {
        filter.over = Some(false);
    }

    let tasks = ctx.workbench.filter_tasks(&filter);
    Ok(CommandResult::display(DisplayInstruction::inline(
        Component::TaskList(tasks),
    )))
}

#[derive(Debug, Default)]
pub struct TaskCreate;

impl CommandHandler for TaskCreate {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, create(ctx, args))
    }
}

fn create(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-n", "-p", "-d", "-u"])?;
    let name = flags.require("-n")?.to_string();

    let project = flags
        .get("-p")
        .or_else(|| ctx.workbench.setting_opt(SettingKey::DefaultProject))
        .map(str::to_string);
    if let Some(project) = &project {
        ensure_project(ctx.workbench, project)?;
    }

    let user = flags
        .get("-u")
        .or_else(|| ctx.workbench.setting_opt(SettingKey::User))
        .map(str::to_string);

    let task = ctx.workbench.add_task(
        NewTask {
            name,
            description: flags.get("-d").unwrap_or_default().to_string(),
            project,
            user,
        },
        ctx.now,
    );

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::TaskCreate(task),
        Some(Label::TaskCreated.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct TaskUpdate;

impl CommandHandler for TaskUpdate {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, update(ctx, args))
    }
}

fn update(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i", "-n", "-d", "-s", "-p"])?;
    let id: u64 = flags.require_value("-i")?;

    let patch = TaskPatch {
        name: flags.get("-n").map(str::to_string),
        description: flags.get("-d").map(str::to_string),
        status: flags.parse_value("-s")?,
        project: flags.get("-p").map(str::to_string),
    };
    if patch.is_empty() {
        return Err(HandlerError::NothingToUpdate);
    }

    if ctx.workbench.task(id).is_none() {
        return Err(HandlerError::TaskNotFound(id));
    }
    if let Some(project) = &patch.project {
        ensure_project(ctx.workbench, project)?;
    }

    let task = ctx
        .workbench
        .update_task(id, patch, ctx.now)
        .ok_or(HandlerError::TaskNotFound(id))?;

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::TaskUpdate(task),
        Some(Label::TaskUpdated.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct TaskDelete;

impl CommandHandler for TaskDelete {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, delete(ctx, args))
    }
}

fn delete(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i"])?;
    let id: u64 = flags.require_value("-i")?;

    let task = ctx
        .workbench
        .remove_task(id)
        .ok_or(HandlerError::TaskNotFound(id))?;

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::TaskDelete(task),
        Some(Label::TaskDeleted.text(ctx.locale).to_string()),
    )))
}

#[derive(Debug, Default)]
pub struct TaskDetail;

impl CommandHandler for TaskDetail {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, detail(ctx, args))
    }
}

fn detail(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-i"])?;
    let id: u64 = flags.require_value("-i")?;

    let task = ctx
        .workbench
        .task(id)
        .cloned()
        .ok_or(HandlerError::TaskNotFound(id))?;

    Ok(CommandResult::display(DisplayInstruction::gui(
        Component::TaskDetail(task),
        true,
    )))
}

fn ensure_project(workbench: &Workbench, name: &str) -> HandlerResult<()> {
    match workbench.project_by_name(name) {
        Some(_) => Ok(()),
        None => Err(HandlerError::ProjectNotFound(name.to_string())),
    }
}
