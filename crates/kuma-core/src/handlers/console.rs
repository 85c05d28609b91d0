// crates/kuma-core/src/handlers/console.rs - help and clear

use crate::args::ArgError;
use crate::command::CommandId;
use crate::registry::{CommandHandler, ExecutionContext};
use crate::result::{CommandResult, Component, DisplayInstruction, HelpEntry};

use super::{HandlerError, HandlerResult, finish};

/// `help` lists every command; `help <command>` shows just that one
#[derive(Debug, Default)]
pub struct Help;

impl CommandHandler for Help {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, help(ctx, args))
    }
}

fn help(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let entry = |id: CommandId| HelpEntry {
        name: id.name().to_string(),
        doc: id.doc(ctx.locale).to_string(),
    };

    let entries = match args {
        [] => CommandId::ALL.into_iter().map(entry).collect(),
        [topic] => {
            let id = topic.parse::<CommandId>().map_err(HandlerError::UnknownCommand)?;
            vec![entry(id)]
        }
        [_, extra, ..] => {
            return Err(ArgError::UnexpectedToken(extra.clone()).into());
        }
    };

    Ok(CommandResult::display(DisplayInstruction::inline(
        Component::Help(entries),
    )))
}

/// `clear` empties the command history; arguments are ignored
#[derive(Debug, Default)]
pub struct Clear;

impl CommandHandler for Clear {
    fn execute(&self, _ctx: &mut ExecutionContext<'_>, _args: &[String]) -> CommandResult {
        CommandResult::replace_history(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{run, run_in};
    use crate::i18n::Locale;
    use crate::store::Workbench;

    fn entries(result: &CommandResult) -> Vec<HelpEntry> {
        match result.modification().and_then(|m| m.display()).map(|d| d.component()) {
            Some(Component::Help(entries)) => entries.clone(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut wb = Workbench::default();
        let all = entries(&run(&Help, &mut wb, ""));
        assert_eq!(all.len(), CommandId::ALL.len());
        assert_eq!(all[0].name, "task-list");
        assert_eq!(all.last().unwrap().doc, "清空命令历史");
    }

    #[test]
    fn test_help_for_one_command() {
        let mut wb = Workbench::default();
        let one = entries(&run_in(&Help, &mut wb, "task_create", Locale::En));
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "task-create");
        assert!(one[0].doc.starts_with("Create a task"));
    }

    #[test]
    fn test_help_for_unknown_command() {
        let mut wb = Workbench::default();
        assert_eq!(
            run(&Help, &mut wb, "bogus-cmd").error_message(),
            Some("命令bogus_cmd不存在")
        );
        assert!(run(&Help, &mut wb, "clear help").is_error());
    }

    #[test]
    fn test_clear_empties_history() {
        let mut wb = Workbench::default();
        for args in ["", "whatever -x"] {
            let result = run(&Clear, &mut wb, args);
            assert_eq!(result.modification().unwrap().history(), Some(&[][..]));
            assert!(result.modification().unwrap().display().is_none());
        }
        assert!(!wb.is_dirty());
    }
}
