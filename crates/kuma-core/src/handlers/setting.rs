// crates/kuma-core/src/handlers/setting.rs - setting-list / setting-update

use crate::args::FlagArgs;
use crate::i18n::{Label, Locale};
use crate::model::{Setting, SettingKey};
use crate::registry::{CommandHandler, ExecutionContext};
use crate::result::{CommandResult, Component, DisplayInstruction};
use crate::store::Workbench;

use super::{HandlerError, HandlerResult, finish};

#[derive(Debug, Default)]
pub struct SettingList;

impl CommandHandler for SettingList {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, list(ctx, args))
    }
}

fn list(ctx: &ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    FlagArgs::parse(args, &[])?;

    let settings = SettingKey::ALL
        .into_iter()
        .map(|key| describe(ctx.workbench, key, ctx.locale))
        .collect();

    Ok(CommandResult::display(DisplayInstruction::gui(
        Component::SettingList(settings),
        true,
    )))
}

#[derive(Debug, Default)]
pub struct SettingUpdate;

impl CommandHandler for SettingUpdate {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult {
        finish(ctx.locale, update(ctx, args))
    }
}

fn update(ctx: &mut ExecutionContext<'_>, args: &[String]) -> HandlerResult<CommandResult> {
    let flags = FlagArgs::parse(args, &["-k", "-v"])?;
    let raw_key = flags.require("-k")?;
    let raw_value = flags.require("-v")?;

    let key: SettingKey = raw_key
        .parse()
        .map_err(|_| HandlerError::UnknownSetting(raw_key.to_string()))?;
    let value = key
        .normalize_value(raw_value)
        .ok_or_else(|| HandlerError::InvalidSetting {
            key: key.name().to_string(),
            value: raw_value.to_string(),
        })?;

    if key == SettingKey::DefaultProject
        && !value.is_empty()
        && ctx.workbench.project_by_name(&value).is_none()
    {
        return Err(HandlerError::ProjectNotFound(value));
    }

    ctx.workbench.set_setting(key, value);

    Ok(CommandResult::display(DisplayInstruction::modal(
        Component::SettingUpdate(describe(ctx.workbench, key, ctx.locale)),
        Some(Label::SettingUpdated.text(ctx.locale).to_string()),
    )))
}

fn describe(workbench: &Workbench, key: SettingKey, locale: Locale) -> Setting {
    Setting {
        key: key.name().to_string(),
        value: workbench.setting(key).to_string(),
        description: key.description(locale).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::project::ProjectCreate;
    use crate::handlers::testing::run;

    #[test]
    fn test_list_shows_defaults() {
        let mut wb = Workbench::default();
        let result = run(&SettingList, &mut wb, "");

        match result.modification().and_then(|m| m.display()).map(|d| d.component()) {
            Some(Component::SettingList(settings)) => {
                assert_eq!(settings.len(), SettingKey::ALL.len());
                let list_done = settings.iter().find(|s| s.key == "list_done").unwrap();
                assert_eq!(list_done.value, "true");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_update_normalizes_values() {
        let mut wb = Workbench::default();
        let result = run(&SettingUpdate, &mut wb, "-k list-done -v no");
        assert!(!result.is_error());
        assert_eq!(wb.setting(SettingKey::ListDone), "false");

        run(&SettingUpdate, &mut wb, "-k user -v Alice Smith");
        assert_eq!(wb.setting(SettingKey::User), "Alice Smith");
    }

    #[test]
    fn test_update_errors() {
        let mut wb = Workbench::default();

        assert_eq!(
            run(&SettingUpdate, &mut wb, "-k colour -v red").error_message(),
            Some("设置项colour不存在")
        );
        assert!(run(&SettingUpdate, &mut wb, "-k list_done -v sometimes").is_error());
        assert!(run(&SettingUpdate, &mut wb, "-k user").is_error());
        assert!(run(&SettingUpdate, &mut wb, "-k default_project -v ghost").is_error());

        run(&ProjectCreate, &mut wb, "-n kuma");
        assert!(!run(&SettingUpdate, &mut wb, "-k default_project -v kuma").is_error());
        assert_eq!(wb.setting(SettingKey::DefaultProject), "kuma");
    }

    #[test]
    fn test_none_unsets_default_project() {
        let mut wb = Workbench::default();
        run(&ProjectCreate, &mut wb, "-n kuma");
        run(&SettingUpdate, &mut wb, "-k default_project -v kuma");

        assert!(!run(&SettingUpdate, &mut wb, "-k default_project -v none").is_error());
        assert_eq!(wb.setting_opt(SettingKey::DefaultProject), None);

        run(&SettingUpdate, &mut wb, "-k user -v alice");
        run(&SettingUpdate, &mut wb, "-k user -v NONE");
        assert_eq!(wb.setting_opt(SettingKey::User), None);
    }
}
