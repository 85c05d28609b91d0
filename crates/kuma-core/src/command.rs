// crates/kuma-core/src/command.rs - The closed command vocabulary
//
// Commands are typed by users in their hyphenated form ("task-create") and
// looked up by their underscore form ("task_create"). The vocabulary is a
// closed enum: there is no string-keyed method lookup anywhere in the
// dispatch path, only `CommandId` values and the registry that maps them to
// handler factories.

use std::fmt;
use std::str::FromStr;

use crate::i18n::{self, Locale};

/// Identifier of a recognised console command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandId {
    TaskList,
    TaskCreate,
    TaskUpdate,
    TaskDelete,
    TaskDetail,
    ProjectList,
    ProjectCreate,
    ProjectUpdate,
    ProjectDelete,
    ProjectDetail,
    SettingList,
    SettingUpdate,
    Help,
    Clear,
}

impl CommandId {
    /// Every command, in the order the console publishes them
    pub const ALL: [CommandId; 14] = [
        Self::TaskList,
        Self::TaskCreate,
        Self::TaskUpdate,
        Self::TaskDelete,
        Self::TaskDetail,
        Self::ProjectList,
        Self::ProjectCreate,
        Self::ProjectUpdate,
        Self::ProjectDelete,
        Self::ProjectDetail,
        Self::SettingList,
        Self::SettingUpdate,
        Self::Help,
        Self::Clear,
    ];

    /// Public, hyphenated name shown to users
    pub fn name(self) -> &'static str {
        match self {
            Self::TaskList => "task-list",
            Self::TaskCreate => "task-create",
            Self::TaskUpdate => "task-update",
            Self::TaskDelete => "task-delete",
            Self::TaskDetail => "task-detail",
            Self::ProjectList => "project-list",
            Self::ProjectCreate => "project-create",
            Self::ProjectUpdate => "project-update",
            Self::ProjectDelete => "project-delete",
            Self::ProjectDetail => "project-detail",
            Self::SettingList => "setting-list",
            Self::SettingUpdate => "setting-update",
            Self::Help => "help",
            Self::Clear => "clear",
        }
    }

    /// Whether the command reads or writes the workbench
    ///
    /// `help` and `clear` only touch the console, so they run without
    /// loading or saving workbench state.
    pub fn needs_workbench(self) -> bool {
        !matches!(self, Self::Help | Self::Clear)
    }

    /// Internal lookup key (hyphens replaced by underscores)
    pub fn key(self) -> &'static str {
        match self {
            Self::TaskList => "task_list",
            Self::TaskCreate => "task_create",
            Self::TaskUpdate => "task_update",
            Self::TaskDelete => "task_delete",
            Self::TaskDetail => "task_detail",
            Self::ProjectList => "project_list",
            Self::ProjectCreate => "project_create",
            Self::ProjectUpdate => "project_update",
            Self::ProjectDelete => "project_delete",
            Self::ProjectDetail => "project_detail",
            Self::SettingList => "setting_list",
            Self::SettingUpdate => "setting_update",
            Self::Help => "help",
            Self::Clear => "clear",
        }
    }

    /// Resolve an already-normalised key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Localised help string
    pub fn doc(self, locale: Locale) -> &'static str {
        i18n::command_doc(self, locale)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandId {
    type Err = String;

    /// Accepts both the hyphenated and the underscore form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::from_key(&key).ok_or(key)
    }
}

/// Convert a typed command name to its lookup key
///
/// Every hyphen is replaced, so "bogus-cmd-x" becomes "bogus_cmd_x".
pub fn normalize(name: &str) -> String {
    name.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_key_agree() {
        for id in CommandId::ALL {
            assert_eq!(normalize(id.name()), id.key());
            assert_eq!(CommandId::from_key(id.key()), Some(id));
            assert_eq!(id.name().parse::<CommandId>(), Ok(id));
        }
    }

    #[test]
    fn test_normalize_replaces_every_hyphen() {
        assert_eq!(normalize("task-create"), "task_create");
        assert_eq!(normalize("a-b-c"), "a_b_c");
        assert_eq!(normalize("clear"), "clear");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_only_console_commands_skip_workbench() {
        let skipping: Vec<_> = CommandId::ALL.into_iter().filter(|id| !id.needs_workbench()).collect();
        assert_eq!(skipping, vec![CommandId::Help, CommandId::Clear]);
    }

    #[test]
    fn test_unknown_name_reports_normalized_key() {
        assert_eq!("bogus-cmd".parse::<CommandId>(), Err("bogus_cmd".to_string()));
    }
}
