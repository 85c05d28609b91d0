// crates/kuma-core/src/handlers/mod.rs - Command handler implementations
//
// One module per command family, mirroring the vocabulary:
// - task: task-list, task-create, task-update, task-delete, task-detail
// - project: project-list, project-create, project-update, project-delete, project-detail
// - setting: setting-list, setting-update
// - console: help, clear
//
// Handlers do their work in a function returning `HandlerResult`, so `?`
// can be used on argument and lookup failures; the `CommandHandler` impl
// then turns any `HandlerError` into a localised error result.

use thiserror::Error;

use crate::args::ArgError;
use crate::command::CommandId;
use crate::i18n::{Locale, Message};
use crate::registry::{Registry, factory};
use crate::result::CommandResult;

pub mod console;
pub mod project;
pub mod setting;
pub mod task;

/// Domain failures a handler reports back as an error result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandlerError {
    #[error(transparent)]
    Arg(#[from] ArgError),

    #[error("Task {0} does not exist")]
    TaskNotFound(u64),

    #[error("Project {0} does not exist")]
    ProjectNotFound(String),

    #[error("Project {0} already exists")]
    ProjectExists(String),

    #[error("Project {name} still has {count} task(s)")]
    ProjectHasTasks { name: String, count: usize },

    #[error("Setting {0} does not exist")]
    UnknownSetting(String),

    #[error("Invalid value for setting {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("Nothing to update")]
    NothingToUpdate,

    #[error("Command {0} does not exist")]
    UnknownCommand(String),
}

impl HandlerError {
    pub fn message(&self) -> Message<'_> {
        match self {
            Self::Arg(e) => e.message(),
            Self::TaskNotFound(id) => Message::TaskNotFound(*id),
            Self::ProjectNotFound(name) => Message::ProjectNotFound(name),
            Self::ProjectExists(name) => Message::ProjectExists(name),
            Self::ProjectHasTasks { name, count } => Message::ProjectHasTasks {
                name,
                count: *count,
            },
            Self::UnknownSetting(key) => Message::UnknownSetting(key),
            Self::InvalidSetting { key, value } => Message::InvalidSetting { key, value },
            Self::NothingToUpdate => Message::NothingToUpdate,
            Self::UnknownCommand(name) => Message::CommandNotFound(name),
        }
    }
}

/// Result type for handler bodies
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Collapse a handler body's outcome into a command result
pub(crate) fn finish(locale: Locale, outcome: HandlerResult<CommandResult>) -> CommandResult {
    outcome.unwrap_or_else(|e| CommandResult::error(e.message().localize(locale)))
}

/// Register a handler for every command in the vocabulary
pub fn register_all(registry: &mut Registry) {
    registry.register(CommandId::TaskList, factory::<task::TaskList>);
    registry.register(CommandId::TaskCreate, factory::<task::TaskCreate>);
    registry.register(CommandId::TaskUpdate, factory::<task::TaskUpdate>);
    registry.register(CommandId::TaskDelete, factory::<task::TaskDelete>);
    registry.register(CommandId::TaskDetail, factory::<task::TaskDetail>);
    registry.register(CommandId::ProjectList, factory::<project::ProjectList>);
    registry.register(CommandId::ProjectCreate, factory::<project::ProjectCreate>);
    registry.register(CommandId::ProjectUpdate, factory::<project::ProjectUpdate>);
    registry.register(CommandId::ProjectDelete, factory::<project::ProjectDelete>);
    registry.register(CommandId::ProjectDetail, factory::<project::ProjectDetail>);
    registry.register(CommandId::SettingList, factory::<setting::SettingList>);
    registry.register(CommandId::SettingUpdate, factory::<setting::SettingUpdate>);
    registry.register(CommandId::Help, factory::<console::Help>);
    registry.register(CommandId::Clear, factory::<console::Clear>);
}
