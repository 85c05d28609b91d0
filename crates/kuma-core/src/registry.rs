// crates/kuma-core/src/registry.rs - Command name to handler mapping
//
// Lookup goes through two steps: the registry yields a zero-argument
// factory for the command, and the factory yields the handler that is then
// invoked with the execution context and the argument tokens. The factory
// step is where a handler's construction cost lives; the dispatcher only
// pays it for commands that are actually run.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use thiserror::Error;

use crate::command::{self, CommandId};
use crate::handlers;
use crate::i18n::Locale;
use crate::result::CommandResult;
use crate::store::Workbench;

/// Errors from registry consistency checks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Commands without a handler: {}", .0.iter().map(|c| c.name()).collect::<Vec<_>>().join(", "))]
    MissingHandlers(Vec<CommandId>),
}

/// Everything a handler may use while executing
pub struct ExecutionContext<'a> {
    pub locale: Locale,
    pub now: DateTime<Utc>,
    pub workbench: &'a mut Workbench,
}

/// Implementation of one console command
///
/// Handlers turn arguments into a `CommandResult`. They may change the
/// workbench but never call back into the dispatcher.
pub trait CommandHandler: Send + Sync {
    fn execute(&self, ctx: &mut ExecutionContext<'_>, args: &[String]) -> CommandResult;
}

/// Produces a handler on demand
pub type HandlerFactory = fn() -> Box<dyn CommandHandler>;

/// Factory for any default-constructible handler
pub fn factory<H: CommandHandler + Default + 'static>() -> Box<dyn CommandHandler> {
    Box::new(H::default())
}

/// Mapping from command identifiers to handler factories
#[derive(Default, Clone)]
pub struct Registry {
    factories: IndexMap<CommandId, HandlerFactory>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a handler for every command in the vocabulary
    pub fn standard() -> Self {
        let mut registry = Self::new();
        handlers::register_all(&mut registry);
        registry
    }

    pub fn register(&mut self, id: CommandId, factory: HandlerFactory) {
        self.factories.insert(id, factory);
    }

    /// Find the factory for a typed command name
    ///
    /// The name is normalised first, so both "task-list" and "task_list"
    /// resolve. Names outside the vocabulary, and vocabulary names without a
    /// registered handler, both yield `None`.
    pub fn lookup(&self, name: &str) -> Option<(CommandId, HandlerFactory)> {
        let id = CommandId::from_key(&command::normalize(name))?;
        self.factories.get(&id).map(|factory| (id, *factory))
    }

    pub fn contains(&self, id: CommandId) -> bool {
        self.factories.contains_key(&id)
    }

    /// Registered commands in registration order
    pub fn commands(&self) -> impl Iterator<Item = CommandId> + '_ {
        self.factories.keys().copied()
    }

    /// Check that every vocabulary command has a handler
    pub fn verify(&self) -> Result<(), RegistryError> {
        let missing: Vec<CommandId> = CommandId::ALL
            .into_iter()
            .filter(|id| !self.contains(*id))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::MissingHandlers(missing))
        }
    }
}
