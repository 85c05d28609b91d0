// crates/kuma-core/src/dispatcher.rs - parse → lookup → resolve → invoke
//
// The dispatcher is the only entry point for running a command line. It
// never panics on user input and always hands back a `CommandResult`:
//
// 1. Parse the raw line into name and argument tokens
// 2. Normalise the name (hyphens → underscores)
// 3. Look the name up in the registry
// 4. Unknown name → error result naming the normalised command
// 5. Known name → resolve the handler, run it, persist the workbench if the
//    handler changed it
//
// Resolution is asynchronous because a handler depends on the workbench,
// which is loaded from disk the first time any command needs it. Console
// commands (`help`, `clear`) run against a scratch workbench and never touch
// the store. Storage failures on load or save come back as error results.
//
// ORDERING: `execute` takes `&mut self`, so commands on one dispatcher run
// strictly one after another, in submission order.

use chrono::Utc;
use tracing::{debug, warn};

use crate::i18n::{Locale, Message};
use crate::parser;
use crate::registry::{CommandHandler, ExecutionContext, HandlerFactory, Registry};
use crate::result::CommandResult;
use crate::store::{StoreResult, Workbench, WorkbenchStore};

pub struct Dispatcher {
    registry: Registry,
    store: WorkbenchStore,
    workbench: Option<Workbench>,
    locale: Locale,
}

impl Dispatcher {
    pub fn new(registry: Registry, store: WorkbenchStore, locale: Locale) -> Self {
        Self {
            registry,
            store,
            workbench: None,
            locale,
        }
    }

    /// Standard registry over the given store
    pub fn standard(store: WorkbenchStore, locale: Locale) -> Self {
        Self::new(Registry::standard(), store, locale)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Workbench as last loaded, if any command has needed it yet
    pub fn workbench(&self) -> Option<&Workbench> {
        self.workbench.as_ref()
    }

    /// Run one command line
    pub async fn execute(&mut self, line: &str) -> CommandResult {
        let parsed = parser::parse(line);
        let key = parsed.key();

        let Some((id, factory)) = self.registry.lookup(&key) else {
            debug!(command = %key, "unrecognised command");
            return CommandResult::error(Message::CommandNotFound(&key).localize(self.locale));
        };

        debug!(command = %id, args = ?parsed.args, "dispatching");

        if !id.needs_workbench() {
            let mut scratch = Workbench::default();
            let mut ctx = ExecutionContext {
                locale: self.locale,
                now: Utc::now(),
                workbench: &mut scratch,
            };
            return factory().execute(&mut ctx, &parsed.args);
        }

        let handler = match self.resolve(factory).await {
            Ok(handler) => handler,
            Err(e) => {
                warn!(command = %id, error = %e, "failed to load workbench");
                return self.storage_error(&e);
            }
        };

        let Some(workbench) = self.workbench.as_mut() else {
            return CommandResult::error(
                Message::StorageFailure("workbench unavailable").localize(self.locale),
            );
        };

        let mut ctx = ExecutionContext {
            locale: self.locale,
            now: Utc::now(),
            workbench,
        };
        let result = handler.execute(&mut ctx, &parsed.args);

        if workbench_dirty(&self.workbench) {
            if let Err(e) = self.persist().await {
                warn!(command = %id, error = %e, "failed to save workbench");
                // Drop the unsaved state so the next command sees what is on disk
                self.workbench = None;
                return self.storage_error(&e);
            }
        }

        result
    }

    /// Make sure the handler's dependencies are loaded, then build it
    async fn resolve(&mut self, factory: HandlerFactory) -> StoreResult<Box<dyn CommandHandler>> {
        if self.workbench.is_none() {
            self.workbench = Some(self.store.load().await?);
        }
        Ok(factory())
    }

    async fn persist(&mut self) -> StoreResult<()> {
        if let Some(workbench) = self.workbench.as_mut() {
            self.store.save(workbench).await?;
            workbench.mark_clean();
        }
        Ok(())
    }

    fn storage_error(&self, error: &dyn std::error::Error) -> CommandResult {
        CommandResult::error(Message::StorageFailure(&error.to_string()).localize(self.locale))
    }
}

fn workbench_dirty(workbench: &Option<Workbench>) -> bool {
    workbench.as_ref().is_some_and(Workbench::is_dirty)
}
