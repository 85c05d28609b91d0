// crates/kuma-core/src/lib.rs - Kuma core library
//
// Command dispatch and result application for the kuma task manager.
//
// PIPELINE:
//   raw line → parser → dispatcher (registry lookup, handler resolution)
//            → handler → CommandResult → UiState::apply
//
// The front end only talks to `Session` (or `Dispatcher` directly for
// one-shot execution) and renders whatever `UiState` ends up holding.

//! Command dispatch core, task/project store, document database and UI
//! state for the kuma task manager.

pub mod args;
pub mod command;
pub mod config;
pub mod db;
pub mod dispatcher;
pub mod handlers;
pub mod i18n;
pub mod model;
pub mod parser;
pub mod registry;
pub mod result;
pub mod session;
pub mod store;
pub mod ui;

pub use command::CommandId;
pub use config::{ConfigError, ConfigManager, ConfigResult, KumaConfig};
pub use db::{Database, DbError, DocumentData};
pub use dispatcher::Dispatcher;
pub use i18n::Locale;
pub use registry::{CommandHandler, ExecutionContext, HandlerFactory, Registry};
pub use result::{CommandResult, Component, DisplayInstruction, ShowWay};
pub use session::Session;
pub use store::{Workbench, WorkbenchStore};
pub use ui::{ActiveWorkspace, DisplayMode, DisplayState, UiState};
