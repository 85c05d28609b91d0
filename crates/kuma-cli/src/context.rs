use anyhow::{Context as AnyhowContext, Result};
use kuma_core::{
    ConfigManager, Database, Dispatcher, KumaConfig, Locale, Session, WorkbenchStore,
};
use std::env;
use std::path::PathBuf;
use tracing::debug;

use crate::services::WorkspaceService;

/// Application context passed to command handlers
///
/// Holds the resolved workspace and configuration and builds the core
/// objects (session, dispatcher, database) the commands run against.
pub struct Context {
    pub workspace_service: WorkspaceService,
    config: KumaConfig,
}

impl Context {
    pub fn new(workspace_path: Option<PathBuf>) -> Result<Self> {
        // Precedence: CLI arg > environment > current directory
        let workspace_path = workspace_path
            .or_else(|| env::var_os("KUMA_WORKSPACE").map(PathBuf::from));
        let workspace_path = match workspace_path {
            Some(path) => path,
            None => env::current_dir().context("Failed to determine current directory")?,
        };

        let config = ConfigManager::load_config(Some(&workspace_path)).with_context(|| {
            format!("Failed to load configuration for {}", workspace_path.display())
        })?;
        debug!(workspace = %workspace_path.display(), locale = %config.locale, "context ready");

        Ok(Self {
            workspace_service: WorkspaceService::new(workspace_path),
            config,
        })
    }

    pub fn config(&self) -> &KumaConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::standard(
            WorkbenchStore::open(self.workspace_service.workbench_path()),
            self.locale(),
        )
    }

    pub fn session(&self) -> Session {
        Session::new(self.dispatcher()).with_history_limit(self.config.console.history_limit)
    }

    pub fn database(&self) -> Database {
        Database::new(self.workspace_service.database_path())
    }
}
