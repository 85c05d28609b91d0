// crates/kuma-cli/src/services/workspace.rs - Workspace layout service
//
// Knows where kuma keeps its files inside a workspace directory and how to
// create that layout. It does not know what the files mean; the workbench
// store and the document database in kuma-core own their contents.
//
// LAYOUT:
// ```
// workspace/
// └── .kuma/
//     ├── config.toml      user configuration
//     ├── workbench.json   tasks, projects, settings
//     └── db/              document and image database
// ```

use anyhow::{Context as AnyhowContext, Result};
use kuma_core::config::{CONFIG_FILE, ConfigManager, KUMA_DIR};
use std::fs;
use std::path::{Path, PathBuf};

const WORKBENCH_FILE: &str = "workbench.json";
const DB_DIR: &str = "db";

/// Result of initialising a workspace
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    /// A config file already existed and was left alone
    AlreadyInitialized,
}

pub struct WorkspaceService {
    workspace_path: PathBuf,
}

impl WorkspaceService {
    /// The path is not checked here; `init` may be about to create it
    pub fn new(workspace_path: PathBuf) -> Self {
        Self { workspace_path }
    }

    pub fn kuma_dir(&self) -> PathBuf {
        self.workspace_path.join(KUMA_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.kuma_dir().join(CONFIG_FILE)
    }

    pub fn workbench_path(&self) -> PathBuf {
        self.kuma_dir().join(WORKBENCH_FILE)
    }

    pub fn database_path(&self) -> PathBuf {
        self.kuma_dir().join(DB_DIR)
    }

    /// Create `.kuma/` and a commented config file; never overwrites
    pub fn init_workspace(&self) -> Result<InitOutcome> {
        let kuma_dir = self.kuma_dir();
        fs::create_dir_all(&kuma_dir).with_context(|| {
            format!("Failed to create {} directory: {}", KUMA_DIR, kuma_dir.display())
        })?;

        let config_path = self.config_path();
        if config_path.exists() {
            return Ok(InitOutcome::AlreadyInitialized);
        }

        fs::write(&config_path, ConfigManager::generate_default_config())
            .with_context(|| format!("Failed to create {}", config_path.display()))?;

        Ok(InitOutcome::Created)
    }

    /// Write bytes to a path, creating parent directories
    pub fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, bytes).with_context(|| format!("Failed to write file: {}", path.display()))
    }
}
