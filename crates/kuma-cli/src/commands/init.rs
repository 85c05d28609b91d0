// crates/kuma-cli/src/commands/init.rs - Workspace Initialization Command
//
// The init command doesn't require an existing workspace, so it runs before
// a Context is built.

use anyhow::{Context as AnyhowContext, Result};
use std::env;
use std::path::PathBuf;

use crate::services::WorkspaceService;
use crate::services::workspace::InitOutcome;

/// Initialize a kuma workspace
///
/// CREATED STRUCTURE:
/// ```
/// workspace/
/// └── .kuma/
///     └── config.toml
/// ```
///
/// The workbench file and the document database are created lazily by the
/// first command that writes to them. An existing config is never touched.
pub fn handle(path: Option<PathBuf>) -> Result<()> {
    let workspace_path = match path {
        Some(path) => path,
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    let service = WorkspaceService::new(workspace_path.clone());
    match service.init_workspace()? {
        InitOutcome::Created => {
            println!("✅ Initialized kuma workspace at: {}", workspace_path.display());
            println!("📁 Created .kuma/ directory with configuration");
            println!();
            println!("💡 Next steps:");
            println!("   kuma run project-create -n inbox");
            println!("   kuma run task-create -n \"First task\" -p inbox");
            println!("   kuma console");
        }
        InitOutcome::AlreadyInitialized => {
            println!(
                "Workspace already initialized at: {}",
                workspace_path.display()
            );
        }
    }

    Ok(())
}
