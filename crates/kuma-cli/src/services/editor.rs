// crates/kuma-cli/src/services/editor.rs - Editor Integration Service
//
// Launches an external editor for document content.

use anyhow::{Context as AnyhowContext, Result};
use kuma_core::config::EditorConfig;
use std::env;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Handles text editor operations
///
/// EDITOR SELECTION HIERARCHY:
/// 1. `[editor] command` in .kuma/config.toml (KUMA_EDITOR lands here too)
/// 2. EDITOR environment variable
/// 3. Platform default (vim on Unix, notepad on Windows)
pub struct EditorService;

impl EditorService {
    pub fn get_editor_command(config: &EditorConfig) -> String {
        config
            .command
            .clone()
            .or_else(|| env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "vim".to_string()
                }
            })
    }

    /// Open a file in the configured editor and wait for it to exit
    pub fn open_file(path: &Path, config: &EditorConfig) -> Result<()> {
        let editor = Self::get_editor_command(config);

        // The command may carry its own flags, e.g. "code --wait"
        let mut parts = editor.split_whitespace();
        let program = parts.next().unwrap_or("vim");

        let status = Command::new(program)
            .args(parts)
            .args(&config.args)
            .arg(path)
            .status()
            .map_err(|e| anyhow::anyhow!(
                "Failed to launch editor '{}': {}\n\nTips:\n- Check that '{}' is installed and in PATH\n- Set KUMA_EDITOR or EDITOR environment variable",
                editor, e, program
            ))?;

        if !status.success() {
            return Err(anyhow::anyhow!(
                "Editor '{}' exited with error code: {:?}",
                editor,
                status.code()
            ));
        }

        Ok(())
    }

    /// Edit text in a scratch markdown file and return the result
    pub fn edit_text(initial: &str, config: &EditorConfig) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("kuma-")
            .suffix(".md")
            .tempfile()
            .context("Failed to create scratch file")?;
        file.write_all(initial.as_bytes())?;
        file.flush()?;

        Self::open_file(file.path(), config)?;

        std::fs::read_to_string(file.path())
            .with_context(|| format!("Failed to read back {}", file.path().display()))
    }
}
