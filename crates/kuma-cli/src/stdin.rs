// crates/kuma-cli/src/stdin.rs - Centralized STDIN handling utility
//
// Follows Unix conventions: read from stdin when no positional args provided.

use anyhow::{Context as AnyhowContext, Result};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

/// Read command lines from stdin for batch execution
///
/// ```bash
/// printf 'project-create -n kuma\ntask-list\n' | kuma run
/// ```
pub fn read_lines_from_stdin() -> Result<Vec<String>> {
    if io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No command given and no piped input detected.\n\nExamples:\n  kuma run task-list\n  echo \"task-list\" | kuma run"
        ));
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let lines: Vec<String> = buffer
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(anyhow::anyhow!("No input lines provided"));
    }

    Ok(lines)
}

/// Read a file's bytes, or all of stdin when no file is given
pub fn read_bytes_or_stdin(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            if io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "No file provided. Either provide a path or pipe data.\n\nExamples:\n  kuma image add shot.png\n  cat shot.png | kuma image add"
                ));
            }

            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;

            if buffer.is_empty() {
                return Err(anyhow::anyhow!("Empty input provided"));
            }

            Ok(buffer)
        }
    }
}
