// crates/kuma-cli/src/main.rs - CLI Application Entry Point
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │ (main function)  │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │  kuma-core Session  │
//                        │ (workspace+conf) │    │  / Database         │
//                        └──────────────────┘    └─────────────────────┘
//
// `kuma run` and `kuma console` both drive the same dispatcher; run is the
// one-shot (or batch from stdin) form, console the interactive one.
//
// EXAMPLE USAGE:
// ```bash
// kuma init                                   # Initialize workspace here
// kuma run project-create -n kuma             # One command
// kuma run --json task-list | jq '.modify'    # Wire-format output
// printf 'help\nclear\n' | kuma run           # Batch from stdin
// kuma console                                # Interactive console
// ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod render;
mod services;
mod stdin;

use cli::{Cli, Commands};
use context::Context;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let Cli {
        workspace,
        json,
        command,
    } = cli;

    match command {
        // init creates the workspace, so it runs before a context exists
        Commands::Init { path } => commands::init::handle(path.or(workspace)),
        Commands::Run { line } => {
            let (ctx, json) = open_context(workspace, json)?;
            commands::run::handle(&ctx, line, json).await
        }
        Commands::Console => {
            let (ctx, _) = open_context(workspace, json)?;
            commands::console::handle(&ctx).await
        }
        Commands::Doc(cmd) => {
            let (ctx, json) = open_context(workspace, json)?;
            commands::doc::handle(&ctx, cmd, json).await
        }
        Commands::Image(cmd) => {
            let (ctx, json) = open_context(workspace, json)?;
            commands::image::handle(&ctx, cmd, json).await
        }
    }
}

/// Build the context and decide on JSON output (flag or `[output]` config)
fn open_context(workspace: Option<PathBuf>, json_flag: bool) -> Result<(Context, bool)> {
    let ctx = Context::new(workspace)?;
    let json = json_flag || ctx.config().json_output();
    Ok((ctx, json))
}

/// Log to stderr, filtered by KUMA_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("KUMA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
