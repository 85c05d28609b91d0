// crates/kuma-cli/src/commands/run.rs - One-shot and batch execution
//
// `kuma run LINE...` joins its arguments into one command line. Without
// arguments every stdin line is executed in order against one dispatcher,
// so later lines see what earlier ones changed.
//
// EXIT STATUS: non-zero when any line produced an error result. Remaining
// lines still run.

use anyhow::Result;
use tracing::info;

use crate::context::Context;
use crate::render;

pub async fn handle(ctx: &Context, line: Vec<String>, json: bool) -> Result<()> {
    let lines = if line.is_empty() {
        crate::stdin::read_lines_from_stdin()?
    } else {
        vec![line.join(" ")]
    };

    render::configure_colors(&ctx.config().output.color);

    let mut dispatcher = ctx.dispatcher();
    let mut failures = 0;

    for line in &lines {
        let result = dispatcher.execute(line).await;

        if json {
            println!("{}", render::result_json(&result)?);
        } else if let Some(message) = result.error_message() {
            eprintln!("{}", render::error_line(message));
        } else if let Some(text) = render::result_text(&result, ctx.locale()) {
            println!("{}", text);
        }

        if result.is_error() {
            failures += 1;
        }
    }

    info!(lines = lines.len(), failures, "batch finished");

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
