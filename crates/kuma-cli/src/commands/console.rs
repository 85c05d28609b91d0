// crates/kuma-cli/src/commands/console.rs - Interactive console
//
// Lines starting with ':' are console controls handled here; everything
// else goes through the session as a command line.
//
// CONTROLS:
//   :back                  leave a full-screen view (when it allows it)
//   :close                 dismiss the open modal
//   :focus side|console|none
//   :quit                  exit (Ctrl-D works too)

use anyhow::Result;
use kuma_core::ActiveWorkspace;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::context::Context;
use crate::render;

#[derive(Debug, PartialEq)]
enum Control {
    Back,
    Close,
    Focus(ActiveWorkspace),
    Quit,
    Help,
}

/// `None` for ordinary command lines
fn parse_control(line: &str) -> Option<Result<Control, String>> {
    let rest = line.trim().strip_prefix(':')?;
    let mut words = rest.split_whitespace();

    let control = match (words.next(), words.next()) {
        (Some("back"), None) => Ok(Control::Back),
        (Some("close"), None) => Ok(Control::Close),
        (Some("quit" | "q"), None) => Ok(Control::Quit),
        (Some("help"), None) => Ok(Control::Help),
        (Some("focus"), Some(target)) => target
            .parse()
            .map(Control::Focus)
            .map_err(|e: kuma_core::ui::UiError| e.to_string()),
        _ => Err(format!("Unknown console control ':{}'. Try :help", rest.trim())),
    };
    Some(control)
}

pub async fn handle(ctx: &Context) -> Result<()> {
    render::configure_colors(&ctx.config().output.color);

    let mut session = ctx.session();
    let mut rl = DefaultEditor::new()?;
    let prompt = ctx.config().console.prompt.clone();
    let locale = ctx.locale();

    session.focus(ActiveWorkspace::Console);
    println!("kuma console - type `help` for commands, `:help` for console controls");

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(trimmed) {
                    debug!(error = %e, "failed to record line in editor history");
                }

                if let Some(control) = parse_control(trimmed) {
                    let outcome = match control {
                        Ok(Control::Quit) => break,
                        Ok(Control::Back) => session.ui_mut().return_to_command().map_err(|e| e.to_string()),
                        Ok(Control::Close) => session.ui_mut().dismiss_modal().map_err(|e| e.to_string()),
                        Ok(Control::Focus(target)) => {
                            session.focus(target);
                            println!("focus: {}", target);
                            continue;
                        }
                        Ok(Control::Help) => {
                            println!(":back  :close  :focus side|console|none  :quit");
                            continue;
                        }
                        Err(message) => Err(message),
                    };

                    match outcome {
                        Ok(()) => println!("{}", render::screen(session.ui(), locale)),
                        Err(message) => eprintln!("{}", render::error_line(&message)),
                    }
                    continue;
                }

                session.submit(trimmed).await;
                let screen = render::screen(session.ui(), locale);
                if !screen.is_empty() {
                    println!("{}", screen);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lines_are_not_controls() {
        assert_eq!(parse_control("task-list -s done"), None);
        assert_eq!(parse_control(""), None);
    }

    #[test]
    fn test_controls() {
        assert_eq!(parse_control(":back"), Some(Ok(Control::Back)));
        assert_eq!(parse_control("  :close "), Some(Ok(Control::Close)));
        assert_eq!(parse_control(":q"), Some(Ok(Control::Quit)));
        assert_eq!(
            parse_control(":focus side"),
            Some(Ok(Control::Focus(ActiveWorkspace::Side)))
        );
    }

    #[test]
    fn test_bad_controls() {
        assert!(matches!(parse_control(":focus sidebar"), Some(Err(_))));
        assert!(matches!(parse_control(":focus"), Some(Err(_))));
        assert!(matches!(parse_control(":back now"), Some(Err(_))));
        assert!(matches!(parse_control(":dance"), Some(Err(_))));
    }
}
