// crates/kuma-cli/src/render.rs - Terminal rendering of command output
//
// Turns components and console state into styled text. Everything here
// returns strings so the command modules decide where output goes.

use console::style;
use kuma_core::i18n::Label;
use kuma_core::model::{Project, ProjectOverview, Setting, Task};
use kuma_core::result::HelpEntry;
use kuma_core::{CommandResult, Component, DisplayState, Locale, UiState};

/// Apply the `[output] color` setting
pub fn configure_colors(color: &str) {
    match color {
        "always" => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        "never" => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        _ => {}
    }
}

/// Wire-format JSON for a result
pub fn result_json(result: &CommandResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}

pub fn error_line(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), style(message).red())
}

/// Human output for a one-shot command; `None` when there is nothing to show
pub fn result_text(result: &CommandResult, locale: Locale) -> Option<String> {
    let display = result.modification()?.display()?;
    let body = component(display.component(), locale);
    Some(match display.modal_title() {
        Some(title) => format!("{}\n{}", style(title).bold().cyan(), body),
        None => body,
    })
}

/// Localised header for a full-screen view
fn gui_title(c: &Component, locale: Locale) -> &'static str {
    match c {
        Component::TaskDetail(_) => Label::TaskDetail.text(locale),
        Component::ProjectDetail { .. } => Label::ProjectDetail.text(locale),
        other => other.name(),
    }
}

/// Full console screen for the interactive session
pub fn screen(ui: &UiState, locale: Locale) -> String {
    let mut out = String::new();

    match ui.display() {
        DisplayState::CommandView { inline } => {
            if let Some(c) = inline {
                out.push_str(&component(c, locale));
            }
        }
        DisplayState::ModalOverlay { component: c, title } => {
            let title = title.as_deref().unwrap_or(c.name());
            out.push_str(&format!("┌─ {} ─\n", style(title).bold().cyan()));
            for line in component(c, locale).lines() {
                out.push_str(&format!("│ {}\n", line));
            }
            out.push_str(&format!("└─ {}", style(":close").dim()));
        }
        DisplayState::GuiFullscreen {
            component: c,
            allow_return,
        } => {
            out.push_str(&format!(
                "{}\n",
                style(format!("══ {} ══", gui_title(c, locale))).bold().magenta()
            ));
            out.push_str(&component(c, locale));
            if *allow_return {
                out.push_str(&format!("\n{}", style(":back").dim()));
            }
        }
    }

    if let Some(error) = ui.last_error() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&error_line(error));
    }

    out
}

/// Text for one component
pub fn component(c: &Component, locale: Locale) -> String {
    match c {
        Component::TaskList(tasks) if tasks.is_empty() => {
            style(Label::NoTasks.text(locale)).dim().to_string()
        }
        Component::TaskList(tasks) => tasks
            .iter()
            .map(|t| task_line(t, locale))
            .collect::<Vec<_>>()
            .join("\n"),
        Component::TaskCreate(t)
        | Component::TaskUpdate(t)
        | Component::TaskDelete(t)
        | Component::TaskDetail(t) => task_detail(t, locale),
        Component::ProjectList(list) if list.is_empty() => {
            style(Label::NoProjects.text(locale)).dim().to_string()
        }
        Component::ProjectList(list) => list
            .iter()
            .map(overview_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Component::ProjectCreate(p) | Component::ProjectUpdate(p) | Component::ProjectDelete(p) => {
            project_detail(p)
        }
        Component::ProjectDetail { overview, tasks } => {
            let mut out = project_detail(&overview.project);
            out.push_str(&format!("\n{}/{}", overview.done_count, overview.task_count));
            for t in tasks {
                out.push_str(&format!("\n  {}", task_line(t, locale)));
            }
            out
        }
        Component::SettingList(settings) => settings
            .iter()
            .map(setting_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Component::SettingUpdate(s) => setting_line(s),
        Component::Help(entries) => help(entries),
    }
}

fn task_line(t: &Task, locale: Locale) -> String {
    let status = t.status.label(locale);
    let status = if t.status.is_over() {
        style(status).green()
    } else {
        style(status).yellow()
    };

    let mut line = format!("{} [{}] {}", style(format!("#{}", t.id)).dim(), status, t.name);
    if let Some(project) = &t.project {
        line.push_str(&format!(" {}", style(format!("({})", project)).cyan()));
    }
    if let Some(user) = &t.user {
        line.push_str(&format!(" @{}", user));
    }
    line
}

fn task_detail(t: &Task, locale: Locale) -> String {
    let mut out = task_line(t, locale);
    if !t.description.is_empty() {
        out.push_str(&format!("\n{}", t.description));
    }
    out.push_str(&format!(
        "\n{}",
        style(format!(
            "{} / {}",
            t.created_at.format("%Y-%m-%d %H:%M"),
            t.updated_at.format("%Y-%m-%d %H:%M")
        ))
        .dim()
    ));
    out
}

fn overview_line(o: &ProjectOverview) -> String {
    format!(
        "{} {} {}",
        style(format!("#{}", o.project.id)).dim(),
        style(&o.project.name).bold(),
        style(format!("{}/{}", o.done_count, o.task_count)).dim()
    )
}

fn project_detail(p: &Project) -> String {
    let mut out = format!("{} {}", style(format!("#{}", p.id)).dim(), style(&p.name).bold());
    if !p.description.is_empty() {
        out.push_str(&format!("\n{}", p.description));
    }
    out
}

fn setting_line(s: &Setting) -> String {
    format!(
        "{} = {}  {}",
        style(&s.key).bold(),
        s.value,
        style(format!("# {}", s.description)).dim()
    )
}

fn help(entries: &[HelpEntry]) -> String {
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| format!("{}  {}", style(format!("{:width$}", e.name)).bold(), e.doc))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuma_core::DisplayInstruction;

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_clear_has_no_text() {
        let result = CommandResult::replace_history(Vec::new());
        assert_eq!(result_text(&result, Locale::Zh), None);
        assert_eq!(result_json(&result).unwrap(), r#"{"modify":{"command_history_text":[]}}"#);
    }

    #[test]
    fn test_help_is_aligned() {
        plain();
        let entries = vec![
            HelpEntry {
                name: "help".to_string(),
                doc: "a".to_string(),
            },
            HelpEntry {
                name: "task-list".to_string(),
                doc: "b".to_string(),
            },
        ];
        let result = CommandResult::display(DisplayInstruction::inline(Component::Help(entries)));
        assert_eq!(
            result_text(&result, Locale::En).unwrap(),
            "help       a\ntask-list  b"
        );
    }

    #[test]
    fn test_empty_lists_are_labelled() {
        plain();
        assert_eq!(component(&Component::TaskList(Vec::new()), Locale::En), "No tasks");
        assert_eq!(
            component(&Component::ProjectList(Vec::new()), Locale::En),
            Label::NoProjects.text(Locale::En)
        );
    }

    #[tokio::test]
    async fn test_gui_header_is_localised() {
        use kuma_core::{Dispatcher, Session, WorkbenchStore};

        plain();
        let mut session = Session::new(Dispatcher::standard(WorkbenchStore::in_memory(), Locale::En));
        session.submit("project-create -n kuma").await;
        session.submit("project-detail -i 1").await;
        assert!(screen(session.ui(), Locale::En).starts_with("══ Project details ══\n"));

        session.submit("task-create -n a").await;
        session.submit("task-detail -i 1").await;
        assert!(screen(session.ui(), Locale::Zh).starts_with("══ 任务详情 ══\n"));
    }

    #[test]
    fn test_screen_shows_error_under_view() {
        plain();
        let mut ui = UiState::new();
        ui.apply(&CommandResult::display(DisplayInstruction::inline(
            Component::TaskList(Vec::new()),
        )));
        ui.apply(&CommandResult::error("boom"));
        assert_eq!(screen(&ui, Locale::En), "No tasks\n✗ boom");
    }
}
