// crates/kuma-core/src/result.rs - Structured command outcomes
//
// A command produces exactly one of two things: a modification of the
// console state, or an error message. The enum makes the "never both"
// rule a type-level fact; constructors keep display instructions coherent
// (only modals carry a title, only gui takeovers carry allow_return).
//
// WIRE SHAPE (serde):
//   {"modify": {"command_history_text": [...], "components": {...}}}
//   {"error": {"error_message": "..."}}

use serde::Serialize;

use crate::model::{Project, ProjectOverview, Setting, Task};

/// How a component is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowWay {
    /// Overlay dialog on top of the console
    Modal,
    /// Inline, in the console output area
    Command,
    /// Full-screen takeover
    Gui,
}

/// One line of `help` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub name: String,
    pub doc: String,
}

/// The view a command asks the console to show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Component {
    TaskList(Vec<Task>),
    TaskCreate(Task),
    TaskUpdate(Task),
    TaskDelete(Task),
    TaskDetail(Task),
    ProjectList(Vec<ProjectOverview>),
    ProjectCreate(Project),
    ProjectUpdate(Project),
    ProjectDelete(Project),
    ProjectDetail {
        overview: ProjectOverview,
        tasks: Vec<Task>,
    },
    SettingList(Vec<Setting>),
    SettingUpdate(Setting),
    Help(Vec<HelpEntry>),
}

impl Component {
    /// View name, as the front end registers it
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskList(_) => "TaskList",
            Self::TaskCreate(_) => "TaskCreate",
            Self::TaskUpdate(_) => "TaskUpdate",
            Self::TaskDelete(_) => "TaskDelete",
            Self::TaskDetail(_) => "TaskDetail",
            Self::ProjectList(_) => "ProjectList",
            Self::ProjectCreate(_) => "ProjectCreate",
            Self::ProjectUpdate(_) => "ProjectUpdate",
            Self::ProjectDelete(_) => "ProjectDelete",
            Self::ProjectDetail { .. } => "ProjectDetail",
            Self::SettingList(_) => "SettingList",
            Self::SettingUpdate(_) => "SettingUpdate",
            Self::Help(_) => "Help",
        }
    }
}

/// Which component to show and how
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayInstruction {
    show_component: Component,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal_title: Option<String>,
    show_way: ShowWay,
    #[serde(skip_serializing_if = "Option::is_none")]
    allow_return: Option<bool>,
}

impl DisplayInstruction {
    /// Show inline in the console output
    pub fn inline(component: Component) -> Self {
        Self {
            show_component: component,
            modal_title: None,
            show_way: ShowWay::Command,
            allow_return: None,
        }
    }

    /// Show as a modal overlay
    pub fn modal(component: Component, title: Option<String>) -> Self {
        Self {
            show_component: component,
            modal_title: title,
            show_way: ShowWay::Modal,
            allow_return: None,
        }
    }

    /// Take over the whole screen
    pub fn gui(component: Component, allow_return: bool) -> Self {
        Self {
            show_component: component,
            modal_title: None,
            show_way: ShowWay::Gui,
            allow_return: Some(allow_return),
        }
    }

    pub fn component(&self) -> &Component {
        &self.show_component
    }

    pub fn show_way(&self) -> ShowWay {
        self.show_way
    }

    pub fn modal_title(&self) -> Option<&str> {
        self.modal_title.as_deref()
    }

    /// Whether a gui takeover may go back to the console; false otherwise
    pub fn allow_return(&self) -> bool {
        self.allow_return.unwrap_or(false)
    }
}

/// Changes a successful command asks the console to make
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Modification {
    /// Wholesale replacement for the command history
    #[serde(skip_serializing_if = "Option::is_none")]
    command_history_text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<DisplayInstruction>,
}

impl Modification {
    pub fn history(&self) -> Option<&[String]> {
        self.command_history_text.as_deref()
    }

    pub fn display(&self) -> Option<&DisplayInstruction> {
        self.components.as_ref()
    }
}

/// A failed command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
    pub error_message: String,
}

/// Outcome of executing one command line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommandResult {
    #[serde(rename = "modify")]
    Modification(Modification),
    #[serde(rename = "error")]
    Error(CommandError),
}

impl CommandResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(CommandError {
            error_message: message.into(),
        })
    }

    /// Replace the history with `lines`
    pub fn replace_history(lines: Vec<String>) -> Self {
        Self::Modification(Modification {
            command_history_text: Some(lines),
            components: None,
        })
    }

    pub fn display(instruction: DisplayInstruction) -> Self {
        Self::Modification(Modification {
            command_history_text: None,
            components: Some(instruction),
        })
    }

    /// Replace the history and show a component in one step
    pub fn modify(history: Option<Vec<String>>, display: Option<DisplayInstruction>) -> Self {
        Self::Modification(Modification {
            command_history_text: history,
            components: display,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(&e.error_message),
            Self::Modification(_) => None,
        }
    }

    pub fn modification(&self) -> Option<&Modification> {
        match self {
            Self::Modification(m) => Some(m),
            Self::Error(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_wire_shape() {
        let result = CommandResult::error("命令bogus_cmd不存在");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "error": { "error_message": "命令bogus_cmd不存在" } })
        );
    }

    #[test]
    fn test_clear_wire_shape() {
        let result = CommandResult::replace_history(Vec::new());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "modify": { "command_history_text": [] } })
        );
    }

    #[test]
    fn test_display_wire_shape() {
        let result = CommandResult::display(DisplayInstruction::gui(Component::Help(vec![]), false));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "modify": {
                    "components": {
                        "show_component": { "kind": "help", "data": [] },
                        "show_way": "gui",
                        "allow_return": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_constructors_keep_fields_coherent() {
        let modal = DisplayInstruction::modal(Component::Help(vec![]), Some("t".into()));
        assert_eq!(modal.show_way(), ShowWay::Modal);
        assert_eq!(modal.modal_title(), Some("t"));
        assert!(!modal.allow_return());

        let inline = DisplayInstruction::inline(Component::Help(vec![]));
        assert_eq!(inline.modal_title(), None);

        let gui = DisplayInstruction::gui(Component::Help(vec![]), true);
        assert!(gui.allow_return());
    }

    #[test]
    fn test_accessors() {
        let err = CommandResult::error("boom");
        assert!(err.is_error());
        assert_eq!(err.error_message(), Some("boom"));
        assert!(err.modification().is_none());

        let ok = CommandResult::replace_history(vec!["a".into()]);
        assert!(!ok.is_error());
        assert_eq!(ok.modification().unwrap().history(), Some(&["a".to_string()][..]));
    }
}
