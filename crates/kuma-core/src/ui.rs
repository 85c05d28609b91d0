// crates/kuma-core/src/ui.rs - Console state and the result applier
//
// `UiState` is the single owned container for everything a command result
// can change: the history lines, what is on screen, and which workspace has
// focus. Only `apply` and a handful of explicit interaction methods mutate
// it; there is no ambient global store.
//
// DISPLAY STATE MACHINE:
//
//   CommandView ──(modal instruction)──▶ ModalOverlay ──(dismiss_modal)──▶ CommandView
//        │
//        └──(gui instruction)──▶ GuiFullscreen ──(return_to_command, if allowed)──▶ CommandView
//
// Any display instruction moves to the state it names, from any state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::result::{CommandResult, Component, DisplayInstruction, ShowWay};

/// Errors from interaction methods that are not allowed in the current state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("This view does not allow returning to the console")]
    ReturnNotAllowed,

    #[error("A modal is open; dismiss it first")]
    ModalOpen,

    #[error("No modal is open")]
    NoModal,

    #[error("Unknown workspace '{0}'. Must be one of: side, console, none")]
    UnknownWorkspace(String),
}

/// Result type for UI interactions
pub type UiResult<T> = Result<T, UiError>;

/// Which panel currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveWorkspace {
    #[default]
    None,
    Side,
    Console,
}

impl fmt::Display for ActiveWorkspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Side => "side",
            Self::Console => "console",
        })
    }
}

impl FromStr for ActiveWorkspace {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "side" => Ok(Self::Side),
            "console" => Ok(Self::Console),
            other => Err(UiError::UnknownWorkspace(other.to_string())),
        }
    }
}

/// Coarse display mode, without the component payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    CommandView,
    ModalOverlay,
    GuiFullscreen,
}

/// What is currently on screen
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    CommandView {
        /// Component rendered inline below the history, if any
        inline: Option<Component>,
    },
    ModalOverlay {
        component: Component,
        title: Option<String>,
    },
    GuiFullscreen {
        component: Component,
        allow_return: bool,
    },
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::CommandView { inline: None }
    }
}

impl DisplayState {
    pub fn mode(&self) -> DisplayMode {
        match self {
            Self::CommandView { .. } => DisplayMode::CommandView,
            Self::ModalOverlay { .. } => DisplayMode::ModalOverlay,
            Self::GuiFullscreen { .. } => DisplayMode::GuiFullscreen,
        }
    }

    /// Component currently shown, in any mode
    pub fn component(&self) -> Option<&Component> {
        match self {
            Self::CommandView { inline } => inline.as_ref(),
            Self::ModalOverlay { component, .. } | Self::GuiFullscreen { component, .. } => {
                Some(component)
            }
        }
    }

    fn from_instruction(instruction: &DisplayInstruction) -> Self {
        let component = instruction.component().clone();
        match instruction.show_way() {
            ShowWay::Command => Self::CommandView {
                inline: Some(component),
            },
            ShowWay::Modal => Self::ModalOverlay {
                component,
                title: instruction.modal_title().map(str::to_string),
            },
            ShowWay::Gui => Self::GuiFullscreen {
                component,
                allow_return: instruction.allow_return(),
            },
        }
    }
}

/// Owned console state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    history: Vec<String>,
    display: DisplayState,
    workspace: ActiveWorkspace,
    last_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn mode(&self) -> DisplayMode {
        self.display.mode()
    }

    pub fn active_workspace(&self) -> ActiveWorkspace {
        self.workspace
    }

    /// Most recent error surfaced by `apply`
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_active_workspace(&mut self, workspace: ActiveWorkspace) {
        debug!(%workspace, "focus changed");
        self.workspace = workspace;
    }

    /// Record a typed line, dropping the oldest beyond `limit` (0 = unbounded)
    pub fn push_history(&mut self, line: impl Into<String>, limit: usize) {
        self.history.push(line.into());
        if limit > 0 && self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }

    /// Apply a command result
    ///
    /// Errors are surfaced through `last_error` and leave the display alone.
    /// A modification clears `last_error`, replaces the history wholesale if
    /// it carries one, and switches the display if it carries an instruction.
    /// Applying the same result twice ends in the same state.
    pub fn apply(&mut self, result: &CommandResult) {
        match result {
            CommandResult::Error(error) => {
                debug!(message = %error.error_message, "surfacing command error");
                self.last_error = Some(error.error_message.clone());
            }
            CommandResult::Modification(modification) => {
                self.last_error = None;

                if let Some(history) = modification.history() {
                    self.history = history.to_vec();
                }

                if let Some(instruction) = modification.display() {
                    debug!(
                        component = instruction.component().name(),
                        show_way = ?instruction.show_way(),
                        "switching display"
                    );
                    self.display = DisplayState::from_instruction(instruction);
                }
            }
        }
    }

    /// Leave a gui takeover
    ///
    /// No-op in the console view; refused in a modal and in a gui view that
    /// did not allow returning.
    pub fn return_to_command(&mut self) -> UiResult<()> {
        match &self.display {
            DisplayState::CommandView { .. } => Ok(()),
            DisplayState::ModalOverlay { .. } => Err(UiError::ModalOpen),
            DisplayState::GuiFullscreen { allow_return, .. } => {
                if !allow_return {
                    return Err(UiError::ReturnNotAllowed);
                }
                self.display = DisplayState::default();
                Ok(())
            }
        }
    }

    /// Close the open modal
    pub fn dismiss_modal(&mut self) -> UiResult<()> {
        match self.display {
            DisplayState::ModalOverlay { .. } => {
                self.display = DisplayState::default();
                Ok(())
            }
            _ => Err(UiError::NoModal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::HelpEntry;

    fn help() -> Component {
        Component::Help(vec![HelpEntry {
            name: "clear".into(),
            doc: "清空命令历史".into(),
        }])
    }

    #[test]
    fn test_initial_state() {
        let ui = UiState::new();
        assert_eq!(ui.mode(), DisplayMode::CommandView);
        assert_eq!(ui.active_workspace(), ActiveWorkspace::None);
        assert!(ui.history().is_empty());
        assert!(ui.display().component().is_none());
    }

    #[test]
    fn test_error_leaves_display_untouched() {
        let mut ui = UiState::new();
        ui.apply(&CommandResult::display(DisplayInstruction::inline(help())));
        let before = ui.display().clone();

        ui.apply(&CommandResult::error("命令x不存在"));
        assert_eq!(ui.display(), &before);
        assert_eq!(ui.last_error(), Some("命令x不存在"));
    }

    #[test]
    fn test_history_is_replaced_not_appended() {
        let mut ui = UiState::new();
        ui.push_history("a", 0);
        ui.push_history("b", 0);

        ui.apply(&CommandResult::replace_history(vec!["x".into()]));
        assert_eq!(ui.history(), &["x".to_string()]);

        ui.apply(&CommandResult::replace_history(Vec::new()));
        assert!(ui.history().is_empty());
    }

    #[test]
    fn test_history_limit() {
        let mut ui = UiState::new();
        for i in 0..5 {
            ui.push_history(i.to_string(), 3);
        }
        assert_eq!(ui.history(), &["2", "3", "4"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let results = [
            CommandResult::display(DisplayInstruction::modal(help(), Some("帮助".into()))),
            CommandResult::display(DisplayInstruction::gui(help(), true)),
            CommandResult::replace_history(Vec::new()),
            CommandResult::error("boom"),
        ];

        for result in results {
            let mut once = UiState::new();
            once.push_history("help", 0);
            once.apply(&result);

            let mut twice = once.clone();
            twice.apply(&result);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_modal_transition_and_dismiss() {
        let mut ui = UiState::new();
        ui.apply(&CommandResult::display(DisplayInstruction::modal(
            help(),
            Some("创建任务".into()),
        )));

        assert_eq!(ui.mode(), DisplayMode::ModalOverlay);
        match ui.display() {
            DisplayState::ModalOverlay { title, .. } => {
                assert_eq!(title.as_deref(), Some("创建任务"))
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(ui.return_to_command(), Err(UiError::ModalOpen));

        ui.dismiss_modal().unwrap();
        assert_eq!(ui.mode(), DisplayMode::CommandView);
        assert_eq!(ui.dismiss_modal(), Err(UiError::NoModal));
    }

    #[test]
    fn test_gui_without_return_is_sticky() {
        let mut ui = UiState::new();
        ui.apply(&CommandResult::display(DisplayInstruction::gui(help(), false)));

        assert_eq!(ui.mode(), DisplayMode::GuiFullscreen);
        assert_eq!(ui.return_to_command(), Err(UiError::ReturnNotAllowed));
        assert_eq!(ui.mode(), DisplayMode::GuiFullscreen);
    }

    #[test]
    fn test_gui_with_return() {
        let mut ui = UiState::new();
        ui.apply(&CommandResult::display(DisplayInstruction::gui(help(), true)));

        ui.return_to_command().unwrap();
        assert_eq!(ui.mode(), DisplayMode::CommandView);
        // returning again from the console view is harmless
        ui.return_to_command().unwrap();
    }

    #[test]
    fn test_workspace_focus() {
        let mut ui = UiState::new();
        ui.set_active_workspace("console".parse().unwrap());
        assert_eq!(ui.active_workspace(), ActiveWorkspace::Console);
        assert!("sidebar".parse::<ActiveWorkspace>().is_err());
    }
}
