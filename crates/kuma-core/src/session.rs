// crates/kuma-core/src/session.rs - Dispatcher plus the state it drives

use tracing::debug;

use crate::dispatcher::Dispatcher;
use crate::result::CommandResult;
use crate::ui::{ActiveWorkspace, UiState};

/// Default bound on typed history lines
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// One interactive console session
///
/// Typed lines are recorded in the history before they run, so a later
/// `clear` wipes them along with everything else.
pub struct Session {
    dispatcher: Dispatcher,
    ui: UiState,
    history_limit: usize,
}

impl Session {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            ui: UiState::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Bound the history; 0 keeps everything
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Execute a typed line and apply its result
    pub async fn submit(&mut self, line: &str) -> CommandResult {
        let typed = line.trim();
        if !typed.is_empty() {
            self.ui.push_history(typed, self.history_limit);
        }

        let result = self.dispatcher.execute(line).await;
        self.ui.apply(&result);
        debug!(mode = ?self.ui.mode(), error = result.is_error(), "applied result");
        result
    }

    pub fn focus(&mut self, workspace: ActiveWorkspace) {
        self.ui.set_active_workspace(workspace);
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandId;
    use crate::i18n::Locale;
    use crate::registry::{CommandHandler, ExecutionContext, Registry, factory};
    use crate::result::{Component, DisplayInstruction};
    use crate::store::WorkbenchStore;
    use crate::ui::{DisplayMode, UiError};

    fn session() -> Session {
        Session::new(Dispatcher::standard(WorkbenchStore::in_memory(), Locale::Zh))
    }

    #[tokio::test]
    async fn test_typed_lines_are_recorded() {
        let mut s = session();
        s.submit("help").await;
        s.submit("  ").await;
        s.submit("bogus-cmd").await;

        assert_eq!(s.ui().history(), ["help", "bogus-cmd"]);
        assert_eq!(s.ui().last_error(), Some("命令bogus_cmd不存在"));
        // the help listing stays visible after the error
        assert!(matches!(s.ui().display().component(), Some(Component::Help(_))));
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let mut s = session();
        s.submit("help").await;
        s.submit("project-list").await;
        s.submit("clear").await;

        assert!(s.ui().history().is_empty());
        assert_eq!(s.ui().last_error(), None);
    }

    #[tokio::test]
    async fn test_history_limit() {
        let mut s = session().with_history_limit(2);
        for line in ["help", "project-list", "task-list"] {
            s.submit(line).await;
        }
        assert_eq!(s.ui().history(), ["project-list", "task-list"]);
    }

    #[tokio::test]
    async fn test_modal_then_detail() {
        let mut s = session();
        s.submit("task-create -n Foo").await;
        assert_eq!(s.ui().mode(), DisplayMode::ModalOverlay);

        s.ui_mut().dismiss_modal().unwrap();
        s.submit("task-detail -i 1").await;
        assert_eq!(s.ui().mode(), DisplayMode::GuiFullscreen);
        assert!(s.ui_mut().return_to_command().is_ok());
        assert_eq!(s.ui().mode(), DisplayMode::CommandView);
    }

    #[derive(Default)]
    struct Locked;

    impl CommandHandler for Locked {
        fn execute(&self, _ctx: &mut ExecutionContext<'_>, _args: &[String]) -> CommandResult {
            CommandResult::display(DisplayInstruction::gui(Component::Help(Vec::new()), false))
        }
    }

    #[tokio::test]
    async fn test_gui_without_return_stays_fullscreen() {
        let mut registry = Registry::new();
        registry.register(CommandId::Help, factory::<Locked>);
        let mut s = Session::new(Dispatcher::new(
            registry,
            WorkbenchStore::in_memory(),
            Locale::En,
        ));

        s.submit("help").await;
        assert_eq!(s.ui().mode(), DisplayMode::GuiFullscreen);
        assert_eq!(s.ui_mut().return_to_command(), Err(UiError::ReturnNotAllowed));
        assert_eq!(s.ui().mode(), DisplayMode::GuiFullscreen);
    }

    #[tokio::test]
    async fn test_focus() {
        let mut s = session();
        assert_eq!(s.ui().active_workspace(), ActiveWorkspace::None);
        s.focus(ActiveWorkspace::Console);
        assert_eq!(s.ui().active_workspace(), ActiveWorkspace::Console);
    }
}
