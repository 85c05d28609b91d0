// crates/kuma-cli/src/services/mod.rs - Service layer modules
pub mod editor;
pub mod workspace;

pub use editor::EditorService;
pub use workspace::WorkspaceService;
