// crates/kuma-cli/src/commands/mod.rs - Command Handler Modules
//
// MODULE ORGANIZATION:
// - init: Workspace initialization (special case, no context needed)
// - run: One-shot and batch execution of console command lines
// - console: Interactive console
// - doc: Markdown documents in the local database
// - image: Images referenced from documents

pub mod console;
pub mod doc;
pub mod image;
pub mod init;
pub mod run;
