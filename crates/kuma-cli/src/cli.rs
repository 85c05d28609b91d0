use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "kuma")]
#[command(about = "A command console for tasks, projects and documents")]
#[command(version)]
pub struct Cli {
    /// Workspace directory (overrides KUMA_WORKSPACE environment variable)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Output as JSON for machine processing
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command categories
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new workspace
    Init {
        /// Path to create workspace (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Execute console command lines
    ///
    /// With no LINE, each line of stdin is executed in order.
    Run {
        /// Command line, e.g. `task-create -n Buy milk`
        #[arg(trailing_var_arg = true)]
        line: Vec<String>,
    },

    /// Start the interactive console
    Console,

    /// Markdown document operations
    #[command(subcommand)]
    Doc(DocCommands),

    /// Image store operations
    #[command(subcommand)]
    Image(ImageCommands),
}

/// Document subcommands
#[derive(Subcommand)]
pub enum DocCommands {
    /// Create a new document
    New {
        /// Document title
        title: String,

        /// Initial markdown content
        #[arg(long)]
        content: Option<String>,

        /// Write the content in the editor
        #[arg(long)]
        edit: bool,
    },

    /// Print a document's content
    Show {
        /// Document id
        id: String,
    },

    /// Edit a document's content in the editor
    Edit {
        /// Document id
        id: String,
    },

    /// List documents, most recently updated first
    List,
}

/// Image subcommands
#[derive(Subcommand)]
pub enum ImageCommands {
    /// Store an image and print its id and markdown link
    Add {
        /// Image file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Write a stored image to a file
    Export {
        /// Image id
        id: String,

        /// Destination file
        output: PathBuf,
    },
}
