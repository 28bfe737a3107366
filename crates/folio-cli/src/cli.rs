//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level arguments for the `folio` command.
#[derive(Parser, Debug)]
#[command(name = "folio", author, about = "Build and query content indices from frontmatter markdown", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FOLIO_CONFIG", global = true)]
    pub config: Option<String>,

    /// Content directory (overrides `content.path`).
    #[arg(long, global = true, value_name = "DIR")]
    pub content: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the corpus and emit the index as JSON.
    Build {
        /// Write the index to this file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,

        /// Related documents to keep per document.
        #[arg(long, value_name = "N")]
        related_limit: Option<usize>,
    },

    /// Check every document and fail if any has a problem.
    Validate,

    /// Print one document as JSON.
    Show {
        /// Document id (slug).
        id: String,
    },

    /// List the documents in a category, newest first.
    Category {
        /// Category name.
        name: String,
    },

    /// List the documents carrying a tag, newest first.
    Tag {
        /// Tag name.
        name: String,
    },

    /// List documents related to a document, best match first.
    Related {
        /// Document id (slug).
        id: String,

        /// Maximum number of results.
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "index.related_limit").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
