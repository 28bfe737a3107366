//! The `folio` application: logging setup and command dispatch.

use folio_core::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::FolioConfig;
use crate::config_handlers;
use crate::handlers::{self, BuildOptions, Query};

// ============================================================================
// FolioCli
// ============================================================================

/// The CLI application, holding the loaded configuration.
pub struct FolioCli {
    name: String,
    config: FolioConfig,
    version: String,
}

impl FolioCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FolioConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: FolioConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Initialise tracing-based logging on stderr.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let content = args.content.as_deref();

        match args.command {
            Some(Command::Build {
                output,
                related_limit,
            }) => {
                let options = BuildOptions {
                    content: args.content.clone(),
                    output,
                    related_limit,
                };
                handlers::handle_build(&self.config, options).await?;
                Ok(())
            }
            Some(Command::Validate) => handlers::handle_validate(&self.config, content).await,
            Some(Command::Show { id }) => {
                handlers::handle_query(&self.config, content, Query::Show(id)).await
            }
            Some(Command::Category { name }) => {
                handlers::handle_query(&self.config, content, Query::Category(name)).await
            }
            Some(Command::Tag { name }) => {
                handlers::handle_query(&self.config, content, Query::Tag(name)).await
            }
            Some(Command::Related { id, limit }) => {
                handlers::handle_query(&self.config, content, Query::Related { id, limit }).await
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            None => {
                println!("{} {} (use --help for usage)", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_folio_cli_new() {
        let cli = FolioCli::new("folio", FolioConfig::default());
        assert_eq!(cli.name, "folio");
        assert_eq!(cli.config().index.related_limit, 5);
    }

    #[test]
    fn test_folio_cli_with_version() {
        let cli = FolioCli::new("folio", FolioConfig::default()).with_version("1.2.3");
        assert_eq!(cli.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_run_version_command() {
        let cli = FolioCli::new("folio", FolioConfig::default());
        let args = CliArgs::parse_from(["folio", "version"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let cli = FolioCli::new("folio", FolioConfig::default());
        let args = CliArgs::parse_from(["folio"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_validate_with_content_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("post.md"),
            "---\ntitle: Post\ndescription: d\ndate: 2025-01-01\n---\nbody\n",
        )
        .unwrap();

        let cli = FolioCli::new("folio", FolioConfig::default());
        let content = dir.path().to_string_lossy().into_owned();
        let args = CliArgs::parse_from(["folio", "--content", content.as_str(), "validate"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_query_unknown_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = FolioCli::new("folio", FolioConfig::default());
        let content = dir.path().to_string_lossy().into_owned();
        let args = CliArgs::parse_from(["folio", "--content", content.as_str(), "show", "nope"]);
        let err = cli.run(args).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
