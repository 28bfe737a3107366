//! Folio CLI
//!
//! Builds, validates, and queries content indices from frontmatter markdown.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use folio_cli::{CliArgs, FolioCli};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let cli = FolioCli::from_args("folio", &args)?;
    cli.run(args).await?;
    Ok(())
}
