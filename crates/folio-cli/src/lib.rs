//! Command-line interface for Folio.
//!
//! # Modules
//!
//! - [`cli`]: clap argument and command definitions
//! - [`app`]: [`FolioCli`], logging setup and dispatch
//! - [`config`]: [`FolioConfig`] loading via `confyg`
//! - [`config_handlers`]: `folio config` subcommands
//! - [`handlers`]: `build`, `validate`, and query commands

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod handlers;

pub use app::FolioCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::FolioConfig;
