//! Command handlers.  Each submodule owns one subcommand and exposes a
//! single `execute` entry point called from `main::run`.

pub mod completions;
pub mod config;
pub mod list;
pub mod new;
