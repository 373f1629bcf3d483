//! tapcalc CLI library
//!
//! Argument parsing, configuration and command execution for the `tapcalc`
//! binary. Commands write to any [`std::io::Write`] so they can be tested
//! without spawning the binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::{Cli, Commands, KeypadArgs, KeysArgs, LayoutArg, ReplArgs};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::{run_config, run_keypad, run_keys, run_repl, KeysReport};
