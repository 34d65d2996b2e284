//! Forge toolchain integration
//!
//! Everything that crosses the process boundary lives here: a generic
//! run-with-timeout subprocess helper and a thin wrapper over the forge
//! subcommands the deployment flow needs.

pub mod cli;
pub mod command;

pub use cli::ForgeCli;
pub use command::{run_command, CommandError, CommandOutput};
