//! Todopeer CLI library.
//!
//! Argument parsing, configuration, token storage and the subcommands of
//! the `todopeer` binary. Commands talk to the backend through
//! [`tp_api::Backend`] so they can be exercised without a server.

pub mod cli;
pub mod commands;
mod config;
mod context;
pub mod output;
pub mod pomodoro;
pub mod token;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use context::Context;
