//! Interaction shell for the HR help desk.
//! Collects command input from a terminal and drives the record store.

pub mod cli;
pub mod shell;

pub use cli::Cli;
pub use shell::command::{Command, CommandError, CommandRequest, FlowStep, PromptFlow};
pub use shell::{execute, Reply, Shell, ShellExit, ShellState, CANCEL_TOKEN};
