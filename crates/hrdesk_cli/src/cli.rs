//! Command-line arguments for the `hrdesk` binary.

use clap::Parser;
use std::path::PathBuf;

/// HR help desk: manage employee records from the terminal.
#[derive(Parser, Debug)]
#[command(name = "hrdesk", version)]
pub struct Cli {
    /// Config file (TOML). Defaults to `hrdesk.toml` in the working
    /// directory when that file exists.
    pub config: Option<PathBuf>,
}
