//! `hrdesk` terminal entry point.
//!
//! Usage: `hrdesk [CONFIG]`. Without an argument `hrdesk.toml` in the working
//! directory is read when present.

use clap::Parser;
use hrdesk_cli::{Cli, Shell};
use hrdesk_core::{core_version, init_from_config, AppConfig, SqliteEmployeeStore};
use log::{error, info};
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();
    let config = match AppConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = init_from_config(&config) {
        eprintln!("Warning: file logging disabled: {err}");
    }

    let store = match SqliteEmployeeStore::open(&config.database) {
        Ok(store) => store,
        Err(err) => {
            error!("event=app_start module=cli status=error error_code=connection_failed");
            eprintln!("Error connecting to the database: {err}");
            log::logger().flush();
            process::exit(1);
        }
    };
    info!("event=app_ready module=cli status=ok version={}", core_version());

    let stdin = io::stdin();
    let mut shell = Shell::new(&store, stdin.lock(), io::stdout());
    match shell.run() {
        Ok(exit) => {
            info!("event=app_exit module=cli status=ok reason={exit:?}");
            // Exit skips destructors; the connection is released by the OS.
            log::logger().flush();
            process::exit(0);
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("Error: terminal I/O failed: {err}");
            log::logger().flush();
            process::exit(1);
        }
    }
}
