//! Record store for the HR help desk.
//! Owns the employee model, its SQLite persistence, and process bootstrap.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::employee::{parse_salary, Employee, EmployeeValidationError, InputFormatError};
pub use store::employee_store::{
    ConnectionError, EmployeeStore, PersistenceError, PersistenceResult, SqliteEmployeeStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
