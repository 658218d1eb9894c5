//! Employee store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/find/delete/update APIs over the `employees` table.
//! - Hold the single process-wide connection for the store's lifetime.
//!
//! # Invariants
//! - `name` is a lookup key, not a unique constraint. Deletes and updates
//!   touch all matching rows; lookups return the earliest inserted match.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Log events carry row counts and durations, never field values.

use crate::config::DatabaseConfig;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::employee::Employee;
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    name,
    department,
    email,
    phone_number,
    salary
FROM employees";

const IN_MEMORY_SERVICE: &str = ":memory:";
const LOCAL_HOSTS: &[&str] = &["", "localhost", "127.0.0.1", "::1"];

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Startup failure: the store could not acquire its connection.
#[derive(Debug)]
pub enum ConnectionError {
    UnsupportedHost(String),
    Db(DbError),
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedHost(host) => write!(
                f,
                "host `{host}` is not reachable by the embedded engine; use localhost"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnsupportedHost(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for ConnectionError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Failure while executing a store operation.
#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    InvalidData(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for employee records.
///
/// Mutations keyed by name return the number of affected rows; callers may
/// ignore it since zero matches is not an error.
pub trait EmployeeStore {
    fn create(&self, employee: &Employee) -> PersistenceResult<()>;
    fn list_all(&self) -> PersistenceResult<Vec<Employee>>;
    fn find_by_name(&self, name: &str) -> PersistenceResult<Option<Employee>>;
    fn delete_by_name(&self, name: &str) -> PersistenceResult<usize>;
    fn update_salary(&self, name: &str, salary: f64) -> PersistenceResult<usize>;
    fn update_details(
        &self,
        name: &str,
        department: &str,
        email: &str,
        phone_number: &str,
    ) -> PersistenceResult<usize>;
}

/// SQLite-backed employee store owning its connection.
pub struct SqliteEmployeeStore {
    conn: Connection,
}

impl SqliteEmployeeStore {
    /// Opens the store described by `config` and bootstraps its schema.
    ///
    /// # Errors
    /// - [`ConnectionError::UnsupportedHost`] when `host` is not local.
    /// - [`ConnectionError::Db`] when the database cannot be opened or has a
    ///   newer schema than this binary supports.
    pub fn open(config: &DatabaseConfig) -> Result<Self, ConnectionError> {
        info!(
            "event=store_connect module=store status=start host={} port={} user={}",
            config.host, config.port, config.user
        );

        let host = config.host.trim().to_ascii_lowercase();
        if !LOCAL_HOSTS.contains(&host.as_str()) {
            error!(
                "event=store_connect module=store status=error error_code=unsupported_host host={}",
                config.host
            );
            return Err(ConnectionError::UnsupportedHost(config.host.clone()));
        }

        let conn = if config.service == IN_MEMORY_SERVICE {
            open_db_in_memory()?
        } else {
            open_db(&config.service)?
        };

        info!("event=store_connect module=store status=ok");
        Ok(Self { conn })
    }

    /// Opens a transient in-memory store.
    pub fn open_in_memory() -> Result<Self, ConnectionError> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl EmployeeStore for SqliteEmployeeStore {
    fn create(&self, employee: &Employee) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let result = self.conn.execute(
            "INSERT INTO employees (
                name,
                department,
                email,
                phone_number,
                salary
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                employee.name(),
                employee.department(),
                employee.email(),
                employee.phone_number(),
                employee.salary(),
            ],
        );
        observe("employee_create", started_at, result).map(|_| ())
    }

    fn list_all(&self) -> PersistenceResult<Vec<Employee>> {
        let started_at = Instant::now();
        let employees = query_employees(
            &self.conn,
            &format!("{EMPLOYEE_SELECT_SQL} ORDER BY rowid ASC;"),
            [],
        )
        .map_err(|err| log_failure("employee_list", started_at, err))?;
        debug!(
            "event=employee_list module=store status=ok rows={} duration_ms={}",
            employees.len(),
            started_at.elapsed().as_millis()
        );
        Ok(employees)
    }

    fn find_by_name(&self, name: &str) -> PersistenceResult<Option<Employee>> {
        let started_at = Instant::now();
        let mut employees = query_employees(
            &self.conn,
            &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1 ORDER BY rowid ASC LIMIT 1;"),
            [name],
        )
        .map_err(|err| log_failure("employee_find", started_at, err))?;
        debug!(
            "event=employee_find module=store status=ok found={} duration_ms={}",
            !employees.is_empty(),
            started_at.elapsed().as_millis()
        );
        Ok(employees.pop())
    }

    fn delete_by_name(&self, name: &str) -> PersistenceResult<usize> {
        let started_at = Instant::now();
        let result = self.conn.execute("DELETE FROM employees WHERE name = ?1;", [name]);
        observe("employee_delete", started_at, result)
    }

    fn update_salary(&self, name: &str, salary: f64) -> PersistenceResult<usize> {
        let started_at = Instant::now();
        let result = self.conn.execute(
            "UPDATE employees SET salary = ?1 WHERE name = ?2;",
            params![salary, name],
        );
        observe("employee_update_salary", started_at, result)
    }

    fn update_details(
        &self,
        name: &str,
        department: &str,
        email: &str,
        phone_number: &str,
    ) -> PersistenceResult<usize> {
        let started_at = Instant::now();
        let result = self.conn.execute(
            "UPDATE employees
             SET
                department = ?1,
                email = ?2,
                phone_number = ?3
             WHERE name = ?4;",
            params![department, email, phone_number, name],
        );
        observe("employee_update_details", started_at, result)
    }
}

fn query_employees<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> PersistenceResult<Vec<Employee>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut employees = Vec::new();

    while let Some(row) = rows.next()? {
        employees.push(parse_employee_row(row)?);
    }

    Ok(employees)
}

fn parse_employee_row(row: &Row<'_>) -> PersistenceResult<Employee> {
    Employee::new(
        row.get::<_, String>("name")?,
        row.get::<_, String>("department")?,
        row.get::<_, String>("email")?,
        row.get::<_, String>("phone_number")?,
        row.get::<_, f64>("salary")?,
    )
    .map_err(|err| PersistenceError::InvalidData(format!("{err} in employees.name")))
}

fn observe(
    event: &str,
    started_at: Instant,
    result: rusqlite::Result<usize>,
) -> PersistenceResult<usize> {
    match result {
        Ok(rows) => {
            debug!(
                "event={event} module=store status=ok rows={rows} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(rows)
        }
        Err(err) => Err(log_failure(event, started_at, err.into())),
    }
}

fn log_failure(event: &str, started_at: Instant, err: PersistenceError) -> PersistenceError {
    let error_code = match &err {
        PersistenceError::Db(db_err) => db_err.error_code(),
        PersistenceError::InvalidData(_) => "invalid_row",
    };
    error!(
        "event={event} module=store status=error duration_ms={} error_code={error_code} error={}",
        started_at.elapsed().as_millis(),
        err
    );
    err
}

#[cfg(test)]
mod tests {
    use super::{EmployeeStore, PersistenceError, SqliteEmployeeStore};

    #[test]
    fn blank_persisted_name_is_reported_as_invalid_data() {
        let store = SqliteEmployeeStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO employees (name, department, email, phone_number, salary)
                 VALUES ('  ', 'Ops', 'ops@x.com', '1', 10.0);",
                [],
            )
            .unwrap();

        let err = store.list_all().unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidData(_)));
    }

    #[test]
    fn dropped_table_surfaces_as_persistence_error() {
        let store = SqliteEmployeeStore::open_in_memory().unwrap();
        store.conn.execute_batch("DROP TABLE employees;").unwrap();

        let err = store.delete_by_name("Jane Doe").unwrap_err();
        assert!(matches!(err, PersistenceError::Db(_)));
        assert!(store.find_by_name("Jane Doe").is_err());
    }
}
