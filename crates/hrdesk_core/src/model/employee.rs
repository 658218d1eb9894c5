//! Employee domain model.
//!
//! # Responsibility
//! - Define the immutable value persisted as one `employees` row.
//! - Parse user-entered salary text into a number.
//!
//! # Invariants
//! - `name` is never blank.
//! - Fields are private; updates go through the store, never a live instance.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised when constructing an [`Employee`] from invalid fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyName,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name cannot be empty"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// User-entered salary text that does not parse as a finite number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormatError {
    value: String,
}

impl InputFormatError {
    /// Returns the rejected input text.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for InputFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid salary `{}`: expected a number", self.value)
    }
}

impl Error for InputFormatError {}

/// One staff member's HR fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    name: String,
    department: String,
    email: String,
    phone_number: String,
    salary: f64,
}

impl Employee {
    /// Creates an employee value.
    ///
    /// # Errors
    /// - Returns [`EmployeeValidationError::EmptyName`] when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        salary: f64,
    ) -> Result<Self, EmployeeValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            department: department.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            salary,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }
}

fn validate_name(name: &str) -> Result<(), EmployeeValidationError> {
    if name.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyName);
    }
    Ok(())
}

/// Parses salary text entered by a user.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected even
/// though `f64::from_str` accepts them.
pub fn parse_salary(text: &str) -> Result<f64, InputFormatError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputFormatError {
            value: text.to_string(),
        }),
    }
}
