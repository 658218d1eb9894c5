//! Menu commands and per-command prompt collection.
//!
//! # Responsibility
//! - Map menu input to a [`Command`].
//! - Collect one answer per prompt in a fixed order via [`PromptFlow`].
//! - Turn a completed flow into a typed [`CommandRequest`].
//!
//! # Invariants
//! - A flow never touches the store; parsing failures surface before any
//!   store call is possible.
//! - Dropping an unfinished flow discards its answers.

use hrdesk_core::{
    parse_salary, Employee, EmployeeValidationError, InputFormatError, PersistenceError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Menu entries in display order.
pub const MENU: [Command; 7] = [
    Command::AddEmployee,
    Command::PrintEmployees,
    Command::SearchEmployee,
    Command::RemoveEmployee,
    Command::UpdateSalary,
    Command::UpdateDetails,
    Command::Exit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddEmployee,
    PrintEmployees,
    SearchEmployee,
    RemoveEmployee,
    UpdateSalary,
    UpdateDetails,
    Exit,
}

impl Command {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddEmployee => "Add Employee",
            Self::PrintEmployees => "Print Employees",
            Self::SearchEmployee => "Search Employee",
            Self::RemoveEmployee => "Remove Employee",
            Self::UpdateSalary => "Update Salary",
            Self::UpdateDetails => "Update Details",
            Self::Exit => "Exit",
        }
    }

    /// Parses a menu selection: the 1-based menu number or a keyword.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        if let Ok(number) = normalized.parse::<usize>() {
            return number.checked_sub(1).and_then(|index| MENU.get(index).copied());
        }

        match normalized.as_str() {
            "add" => Some(Self::AddEmployee),
            "list" | "print" => Some(Self::PrintEmployees),
            "search" | "find" => Some(Self::SearchEmployee),
            "remove" | "delete" => Some(Self::RemoveEmployee),
            "salary" => Some(Self::UpdateSalary),
            "details" => Some(Self::UpdateDetails),
            "exit" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Prompts shown for this command, in answer order.
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            Self::AddEmployee => &[
                "Enter Employee Name",
                "Enter Department",
                "Enter Email",
                "Enter Phone Number",
                "Enter Salary",
            ],
            Self::PrintEmployees | Self::Exit => &[],
            Self::SearchEmployee => &["Enter Employee Name to Search"],
            Self::RemoveEmployee => &["Enter Employee Name to Remove"],
            Self::UpdateSalary => &["Enter Employee Name to Update Salary", "Enter New Salary"],
            Self::UpdateDetails => &[
                "Enter Employee Name to Update Details",
                "Enter New Department",
                "Enter New Email",
                "Enter New Phone Number",
            ],
        }
    }
}

/// Fully collected and parsed command input.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandRequest {
    Add(Employee),
    List,
    Search {
        name: String,
    },
    Remove {
        name: String,
    },
    UpdateSalary {
        name: String,
        salary: f64,
    },
    UpdateDetails {
        name: String,
        department: String,
        email: String,
        phone_number: String,
    },
    Exit,
}

/// Failure reported at the command boundary.
#[derive(Debug)]
pub enum CommandError {
    Input(InputFormatError),
    Validation(EmployeeValidationError),
    Persistence(PersistenceError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<InputFormatError> for CommandError {
    fn from(value: InputFormatError) -> Self {
        Self::Input(value)
    }
}

impl From<EmployeeValidationError> for CommandError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for CommandError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Result of feeding a flow.
#[derive(Debug)]
pub enum FlowStep {
    /// More answers are needed.
    Continue(PromptFlow),
    /// All prompts answered; the request is ready or was rejected.
    Done(Result<CommandRequest, CommandError>),
}

/// Answers collected so far for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptFlow {
    command: Command,
    answers: Vec<String>,
}

impl PromptFlow {
    /// Starts collecting input for `command`.
    ///
    /// Commands without prompts complete immediately.
    pub fn start(command: Command) -> FlowStep {
        Self {
            command,
            answers: Vec::with_capacity(command.prompts().len()),
        }
        .step()
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Prompt awaiting an answer.
    pub fn current_prompt(&self) -> &'static str {
        self.command.prompts()[self.answers.len()]
    }

    /// Records the answer to [`Self::current_prompt`] and advances.
    pub fn answer(mut self, text: impl Into<String>) -> FlowStep {
        self.answers.push(text.into().trim().to_string());
        self.step()
    }

    fn step(self) -> FlowStep {
        if self.answers.len() < self.command.prompts().len() {
            FlowStep::Continue(self)
        } else {
            FlowStep::Done(self.into_request())
        }
    }

    fn into_request(self) -> Result<CommandRequest, CommandError> {
        let command = self.command;
        let mut answers = self.answers.into_iter();
        let mut next = move || answers.next().unwrap_or_default();

        let request = match command {
            Command::AddEmployee => {
                let (name, department, email, phone_number) = (next(), next(), next(), next());
                let salary = parse_salary(&next())?;
                CommandRequest::Add(Employee::new(
                    name,
                    department,
                    email,
                    phone_number,
                    salary,
                )?)
            }
            Command::PrintEmployees => CommandRequest::List,
            Command::SearchEmployee => CommandRequest::Search { name: next() },
            Command::RemoveEmployee => CommandRequest::Remove { name: next() },
            Command::UpdateSalary => {
                let name = next();
                let salary = parse_salary(&next())?;
                CommandRequest::UpdateSalary { name, salary }
            }
            Command::UpdateDetails => CommandRequest::UpdateDetails {
                name: next(),
                department: next(),
                email: next(),
                phone_number: next(),
            },
            Command::Exit => CommandRequest::Exit,
        };
        Ok(request)
    }
}
