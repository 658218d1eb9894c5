//! Line-oriented interaction shell.
//!
//! # Responsibility
//! - Show the command menu and drive one [`PromptFlow`] at a time.
//! - Call the record store once a flow completes and report the outcome.
//!
//! # Invariants
//! - Store and input errors never escape a command; they become messages.
//! - A line that is not valid UTF-8 is rejected, never fatal.
//! - A cancelled flow makes no store call.
//! - Only I/O failures on the terminal itself end [`Shell::run`] with `Err`.

pub mod command;
pub mod render;

use command::{Command, CommandError, CommandRequest, FlowStep, PromptFlow};
use hrdesk_core::EmployeeStore;
use log::{info, warn};
use std::io::{self, BufRead, Write};

/// Answer that aborts the command being collected.
pub const CANCEL_TOKEN: &str = ":cancel";

/// Why [`Shell::run`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    ExitCommand,
    EndOfInput,
}

/// What the shell is waiting for.
#[derive(Debug)]
pub enum ShellState {
    Ready,
    AwaitingInput(PromptFlow),
}

/// Successful command outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Listing(String),
    Exit,
}

/// Runs a completed request against the store.
pub fn execute<S: EmployeeStore + ?Sized>(
    store: &S,
    request: CommandRequest,
) -> Result<Reply, CommandError> {
    let reply = match request {
        CommandRequest::Add(employee) => {
            store.create(&employee)?;
            Reply::Message("Employee added successfully.".to_string())
        }
        CommandRequest::List => Reply::Listing(render::render_listing(&store.list_all()?)),
        CommandRequest::Search { name } => match store.find_by_name(&name)? {
            Some(employee) => Reply::Message(render::render_found(&employee)),
            None => Reply::Message("Employee not found.".to_string()),
        },
        CommandRequest::Remove { name } => {
            store.delete_by_name(&name)?;
            Reply::Message("Employee removed successfully.".to_string())
        }
        CommandRequest::UpdateSalary { name, salary } => {
            store.update_salary(&name, salary)?;
            Reply::Message("Salary updated successfully.".to_string())
        }
        CommandRequest::UpdateDetails {
            name,
            department,
            email,
            phone_number,
        } => {
            store.update_details(&name, &department, &email, &phone_number)?;
            Reply::Message("Details updated successfully.".to_string())
        }
        CommandRequest::Exit => Reply::Exit,
    };
    Ok(reply)
}

/// Interactive shell bound to one store and one terminal.
pub struct Shell<'s, S: EmployeeStore + ?Sized, R, W> {
    store: &'s S,
    input: R,
    output: W,
    state: ShellState,
}

impl<'s, S, R, W> Shell<'s, S, R, W>
where
    S: EmployeeStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'s S, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            state: ShellState::Ready,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Processes input until the exit command or end of input.
    pub fn run(&mut self) -> io::Result<ShellExit> {
        loop {
            let state = std::mem::replace(&mut self.state, ShellState::Ready);
            self.state = match state {
                ShellState::Ready => {
                    write!(self.output, "{}", render::render_menu())?;
                    let line = match self.read_answer("Select a command")? {
                        Answer::Line(line) => line,
                        Answer::NotUtf8 => {
                            self.report_not_utf8()?;
                            continue;
                        }
                        Answer::EndOfInput => return Ok(ShellExit::EndOfInput),
                    };
                    match Command::parse(&line) {
                        Some(command) => {
                            info!(
                                "event=command_start module=shell status=ok command={:?}",
                                command
                            );
                            match self.advance(PromptFlow::start(command))? {
                                Some(next) => next,
                                None => return Ok(ShellExit::ExitCommand),
                            }
                        }
                        None => {
                            writeln!(self.output, "Unknown command `{}`.", line.trim())?;
                            ShellState::Ready
                        }
                    }
                }
                ShellState::AwaitingInput(flow) => {
                    match self.read_answer(flow.current_prompt())? {
                        Answer::Line(answer) if answer.trim() != CANCEL_TOKEN => {
                            match self.advance(flow.answer(answer))? {
                                Some(next) => next,
                                None => return Ok(ShellExit::ExitCommand),
                            }
                        }
                        answer => {
                            if answer == Answer::NotUtf8 {
                                self.report_not_utf8()?;
                            }
                            info!(
                                "event=command_cancel module=shell status=ok command={:?}",
                                flow.command()
                            );
                            writeln!(self.output, "Command cancelled.")?;
                            ShellState::Ready
                        }
                    }
                }
            };
        }
    }

    /// Returns the next state, or `None` when the user asked to exit.
    fn advance(&mut self, step: FlowStep) -> io::Result<Option<ShellState>> {
        let request = match step {
            FlowStep::Continue(flow) => return Ok(Some(ShellState::AwaitingInput(flow))),
            FlowStep::Done(Ok(request)) => request,
            FlowStep::Done(Err(err)) => {
                self.report_error(&err)?;
                return Ok(Some(ShellState::Ready));
            }
        };

        match execute(self.store, request) {
            Ok(Reply::Exit) => return Ok(None),
            Ok(Reply::Message(message)) => writeln!(self.output, "{message}")?,
            Ok(Reply::Listing(listing)) => {
                writeln!(self.output, "{}", "=".repeat(40))?;
                write!(self.output, "{listing}")?;
                writeln!(self.output, "{}", "=".repeat(40))?;
            }
            Err(err) => self.report_error(&err)?,
        }
        Ok(Some(ShellState::Ready))
    }

    fn report_error(&mut self, err: &CommandError) -> io::Result<()> {
        warn!("event=command_failed module=shell status=error error={err}");
        writeln!(self.output, "Error: {err}")
    }

    fn report_not_utf8(&mut self) -> io::Result<()> {
        warn!("event=input_rejected module=shell status=error error_code=not_utf8");
        writeln!(self.output, "Error: input is not valid UTF-8")
    }

    /// Reads raw bytes so a non-UTF-8 line is rejected without ending the shell.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Answer> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(Answer::EndOfInput);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Answer::Line(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(_) => Ok(Answer::NotUtf8),
        }
    }
}

/// One line read from the terminal.
#[derive(Debug, PartialEq, Eq)]
enum Answer {
    Line(String),
    NotUtf8,
    EndOfInput,
}
