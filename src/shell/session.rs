//! Session Handler
//!
//! Runs the read-eval-print loop for one input stream.

use std::io::{BufRead, Write};

use crate::error::{IsamError, Result};
use crate::manager::Manager;
use crate::protocol::{read_command, write_response, Command, Response};

/// Command list printed by `help`
pub const HELP_TEXT: &str = "\
commands:
  add <key> <value>   insert a record            (1)
  search <key>        look a key up              (2)
  show                print index and data area  (3)
  stats               print occupancy
  check               verify structure invariants
  help                this text
  exit                leave the shell            (4)";

/// Prompt written before each command when prompting is on
const PROMPT: &str = "isam> ";

/// A shell session over any line reader and writer
pub struct Session<R, W> {
    /// Command source
    reader: R,

    /// Response sink
    writer: W,

    /// The structure being driven
    manager: Manager<String>,

    /// Write a prompt before each read
    prompt: bool,

    /// Commands executed so far
    commands_executed: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session around an existing manager
    pub fn new(reader: R, writer: W, manager: Manager<String>) -> Self {
        Self {
            reader,
            writer,
            manager,
            prompt: false,
            commands_executed: 0,
        }
    }

    /// Turn the prompt on or off
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Run until `exit` or end of input
    ///
    /// Unparseable lines get an ERROR response and the loop continues; I/O
    /// errors end the session.
    pub fn run(&mut self) -> Result<()> {
        tracing::debug!("Session started");

        loop {
            if self.prompt {
                self.writer.write_all(PROMPT.as_bytes())?;
                self.writer.flush()?;
            }

            // Read next command
            let command = match read_command(&mut self.reader) {
                Ok(Some(command)) => command,
                Ok(None) => {
                    tracing::debug!(
                        commands = self.commands_executed,
                        "End of input, session closed"
                    );
                    return Ok(());
                }
                Err(IsamError::Protocol(message)) => {
                    tracing::debug!("Rejected input: {}", message);
                    self.send_response(&Response::Error(message))?;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Error reading command: {}", e);
                    return Err(e);
                }
            };

            tracing::trace!("Received command: {:?}", command);

            // Execute command
            let response = self.execute_command(command);
            self.commands_executed += 1;

            // Send response
            self.send_response(&response)?;

            if matches!(response, Response::Bye) {
                tracing::debug!(commands = self.commands_executed, "Session closed by exit");
                return Ok(());
            }
        }
    }

    /// Execute a command and return a response
    pub fn execute_command(&mut self, command: Command) -> Response {
        match command {
            Command::Add { key, value } => match self.manager.add(key, value) {
                Ok(location) => Response::Added { key, location },
                Err(e) => Response::Rejected {
                    key,
                    reason: e.reason(),
                    message: e.to_string(),
                },
            },
            Command::Search { key } => match self.manager.search(key) {
                Some(hit) => Response::Found {
                    key,
                    value: hit.value().clone(),
                    location: hit.location,
                    mark: hit.overflow_mark(),
                },
                None => Response::NotFound { key },
            },
            Command::Show => Response::Report(self.manager.layout().to_string()),
            Command::Stats => Response::Report(self.manager.stats().to_string()),
            Command::Check => {
                let violations = self.manager.verify();
                if violations.is_empty() {
                    Response::Report("structure is consistent".to_string())
                } else {
                    let lines: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
                    Response::Error(format!(
                        "{} invariant violation(s): {}",
                        violations.len(),
                        lines.join("; ")
                    ))
                }
            }
            Command::Help => Response::Report(HELP_TEXT.to_string()),
            Command::Exit => Response::Bye,
        }
    }

    /// Send a response to the writer
    fn send_response(&mut self, response: &Response) -> Result<()> {
        write_response(&mut self.writer, response)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn manager(&self) -> &Manager<String> {
        &self.manager
    }

    pub fn commands_executed(&self) -> u64 {
        self.commands_executed
    }

    /// Finish the session, handing back the manager and writer
    pub fn into_parts(self) -> (Manager<String>, W) {
        (self.manager, self.writer)
    }
}
