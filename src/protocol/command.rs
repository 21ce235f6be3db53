//! Command definitions
//!
//! Represents commands typed into the shell.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Add,
    Search,
    Show,
    Stats,
    Check,
    Help,
    Exit,
}

impl CommandType {
    /// Keyword the command is typed as
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::Add => "add",
            CommandType::Search => "search",
            CommandType::Show => "show",
            CommandType::Stats => "stats",
            CommandType::Check => "check",
            CommandType::Help => "help",
            CommandType::Exit => "exit",
        }
    }

    /// Look a keyword or menu number up
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "add" | "1" => Some(CommandType::Add),
            "search" | "find" | "2" => Some(CommandType::Search),
            "show" | "3" => Some(CommandType::Show),
            "stats" => Some(CommandType::Stats),
            "check" => Some(CommandType::Check),
            "help" | "?" => Some(CommandType::Help),
            "exit" | "quit" | "4" => Some(CommandType::Exit),
            _ => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a record
    Add { key: i64, value: String },

    /// Look a key up
    Search { key: i64 },

    /// Print the index and data areas
    Show,

    /// Print occupancy
    Stats,

    /// Run the invariant self-check
    Check,

    /// Print the command list
    Help,

    /// End the session
    Exit,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Add { .. } => CommandType::Add,
            Command::Search { .. } => CommandType::Search,
            Command::Show => CommandType::Show,
            Command::Stats => CommandType::Stats,
            Command::Check => CommandType::Check,
            Command::Help => CommandType::Help,
            Command::Exit => CommandType::Exit,
        }
    }
}
