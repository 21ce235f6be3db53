//! Protocol codec
//!
//! Parsing and formatting functions for the shell command language.

use std::io::{BufRead, Write};

use crate::error::{IsamError, Result};

use super::{Command, CommandType, Response};

/// Longest line accepted (64 KB)
pub const MAX_LINE_LEN: usize = 64 * 1024;

// =============================================================================
// Command Parsing/Encoding
// =============================================================================

/// Encode a command as the line that parses back to it
pub fn encode_command(command: &Command) -> String {
    match command {
        Command::Add { key, value } => format!("add {} {}", key, value),
        Command::Search { key } => format!("search {}", key),
        other => other.command_type().keyword().to_string(),
    }
}

/// Parse one line
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.len() > MAX_LINE_LEN {
        return Err(IsamError::Protocol(format!(
            "Line too long: {} bytes (max {})",
            line.len(),
            MAX_LINE_LEN
        )));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let command_type = CommandType::from_keyword(word)
        .ok_or_else(|| IsamError::Protocol(format!("Unknown command: '{}' (try 'help')", word)))?;

    let command = match command_type {
        CommandType::Add => parse_add_command(rest)?,
        CommandType::Search => parse_search_command(rest)?,
        CommandType::Show => expect_no_arguments(command_type, rest, Command::Show)?,
        CommandType::Stats => expect_no_arguments(command_type, rest, Command::Stats)?,
        CommandType::Check => expect_no_arguments(command_type, rest, Command::Check)?,
        CommandType::Help => expect_no_arguments(command_type, rest, Command::Help)?,
        CommandType::Exit => expect_no_arguments(command_type, rest, Command::Exit)?,
    };

    Ok(Some(command))
}

/// Parse ADD arguments: key, then the rest of the line as value
fn parse_add_command(args: &str) -> Result<Command> {
    if args.is_empty() {
        return Err(IsamError::Protocol("add: missing key".to_string()));
    }

    let (key, value) = match args.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (args, ""),
    };

    let key = parse_key(CommandType::Add, key)?;

    if value.is_empty() {
        return Err(IsamError::Protocol(format!("add: missing value for key {}", key)));
    }

    Ok(Command::Add {
        key,
        value: value.to_string(),
    })
}

/// Parse SEARCH arguments: exactly one key
fn parse_search_command(args: &str) -> Result<Command> {
    let mut words = args.split_whitespace();

    let key = match words.next() {
        Some(word) => parse_key(CommandType::Search, word)?,
        None => return Err(IsamError::Protocol("search: missing key".to_string())),
    };

    if let Some(extra) = words.next() {
        return Err(IsamError::Protocol(format!(
            "search: unexpected argument '{}'",
            extra
        )));
    }

    Ok(Command::Search { key })
}

fn parse_key(command_type: CommandType, word: &str) -> Result<i64> {
    word.parse::<i64>().map_err(|_| {
        IsamError::Protocol(format!(
            "{}: key must be an integer, got '{}'",
            command_type.keyword(),
            word
        ))
    })
}

fn expect_no_arguments(command_type: CommandType, args: &str, command: Command) -> Result<Command> {
    if !args.is_empty() {
        return Err(IsamError::Protocol(format!(
            "{}: takes no arguments, got '{}'",
            command_type.keyword(),
            args
        )));
    }
    Ok(command)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read the next command from a stream
///
/// Skips blank and comment lines. Returns `Ok(None)` at end of input. A
/// line that fails to parse, or is not valid UTF-8, is consumed and reported
/// as a `Protocol` error, so the caller can keep reading.
pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Option<Command>> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        let line = std::str::from_utf8(&buf).map_err(|e| {
            IsamError::Protocol(format!(
                "Line is not valid UTF-8 (invalid byte at offset {})",
                e.valid_up_to()
            ))
        })?;

        if let Some(command) = parse_command(line)? {
            return Ok(Some(command));
        }
    }
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writeln!(writer, "{}", response)?;
    writer.flush()?;
    Ok(())
}
