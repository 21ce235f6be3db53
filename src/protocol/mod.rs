//! Protocol Module
//!
//! Line-oriented command language spoken by the interactive shell.
//!
//! ## Request Format
//! One command per line, words separated by whitespace:
//! ```text
//! add <key> <value...>     (alias: 1)
//! search <key>             (alias: 2)
//! show                     (alias: 3)
//! stats
//! check
//! help
//! exit                     (alias: 4, quit)
//! ```
//! Blank lines and lines starting with `#` are skipped. Everything after
//! the key of an `add` is the value, inner spaces included.
//!
//! ## Response Format
//! One or more lines of text; the first line starts with the status:
//! - `OK`: record placed, record found, or report printed
//! - `NOT_FOUND`: search miss
//! - `ERROR`: rejected insert or unparseable command

mod codec;
mod command;
mod response;

pub use codec::{encode_command, parse_command, read_command, write_response};
pub use command::{Command, CommandType};
pub use response::{Response, Status};
