//! Response definitions
//!
//! Represents what the shell prints back.

use std::fmt;

use crate::error::RejectReason;
use crate::storage::{Location, OverflowMark};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::NotFound => f.write_str("NOT_FOUND"),
            Status::Error => f.write_str("ERROR"),
        }
    }
}

/// A response to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Record placed
    Added { key: i64, location: Location },

    /// Insert refused
    Rejected {
        key: i64,
        reason: RejectReason,
        message: String,
    },

    /// Search hit
    Found {
        key: i64,
        value: String,
        location: Location,
        mark: OverflowMark,
    },

    /// Search miss
    NotFound { key: i64 },

    /// Multi-line report (show, stats, check, help)
    Report(String),

    /// Bad input
    Error(String),

    /// Session ending
    Bye,
}

impl Response {
    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Response::Error(message.to_string())
    }

    pub fn status(&self) -> Status {
        match self {
            Response::Added { .. }
            | Response::Found { .. }
            | Response::Report(_)
            | Response::Bye => Status::Ok,
            Response::NotFound { .. } => Status::NotFound,
            Response::Rejected { .. } | Response::Error(_) => Status::Error,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status();
        match self {
            Response::Added { key, location } => {
                write!(f, "{} key {} added in {}", status, key, location)
            }
            Response::Rejected { key, reason, message } => {
                write!(f, "{} key {} rejected ({}): {}", status, key, reason, message)
            }
            Response::Found {
                key,
                value,
                location,
                mark,
            } => write!(
                f,
                "{} key {} found in {}: value = {}, mark = {}",
                status, key, location, value, mark
            ),
            Response::NotFound { key } => write!(f, "{} key {} not found", status, key),
            Response::Report(text) => {
                writeln!(f, "{}", status)?;
                f.write_str(text.trim_end())
            }
            Response::Error(message) => write!(f, "{} {}", status, message),
            Response::Bye => write!(f, "{} bye", status),
        }
    }
}
