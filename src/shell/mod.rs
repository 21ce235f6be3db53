//! Shell Module
//!
//! Interactive front end over a [`Manager`](crate::Manager).
//!
//! ## Architecture
//! - One session per input stream (stdin, a script, a test buffer)
//! - Commands parsed by the protocol codec
//! - Every command routed through the session's manager

mod session;

pub use session::{Session, HELP_TEXT};
