//! osascript invocation layer.
//!
//! Split into a pure half and an effectful half:
//!
//! - [`command`] turns a script body into a shell-safe command line
//! - [`invoker`] launches that command line and captures its output
//!
//! Tool routines depend on the [`ScriptRunner`] trait rather than on
//! the concrete invoker, so dispatch can be exercised without ever
//! launching a process.

pub mod command;
pub mod invoker;

pub use command::{build_command, escape_single_quotes, OSASCRIPT};
pub use invoker::{Osascript, ScriptRunner, MAX_CAPTURED_OUTPUT};
