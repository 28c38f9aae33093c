//! Shell command construction for osascript invocations.
//!
//! Scripts are handed to the interpreter as a single `-e` argument on
//! a shell command line, wrapped in single quotes. Every single quote
//! embedded in the script body must therefore be rewritten with the
//! close/escape/reopen sequence (`'` becomes `'"'"'`); one missed
//! quote corrupts the command line.

/// The external interpreter invoked for every script.
pub const OSASCRIPT: &str = "osascript";

/// Escape embedded single quotes for inclusion inside a single-quoted
/// shell word: close the quote, emit a double-quoted quote, reopen.
pub fn escape_single_quotes(script: &str) -> String {
    script.replace('\'', "'\"'\"'")
}

/// Build the shell command line that passes `script` to osascript as
/// one literal argument, regardless of what the script contains.
pub fn build_command(script: &str) -> String {
    format!("{} -e '{}'", OSASCRIPT, escape_single_quotes(script))
}
