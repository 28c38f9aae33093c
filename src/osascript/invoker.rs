//! Synchronous external-process execution with bounded output capture.
//!
//! One osascript process per call, launched through `sh -c` so the
//! command line built by [`super::command`] is interpreted exactly as
//! the escaping contract promises. The call blocks until the process
//! exits; UI-automation failures are not assumed transient, so there
//! is no retry.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::ScriptFailure;

use super::command::build_command;

/// Maximum bytes of captured process output. Far above anything the
/// Screen Time scripts produce; exceeding it is reported the same way
/// as a process failure.
pub const MAX_CAPTURED_OUTPUT: usize = 50 * 1024 * 1024;

/// Runs AppleScript bodies through the external interpreter.
///
/// This trait is the seam between tool routines and the operating
/// system: handlers depend on it, tests substitute a recording fake.
pub trait ScriptRunner: Send + Sync {
    /// Execute one script and return its trimmed stdout.
    fn run(&self, script: &str) -> Result<String, ScriptFailure>;
}

/// Production runner: builds a shell command line for each script and
/// executes it synchronously, one process per call.
pub struct Osascript {
    shell: PathBuf,
    max_output: usize,
}

impl Osascript {
    pub fn new() -> Self {
        Self {
            shell: PathBuf::from("/bin/sh"),
            max_output: MAX_CAPTURED_OUTPUT,
        }
    }

    /// Override the shell used to interpret command lines.
    pub fn with_shell(mut self, shell: impl Into<PathBuf>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Override the output capture cap.
    pub fn with_max_output(mut self, bytes: usize) -> Self {
        self.max_output = bytes;
        self
    }

    /// Execute a prebuilt shell command line, capturing stdout and
    /// stderr as text.
    pub fn invoke(&self, command_line: &str) -> Result<String, ScriptFailure> {
        debug!(command = command_line, "invoking external interpreter");

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .output()
            .map_err(|e| ScriptFailure::launch(&self.shell.display().to_string(), &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptFailure::exit(output.status, &stderr));
        }

        let captured = output.stdout.len().max(output.stderr.len());
        if captured > self.max_output {
            return Err(ScriptFailure::output_overrun(captured, self.max_output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptRunner for Osascript {
    fn run(&self, script: &str) -> Result<String, ScriptFailure> {
        self.invoke(&build_command(script))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh() -> Osascript {
        Osascript::new()
    }

    #[test]
    fn test_invoke_returns_trimmed_stdout() {
        let out = sh().invoke("printf '  padded  \\n'").unwrap();
        assert_eq!(out, "padded");
    }

    #[test]
    fn test_invoke_with_empty_output() {
        let out = sh().invoke("true").unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_nonzero_exit_carries_stderr_detail() {
        let err = sh().invoke("echo boom >&2; exit 3").unwrap_err();
        assert!(err.message.contains("status 3"), "message: {}", err.message);
        assert_eq!(err.source_detail.as_deref(), Some("boom"));
        assert_eq!(err.diagnostic(), "boom");
    }

    #[test]
    fn test_nonzero_exit_without_stderr_falls_back() {
        let err = sh().invoke("exit 7").unwrap_err();
        assert!(err.source_detail.is_none());
        assert_eq!(err.diagnostic(), err.message);
    }

    #[test]
    fn test_unlaunchable_shell_is_a_launch_failure() {
        let err = sh()
            .with_shell("/nonexistent/shell-binary")
            .invoke("true")
            .unwrap_err();
        assert!(err.message.contains("failed to launch"));
        assert!(err.source_detail.is_none());
    }

    #[test]
    fn test_output_beyond_cap_fails() {
        let err = sh()
            .with_max_output(16)
            .invoke("printf '0123456789abcdef0'")
            .unwrap_err();
        assert!(err.message.contains("cap"), "message: {}", err.message);
        assert!(err.source_detail.is_none());
    }

    #[test]
    fn test_run_builds_an_osascript_command() {
        // `osascript` is not on PATH here; the failure proves run()
        // went through command construction rather than raw exec.
        let err = sh().run("tell application \"x\" to activate").unwrap_err();
        let detail = err.source_detail.unwrap_or_default();
        assert!(
            detail.contains("osascript"),
            "stderr should name the interpreter: {}",
            detail
        );
    }
}
