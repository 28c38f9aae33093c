//! Error types for the Screen Time MCP server.
//!
//! Typed errors via thiserror so the dispatcher can tell an unknown
//! tool apart from an osascript failure without string matching.

use std::process::ExitStatus;

use thiserror::Error;

/// Failure raised when an osascript invocation cannot complete: the
/// process could not be launched, exited non-zero, or produced more
/// output than the capture cap allows.
///
/// `source_detail` carries the process's stderr text when the failure
/// exposed one; consumers fall back to `message` otherwise.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ScriptFailure {
    pub message: String,
    pub source_detail: Option<String>,
}

impl ScriptFailure {
    /// The process could not be started at all.
    pub fn launch(program: &str, err: &std::io::Error) -> Self {
        Self {
            message: format!("failed to launch {}: {}", program, err),
            source_detail: None,
        }
    }

    /// The process exited non-zero. Stderr becomes the detail when the
    /// process wrote any.
    pub fn exit(status: ExitStatus, stderr: &str) -> Self {
        let message = match status.code() {
            Some(code) => format!("osascript exited with status {}", code),
            None => "osascript terminated by signal".to_string(),
        };
        let stderr = stderr.trim();
        Self {
            message,
            source_detail: (!stderr.is_empty()).then(|| stderr.to_string()),
        }
    }

    /// Captured output exceeded the configured cap.
    pub fn output_overrun(captured: usize, cap: usize) -> Self {
        Self {
            message: format!(
                "captured output ({} bytes) exceeds the {} byte cap",
                captured, cap
            ),
            source_detail: None,
        }
    }

    /// The most specific diagnostic available: stderr when the process
    /// produced any, the generic message otherwise.
    pub fn diagnostic(&self) -> &str {
        self.source_detail.as_deref().unwrap_or(&self.message)
    }
}

/// Errors surfaced by tool dispatch. Every variant is converted to an
/// error envelope at the dispatcher boundary; none escapes to the
/// transport as a protocol fault.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("AppleScript error: {}", .0.diagnostic())]
    Script(#[from] ScriptFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_prefers_stderr() {
        let failure = ScriptFailure {
            message: "osascript exited with status 1".to_string(),
            source_detail: Some("Script Error: Application not found".to_string()),
        };
        assert_eq!(failure.diagnostic(), "Script Error: Application not found");
    }

    #[test]
    fn test_diagnostic_falls_back_to_message() {
        let failure = ScriptFailure {
            message: "failed to launch osascript: no such file".to_string(),
            source_detail: None,
        };
        assert_eq!(failure.diagnostic(), failure.message);
    }

    #[test]
    fn test_dispatch_error_display() {
        let unknown = DispatchError::UnknownTool("not_a_real_tool".to_string());
        assert_eq!(unknown.to_string(), "Unknown tool: not_a_real_tool");

        let script = DispatchError::Script(ScriptFailure {
            message: "osascript exited with status 1".to_string(),
            source_detail: Some("boom".to_string()),
        });
        assert_eq!(script.to_string(), "AppleScript error: boom");
    }
}
