//! MCP Tool Handlers
//!
//! Routes a tool call to its routine and converts every failure into a
//! result envelope. Nothing here returns an error to the transport:
//! an unknown tool and a failed osascript invocation both come back as
//! `isError` envelopes, and the server keeps serving.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{DispatchError, ScriptFailure};
use crate::osascript::{Osascript, ScriptRunner};

use super::protocol::ToolCallResult;
use super::tools::{
    activate_script, reveal_anchor_script, ScreenTimeTool, ToolAction, SCREEN_TIME_INFO,
};

/// Tool handlers bound to a script runner.
///
/// Stateless apart from the runner handle, so concurrent calls are
/// safe; each invocation owns its own process launches exclusively.
pub struct ToolHandlers {
    runner: Arc<dyn ScriptRunner>,
}

impl ToolHandlers {
    /// Handlers backed by the real osascript interpreter.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(Osascript::new()))
    }

    /// Handlers backed by an explicit runner. Tests inject recording
    /// fakes here.
    pub fn with_runner(runner: Arc<dyn ScriptRunner>) -> Self {
        Self { runner }
    }

    /// Handle a tool call by name. Arguments are accepted for protocol
    /// completeness; every tool in the catalog is parameterless.
    pub async fn handle(&self, name: &str, _args: Value) -> ToolCallResult {
        match self.dispatch(name) {
            Ok(text) => ToolCallResult::text(text),
            Err(err @ DispatchError::UnknownTool(_)) => {
                warn!(tool = name, "unknown tool requested");
                ToolCallResult::error(err.to_string())
            }
            Err(err @ DispatchError::Script(_)) => {
                warn!(tool = name, error = %err, "tool execution failed");
                ToolCallResult::error(format!("Error: {}", err))
            }
        }
    }

    fn dispatch(&self, name: &str) -> Result<String, DispatchError> {
        let tool = ScreenTimeTool::resolve(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        match tool.action() {
            ToolAction::OpenPanel { anchor, opened } => {
                self.open_panel(anchor)?;
                info!(tool = name, anchor, "panel opened");
                Ok(opened.to_string())
            }
            ToolAction::Info => Ok(SCREEN_TIME_INFO.to_string()),
        }
    }

    /// Reveal the anchor, then bring Settings to the foreground. The
    /// activate step is only attempted once the reveal has succeeded;
    /// a failed reveal has no observable side effect to roll back.
    fn open_panel(&self, anchor: &str) -> Result<(), ScriptFailure> {
        self.runner.run(&reveal_anchor_script(anchor))?;
        self.runner.run(&activate_script())?;
        Ok(())
    }
}

impl Default for ToolHandlers {
    fn default() -> Self {
        Self::new()
    }
}
