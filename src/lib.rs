//! Screen Time MCP server.
//!
//! Exposes a fixed catalog of tools that open panels of the macOS
//! Screen Time preference pane by driving System Preferences through
//! `osascript`, plus one informational tool describing what the
//! automation can and cannot reach.
//!
//! Screen Time has no public API for usage data, limits, or downtime;
//! every tool here only triggers UI navigation in the Settings app.
//! The `screentime_get_info` tool spells that limitation out for
//! callers.

// Core error handling
pub mod error;

// osascript command construction and process invocation
pub mod osascript;

// MCP protocol, tool catalog, dispatch, and stdio server loop
pub mod mcp;

pub use error::{DispatchError, ScriptFailure};
pub use mcp::{McpServer, ToolHandlers};
