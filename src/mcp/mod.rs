//! MCP (Model Context Protocol) Server Module
//!
//! Exposes the Screen Time tool catalog over JSON-RPC on stdio.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  MCP client                     │
//! └────────────────────────────────────────────────┘
//!                        │
//!                        │ JSON-RPC over stdio
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │            McpServer (server.rs)                │
//! │  tools/list  → catalog projection (tools.rs)    │
//! │  tools/call  → ToolHandlers (handlers.rs)       │
//! └────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │     osascript → System Preferences pane         │
//! └────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handlers::ToolHandlers;
pub use server::McpServer;
