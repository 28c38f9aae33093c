//! Screen Time tool catalog.
//!
//! The seven tools form a closed set, so the catalog is an enum: each
//! variant carries its wire name, description, and what invoking it
//! does. `tools/list` is a pure projection of this table; dispatch
//! resolves against the same table, which keeps the advertised schema
//! and the executable routines from drifting apart.

use serde_json::json;

use super::protocol::Tool;

/// Settings application driven by every generated script.
pub const SETTINGS_APP: &str = "System Preferences";

/// Preference pane id shared by all open-panel tools.
pub const SCREEN_TIME_PANE: &str = "com.apple.preference.screentime";

/// Capability summary returned by `screentime_get_info`. Screen Time
/// exposes no API for usage data or limits, so the catalog documents
/// the manual path instead.
pub const SCREEN_TIME_INFO: &str = "\
Screen Time MCP Information:

Screen Time on macOS has very limited API access. This MCP can:
- Open various Screen Time settings panels

What this MCP cannot do (due to macOS limitations):
- Read app usage data programmatically
- Set app limits programmatically
- Enable/disable downtime programmatically
- Access Screen Time reports

To view your Screen Time data:
1. Open System Preferences/Settings
2. Click on Screen Time
3. View your usage reports and settings

To manage Screen Time:
- Use the tools to open specific settings panels
- Make changes manually in the Settings app";

/// The closed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTimeTool {
    Open,
    OpenAppLimits,
    OpenDowntime,
    OpenCommunicationLimits,
    OpenAlwaysAllowed,
    OpenContentPrivacy,
    GetInfo,
}

/// What a tool does when invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Reveal `anchor` in the Screen Time pane, then bring the
    /// Settings application to the foreground.
    OpenPanel {
        anchor: &'static str,
        opened: &'static str,
    },
    /// Answer with the static capability summary; no scripting.
    Info,
}

impl ScreenTimeTool {
    /// Registration order, which is also the order `tools/list`
    /// reports.
    pub const ALL: [ScreenTimeTool; 7] = [
        ScreenTimeTool::Open,
        ScreenTimeTool::OpenAppLimits,
        ScreenTimeTool::OpenDowntime,
        ScreenTimeTool::OpenCommunicationLimits,
        ScreenTimeTool::OpenAlwaysAllowed,
        ScreenTimeTool::OpenContentPrivacy,
        ScreenTimeTool::GetInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "screentime_open",
            Self::OpenAppLimits => "screentime_open_app_limits",
            Self::OpenDowntime => "screentime_open_downtime",
            Self::OpenCommunicationLimits => "screentime_open_communication_limits",
            Self::OpenAlwaysAllowed => "screentime_open_always_allowed",
            Self::OpenContentPrivacy => "screentime_open_content_privacy",
            Self::GetInfo => "screentime_get_info",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Open => "Open Screen Time settings",
            Self::OpenAppLimits => "Open App Limits settings",
            Self::OpenDowntime => "Open Downtime settings",
            Self::OpenCommunicationLimits => "Open Communication Limits settings",
            Self::OpenAlwaysAllowed => "Open Always Allowed settings",
            Self::OpenContentPrivacy => "Open Content & Privacy Restrictions settings",
            Self::GetInfo => "Get information about Screen Time capabilities and limitations",
        }
    }

    pub fn action(&self) -> ToolAction {
        match self {
            Self::Open => ToolAction::OpenPanel {
                anchor: "main",
                opened: "Screen Time settings opened",
            },
            Self::OpenAppLimits => ToolAction::OpenPanel {
                anchor: "appLimits",
                opened: "App Limits settings opened",
            },
            Self::OpenDowntime => ToolAction::OpenPanel {
                anchor: "downtime",
                opened: "Downtime settings opened",
            },
            Self::OpenCommunicationLimits => ToolAction::OpenPanel {
                anchor: "communicationLimits",
                opened: "Communication Limits settings opened",
            },
            Self::OpenAlwaysAllowed => ToolAction::OpenPanel {
                anchor: "alwaysAllowed",
                opened: "Always Allowed settings opened",
            },
            Self::OpenContentPrivacy => ToolAction::OpenPanel {
                anchor: "contentPrivacy",
                opened: "Content & Privacy Restrictions settings opened",
            },
            Self::GetInfo => ToolAction::Info,
        }
    }

    /// Resolve a wire name to a catalog entry.
    pub fn resolve(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tool| tool.name() == name)
    }
}

/// AppleScript that reveals `anchor` within the Screen Time pane.
pub fn reveal_anchor_script(anchor: &str) -> String {
    format!(
        "tell application \"{}\" to reveal anchor \"{}\" of pane id \"{}\"",
        SETTINGS_APP, anchor, SCREEN_TIME_PANE
    )
}

/// AppleScript that brings the Settings application to the foreground.
pub fn activate_script() -> String {
    format!("tell application \"{}\" to activate", SETTINGS_APP)
}

/// Get all available MCP tools, in registration order.
pub fn get_tools() -> Vec<Tool> {
    ScreenTimeTool::ALL
        .iter()
        .map(|tool| Tool {
            name: tool.name().into(),
            description: tool.description().into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        })
        .collect()
}
