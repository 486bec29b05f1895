//! Agent configuration and per-command run records.

/// Instructions given to the model for every command.
pub const DEFAULT_INSTRUCTIONS: &str = "You are an assistant that manages a pharmaceutical inventory. Use the available tools to add, delete, or update items.";

/// Immutable agent settings.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Display name, used in logs.
    pub name: String,

    /// System instructions.
    pub instructions: String,

    /// Model identifier sent to the endpoint.
    pub model: String,

    /// Maximum model round-trips per command.
    pub max_turns: usize,
}

impl AgentConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            name: "PharmaInventoryAgent".to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            model: model.into(),
            max_turns: 10,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Final answer for one command plus what happened along the way.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub final_output: String,

    /// Model round-trips used.
    pub turns: usize,

    pub log: Vec<RunLogEntry>,
}

impl RunOutcome {
    /// Names of the tools invoked, in call order.
    pub fn tool_calls(&self) -> impl Iterator<Item = &str> {
        self.log
            .iter()
            .filter(|e| e.entry_type == LogEntryType::ToolCall)
            .filter_map(|e| e.tool.as_deref())
    }
}

/// A single entry in a command's execution log.
#[derive(Debug, Clone)]
pub struct RunLogEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    pub entry_type: LogEntryType,

    /// Tool involved, for tool entries
    pub tool: Option<String>,

    pub content: String,
}

impl RunLogEntry {
    pub(crate) fn new(entry_type: LogEntryType, tool: Option<&str>, content: String) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            entry_type,
            tool: tool.map(str::to_string),
            content,
        }
    }
}

/// Types of log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntryType {
    /// Tool is being called
    ToolCall,
    /// Tool returned a result
    ToolResult,
    /// Agent produced final response
    Response,
}
