//! Agent module - resolves one natural-language command into a final answer.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with the system instructions and the user command
//! 2. Call the LLM with the available tools
//! 3. If the LLM requests tool calls, execute them in order and feed results back
//! 4. Repeat until the LLM produces a final response or the turn limit is hit

mod agent_loop;
mod prompt;
mod types;

pub use agent_loop::Agent;
pub use prompt::build_system_prompt;
pub use types::{AgentConfig, LogEntryType, RunLogEntry, RunOutcome, DEFAULT_INSTRUCTIONS};
