//! System prompt for the inventory agent.

use crate::tools::ToolRegistry;

/// Combine the agent instructions with a listing of the available tools.
pub fn build_system_prompt(instructions: &str, tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    if tool_descriptions.is_empty() {
        return instructions.to_string();
    }

    format!(
        "{instructions}\n\n## Available Tools\n{tool_descriptions}\n\nItem names are matched exactly. Report the tool results to the user.",
        instructions = instructions,
        tool_descriptions = tool_descriptions
    )
}
