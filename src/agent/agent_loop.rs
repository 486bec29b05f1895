//! Core agent loop implementation.

use std::sync::Arc;

use crate::llm::{ChatMessage, LlmClient, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;
use super::types::{AgentConfig, LogEntryType, RunLogEntry, RunOutcome};

/// Inventory agent: instructions, tools and a model endpoint bound together.
pub struct Agent {
    config: AgentConfig,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent.
    pub fn new(config: AgentConfig, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Resolve one command into a final answer.
    ///
    /// Tool calls run in the order the model requests them. Tool failures are
    /// reported back to the model; endpoint failures are returned as errors.
    pub async fn run(&self, command: &str) -> anyhow::Result<RunOutcome> {
        let mut log = Vec::new();

        let system_prompt = build_system_prompt(&self.config.instructions, &self.tools);
        let mut messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(command)];

        let tool_schemas = self.tools.get_tool_schemas();

        for turn in 0..self.config.max_turns {
            tracing::debug!(agent = %self.config.name, "Agent turn {}", turn + 1);

            let response = self
                .llm
                .chat_completion(&self.config.model, &messages, Some(&tool_schemas))
                .await?;

            tracing::debug!(
                finish_reason = response.finish_reason.as_deref().unwrap_or("none"),
                total_tokens = response.usage.map(|u| u.total_tokens).unwrap_or(0),
                "Model replied"
            );

            let tool_calls = response.requested_tool_calls();
            if !tool_calls.is_empty() {
                messages.push(ChatMessage::assistant_tool_calls(
                    response.content.clone(),
                    tool_calls.to_vec(),
                ));

                for tool_call in tool_calls {
                    log.push(RunLogEntry::new(
                        LogEntryType::ToolCall,
                        Some(&tool_call.function.name),
                        tool_call.function.arguments.clone(),
                    ));

                    let result = match self.execute_tool_call(tool_call).await {
                        Ok(output) => output,
                        Err(e) => {
                            tracing::warn!(tool = %tool_call.function.name, "Tool failed: {}", e);
                            format!("Error: {}", e)
                        }
                    };

                    log.push(RunLogEntry::new(
                        LogEntryType::ToolResult,
                        Some(&tool_call.function.name),
                        result.clone(),
                    ));

                    messages.push(ChatMessage::tool_result(tool_call.id.clone(), result));
                }

                continue;
            }

            // No tool calls - this is the final response
            let content = response.content.unwrap_or_default();
            log.push(RunLogEntry::new(LogEntryType::Response, None, content.clone()));
            return Ok(RunOutcome {
                final_output: content,
                turns: turn + 1,
                log,
            });
        }

        Err(anyhow::anyhow!(
            "Max turns ({}) exceeded without a final answer",
            self.config.max_turns
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::inventory::Inventory;
    use crate::llm::{ChatResponse, Role, ScriptedLlm};

    fn agent_with(llm: Arc<ScriptedLlm>, inventory: &Inventory) -> Agent {
        Agent::new(
            AgentConfig::new("test-model"),
            llm,
            ToolRegistry::inventory(inventory.clone()),
        )
    }

    #[tokio::test]
    async fn plain_answer_without_tools() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([ChatResponse::text("Hello!")]));
        let agent = agent_with(llm.clone(), &inv);

        let outcome = agent.run("hi").await.unwrap();
        assert_eq!(outcome.final_output, "Hello!");
        assert_eq!(outcome.turns, 1);
        assert_eq!(outcome.tool_calls().count(), 0);
        assert_eq!(inv.len().await, 3);

        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0][0].role, Role::System);
        assert_eq!(requests[0][1].content.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn tool_results_are_fed_back_verbatim() {
        let inv = Inventory::seeded();
        let call = ScriptedLlm::call("add_item", json!({"item": "Amoxicillin"}));
        let call_id = call.id.clone();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![call]),
            ChatResponse::text("Amoxicillin has been added."),
        ]));
        let agent = agent_with(llm.clone(), &inv);

        let outcome = agent.run("add Amoxicillin").await.unwrap();
        assert_eq!(outcome.final_output, "Amoxicillin has been added.");
        assert_eq!(outcome.turns, 2);
        assert_eq!(outcome.tool_calls().collect::<Vec<_>>(), vec!["add_item"]);
        assert_eq!(
            inv.snapshot().await,
            vec!["Paracetamol", "Aspirin", "Ibuprofen", "Amoxicillin"]
        );

        let second = &llm.requests()[1];
        assert_eq!(second.len(), 4);
        assert_eq!(second[2].role, Role::Assistant);
        let tool_msg = &second[3];
        assert_eq!(tool_msg.role, Role::Tool);
        assert_eq!(tool_msg.tool_call_id.as_deref(), Some(call_id.as_str()));
        assert_eq!(tool_msg.content.as_deref(), Some("Added: Amoxicillin"));
    }

    #[tokio::test]
    async fn run_log_records_each_step_with_timestamps() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![ScriptedLlm::call("delete_item", json!({"item": "Aspirin"}))]),
            ChatResponse::text("Deleted."),
        ]));
        let agent = agent_with(llm, &inv);

        let outcome = agent.run("delete Aspirin").await.unwrap();
        let kinds: Vec<_> = outcome.log.iter().map(|e| e.entry_type).collect();
        assert_eq!(
            kinds,
            vec![LogEntryType::ToolCall, LogEntryType::ToolResult, LogEntryType::Response]
        );
        assert_eq!(outcome.log[1].tool.as_deref(), Some("delete_item"));
        assert_eq!(outcome.log[1].content, "Deleted: Aspirin");
        assert_eq!(outcome.log[2].tool, None);
        for entry in &outcome.log {
            assert!(
                chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok(),
                "bad timestamp {}",
                entry.timestamp
            );
        }
    }

    #[tokio::test]
    async fn multiple_calls_run_in_requested_order() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![
                ScriptedLlm::call("add_item", json!({"item": "Insulin"})),
                ScriptedLlm::call("update_item", json!({"old_item": "Insulin", "new_item": "Metformin"})),
            ]),
            ChatResponse::tool_calls(vec![ScriptedLlm::call(
                "delete_item",
                json!({"item": "Paracetamol"}),
            )]),
            ChatResponse::text("Done."),
        ]));
        let agent = agent_with(llm.clone(), &inv);

        let outcome = agent.run("shuffle things").await.unwrap();
        assert_eq!(outcome.turns, 3);
        assert_eq!(
            outcome.tool_calls().collect::<Vec<_>>(),
            vec!["add_item", "update_item", "delete_item"]
        );
        assert_eq!(
            inv.snapshot().await,
            vec!["Aspirin", "Ibuprofen", "Metformin"]
        );
        assert_eq!(llm.remaining(), 0);
    }

    #[tokio::test]
    async fn tool_errors_are_reported_to_the_model() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![
                ScriptedLlm::call("restock_item", json!({"item": "A"})),
                ScriptedLlm::call("delete_item", json!({})),
            ]),
            ChatResponse::text("I could not do that."),
        ]));
        let agent = agent_with(llm.clone(), &inv);

        let outcome = agent.run("restock A").await.unwrap();
        assert_eq!(outcome.final_output, "I could not do that.");
        assert_eq!(inv.len().await, 3);

        let second = &llm.requests()[1];
        assert_eq!(second[3].content.as_deref(), Some("Error: Unknown tool: restock_item"));
        assert_eq!(second[4].content.as_deref(), Some("Error: Missing 'item' argument"));
    }

    #[tokio::test]
    async fn malformed_arguments_are_treated_as_missing() {
        let inv = Inventory::seeded();
        let mut call = ScriptedLlm::call("add_item", json!({}));
        call.function.arguments = "{not json".to_string();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![call]),
            ChatResponse::text("Sorry."),
        ]));
        let agent = agent_with(llm.clone(), &inv);

        agent.run("add ???").await.unwrap();
        assert_eq!(inv.len().await, 3);
        assert_eq!(
            llm.requests()[1][3].content.as_deref(),
            Some("Error: Missing 'item' argument")
        );
    }

    #[tokio::test]
    async fn endpoint_errors_propagate() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([]));
        let agent = agent_with(llm, &inv);

        let err = agent.run("add X").await.unwrap_err();
        assert!(err.to_string().contains("no replies left"));
    }

    #[tokio::test]
    async fn turn_limit_is_fatal() {
        let inv = Inventory::new();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![ScriptedLlm::call("add_item", json!({"item": "A"}))]),
            ChatResponse::tool_calls(vec![ScriptedLlm::call("add_item", json!({"item": "B"}))]),
        ]));
        let agent = Agent::new(
            AgentConfig::new("m").with_max_turns(2),
            llm,
            ToolRegistry::inventory(inv.clone()),
        );

        let err = agent.run("add forever").await.unwrap_err();
        assert_eq!(err.to_string(), "Max turns (2) exceeded without a final answer");
        // Mutations already applied stay applied.
        assert_eq!(inv.snapshot().await, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn empty_final_response_yields_empty_output() {
        let inv = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([ChatResponse::default()]));
        let agent = agent_with(llm, &inv);

        let outcome = agent.run("anything").await.unwrap();
        assert_eq!(outcome.final_output, "");
    }

    #[tokio::test]
    async fn agents_do_not_share_inventories() {
        let a = Inventory::seeded();
        let b = Inventory::seeded();
        let llm = Arc::new(ScriptedLlm::new([
            ChatResponse::tool_calls(vec![ScriptedLlm::call("delete_item", json!({"item": "Aspirin"}))]),
            ChatResponse::text("ok"),
        ]));
        agent_with(llm, &a).run("delete Aspirin").await.unwrap();

        assert_eq!(a.len().await, 2);
        assert_eq!(b.len().await, 3);
    }
}
