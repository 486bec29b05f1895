//! Scripted LLM client for deterministic runs.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{ChatMessage, ChatResponse, LlmClient, ToolCall, ToolDefinition};

/// Replays a fixed queue of replies and records every request.
///
/// Stands in for the model when the caller needs to decide which tools run,
/// in what order, and how often.
#[derive(Debug, Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new(replies: impl IntoIterator<Item = ChatResponse>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Build a tool call with a fresh id.
    pub fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall::new(format!("call_{}", Uuid::new_v4().simple()), name, &arguments)
    }

    /// Message lists received so far, one entry per request.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatResponse> {
        self.requests
            .lock()
            .map_err(|_| anyhow::anyhow!("scripted request log poisoned"))?
            .push(messages.to_vec());

        self.replies
            .lock()
            .map_err(|_| anyhow::anyhow!("scripted replies poisoned"))?
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("Scripted LLM has no replies left"))
    }
}
