//! # Pharma Inventory Agent
//!
//! A conversational assistant that keeps an in-memory list of pharmaceutical
//! item names and lets a language model edit it through tool calls.
//!
//! This library provides:
//! - An inventory store with add/delete/update operations
//! - Tools exposing those operations to an OpenAI-compatible chat endpoint
//! - A tool-calling agent loop and a line-oriented console loop
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Read a command from the console
//! 2. Build context with the system instructions and available tools
//! 3. Call the LLM, execute any tool calls against the inventory
//! 4. Feed results back to the LLM, repeat until it answers in plain text
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pharma_inventory::{agent::{Agent, AgentConfig}, inventory::Inventory,
//!     llm::OpenAiCompatClient, tools::ToolRegistry, Config};
//!
//! let config = Config::from_env()?;
//! let inventory = Inventory::seeded();
//! let llm = Arc::new(OpenAiCompatClient::new(config.api_key.clone(), config.base_url.clone()));
//! let agent = Agent::new(AgentConfig::new(config.model.clone()), llm, ToolRegistry::inventory(inventory.clone()));
//! let outcome = agent.run("add Amoxicillin").await?;
//! ```

pub mod agent;
pub mod config;
pub mod inventory;
pub mod llm;
pub mod repl;
pub mod tools;

pub use config::Config;
