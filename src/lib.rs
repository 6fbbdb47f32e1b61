//! Ladle - tool-calling agents for supplier costing and web research
//!
//! A CLI tool that hands natural-language tasks to an LLM agent equipped with
//! a small set of callable tools.
//!
//! # Overview
//!
//! Ladle allows you to:
//! - Quote daily ice cream delivery prices across suppliers
//! - Ask a cost agent questions it answers with transport and tariff calculators
//! - Research questions on the web, with facts saved to a plain-text memory
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `costs` - Transport, tariff and daily price arithmetic
//! - `suppliers` - Supplier records and quotes
//! - `memory` - Append-only fact log
//! - `search` - Web search backends
//! - `agent` - Tool definitions and the agent loop
//! - `openai` - OpenAI-compatible chat client (OpenAI, Ollama)
//!
//! # Example
//!
//! ```rust,no_run
//! use ladle::agent::{Agent, ToolContext};
//! use ladle::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = Agent::new(ToolContext::costs(), settings.cost_model())?
//!         .with_max_steps(settings.agent.cost_max_steps);
//!
//!     let response = agent
//!         .run("What is the transport cost for 50 liters over 10 km?", None)
//!         .await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod costs;
pub mod error;
pub mod memory;
pub mod openai;
pub mod search;
pub mod suppliers;

pub use error::{LadleError, Result};
