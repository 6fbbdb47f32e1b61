//! Agent system for task execution with tool calling.
//!
//! Provides an LLM agent that runs a bounded loop of model calls, executing
//! the tools the model asks for until it replies with a final answer. Two
//! toolkits exist: supplier cost calculators, and web research with memory.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext, Toolkit};
