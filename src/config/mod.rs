//! Configuration module for Ladle.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{CostPrompts, Prompts, ResearchPrompts};
pub use settings::{
    AgentSettings, CostSettings, GeneralSettings, ModelProvider, ModelSettings, PromptSettings,
    ResearchSettings, SearchSettings, Settings,
};
