//! Prompt templates for Ladle.
//!
//! Prompts can be customized with a TOML file containing `[costs]` and/or
//! `[research]` tables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub costs: CostPrompts,
    pub research: ResearchPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for the supplier cost agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPrompts {
    pub system: String,
}

impl Default for CostPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a purchasing assistant for an ice cream truck business.

You have tools to compute refrigerated transport costs and import tariffs.
Always use the tools for these figures instead of estimating them yourself.

Guidelines:
- Use 'calculate_transport_cost' for delivery costs (trucks carry 300 liters and cost $1.20 per kilometer)
- Use 'calculate_tariff' on the product cost only, never on transport or fees
- When supplier data is provided, compute every supplier before comparing them
- The total daily price is product cost + transport cost + tariff + tasting fee
- Unless told otherwise, assume a daily order of {{order_volume}} liters

When comparing suppliers, answer with a markdown table sorted by total daily price,
followed by a one-sentence recommendation."#
                .to_string(),
        }
    }
}

/// Prompts for the research agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchPrompts {
    pub system: String,
}

impl Default for ResearchPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a Research Assistant. Your goal is to answer the user's questions accurately.
You have access to a long-term memory and a set of tools.

Your instructions are:
1. Consult memory first: the long-term memory is given in the context. If the answer is there, reply with it directly.
2. Search if necessary: if the information is not in your memory, use the 'web_search' tool to find it.
3. Save new knowledge: when you discover a new, critical fact, you MUST save it by calling the 'save_to_memory' tool. Save one self-contained fact per call.
4. Deliver the final answer: once your research is complete, reply without calling any tool. Your reply is the final answer and should be a complete summary."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load default prompts, with an optional custom file and variables.
    pub fn load(
        custom_file: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(file) = custom_file {
            let custom_path = PathBuf::from(shellexpand::tilde(file).to_string());
            if custom_path.exists() {
                let content = std::fs::read_to_string(&custom_path)?;
                prompts = toml::from_str(&content)?;
            }
        }

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.costs.system.contains("calculate_transport_cost"));
        assert!(prompts.research.system.contains("save_to_memory"));
    }

    #[test]
    fn test_render_with_custom_prefers_provided_vars() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("order_volume".to_string(), "99".to_string());

        let mut vars = HashMap::new();
        vars.insert("order_volume".to_string(), "30".to_string());

        let rendered = prompts.render_with_custom(&prompts.costs.system, &vars);
        assert!(rendered.contains("daily order of 30 liters"));
        assert!(!rendered.contains("{{order_volume}}"));
    }

    #[test]
    fn test_load_partial_custom_file() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("prompts.toml");
        std::fs::write(&path, "[research]\nsystem = \"Be brief.\"\n")?;

        let prompts = Prompts::load(path.to_str(), None)?;
        assert_eq!(prompts.research.system, "Be brief.");
        assert_eq!(prompts.costs.system, CostPrompts::default().system);
        Ok(())
    }
}
