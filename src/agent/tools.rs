//! Tool definitions and implementations for the agent system.

use crate::costs;
use crate::error::{LadleError, Result};
use crate::memory::FactStore;
use crate::search::{format_results, WebSearch};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Refrigerated transport cost for an order.
    CalculateTransportCost { distance_km: f64, order_volume: f64 },

    /// Tariff on the base cost of goods.
    CalculateTariff { base_cost: f64, is_canadian: bool },

    /// Search the web.
    WebSearch { query: String },

    /// Append a fact to long-term memory.
    SaveToMemory { fact: String },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::CalculateTransportCost { .. } => "calculate_transport_cost",
            ToolCall::CalculateTariff { .. } => "calculate_tariff",
            ToolCall::WebSearch { .. } => "web_search",
            ToolCall::SaveToMemory { .. } => "save_to_memory",
        }
    }
}

/// A set of tools handed to one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolkit {
    /// Transport and tariff calculators.
    Costs,
    /// Web search and memory.
    Research,
}

impl Toolkit {
    /// Names of the tools in this set.
    pub fn tool_names(&self) -> &'static [&'static str] {
        match self {
            Toolkit::Costs => &["calculate_transport_cost", "calculate_tariff"],
            Toolkit::Research => &["web_search", "save_to_memory"],
        }
    }

    pub fn includes(&self, tool: &ToolCall) -> bool {
        self.tool_names().contains(&tool.name())
    }
}

/// Tool execution context.
pub struct ToolContext {
    toolkit: Toolkit,
    search: Option<Arc<dyn WebSearch>>,
    memory: Option<Arc<dyn FactStore>>,
}

impl ToolContext {
    /// Context for the supplier cost agent.
    pub fn costs() -> Self {
        Self {
            toolkit: Toolkit::Costs,
            search: None,
            memory: None,
        }
    }

    /// Context for the research agent.
    pub fn research(search: Arc<dyn WebSearch>, memory: Arc<dyn FactStore>) -> Self {
        Self {
            toolkit: Toolkit::Research,
            search: Some(search),
            memory: Some(memory),
        }
    }

    pub fn toolkit(&self) -> Toolkit {
        self.toolkit
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        if !self.toolkit.includes(tool) {
            return Err(LadleError::Agent(format!(
                "Tool '{}' is not available to this agent",
                tool.name()
            )));
        }

        match tool {
            ToolCall::CalculateTransportCost {
                distance_km,
                order_volume,
            } => {
                let cost = costs::transport_cost(*distance_km, *order_volume)?;
                Ok(format!("{:.2}", cost))
            }
            ToolCall::CalculateTariff {
                base_cost,
                is_canadian,
            } => {
                let tariff = costs::tariff(*base_cost, *is_canadian)?;
                Ok(format!("{:.2}", tariff))
            }
            ToolCall::WebSearch { query } => self.execute_web_search(query).await,
            ToolCall::SaveToMemory { fact } => self.execute_save_to_memory(fact).await,
        }
    }

    async fn execute_web_search(&self, query: &str) -> Result<String> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| LadleError::Agent("Web search is not configured".to_string()))?;

        match search.search(query).await {
            Ok(snippets) => Ok(format_results(&snippets)),
            Err(e) => Ok(format!("Error during web search: {}", e)),
        }
    }

    async fn execute_save_to_memory(&self, fact: &str) -> Result<String> {
        let memory = self
            .memory
            .as_ref()
            .ok_or_else(|| LadleError::Agent("Memory is not configured".to_string()))?;

        match memory.append(fact).await {
            Ok(()) => Ok("Fact saved to memory successfully.".to_string()),
            Err(e) => Ok(format!("Error saving to memory: {}", e)),
        }
    }
}

/// Get OpenAI function/tool definitions for a toolkit.
pub fn tool_definitions(toolkit: Toolkit) -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let all = vec![
        FunctionObject {
            name: "calculate_transport_cost".to_string(),
            description: Some(
                "Calculate transportation cost based on distance and order size. \
                Refrigerated transport costs $1.2 per kilometer and has a capacity of 300 liters."
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "distance_km": {
                        "type": "number",
                        "description": "The distance in kilometers"
                    },
                    "order_volume": {
                        "type": "number",
                        "description": "The order volume in liters"
                    }
                },
                "required": ["distance_km", "order_volume"]
            })),
            strict: None,
        },
        FunctionObject {
            name: "calculate_tariff".to_string(),
            description: Some(
                "Calculates tariff for Canadian imports. Returns the tariff only, not the total cost. \
                Assumes tariff on dairy products from Canada is worth 2 * pi / 100, approx 6.2%"
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "base_cost": {
                        "type": "number",
                        "description": "The base cost of goods, not including transportation cost"
                    },
                    "is_canadian": {
                        "type": "boolean",
                        "description": "Whether the import is from Canada"
                    }
                },
                "required": ["base_cost", "is_canadian"]
            })),
            strict: None,
        },
        FunctionObject {
            name: "web_search".to_string(),
            description: Some("Searches the web for information using DuckDuckGo.".to_string()),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            })),
            strict: None,
        },
        FunctionObject {
            name: "save_to_memory".to_string(),
            description: Some(
                "Saves a new, important fact to the long-term memory file.".to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "fact": {
                        "type": "string",
                        "description": "The string containing the fact to be remembered"
                    }
                },
                "required": ["fact"]
            })),
            strict: None,
        },
    ];

    all.into_iter()
        .filter(|f| toolkit.tool_names().contains(&f.name.as_str()))
        .map(|function| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function,
        })
        .collect()
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    // Some models send no arguments at all for a call
    let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| LadleError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "calculate_transport_cost" => Ok(ToolCall::CalculateTransportCost {
            distance_km: number_arg(&args, "distance_km")?,
            order_volume: number_arg(&args, "order_volume")?,
        }),
        "calculate_tariff" => Ok(ToolCall::CalculateTariff {
            base_cost: number_arg(&args, "base_cost")?,
            is_canadian: bool_arg(&args, "is_canadian")?,
        }),
        "web_search" => Ok(ToolCall::WebSearch {
            query: string_arg(&args, "query")?,
        }),
        "save_to_memory" => Ok(ToolCall::SaveToMemory {
            fact: string_arg(&args, "fact")?,
        }),
        _ => Err(LadleError::Agent(format!("Unknown tool: {}", name))),
    }
}

fn missing(key: &str) -> LadleError {
    LadleError::Agent(format!("Missing '{}' argument", key))
}

/// Accepts a JSON number or a numeric string.
fn number_arg(args: &serde_json::Value, key: &str) -> Result<f64> {
    let value = &args[key];
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| missing(key))
}

/// Accepts a JSON bool or "true"/"false".
fn bool_arg(args: &serde_json::Value, key: &str) -> Result<bool> {
    let value = &args[key];
    if let Some(b) = value.as_bool() {
        return Ok(b);
    }
    match value.as_str().map(|s| s.trim().to_lowercase()).as_deref() {
        Some("true") | Some("yes") => Ok(true),
        Some("false") | Some("no") => Ok(false),
        _ => Err(missing(key)),
    }
}

fn string_arg(args: &serde_json::Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryFactStore;
    use async_trait::async_trait;

    struct CannedSearch(std::result::Result<Vec<String>, String>);

    #[async_trait]
    impl WebSearch for CannedSearch {
        async fn search(&self, _query: &str) -> Result<Vec<String>> {
            self.0.clone().map_err(LadleError::Search)
        }
    }

    fn research_context(search: CannedSearch) -> (ToolContext, Arc<InMemoryFactStore>) {
        let memory = Arc::new(InMemoryFactStore::new());
        let context = ToolContext::research(Arc::new(search), memory.clone());
        (context, memory)
    }

    #[test]
    fn test_parse_transport_tool() {
        let tool = parse_tool_call(
            "calculate_transport_cost",
            r#"{"distance_km": 10, "order_volume": "50"}"#,
        )
        .unwrap();
        assert_eq!(
            tool,
            ToolCall::CalculateTransportCost {
                distance_km: 10.0,
                order_volume: 50.0
            }
        );
    }

    #[test]
    fn test_parse_tariff_tool_with_string_bool() {
        let tool =
            parse_tool_call("calculate_tariff", r#"{"base_cost": 58.5, "is_canadian": "True"}"#)
                .unwrap();
        assert_eq!(
            tool,
            ToolCall::CalculateTariff {
                base_cost: 58.5,
                is_canadian: true
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_missing() {
        assert!(parse_tool_call("final_answer", "{}").is_err());
        assert!(parse_tool_call("web_search", "").is_err());
        assert!(parse_tool_call("save_to_memory", r#"{"fact": "  "}"#).is_err());
        assert!(parse_tool_call("calculate_tariff", r#"{"base_cost": 1}"#).is_err());
    }

    #[test]
    fn test_tool_definitions_match_toolkit() {
        let names: Vec<String> = tool_definitions(Toolkit::Costs)
            .into_iter()
            .map(|t| t.function.name)
            .collect();
        assert_eq!(names, vec!["calculate_transport_cost", "calculate_tariff"]);

        let names: Vec<String> = tool_definitions(Toolkit::Research)
            .into_iter()
            .map(|t| t.function.name)
            .collect();
        assert_eq!(names, vec!["web_search", "save_to_memory"]);
    }

    #[tokio::test]
    async fn test_cost_tools_execute() {
        let context = ToolContext::costs();
        let output = context
            .execute(&ToolCall::CalculateTransportCost {
                distance_km: 10.0,
                order_volume: 50.0,
            })
            .await
            .unwrap();
        assert_eq!(output, "12.00");

        let output = context
            .execute(&ToolCall::CalculateTariff {
                base_cost: 100.0,
                is_canadian: true,
            })
            .await
            .unwrap();
        assert_eq!(output, "6.28");
    }

    #[tokio::test]
    async fn test_cost_agent_cannot_search() {
        let context = ToolContext::costs();
        let result = context
            .execute(&ToolCall::WebSearch {
                query: "ice cream".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_search_failure_is_reported_as_text() {
        let (context, _) = research_context(CannedSearch(Err("timed out".to_string())));
        let output = context
            .execute(&ToolCall::WebSearch {
                query: "rust".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output, "Error during web search: Web search failed: timed out");
    }

    #[tokio::test]
    async fn test_search_without_hits() {
        let (context, _) = research_context(CannedSearch(Ok(vec![])));
        let output = context
            .execute(&ToolCall::WebSearch {
                query: "zzzz".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output, "No search results found.");
    }

    #[tokio::test]
    async fn test_save_to_memory_appends_fact() {
        let (context, memory) = research_context(CannedSearch(Ok(vec![])));
        let output = context
            .execute(&ToolCall::SaveToMemory {
                fact: "Water boils at 100C at sea level".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(output, "Fact saved to memory successfully.");
        assert!(memory
            .load()
            .await
            .unwrap()
            .ends_with("Water boils at 100C at sea level\n"));
    }
}
