//! Web search backends for the research agent.

mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;

use crate::error::Result;
use async_trait::async_trait;

/// Text returned to the agent when a search has no hits.
pub const NO_RESULTS: &str = "No search results found.";

/// Trait for web search backends.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Run a query and return result snippets, best first.
    async fn search(&self, query: &str) -> Result<Vec<String>>;
}

/// Format snippets as the block handed back to the model.
pub fn format_results(snippets: &[String]) -> String {
    if snippets.is_empty() {
        NO_RESULTS.to_string()
    } else {
        snippets.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_results() {
        assert_eq!(format_results(&[]), NO_RESULTS);
        assert_eq!(
            format_results(&["first".to_string(), "second".to_string()]),
            "first\nsecond"
        );
    }
}
