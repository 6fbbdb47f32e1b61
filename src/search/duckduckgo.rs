//! DuckDuckGo HTML search.
//!
//! Scrapes the no-JavaScript results page; there is no API key involved.

use super::WebSearch;
use crate::config::SearchSettings;
use crate::error::{LadleError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

/// Web search against the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
    snippet_regex: Regex,
    tag_regex: Regex,
}

impl DuckDuckGoSearch {
    /// Build a search client from settings.
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        url::Url::parse(&settings.endpoint).map_err(|e| {
            LadleError::Config(format!("Invalid search endpoint '{}': {}", settings.endpoint, e))
        })?;

        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(settings.timeout_seconds));

        if settings.ignore_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
            max_results: settings.max_results,
            snippet_regex: Regex::new(
                r#"(?s)<a\b[^>]*class="[^"]*\bresult__snippet\b[^"]*"[^>]*>(.*?)</a>"#,
            )
            .expect("Invalid regex"),
            tag_regex: Regex::new(r"<[^>]+>").expect("Invalid regex"),
        })
    }

    /// Pull snippet text out of a results page.
    fn extract_snippets(&self, html: &str) -> Vec<String> {
        self.snippet_regex
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| clean_text(&self.tag_regex.replace_all(m.as_str(), "")))
            .filter(|s| !s.is_empty())
            .take(self.max_results)
            .collect()
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoSearch {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        debug!("Searching DuckDuckGo for: {}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?;

        let html = response.text().await?;
        let snippets = self.extract_snippets(&html);

        debug!("Search returned {} snippets", snippets.len());
        Ok(snippets)
    }
}

/// Decode common HTML entities and collapse whitespace.
fn clean_text(text: &str) -> String {
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
