//! Configuration settings for Ladle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub agent: AgentSettings,
    pub research: ResearchSettings,
    pub search: SearchSettings,
    pub costs: CostSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Log level without -v flags (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.ladle".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Chat model provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    /// OpenAI hosted models (default).
    #[default]
    OpenAI,
    /// Hugging Face inference router (OpenAI-compatible).
    HuggingFace,
    /// Local Ollama server through its OpenAI-compatible endpoint.
    Ollama,
}

impl ModelProvider {
    /// Default API base URL for the provider.
    pub fn default_api_base(&self) -> &'static str {
        match self {
            ModelProvider::OpenAI => "https://api.openai.com/v1",
            ModelProvider::HuggingFace => "https://router.huggingface.co/v1",
            ModelProvider::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Default model id for the provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelProvider::OpenAI => "gpt-4o-mini",
            ModelProvider::HuggingFace => "Qwen/Qwen2.5-72B-Instruct",
            ModelProvider::Ollama => "qwen3:8b",
        }
    }

    /// Environment variable read for the key when none is configured.
    /// Ollama reads none.
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ModelProvider::OpenAI => Some("OPENAI_API_KEY"),
            ModelProvider::HuggingFace => Some("HF_API_KEY"),
            ModelProvider::Ollama => None,
        }
    }

    /// Whether the provider needs a real API key.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ModelProvider::Ollama)
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAI),
            "huggingface" | "hf" => Ok(ModelProvider::HuggingFace),
            "ollama" | "local" => Ok(ModelProvider::Ollama),
            _ => Err(format!("Unknown model provider: {}", s)),
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelProvider::OpenAI => write!(f, "openai"),
            ModelProvider::HuggingFace => write!(f, "huggingface"),
            ModelProvider::Ollama => write!(f, "ollama"),
        }
    }
}

/// Chat model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub provider: ModelProvider,
    /// Model id. Empty means the provider default.
    pub model: String,
    /// API base URL. Empty means the provider default.
    pub api_base: String,
    /// Environment variable holding the API key. Empty means the provider default.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: ModelProvider::OpenAI,
            model: String::new(),
            api_base: String::new(),
            api_key_env: String::new(),
            temperature: 0.1,
            max_tokens: 4096,
            timeout_seconds: 300,
        }
    }
}

impl ModelSettings {
    /// Settings for a provider with every other field at its default.
    pub fn for_provider(provider: ModelProvider) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Model id, falling back to the provider default.
    pub fn model_id(&self) -> String {
        if self.model.is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.model.clone()
        }
    }

    /// API base URL, falling back to the provider default.
    pub fn api_base(&self) -> String {
        if self.api_base.is_empty() {
            self.provider.default_api_base().to_string()
        } else {
            self.api_base.trim_end_matches('/').to_string()
        }
    }

    /// Environment variable to read the key from, if any.
    ///
    /// Ollama never reads another provider's default key variable, so a
    /// configured `OPENAI_API_KEY` or `HF_API_KEY` is not sent to it.
    pub fn api_key_env(&self) -> Option<String> {
        let env = self.api_key_env.trim();
        if env.is_empty() {
            return self.provider.default_api_key_env().map(str::to_string);
        }

        let foreign_default = [ModelProvider::OpenAI, ModelProvider::HuggingFace]
            .iter()
            .filter(|p| **p != self.provider)
            .any(|p| p.default_api_key_env() == Some(env));
        if self.provider == ModelProvider::Ollama && foreign_default {
            None
        } else {
            Some(env.to_string())
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum model calls for the supplier cost agent.
    pub cost_max_steps: usize,
    /// Maximum model calls for the research agent.
    pub research_max_steps: usize,
    /// Model for the cost agent. None = the `[model]` section.
    pub cost_model: Option<ModelSettings>,
    /// Model for the research agent. None = the `[model]` section.
    pub research_model: Option<ModelSettings>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            cost_max_steps: 10,
            research_max_steps: 20,
            cost_model: None,
            research_model: None,
        }
    }
}

/// Research agent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    /// Path to the long-term memory file.
    pub memory_file: String,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            memory_file: "~/.ladle/memory.txt".to_string(),
        }
    }
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// HTML search endpoint.
    pub endpoint: String,
    /// User-Agent header sent with search requests.
    pub user_agent: String,
    /// Maximum snippets returned per query.
    pub max_results: usize,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Bypass HTTP(S)_PROXY / ALL_PROXY for search requests.
    pub ignore_proxy: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://duckduckgo.com/html/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            max_results: 5,
            timeout_seconds: 15,
            ignore_proxy: true,
        }
    }
}

/// Supplier costing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    /// Daily order volume in liters.
    pub order_volume_liters: f64,
    /// JSON file with suppliers. None = built-in catalog.
    pub suppliers_file: Option<String>,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            order_volume_liters: crate::costs::DEFAULT_ORDER_VOLUME_LITERS,
            suppliers_file: None,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// TOML file with prompt overrides.
    pub custom_file: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LadleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ladle")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded memory file path.
    pub fn memory_path(&self) -> PathBuf {
        Self::expand_path(&self.research.memory_file)
    }

    /// Model used by the supplier cost agent.
    pub fn cost_model(&self) -> &ModelSettings {
        self.agent.cost_model.as_ref().unwrap_or(&self.model)
    }

    /// Model used by the research agent.
    pub fn research_model(&self) -> &ModelSettings {
        self.agent.research_model.as_ref().unwrap_or(&self.model)
    }

    /// Get the expanded supplier file path, if configured.
    pub fn suppliers_path(&self) -> Option<PathBuf> {
        self.costs.suppliers_file.as_deref().map(Self::expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [model]
            provider = "ollama"

            [agent]
            research_max_steps = 8
            "#,
        )
        .unwrap();

        assert_eq!(settings.model.provider, ModelProvider::Ollama);
        assert_eq!(settings.model.model_id(), "qwen3:8b");
        assert_eq!(settings.model.api_base(), "http://localhost:11434/v1");
        assert_eq!(settings.agent.research_max_steps, 8);
        assert_eq!(settings.agent.cost_max_steps, 10);
        assert_eq!(settings.search.max_results, 5);
    }

    #[test]
    fn test_agents_can_use_different_providers() {
        let settings: Settings = toml::from_str(
            r#"
            [agent.cost_model]
            provider = "huggingface"
            max_tokens = 2048

            [agent.research_model]
            provider = "ollama"
            model = "llama3.2"
            "#,
        )
        .unwrap();

        let cost = settings.cost_model();
        assert_eq!(cost.provider, ModelProvider::HuggingFace);
        assert_eq!(cost.model_id(), "Qwen/Qwen2.5-72B-Instruct");
        assert_eq!(cost.api_base(), "https://router.huggingface.co/v1");
        assert_eq!(cost.api_key_env().as_deref(), Some("HF_API_KEY"));
        assert_eq!(cost.max_tokens, 2048);

        let research = settings.research_model();
        assert_eq!(research.provider, ModelProvider::Ollama);
        assert_eq!(research.model_id(), "llama3.2");
    }

    #[test]
    fn test_agent_models_fall_back_to_model_section() {
        let settings: Settings = toml::from_str(
            r#"
            [model]
            provider = "ollama"

            [agent.cost_model]
            provider = "huggingface"
            "#,
        )
        .unwrap();

        assert_eq!(settings.cost_model().provider, ModelProvider::HuggingFace);
        assert_eq!(settings.research_model(), &settings.model);
        assert_eq!(settings.research_model().model_id(), "qwen3:8b");
    }

    #[test]
    fn test_ollama_ignores_other_providers_key_env() {
        let mut model = ModelSettings::for_provider(ModelProvider::Ollama);
        assert_eq!(model.api_key_env(), None);

        model.api_key_env = "OPENAI_API_KEY".to_string();
        assert_eq!(model.api_key_env(), None);

        model.api_key_env = "OLLAMA_REMOTE_KEY".to_string();
        assert_eq!(model.api_key_env().as_deref(), Some("OLLAMA_REMOTE_KEY"));

        let openai = ModelSettings::default();
        assert_eq!(openai.api_key_env().as_deref(), Some("OPENAI_API_KEY"));
    }

    #[test]
    fn test_explicit_model_overrides_provider_default() {
        let model = ModelSettings {
            model: "gpt-4.1".to_string(),
            api_base: "http://proxy.local/v1/".to_string(),
            ..ModelSettings::default()
        };
        assert_eq!(model.model_id(), "gpt-4.1");
        assert_eq!(model.api_base(), "http://proxy.local/v1");
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("OpenAI".parse::<ModelProvider>(), Ok(ModelProvider::OpenAI));
        assert_eq!("local".parse::<ModelProvider>(), Ok(ModelProvider::Ollama));
        assert_eq!("hf".parse::<ModelProvider>(), Ok(ModelProvider::HuggingFace));
        assert!("bedrock".parse::<ModelProvider>().is_err());
    }

    #[test]
    fn test_round_trip_through_file() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.costs.order_volume_liters = 45.0;
        settings.save_to(&path)?;

        let loaded = Settings::load_from(Some(&path))?;
        assert_eq!(loaded.costs.order_volume_liters, 45.0);
        Ok(())
    }
}
