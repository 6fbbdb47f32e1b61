//! Doctor command - verify configuration and connectivity.

use crate::cli::Output;
use crate::config::{ModelSettings, Settings};
use crate::openai::{resolve_api_key, OLLAMA_API_KEY};
use console::style;
use std::path::Path;
use std::time::Duration;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Ladle Doctor");
    println!();
    println!("Checking configuration and connectivity...\n");

    let mut checks = Vec::new();

    for (title, model) in [
        ("Cost agent model", settings.cost_model()),
        ("Research agent model", settings.research_model()),
    ] {
        println!("{}", style(title).bold());
        let model_checks = vec![
            CheckResult::ok(
                "Provider",
                &format!("{} ({})", model.provider, model.model_id()),
            ),
            check_api_key(model),
            check_model_endpoint(model).await,
        ];
        for check in &model_checks {
            check.print();
        }
        checks.extend(model_checks);

        println!();
    }

    println!("{}", style("Research").bold());
    let research_checks = vec![check_search_endpoint(settings), check_memory_file(&settings.memory_path())];
    for check in &research_checks {
        check.print();
    }
    checks.extend(research_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Ladle.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Ladle is ready to use.");
    }

    Ok(())
}

/// Check that an API key is available for the provider.
fn check_api_key(model: &ModelSettings) -> CheckResult {
    let env = model.api_key_env().unwrap_or_else(|| "API key".to_string());
    let env = env.as_str();
    match resolve_api_key(model) {
        Ok(key) if !model.provider.requires_api_key() && key == OLLAMA_API_KEY => {
            CheckResult::ok(env, "not needed for ollama")
        }
        Ok(key) if key.chars().count() > 12 => {
            let head: String = key.chars().take(5).collect();
            let tail: String = key.chars().skip(key.chars().count() - 4).collect();
            CheckResult::ok(env, &format!("configured ({}...{})", head, tail))
        }
        Ok(_) => CheckResult::warning(
            env,
            "set but looks too short",
            "Check that the full key was exported",
        ),
        Err(e) => CheckResult::error(env, "missing", &e.to_string()),
    }
}

/// Check that the model API answers a model listing.
async fn check_model_endpoint(model: &ModelSettings) -> CheckResult {
    let base = model.api_base();
    let url = format!("{}/models", base);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(c) => c,
        Err(e) => return CheckResult::error("Model API", &e.to_string(), "Check TLS support"),
    };

    let mut request = client.get(&url);
    if let Ok(key) = resolve_api_key(model) {
        request = request.bearer_auth(key);
    }

    match request.send().await {
        Ok(resp) if resp.status().is_success() => CheckResult::ok("Model API", &base),
        Ok(resp) => CheckResult::warning(
            "Model API",
            &format!("{} answered {}", base, resp.status()),
            "Check the API key and model.api_base",
        ),
        Err(e) => CheckResult::error(
            "Model API",
            &format!("{} unreachable: {}", base, e),
            "Start the server (e.g. 'ollama serve') or fix model.api_base",
        ),
    }
}

fn check_search_endpoint(settings: &Settings) -> CheckResult {
    match url::Url::parse(&settings.search.endpoint) {
        Ok(_) => CheckResult::ok("Search endpoint", &settings.search.endpoint),
        Err(e) => CheckResult::error(
            "Search endpoint",
            &format!("invalid URL: {}", e),
            "Fix search.endpoint in the config file",
        ),
    }
}

fn check_memory_file(path: &Path) -> CheckResult {
    if path.exists() {
        let facts = std::fs::read_to_string(path)
            .map(|s| s.lines().count().saturating_sub(1))
            .unwrap_or(0);
        CheckResult::ok(
            "Memory file",
            &format!("{} ({} line(s) after header)", path.display(), facts),
        )
    } else {
        CheckResult::warning(
            "Memory file",
            &format!("{} (not created yet)", path.display()),
            "It will be created on the first research run",
        )
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ladle config edit",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelProvider;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let model = ModelSettings {
            api_key_env: "LADLE_TEST_UNSET_KEY".to_string(),
            ..ModelSettings::for_provider(ModelProvider::Ollama)
        };
        let result = check_api_key(&model);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "not needed for ollama");
    }

    #[test]
    fn test_ollama_does_not_report_openai_key() {
        std::env::set_var("OPENAI_API_KEY", "sk-secret-openai-key");
        let result = check_api_key(&ModelSettings::for_provider(ModelProvider::Ollama));
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "not needed for ollama");
        assert!(!result.message.contains("sk-se"));
    }

    #[test]
    fn test_missing_hf_key_is_an_error() {
        let model = ModelSettings {
            api_key_env: "LADLE_TEST_UNSET_HF_KEY".to_string(),
            ..ModelSettings::for_provider(ModelProvider::HuggingFace)
        };
        let result = check_api_key(&model);
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.name, "LADLE_TEST_UNSET_HF_KEY");
    }

    #[test]
    fn test_memory_file_counts_facts() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("memory.txt");
        assert_eq!(check_memory_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "--- Research Memory ---\nfact one\nfact two\n")?;
        let result = check_memory_file(&path);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.message.contains("2 line(s)"));
        Ok(())
    }
}
