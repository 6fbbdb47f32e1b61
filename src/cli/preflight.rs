//! Pre-flight checks before agent runs.
//!
//! Validates that the model endpoint and credentials are configured before
//! starting a run that would otherwise fail on the first model call.

use crate::config::{ModelSettings, Settings};
use crate::error::{LadleError, Result};
use crate::openai::resolve_api_key;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Local arithmetic only.
    Calculate,
    /// A cost agent run needs a model.
    Ask,
    /// A research run needs a model and a usable search endpoint.
    Research,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Calculate => {
            // No external requirements
        }
        Operation::Ask => {
            check_model(settings.cost_model())?;
        }
        Operation::Research => {
            check_model(settings.research_model())?;
            check_url("search endpoint", &settings.search.endpoint)?;
        }
    }
    Ok(())
}

fn check_model(model: &ModelSettings) -> Result<()> {
    check_url("model API base", &model.api_base())?;
    resolve_api_key(model)?;
    Ok(())
}

fn check_url(what: &str, value: &str) -> Result<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| LadleError::Config(format!("Invalid {} '{}': {}", what, value, e)))
}
