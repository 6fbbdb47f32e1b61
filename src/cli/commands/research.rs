//! Research command implementation.

use super::ask::print_response;
use crate::agent::{Agent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::memory::{FactStore, FileFactStore};
use crate::search::DuckDuckGoSearch;
use anyhow::Result;
use console::style;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;

/// Run the research agent on a question, prompting for one if missing.
pub async fn run_research(
    question: Option<String>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Research, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ladle doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let memory = Arc::new(FileFactStore::open(settings.memory_path()).await?);
    let long_term_memory = memory.load().await?;
    info!(
        "Loaded {} bytes of memory from {}",
        long_term_memory.len(),
        memory.location()
    );

    let search = Arc::new(DuckDuckGoSearch::new(&settings.search)?);

    let prompts = Prompts::load(
        settings.prompts.custom_file.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let system_prompt = prompts.render_with_custom(&prompts.research.system, &HashMap::new());

    let mut agent = Agent::new(ToolContext::research(search, memory), settings.research_model())?
        .with_system_prompt(&system_prompt)
        .with_max_steps(settings.agent.research_max_steps);
    if let Some(model) = model {
        agent = agent.with_model(&model);
    }

    let question = match question {
        Some(q) => normalize_question(&q),
        None => prompt_question()?,
    };
    let Some(question) = question else {
        return Ok(());
    };

    let context = format!("long_term_memory:\n{}", long_term_memory);
    let spinner = Output::spinner(&format!("Researching ({})...", agent.model()));

    match agent.run(&question, Some(context.as_str())).await {
        Ok(response) => {
            spinner.finish_and_clear();
            Output::header("Final Answer");
            print_response(&response);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Research failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Ask for a question on stdin.
fn prompt_question() -> io::Result<Option<String>> {
    print!("\n{} ", style("What would you like to research?").green().bold());
    io::stdout().flush()?;

    read_question(io::stdin().lock())
}

/// Read one line as the question. None on end of input or a blank line.
fn read_question(mut input: impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(normalize_question(&line))
}

fn normalize_question(raw: &str) -> Option<String> {
    let question = raw.trim();
    (!question.is_empty()).then(|| question.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelProvider, ModelSettings};
    use std::io::Cursor;

    #[test]
    fn test_read_question_trims_line() {
        let input = Cursor::new("  What is Rust?  \nignored second line\n");
        assert_eq!(
            read_question(input).unwrap(),
            Some("What is Rust?".to_string())
        );
    }

    #[test]
    fn test_blank_input_means_no_question() {
        for input in ["", "\n", "   \n", "\t\r\n"] {
            assert_eq!(read_question(Cursor::new(input)).unwrap(), None, "{:?}", input);
        }
    }

    #[tokio::test]
    async fn test_blank_question_exits_quietly() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let mut settings = Settings::default();
        settings.agent.research_model = Some(ModelSettings::for_provider(ModelProvider::Ollama));
        settings.general.data_dir = temp_dir.path().display().to_string();
        settings.research.memory_file = temp_dir
            .path()
            .join("memory.txt")
            .display()
            .to_string();

        run_research(Some("   ".to_string()), None, settings).await?;
        Ok(())
    }
}
