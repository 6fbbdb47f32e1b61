//! Ask command implementation.

use super::quote::supplier_list;
use crate::agent::{Agent, AgentResponse, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::suppliers::suppliers_context;
use anyhow::Result;
use std::collections::HashMap;

/// Run the ask command against the supplier cost agent.
pub async fn run_ask(
    task: &str,
    with_suppliers: bool,
    suppliers: Option<String>,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ladle doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let context = if with_suppliers || suppliers.is_some() {
        let list = supplier_list(suppliers.as_deref(), &settings)?;
        Some(suppliers_context(&list))
    } else {
        None
    };

    let prompts = Prompts::load(
        settings.prompts.custom_file.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let mut vars = HashMap::new();
    vars.insert(
        "order_volume".to_string(),
        settings.costs.order_volume_liters.to_string(),
    );
    let system_prompt = prompts.render_with_custom(&prompts.costs.system, &vars);

    let mut agent = Agent::new(ToolContext::costs(), settings.cost_model())?
        .with_system_prompt(&system_prompt)
        .with_max_steps(settings.agent.cost_max_steps);
    if let Some(model) = model {
        agent = agent.with_model(&model);
    }

    let spinner = Output::spinner(&format!("Agent working ({})...", agent.model()));

    match agent.run(task, context.as_deref()).await {
        Ok(response) => {
            spinner.finish_and_clear();
            print_response(&response);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Print the final answer and a summary of tool calls.
pub(crate) fn print_response(response: &AgentResponse) {
    println!("\n{}\n", response.content);

    if !response.tool_calls.is_empty() {
        Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
        for call in &response.tool_calls {
            Output::tool_call(call);
        }
        println!();
    }

    Output::info(&format!("Completed in {} step(s)", response.iterations));
}
