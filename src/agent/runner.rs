//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::config::ModelSettings;
use crate::error::{LadleError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use tracing::{debug, info};

/// Default step budget for an agent run.
const DEFAULT_MAX_STEPS: usize = 10;

/// Agent that calls tools until the model produces a final answer.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    tools: ToolContext,
    max_steps: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given tool context and model settings.
    pub fn new(tools: ToolContext, settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.model_id(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            tools,
            max_steps: DEFAULT_MAX_STEPS,
            system_prompt: String::new(),
        })
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum model calls for one run.
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// Override the model id.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the agent on a task, with an optional context block.
    pub async fn run(&self, task: &str, context: Option<&str>) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if !self.system_prompt.is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.system_prompt.clone())
                    .build()
                    .map_err(|e| LadleError::Agent(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message(task, context))
                .build()
                .map_err(|e| LadleError::Agent(e.to_string()))?
                .into(),
        );

        let tools = tool_definitions(self.tools.toolkit());
        let mut steps = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            steps += 1;
            if steps > self.max_steps {
                return Err(LadleError::Agent(format!(
                    "Agent exceeded maximum steps ({})",
                    self.max_steps
                )));
            }

            debug!("Agent step {}", steps);

            #[allow(deprecated)]
            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tools.clone())
                .temperature(self.temperature)
                .max_tokens(self.max_tokens)
                .build()
                .map_err(|e| LadleError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| LadleError::Model(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| LadleError::Agent("No response from model".to_string()))?;

            let tool_calls = match choice.message.tool_calls {
                Some(ref calls) if !calls.is_empty() => calls,
                // No tool calls - the reply is the final answer
                _ => {
                    return Ok(AgentResponse {
                        content: choice.message.content.clone().unwrap_or_default(),
                        tool_calls: tool_calls_made,
                        iterations: steps,
                    });
                }
            };

            // Keep any reasoning text the model sent alongside its calls
            let mut assistant_msg = ChatCompletionRequestAssistantMessageArgs::default();
            assistant_msg.tool_calls(tool_calls.clone());
            if let Some(content) = choice.message.content.as_ref().filter(|c| !c.is_empty()) {
                assistant_msg.content(content.clone());
            }
            messages.push(
                assistant_msg
                    .build()
                    .map_err(|e| LadleError::Agent(e.to_string()))?
                    .into(),
            );

            for tool_call in tool_calls {
                let record = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| LadleError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Failures never abort the run; they become the tool's text result.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        debug!("Tool {} returned: {}", name, result);

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }
}

/// Build the user turn, placing the context block ahead of the task.
fn user_message(task: &str, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(ctx) => format!("Context:\n{}\n\nTask: {}", ctx, task.trim()),
        None => task.trim().to_string(),
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final answer from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of model calls used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
