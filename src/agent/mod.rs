pub mod process;
pub mod prompt;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};

use crate::config::AgentSettings;
use prompt::PromptText;

/// Terminal result of one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Exit zero; stdout with surrounding whitespace trimmed.
    Completed(String),
    NonZeroExit(String),
    TimedOut(Duration),
    BinaryNotFound,
}

/// A fully assembled agent command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Runs a built command to completion within `budget`.
///
/// Implementations must release every process and pipe before returning,
/// including when the budget elapses.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn invoke(&self, command: AgentCommand, budget: Duration) -> Result<ExecutionOutcome>;
}

/// Turns a prompt into an agent command and hands it to the configured [`Agent`].
#[derive(Clone)]
pub struct Executor {
    settings: AgentSettings,
    agent: Arc<dyn Agent>,
}

impl Executor {
    pub fn new(settings: AgentSettings, agent: Arc<dyn Agent>) -> Self {
        Self { settings, agent }
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn effective_model(&self, requested: Option<&str>) -> Option<String> {
        requested
            .map(str::to_string)
            .or_else(|| self.settings.default_model.clone())
    }

    pub fn build_command(&self, prompt: PromptText, model: Option<&str>) -> AgentCommand {
        let mut args: Vec<String> = vec![
            "--ask-for-approval".into(),
            "never".into(),
            "exec".into(),
            "-c".into(),
            format!("model_reasoning_effort=\"{}\"", self.settings.reasoning_effort),
            "--sandbox".into(),
            "read-only".into(),
            "--skip-git-repo-check".into(),
        ];

        if let Some(model) = self.effective_model(model) {
            args.push("--model".into());
            args.push(model);
        }

        args.push(prompt.into_string());

        AgentCommand {
            program: self.settings.binary.clone(),
            args,
        }
    }

    pub async fn run(&self, prompt: PromptText, model: Option<&str>) -> Result<ExecutionOutcome> {
        let command = self.build_command(prompt, model);
        info!(
            "Invoking {} (model: {}, timeout: {}s)",
            command.program,
            self.effective_model(model).as_deref().unwrap_or("<agent default>"),
            self.settings.timeout.as_secs_f64()
        );
        debug!("Agent args: {:?}", command.args);

        self.agent.invoke(command, self.settings.timeout).await
    }
}
