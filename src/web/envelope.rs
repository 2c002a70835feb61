use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::agent::ExecutionOutcome;
use crate::error::RouterError;
use crate::web::models::{ChatResponse, Choice, Message, Role};

/// Maps an agent outcome onto the chat-completion success body, or the
/// matching [`RouterError`] for every failure variant.
pub fn build(outcome: ExecutionOutcome, model: String, binary: &str) -> Result<ChatResponse, RouterError> {
    let content = match outcome {
        ExecutionOutcome::Completed(text) => text,
        ExecutionOutcome::NonZeroExit(message) => return Err(RouterError::NonZeroExit(message)),
        ExecutionOutcome::TimedOut(elapsed) => return Err(RouterError::TimedOut { elapsed }),
        ExecutionOutcome::BinaryNotFound => {
            return Err(RouterError::BinaryNotFound {
                binary: binary.to_string(),
            })
        }
    };

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;

    Ok(ChatResponse {
        id: format!("chatcmpl_{}", now.as_millis()),
        object: "chat.completion".to_string(),
        created: now.as_secs(),
        model,
        choices: vec![Choice {
            index: 0,
            message: Message {
                role: Role::Assistant,
                content,
            },
            finish_reason: "stop".to_string(),
        }],
    })
}
