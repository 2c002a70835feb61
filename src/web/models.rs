use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Raw message as decoded from the wire, before role and content checks.
#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub role: String,
    pub content: String,
}

/// Raw `/v1/chat/completions` body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub messages: Vec<MessagePayload>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub stream: bool,
}

/// A chat request whose messages passed validation.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub stream: bool,
}

impl ChatPayload {
    pub fn validate(self) -> Result<ChatRequest, RouterError> {
        if self.messages.is_empty() {
            return Err(RouterError::MalformedRequest("messages[] is required".to_string()));
        }

        let messages = self
            .messages
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let role = raw
                    .role
                    .parse::<Role>()
                    .map_err(|e| RouterError::MalformedRequest(format!("messages[{}]: {}", i, e)))?;
                if raw.content.is_empty() {
                    return Err(RouterError::MalformedRequest(format!(
                        "messages[{}]: content must not be empty",
                        i
                    )));
                }
                Ok(Message {
                    role,
                    content: raw.content,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChatRequest {
            messages,
            model: self.model.filter(|m| !m.is_empty()),
            stream: self.stream,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Envelope for failures raised while running the agent.
#[derive(Debug, Serialize)]
pub struct ChatErrorResponse {
    pub error: ErrorDetail,
}
