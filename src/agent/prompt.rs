use crate::web::models::{Message, Role};

/// Conversation flattened into the single positional argument the agent reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn marker(role: Role) -> String {
    format!("[{}]", role.as_str().to_uppercase())
}

/// Folds the messages into `[ROLE]\ncontent\n` blocks separated by blank
/// lines, ending with an open `[ASSISTANT]` marker for the agent to complete.
pub fn compile(messages: &[Message]) -> PromptText {
    let mut parts: Vec<String> = messages
        .iter()
        .map(|m| format!("{}\n{}\n", marker(m.role), m.content))
        .collect();
    parts.push(format!("{}\n", marker(Role::Assistant)));
    PromptText(parts.join("\n"))
}
