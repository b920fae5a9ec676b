use super::content::{InputMessageContent, ModelInferenceInputMessageContent, ResolvedInputMessageContent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: Vec<InputMessageContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInferenceInputMessage {
    pub role: Role,
    pub content: Vec<ModelInferenceInputMessageContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInputMessage {
    pub role: Role,
    pub content: Vec<ResolvedInputMessageContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The input of an inference as stored
pub struct Input {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    #[serde(default)]
    pub messages: Vec<InputMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The input of a single model inference, with the system prompt already rendered
pub struct ModelInferenceInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default)]
    pub messages: Vec<ModelInferenceInputMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    pub messages: Vec<ResolvedInputMessage>,
}

impl InputMessage {
    pub fn new(role: Role) -> Self {
        InputMessage {
            role,
            content: Vec::new(),
        }
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Add any content to the message
    pub fn with_content(mut self, content: InputMessageContent) -> Self {
        self.content.push(content);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(InputMessageContent::text(text))
    }
}

impl ModelInferenceInputMessage {
    pub fn new(role: Role) -> Self {
        ModelInferenceInputMessage {
            role,
            content: Vec::new(),
        }
    }

    pub fn user() -> Self {
        Self::new(Role::User)
    }

    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    pub fn with_content(mut self, content: ModelInferenceInputMessageContent) -> Self {
        self.content.push(content);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(ModelInferenceInputMessageContent::text(text))
    }
}
