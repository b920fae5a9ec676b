use super::storage::StoragePath;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub value: Value,
}

/// Text as recorded on a model inference, before it is lifted into [`TextContent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextField {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallContent {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultContent {
    pub id: String,
    pub name: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTextContent {
    pub value: String,
}

/// Declared metadata of a stored image; the bytes themselves live in the object store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base64Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub image: Base64Image,
    pub storage_path: StoragePath,
}

/// An image inlined as a data URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBase64Image {
    pub url: String,
    pub mime_type: String,
}

impl ResolvedBase64Image {
    pub fn from_base64(mime_type: &str, data: &str) -> Self {
        ResolvedBase64Image {
            url: format!("data:{};base64,{}", mime_type, data),
            mime_type: mime_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedImageContent {
    pub image: ResolvedBase64Image,
    pub storage_path: StoragePath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageErrorContent {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Content of a stored input message
pub enum InputMessageContent {
    Text(TextContent),
    ToolCall(ToolCallContent),
    ToolResult(ToolResultContent),
    RawText(RawTextContent),
    Image(ImageContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Content of an input message as recorded on a model inference
pub enum ModelInferenceInputMessageContent {
    Text(RawTextField),
    ToolCall(ToolCallContent),
    ToolResult(ToolResultContent),
    RawText(RawTextContent),
    Image(ImageContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Content with every stored image either inlined or replaced by the reason it could not be
pub enum ResolvedInputMessageContent {
    Text(TextContent),
    ToolCall(ToolCallContent),
    ToolResult(ToolResultContent),
    RawText(RawTextContent),
    Image(ResolvedImageContent),
    ImageError(ImageErrorContent),
}

impl InputMessageContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        InputMessageContent::Text(TextContent {
            value: Value::String(text.into()),
        })
    }

    pub fn raw_text<S: Into<String>>(value: S) -> Self {
        InputMessageContent::RawText(RawTextContent {
            value: value.into(),
        })
    }

    pub fn tool_call<S: Into<String>, N: Into<String>, A: Into<String>>(
        id: S,
        name: N,
        arguments: A,
    ) -> Self {
        InputMessageContent::ToolCall(ToolCallContent {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        })
    }

    pub fn tool_result<S: Into<String>, N: Into<String>, R: Into<String>>(
        id: S,
        name: N,
        result: R,
    ) -> Self {
        InputMessageContent::ToolResult(ToolResultContent {
            id: id.into(),
            name: name.into(),
            result: result.into(),
        })
    }

    pub fn image<T: Into<String>>(storage_path: StoragePath, mime_type: T) -> Self {
        InputMessageContent::Image(ImageContent {
            image: Base64Image {
                url: None,
                mime_type: mime_type.into(),
            },
            storage_path,
        })
    }
}

impl ModelInferenceInputMessageContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ModelInferenceInputMessageContent::Text(RawTextField { text: text.into() })
    }

    pub fn image<T: Into<String>>(storage_path: StoragePath, mime_type: T) -> Self {
        ModelInferenceInputMessageContent::Image(ImageContent {
            image: Base64Image {
                url: None,
                mime_type: mime_type.into(),
            },
            storage_path,
        })
    }
}

impl ResolvedInputMessageContent {
    pub fn image_error<S: Into<String>>(error: S) -> Self {
        ResolvedInputMessageContent::ImageError(ImageErrorContent {
            error: error.into(),
        })
    }

    /// Get the resolved image if this is an Image variant
    pub fn as_image(&self) -> Option<&ResolvedBase64Image> {
        match self {
            ResolvedInputMessageContent::Image(image) => Some(&image.image),
            _ => None,
        }
    }

    /// Get the error message if this is an ImageError variant
    pub fn as_image_error(&self) -> Option<&str> {
        match self {
            ResolvedInputMessageContent::ImageError(error) => Some(&error.error),
            _ => None,
        }
    }
}
