//! Resolution of stored inputs into directly renderable ones.
//!
//! Image content only carries a reference into the object store. Resolving an
//! input fetches every referenced image concurrently and inlines it as a data
//! URL. A failed image never fails the input: it becomes an `image_error` item
//! in the same position, and its siblings resolve as usual.

use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ResolveResult;
use crate::models::content::{
    ImageContent, InputMessageContent, ModelInferenceInputMessageContent, ResolvedBase64Image,
    ResolvedImageContent, ResolvedInputMessageContent, TextContent,
};
use crate::models::message::{
    Input, InputMessage, ModelInferenceInput, ModelInferenceInputMessage, ResolvedInput,
    ResolvedInputMessage,
};
use crate::object_store::ObjectStore;

/// Payload format of a stored image object
#[derive(Debug, Deserialize)]
struct StoredImage {
    data: String,
}

pub struct InputResolver<S> {
    store: S,
}

impl<S: ObjectStore> InputResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn resolve_input(&self, input: Input) -> ResolvedInput {
        ResolvedInput {
            system: input.system,
            messages: self.resolve_messages(input.messages).await,
        }
    }

    pub async fn resolve_model_inference_input(&self, input: ModelInferenceInput) -> ResolvedInput {
        ResolvedInput {
            system: input.system.map(Value::String),
            messages: self.resolve_model_inference_messages(input.messages).await,
        }
    }

    /// Resolve all messages concurrently, keeping their original order
    pub async fn resolve_messages(&self, messages: Vec<InputMessage>) -> Vec<ResolvedInputMessage> {
        join_all(
            messages
                .into_iter()
                .map(|message| self.resolve_message(message)),
        )
        .await
    }

    pub async fn resolve_model_inference_messages(
        &self,
        messages: Vec<ModelInferenceInputMessage>,
    ) -> Vec<ResolvedInputMessage> {
        join_all(
            messages
                .into_iter()
                .map(|message| self.resolve_model_inference_message(message)),
        )
        .await
    }

    async fn resolve_message(&self, message: InputMessage) -> ResolvedInputMessage {
        let content = join_all(
            message
                .content
                .into_iter()
                .map(|content| self.resolve_content(content)),
        )
        .await;

        ResolvedInputMessage {
            role: message.role,
            content,
        }
    }

    async fn resolve_model_inference_message(
        &self,
        message: ModelInferenceInputMessage,
    ) -> ResolvedInputMessage {
        let content = join_all(
            message
                .content
                .into_iter()
                .map(|content| self.resolve_model_inference_content(content)),
        )
        .await;

        ResolvedInputMessage {
            role: message.role,
            content,
        }
    }

    pub async fn resolve_content(&self, content: InputMessageContent) -> ResolvedInputMessageContent {
        match content {
            InputMessageContent::Text(text) => ResolvedInputMessageContent::Text(text),
            InputMessageContent::ToolCall(call) => ResolvedInputMessageContent::ToolCall(call),
            InputMessageContent::ToolResult(result) => {
                ResolvedInputMessageContent::ToolResult(result)
            }
            InputMessageContent::RawText(raw) => ResolvedInputMessageContent::RawText(raw),
            InputMessageContent::Image(image) => self.resolve_image_content(image).await,
        }
    }

    pub async fn resolve_model_inference_content(
        &self,
        content: ModelInferenceInputMessageContent,
    ) -> ResolvedInputMessageContent {
        match content {
            ModelInferenceInputMessageContent::Text(text) => {
                ResolvedInputMessageContent::Text(TextContent {
                    value: Value::String(text.text),
                })
            }
            ModelInferenceInputMessageContent::ToolCall(call) => {
                ResolvedInputMessageContent::ToolCall(call)
            }
            ModelInferenceInputMessageContent::ToolResult(result) => {
                ResolvedInputMessageContent::ToolResult(result)
            }
            ModelInferenceInputMessageContent::RawText(raw) => {
                ResolvedInputMessageContent::RawText(raw)
            }
            ModelInferenceInputMessageContent::Image(image) => {
                self.resolve_image_content(image).await
            }
        }
    }

    /// Shared by both input shapes: a failure is turned into an `image_error` item
    async fn resolve_image_content(&self, content: ImageContent) -> ResolvedInputMessageContent {
        match self.resolve_image(&content).await {
            Ok(image) => ResolvedInputMessageContent::Image(ResolvedImageContent {
                image,
                storage_path: content.storage_path,
            }),
            Err(e) => {
                warn!(path = %content.storage_path.path, error = %e, "failed to resolve image");
                ResolvedInputMessageContent::image_error(e.to_string())
            }
        }
    }

    /// Fetch a stored image and inline it as a data URL of its declared MIME type
    pub async fn resolve_image(&self, content: &ImageContent) -> ResolveResult<ResolvedBase64Image> {
        debug!(path = %content.storage_path.path, "resolving image");
        let object = self.store.get_object(&content.storage_path).await?;
        let stored: StoredImage = serde_json::from_str(&object)?;
        Ok(ResolvedBase64Image::from_base64(
            &content.image.mime_type,
            &stored.data,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ObjectStoreError, ObjectStoreResult, ResolveError};
    use crate::models::message::Role;
    use crate::models::storage::{StorageKind, StoragePath};
    use crate::object_store::MockObjectStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves objects from memory, failing unknown paths and delaying the ones listed
    #[derive(Default)]
    struct MemoryStore {
        objects: HashMap<String, String>,
        delays: HashMap<String, Duration>,
    }

    impl MemoryStore {
        fn with_object(mut self, path: &str, object: &str) -> Self {
            self.objects.insert(path.to_string(), object.to_string());
            self
        }

        fn with_delay(mut self, path: &str, delay: Duration) -> Self {
            self.delays.insert(path.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn get_object(&self, storage_path: &StoragePath) -> ObjectStoreResult<String> {
            if let Some(delay) = self.delays.get(&storage_path.path) {
                tokio::time::sleep(*delay).await;
            }
            self.objects
                .get(&storage_path.path)
                .cloned()
                .ok_or_else(|| ObjectStoreError::Other("not found".to_string()))
        }
    }

    fn path(p: &str) -> StoragePath {
        StoragePath::new(StorageKind::Disabled, p)
    }

    fn png(p: &str) -> InputMessageContent {
        InputMessageContent::image(path(p), "image/png")
    }

    #[tokio::test]
    async fn test_resolve_image_inlines_data_url() {
        let store = MemoryStore::default().with_object("a.png", r#"{"data":"QUJD"}"#);
        let resolver = InputResolver::new(store);

        let resolved = resolver.resolve_content(png("a.png")).await;

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({
                "type": "image",
                "image": {"url": "data:image/png;base64,QUJD", "mime_type": "image/png"},
                "storage_path": {"kind": {"type": "disabled"}, "path": "a.png"}
            })
        );
    }

    #[tokio::test]
    async fn test_store_error_message_is_used_verbatim() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .withf(|p| p.path == "missing.png")
            .times(1)
            .returning(|_| Err(ObjectStoreError::Other("not found".to_string())));
        let resolver = InputResolver::new(store);

        let resolved = resolver.resolve_content(png("missing.png")).await;

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({"type": "image_error", "error": "not found"})
        );
    }

    #[tokio::test]
    async fn test_invalid_json_becomes_image_error() {
        let store = MemoryStore::default().with_object("bad.png", "not json");
        let resolver = InputResolver::new(store);

        let resolved = resolver.resolve_content(png("bad.png")).await;

        let error = resolved.as_image_error().expect("expected image_error");
        assert!(error.starts_with("failed to parse stored object:"), "{}", error);
    }

    #[tokio::test]
    async fn test_missing_data_field_is_a_parse_error() {
        let store = MemoryStore::default().with_object("a.png", r#"{"bytes":"QUJD"}"#);
        let resolver = InputResolver::new(store);

        let content = match png("a.png") {
            InputMessageContent::Image(image) => image,
            _ => unreachable!(),
        };
        let err = resolver.resolve_image(&content).await.unwrap_err();

        assert!(matches!(err, ResolveError::Parse(_)));
        assert!(err.to_string().contains("missing field `data`"));
    }

    #[tokio::test]
    async fn test_non_image_content_is_identity() {
        let mut store = MockObjectStore::new();
        store.expect_get_object().never();
        let resolver = InputResolver::new(store);

        let contents = vec![
            InputMessageContent::Text(TextContent {
                value: json!({"city": "Lisbon"}),
            }),
            InputMessageContent::tool_call("call_1", "get_weather", r#"{"city":"Lisbon"}"#),
            InputMessageContent::tool_result("call_1", "get_weather", "18C"),
            InputMessageContent::raw_text("raw"),
        ];

        for content in contents {
            let before = serde_json::to_value(&content).unwrap();
            let resolved = resolver.resolve_content(content).await;
            assert_eq!(serde_json::to_value(&resolved).unwrap(), before);
        }
    }

    #[tokio::test]
    async fn test_model_inference_text_is_lifted() {
        let resolver = InputResolver::new(MemoryStore::default());

        let resolved = resolver
            .resolve_model_inference_content(ModelInferenceInputMessageContent::text("hello"))
            .await;

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({"type": "text", "value": "hello"})
        );
    }

    #[tokio::test]
    async fn test_model_inference_image_error_matches_primary_path() {
        let resolver = InputResolver::new(MemoryStore::default());

        let resolved = resolver
            .resolve_model_inference_content(ModelInferenceInputMessageContent::image(
                path("gone.png"),
                "image/png",
            ))
            .await;

        assert_eq!(resolved.as_image_error(), Some("not found"));
    }

    #[tokio::test]
    async fn test_failed_image_does_not_affect_siblings() {
        let store = MemoryStore::default()
            .with_object("a.png", r#"{"data":"QUJD"}"#)
            .with_object("c.png", r#"{"data":"REVG"}"#);
        let resolver = InputResolver::new(store);

        let message = InputMessage::user()
            .with_content(png("a.png"))
            .with_content(png("b.png"))
            .with_text("caption")
            .with_content(png("c.png"));
        let resolved = resolver.resolve_messages(vec![message]).await;

        assert_eq!(resolved.len(), 1);
        let content = &resolved[0].content;
        assert_eq!(content.len(), 4);
        assert_eq!(
            content[0].as_image().map(|i| i.url.as_str()),
            Some("data:image/png;base64,QUJD")
        );
        assert_eq!(content[1].as_image_error(), Some("not found"));
        assert!(matches!(content[2], ResolvedInputMessageContent::Text(_)));
        assert_eq!(
            content[3].as_image().map(|i| i.url.as_str()),
            Some("data:image/png;base64,REVG")
        );
    }

    #[tokio::test]
    async fn test_order_is_kept_regardless_of_completion_order() {
        let store = MemoryStore::default()
            .with_object("slow.png", r#"{"data":"U0xPVw=="}"#)
            .with_object("fast.png", r#"{"data":"RkFTVA=="}"#)
            .with_delay("slow.png", Duration::from_millis(50));
        let resolver = InputResolver::new(store);

        let messages = vec![
            InputMessage::user().with_content(png("slow.png")),
            InputMessage::assistant().with_text("between"),
            InputMessage::user()
                .with_content(png("slow.png"))
                .with_content(png("fast.png")),
        ];
        let resolved = resolver.resolve_messages(messages).await;

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].role, Role::User);
        assert_eq!(resolved[1].role, Role::Assistant);
        assert_eq!(
            resolved[2]
                .content
                .iter()
                .map(|c| c.as_image().map(|i| i.url.clone()))
                .collect::<Vec<_>>(),
            vec![
                Some("data:image/png;base64,U0xPVw==".to_string()),
                Some("data:image/png;base64,RkFTVA==".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_images_are_fetched_concurrently() {
        let delay = Duration::from_millis(200);
        let store = (0..5).fold(MemoryStore::default(), |store, i| {
            let p = format!("{}.png", i);
            store
                .with_object(&p, r#"{"data":"QUJD"}"#)
                .with_delay(&p, delay)
        });
        let resolver = InputResolver::new(store);

        let message = (0..5).fold(InputMessage::user(), |message, i| {
            message.with_content(png(&format!("{}.png", i)))
        });

        let started = tokio::time::Instant::now();
        let resolved = resolver.resolve_messages(vec![message]).await;

        assert!(started.elapsed() < delay * 5);
        assert!(resolved[0].content.iter().all(|c| c.as_image().is_some()));
    }

    #[tokio::test]
    async fn test_empty_collections() {
        let resolver = InputResolver::new(MemoryStore::default());

        assert!(resolver.resolve_messages(vec![]).await.is_empty());

        let resolved = resolver
            .resolve_messages(vec![InputMessage::assistant()])
            .await;
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].content.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_input_keeps_system() {
        let resolver = InputResolver::new(MemoryStore::default());
        let input = Input {
            system: Some(json!({"assistant_name": "Ada"})),
            messages: vec![InputMessage::user().with_text("hi")],
        };

        let resolved = resolver.resolve_input(input).await;

        assert_eq!(resolved.system, Some(json!({"assistant_name": "Ada"})));
        assert_eq!(resolved.messages.len(), 1);
        assert_eq!(resolved.messages[0].content.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_model_inference_input() {
        let store = MemoryStore::default().with_object("a.jpg", r#"{"data":"QUJD"}"#);
        let resolver = InputResolver::new(store);
        let input = ModelInferenceInput {
            system: Some("You are terse.".to_string()),
            messages: vec![ModelInferenceInputMessage::user()
                .with_text("describe this")
                .with_content(ModelInferenceInputMessageContent::image(
                    path("a.jpg"),
                    "image/jpeg",
                ))],
        };

        let resolved = resolver.resolve_model_inference_input(input).await;

        assert_eq!(
            serde_json::to_value(&resolved).unwrap(),
            json!({
                "system": "You are terse.",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "value": "describe this"},
                        {
                            "type": "image",
                            "image": {"url": "data:image/jpeg;base64,QUJD", "mime_type": "image/jpeg"},
                            "storage_path": {"kind": {"type": "disabled"}, "path": "a.jpg"}
                        }
                    ]
                }]
            })
        );
    }
}
