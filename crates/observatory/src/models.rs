//! These models represent the values the dashboard passes through the resolver
//!
//! There are two related input shapes we need to accept:
//! - stored inputs, where text content is already a `{type: "text", value}` record
//! - model inference inputs, where text content still carries a raw `text` field
//!
//! Both are resolved into the same [`message::ResolvedInput`] shape, where image
//! content that only referenced a stored object has been inlined as a data URL.
pub mod content;
pub mod message;
pub mod storage;
