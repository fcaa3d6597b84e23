//! AI service integration for chat replies and prescription vision
//!
//! Defines the capability traits the request handlers depend on, with a
//! Gemini-backed implementation and in-memory mocks.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiChatClient, GeminiVisionClient};
pub use mock::{MockChatClient, MockVisionClient};

use crate::Result;
use async_trait::async_trait;

/// How the persona instructions and the user message reach the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatPrompt {
    /// Instructions and message folded into a single user turn.
    Combined(String),
    /// Instructions sent as `system_instruction`, message as user content.
    Split {
        system_instruction: String,
        content: String,
    },
}

/// One image plus the instruction describing what to extract from it.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionRequest {
    pub instruction: String,
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String>;
}

#[async_trait]
pub trait VisionService: Send + Sync {
    /// Returns the raw structured-output text, or `None` when the model sent no text part.
    async fn analyze(&self, request: &VisionRequest) -> Result<Option<String>>;
}
