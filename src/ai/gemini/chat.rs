use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::{ChatPrompt, ChatService};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

impl ChatRequest {
    fn from_prompt(prompt: &ChatPrompt) -> Self {
        match prompt {
            ChatPrompt::Combined(text) => Self {
                system_instruction: None,
                contents: vec![Content::user(vec![Part::Text { text: text.clone() }])],
            },
            ChatPrompt::Split {
                system_instruction,
                content,
            } => Self {
                system_instruction: Some(Content::text(system_instruction.clone())),
                contents: vec![Content::user(vec![Part::Text {
                    text: content.clone(),
                }])],
            },
        }
    }
}

pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(api_key: Option<String>, model: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: Option<String>,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }
}

super::impl_with_gemini_base_url!(GeminiChatClient);

#[async_trait]
impl ChatService for GeminiChatClient {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String> {
        let request = ChatRequest::from_prompt(prompt);

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        response
            .text()
            .ok_or_else(|| Error::Upstream("No text in Gemini chat response".to_string()))
    }
}
