use super::{ChatPrompt, ChatService, VisionRequest, VisionService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`ChatService`] returning canned replies in rotation.
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    last_prompt: Arc<Mutex<Option<ChatPrompt>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            last_prompt: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails with an upstream error carrying `detail`.
    pub fn with_failure(mut self, detail: String) -> Self {
        self.failure = Some(detail);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_prompt(&self) -> Option<ChatPrompt> {
        self.last_prompt.lock().unwrap().clone()
    }

    /// Shares counters and captured prompts with the returned handle, so tests
    /// can inspect a client after boxing it into an assistant.
    pub fn handle(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            failure: self.failure.clone(),
            last_prompt: Arc::clone(&self.last_prompt),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());

        if let Some(detail) = &self.failure {
            return Err(Error::Upstream(detail.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok("Resposta simulada.".to_string())
        } else {
            Ok(responses[(count - 1) % responses.len()].clone())
        }
    }
}

/// In-memory [`VisionService`] returning a fixed structured-output text.
pub struct MockVisionClient {
    response: Option<String>,
    failure: Option<String>,
    last_request: Arc<Mutex<Option<VisionRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            response: None,
            failure: None,
            last_request: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(mut self, response: String) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_failure(mut self, detail: String) -> Self {
        self.failure = Some(detail);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<VisionRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn handle(&self) -> Self {
        Self {
            response: self.response.clone(),
            failure: self.failure.clone(),
            last_request: Arc::clone(&self.last_request),
            call_count: Arc::clone(&self.call_count),
        }
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionService for MockVisionClient {
    async fn analyze(&self, request: &VisionRequest) -> Result<Option<String>> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.failure {
            Some(detail) => Err(Error::Upstream(detail.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chat_default_reply() {
        let client = MockChatClient::new();
        let text = client
            .reply(&ChatPrompt::Combined("Olá".to_string()))
            .await
            .unwrap();
        assert!(!text.is_empty());
    }

    #[tokio::test]
    async fn test_mock_chat_custom_responses_cycle() {
        let client = MockChatClient::new()
            .with_response("Primeira".to_string())
            .with_response("Segunda".to_string());
        let prompt = ChatPrompt::Combined("x".to_string());

        assert_eq!(client.reply(&prompt).await.unwrap(), "Primeira");
        assert_eq!(client.reply(&prompt).await.unwrap(), "Segunda");
        assert_eq!(client.reply(&prompt).await.unwrap(), "Primeira");
        assert_eq!(client.get_call_count(), 3);
    }

    #[tokio::test]
    async fn test_handle_shares_call_count() {
        let client = MockChatClient::new();
        let handle = client.handle();

        client
            .reply(&ChatPrompt::Combined("x".to_string()))
            .await
            .unwrap();

        assert_eq!(handle.get_call_count(), 1);
        assert_eq!(
            handle.last_prompt(),
            Some(ChatPrompt::Combined("x".to_string()))
        );
    }

    #[tokio::test]
    async fn test_mock_vision_failure() {
        let client = MockVisionClient::new().with_failure("boom".to_string());
        let request = VisionRequest {
            instruction: "i".to_string(),
            mime_type: "image/jpeg".to_string(),
            data: String::new(),
        };

        let err = client.analyze(&request).await.unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(client.get_call_count(), 1);
    }
}
