use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::{VisionRequest, VisionService};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct VisionGenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Structured-output schema for prescription analysis.
///
/// Every property is required, including both fields of each suggested item.
pub fn prescription_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "confidence": { "type": "NUMBER" },
            "extracted_text": { "type": "STRING" },
            "is_validated": { "type": "BOOLEAN" },
            "suggested_items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "quantity": { "type": "NUMBER" }
                    },
                    "required": ["name", "quantity"]
                }
            }
        },
        "required": ["confidence", "extracted_text", "is_validated", "suggested_items"]
    })
}

pub struct GeminiVisionClient {
    http: GeminiHttpClient,
}

impl GeminiVisionClient {
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

super::impl_with_gemini_base_url!(GeminiVisionClient);

#[async_trait]
impl VisionService for GeminiVisionClient {
    async fn analyze(&self, request: &VisionRequest) -> Result<Option<String>> {
        tracing::debug!(
            "Analyzing image ({} base64 chars, {}) via Gemini",
            request.data.len(),
            request.mime_type
        );

        let body = VisionGenerateRequest {
            contents: vec![Content::user(vec![
                Part::Text {
                    text: request.instruction.clone(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: request.mime_type.clone(),
                        data: request.data.clone(),
                    },
                },
            ])],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: prescription_schema(),
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&body).await?;
        Ok(response.text())
    }
}
