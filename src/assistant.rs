//! Request orchestration for the pharmacy assistant.
//!
//! Each call is independent: validate the inbound payload, shape the upstream
//! request, call the AI service, and shape the reply. No state is kept between
//! calls.

use crate::ai::{
    mime, ChatPrompt, ChatService, GeminiChatClient, GeminiVisionClient, VisionRequest,
    VisionService,
};
use crate::config::Config;
use crate::fetch::{HttpImageFetcher, ImageFetcher};
use crate::models::{
    AnalysisOutcome, ChatRequest, ChatResponse, PrescriptionAnalysis, PrescriptionRequest,
};
use crate::{prompts, Error, Result};
use base64::Engine as _;
use tracing::{info, warn};

pub const MISSING_MESSAGE: &str = "Missing message in request body";
pub const MISSING_IMAGE_URL: &str = "Missing imageUrl in request body";

/// Which deployment shape the chat request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatVariant {
    /// Long-running server: instructions travel as a separate system instruction.
    Server,
    /// Single-request handler: instructions, stock context, and message form one prompt.
    Serverless,
}

pub struct Assistant {
    chat: Box<dyn ChatService>,
    vision: Box<dyn VisionService>,
    fetcher: Box<dyn ImageFetcher>,
}

/// Injectable service bundle used to construct [`Assistant`] in tests/harnesses.
pub struct AssistantServices {
    pub chat: Box<dyn ChatService>,
    pub vision: Box<dyn VisionService>,
    pub fetcher: Box<dyn ImageFetcher>,
}

impl Assistant {
    pub fn with_services(services: AssistantServices) -> Self {
        Self {
            chat: services.chat,
            vision: services.vision,
            fetcher: services.fetcher,
        }
    }

    /// Build the Gemini-backed assistant from process configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across upstream clients.
        let http_client = reqwest::Client::new();

        info!("AI provider: Gemini (model: {})", config.model);

        Self::with_services(AssistantServices {
            chat: Box::new(GeminiChatClient::new_with_client(
                config.api_key.clone(),
                config.model.clone(),
                config.timeout,
                http_client.clone(),
            )),
            vision: Box::new(GeminiVisionClient::new_with_client(
                config.api_key.clone(),
                config.model.clone(),
                config.timeout,
                http_client.clone(),
            )),
            fetcher: Box::new(HttpImageFetcher::new_with_client(
                config.timeout,
                http_client,
            )),
        })
    }

    pub async fn chat(&self, request: &ChatRequest, variant: ChatVariant) -> Result<ChatResponse> {
        // Blank checks use the trimmed text; the message itself goes upstream as sent.
        let message = request
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| Error::Validation(MISSING_MESSAGE.to_string()))?;

        let prompt = match variant {
            ChatVariant::Serverless => {
                ChatPrompt::Combined(prompts::combined_prompt(request.products.as_deref(), message))
            }
            ChatVariant::Server => ChatPrompt::Split {
                system_instruction: prompts::system_instruction(),
                content: message.to_string(),
            },
        };

        let text = self.chat.reply(&prompt).await?;
        Ok(ChatResponse { text })
    }

    pub async fn analyze_prescription(
        &self,
        request: &PrescriptionRequest,
    ) -> Result<AnalysisOutcome> {
        let url = request
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Validation(MISSING_IMAGE_URL.to_string()))?;

        let image = self.fetcher.fetch(url).await?;
        let mime_type = mime::resolve_image_mime(image.content_type.as_deref(), &image.bytes);

        let vision_request = VisionRequest {
            instruction: prompts::PRESCRIPTION.trim().to_string(),
            mime_type,
            data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
        };

        let text = self.vision.analyze(&vision_request).await?;

        match parse_analysis(text.as_deref()) {
            Ok(analysis) => Ok(AnalysisOutcome::Parsed(analysis)),
            Err(e) => {
                warn!(kind = ?e.kind(), "Returning empty analysis: {}", e);
                Ok(AnalysisOutcome::Empty {})
            }
        }
    }
}

/// Decodes the model's structured output into a [`PrescriptionAnalysis`].
pub fn parse_analysis(text: Option<&str>) -> Result<PrescriptionAnalysis> {
    let text = text.ok_or_else(|| Error::Parse("vision response carried no text".to_string()))?;
    Ok(serde_json::from_str(text)?)
}
