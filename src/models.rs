//! Data models and structures
//!
//! Defines the per-request payloads exchanged with HTTP clients. Nothing here
//! outlives a single request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A stock entry supplied by the storefront for chat context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: Price,
}

/// Prices arrive either as raw numbers or already formatted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Formatted(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{}", amount),
            Price::Formatted(text) => f.write_str(text),
        }
    }
}

/// Inbound chat payload, decoded field by field from the request body so a
/// malformed optional field never masks a valid `message`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub products: Option<Vec<Product>>,
}

impl ChatRequest {
    /// Reads `message` as a string and keeps every `products` entry that
    /// decodes; anything else is ignored.
    pub fn from_json(body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        let products = body.get("products").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| match Product::deserialize(item) {
                    Ok(product) => Some(product),
                    Err(e) => {
                        tracing::debug!("Skipping malformed product entry {}: {}", item, e);
                        None
                    }
                })
                .collect()
        });

        Self { message, products }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionRequest {
    pub image_url: Option<String>,
}

impl PrescriptionRequest {
    pub fn from_json(body: &Value) -> Self {
        Self {
            image_url: body
                .get("imageUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestedItem {
    pub name: String,
    pub quantity: f64,
}

/// Structured result the vision model is constrained to produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionAnalysis {
    pub confidence: f64,
    pub extracted_text: String,
    pub is_validated: bool,
    pub suggested_items: Vec<SuggestedItem>,
}

/// What the analyzer hands back to the client: the parsed analysis, or `{}`
/// when the model output could not be decoded.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Parsed(PrescriptionAnalysis),
    Empty {},
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
