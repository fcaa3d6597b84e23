//! AI assistant backend for a pharmacy chain in Angola
//!
//! Forwards customer chat messages and prescription photos to a generative-AI
//! service, lightly reshaping requests and replies. The service is stateless:
//! every request is validated, forwarded, and answered on its own.

pub mod ai;
pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
