//! Retrieval of prescription images referenced by URL
//!
//! The analyzer only needs the raw bytes and whatever Content-Type the origin
//! server announced; everything else about the resource is ignored.

pub mod client;
pub mod mock;

pub use client::HttpImageFetcher;
pub use mock::MockImageFetcher;

use crate::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}
