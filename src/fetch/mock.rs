use super::{FetchedImage, ImageFetcher};
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves images from memory; unknown URLs fail like an unreachable host.
pub struct MockImageFetcher {
    images: Arc<Mutex<HashMap<String, FetchedImage>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockImageFetcher {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(HashMap::new())),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(self, url: String, bytes: Vec<u8>, content_type: Option<String>) -> Self {
        self.images.lock().unwrap().insert(
            url,
            FetchedImage {
                bytes,
                content_type,
            },
        );
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn handle(&self) -> Self {
        Self {
            images: Arc::clone(&self.images),
            requested: Arc::clone(&self.requested),
        }
    }
}

impl Default for MockImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for MockImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        self.requested.lock().unwrap().push(url.to_string());

        self.images
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Upstream(format!("Image not reachable: {}", url)))
    }
}
