use super::{FetchedImage, ImageFetcher};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Largest image body accepted from an origin server (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub struct HttpImageFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
}

impl HttpImageFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: Client) -> Self {
        Self {
            client,
            timeout,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn too_large(&self, url: &str) -> Error {
        Error::Upstream(format!("Image exceeds {} bytes: {}", self.max_bytes, url))
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        tracing::debug!("Fetching prescription image from {}", url);

        let mut response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch image {}: {}", url, e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "Image fetch failed (status {}): {}",
                status, url
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(self.too_large(url));
        }

        // Content-Length is advisory; the cap holds for the streamed body too.
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large(url));
            }
            bytes.extend_from_slice(&chunk);
        }
        tracing::debug!("Fetched {} bytes ({:?})", bytes.len(), content_type);

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fetch_returns_bytes_and_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/img.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47]),
            )
            .mount(&server)
            .await;

        let image = fetcher()
            .fetch(&format!("{}/img.png", server.uri()))
            .await
            .unwrap();

        assert_eq!(image.bytes, vec![0x89, 0x50, 0x4E, 0x47]);
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(&format!("{}/missing.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(_)));
    }

    #[tokio::test]
    async fn test_oversized_image_is_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/big.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF; 2048]))
            .mount(&server)
            .await;

        let err = fetcher()
            .with_max_bytes(1024)
            .fetch(&format!("{}/big.jpg", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Upstream(ref m) if m.contains("exceeds 1024 bytes")));
    }

    #[tokio::test]
    async fn test_image_at_cap_is_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/exact.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF; 1024]))
            .mount(&server)
            .await;

        let image = fetcher()
            .with_max_bytes(1024)
            .fetch(&format!("{}/exact.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(image.bytes.len(), 1024);
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        let err = fetcher()
            .fetch("http://127.0.0.1:1/img.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn test_invalid_url_is_http_error() {
        let err = fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
