//! HTTP-backed image sourcer implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::SourcingConfig;
use super::error::SourcingError;
use super::traits::ImageSourcer;
use super::types::SourcedImage;
use crate::util::sanitize_filename;

/// Sourcer that queries an image-search endpoint and downloads the hits.
///
/// Undersized images (icons, thumbnails) are filtered out; per-image
/// download failures are logged and skipped.
pub struct HttpImageSourcer {
    client: reqwest::Client,
    config: SourcingConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    url: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

impl HttpImageSourcer {
    pub fn new(config: SourcingConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SourcingError> {
        let url = format!(
            "{}?q={}&count={}",
            self.config.search_url,
            urlencoding::encode(query),
            limit
        );

        let mut request = self.client.get(&url);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourcingError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(SourcingError::Api { status, message });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SourcingError::Json(e.to_string()))?;
        Ok(parsed.results)
    }

    async fn download(
        &self,
        url: &str,
        topic_name: &str,
        index: usize,
    ) -> Result<SourcedImage, SourcingError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourcingError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(SourcingError::Api {
                status,
                message: format!("image download failed: {}", url),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourcingError::Http(e.to_string()))?;

        let safe = sanitize_filename(topic_name);
        let path: PathBuf = self
            .config
            .output_dir
            .join(format!("{}_diagram_{}.jpg", safe, index));

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        info!("Downloaded image {} for {}: {:?}", index, topic_name, path);
        Ok(SourcedImage {
            path,
            source_url: url.to_string(),
        })
    }
}

#[async_trait]
impl ImageSourcer for HttpImageSourcer {
    fn name(&self) -> &str {
        "http"
    }

    async fn source_images(
        &self,
        topic_name: &str,
        count: usize,
    ) -> Result<Vec<SourcedImage>, SourcingError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let query = format!("{} {}", topic_name, self.config.query_suffix);
        info!("Searching images for: {}", query);

        // Over-fetch so size filtering and dead links still leave enough
        let hits = self.search(&query, count * 2).await?;
        debug!("Found {} candidate images", hits.len());

        let mut images = Vec::new();
        for hit in hits {
            if images.len() >= count {
                break;
            }
            if hit.width > 0 && hit.height > 0 {
                if hit.width < self.config.min_width || hit.height < self.config.min_height {
                    debug!("Image too small: {}x{}", hit.width, hit.height);
                    continue;
                }
            }
            match self.download(&hit.url, topic_name, images.len() + 1).await {
                Ok(image) => images.push(image),
                Err(e) => warn!("Failed to download image: {}", e),
            }
        }

        info!("Sourced {} images for {}", images.len(), topic_name);
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parsing() {
        let json = r#"{
            "results": [
                {"url": "https://img.example/a.jpg", "width": 1200, "height": 800},
                {"url": "https://img.example/b.jpg"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].width, 1200);
        // Missing dimensions default to zero (unknown)
        assert_eq!(parsed.results[1].width, 0);
    }

    #[tokio::test]
    async fn test_unreachable_search_endpoint() {
        let sourcer = HttpImageSourcer::new(SourcingConfig {
            search_url: "http://127.0.0.1:1/search".to_string(),
            api_key: None,
            output_dir: PathBuf::from("/tmp"),
            query_suffix: "diagram".to_string(),
            min_width: 400,
            min_height: 200,
            timeout_secs: 1,
        });

        let result = sourcer.source_images("Arrays", 3).await;
        assert!(matches!(result, Err(SourcingError::Http(_))));
    }

    #[tokio::test]
    async fn test_zero_count_short_circuits() {
        let sourcer = HttpImageSourcer::new(SourcingConfig {
            search_url: "http://127.0.0.1:1/search".to_string(),
            api_key: None,
            output_dir: PathBuf::from("/tmp"),
            query_suffix: "diagram".to_string(),
            min_width: 400,
            min_height: 200,
            timeout_secs: 1,
        });

        // No network call is made
        let images = sourcer.source_images("Arrays", 0).await.unwrap();
        assert!(images.is_empty());
    }
}
