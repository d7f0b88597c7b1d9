//! Graph API publisher implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use super::config::PublisherConfig;
use super::error::PublishError;
use super::traits::Publisher;

/// Publisher using the Graph API two-step flow: create a media container
/// for a publicly reachable image URL, then publish the container.
pub struct GraphApiPublisher {
    client: reqwest::Client,
    config: PublisherConfig,
}

#[derive(Debug, Deserialize)]
struct MediaResponse {
    id: Option<String>,
    #[serde(default)]
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

impl GraphApiPublisher {
    pub fn new(config: PublisherConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Map a local artifact to the public URL the platform downloads from.
    fn public_url(&self, image: &Path) -> Result<String, PublishError> {
        let filename = image
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PublishError::ImageNotFound {
                path: image.to_path_buf(),
            })?;
        Ok(format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            filename
        ))
    }

    /// Verify the image is actually reachable before handing the URL to
    /// the platform.
    async fn url_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn post_media(&self, params: &[(&str, &str)]) -> Result<Option<String>, PublishError> {
        let url = format!(
            "{}/{}/{}/media",
            self.config.graph_base, self.config.api_version, self.config.business_id
        );
        self.post_for_id(&url, params).await
    }

    async fn post_for_id(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<String>, PublishError> {
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| PublishError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let body: MediaResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Http(e.to_string()))?;

        if status >= 500 {
            return Err(PublishError::Api {
                status,
                message: body
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "server error".to_string()),
            });
        }
        if let Some(error) = body.error {
            warn!("Graph API rejected request: {}", error.message);
            return Ok(None);
        }
        Ok(body.id)
    }

    async fn create_container(
        &self,
        image_url: &str,
        caption: &str,
        is_carousel_item: bool,
    ) -> Result<Option<String>, PublishError> {
        let mut params = vec![
            ("image_url", image_url),
            ("access_token", self.config.access_token.as_str()),
        ];
        if is_carousel_item {
            params.push(("is_carousel_item", "true"));
        } else if !caption.is_empty() {
            params.push(("caption", caption));
        }

        let id = self.post_media(&params).await?;
        if let Some(ref id) = id {
            info!("Created media container: {}", id);
        }
        Ok(id)
    }

    async fn publish_container(&self, creation_id: &str) -> Result<bool, PublishError> {
        let url = format!(
            "{}/{}/{}/media_publish",
            self.config.graph_base, self.config.api_version, self.config.business_id
        );
        let params = [
            ("creation_id", creation_id),
            ("access_token", self.config.access_token.as_str()),
        ];

        match self.post_for_id(&url, &params).await? {
            Some(id) => {
                info!("Media published: {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl Publisher for GraphApiPublisher {
    fn name(&self) -> &str {
        "graph_api"
    }

    async fn publish(&self, image: &Path, caption: &str) -> Result<bool, PublishError> {
        if !image.exists() {
            return Err(PublishError::ImageNotFound {
                path: image.to_path_buf(),
            });
        }

        let image_url = self.public_url(image)?;
        if !self.url_reachable(&image_url).await {
            warn!("Image not reachable at public URL: {}", image_url);
            return Ok(false);
        }

        let container = match self.create_container(&image_url, caption, false).await? {
            Some(id) => id,
            None => return Ok(false),
        };
        self.publish_container(&container).await
    }

    async fn publish_carousel(
        &self,
        images: &[PathBuf],
        caption: &str,
    ) -> Result<bool, PublishError> {
        if images.len() < 2 || images.len() > 10 {
            return Err(PublishError::InvalidCarousel(format!(
                "carousel requires 2 to 10 images, got {}",
                images.len()
            )));
        }
        for image in images {
            if !image.exists() {
                return Err(PublishError::ImageNotFound {
                    path: image.clone(),
                });
            }
        }

        let mut children = Vec::new();
        for image in images {
            let image_url = self.public_url(image)?;
            if !self.url_reachable(&image_url).await {
                warn!("Carousel image not reachable: {}", image_url);
                return Ok(false);
            }
            match self.create_container(&image_url, "", true).await? {
                Some(id) => children.push(id),
                None => return Ok(false),
            }
        }

        let children_param = children.join(",");
        let params = [
            ("media_type", "CAROUSEL"),
            ("caption", caption),
            ("children", children_param.as_str()),
            ("access_token", self.config.access_token.as_str()),
        ];
        let carousel = match self.post_media(&params).await? {
            Some(id) => id,
            None => return Ok(false),
        };

        info!("Carousel container created: {}", carousel);
        self.publish_container(&carousel).await
    }
}
