//! External-command renderer implementation.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use super::config::RendererConfig;
use super::error::RenderError;
use super::theme::{Palette, Theme};
use super::traits::SlideRenderer;
use super::types::Artifact;
use crate::generator::Slide;
use crate::util::sanitize_filename;

/// Renderer that shells out to a configured command once per slide.
///
/// The slide payload is written to the command's stdin as JSON; the last
/// argument is the output path the command must write the image to.
pub struct CommandRenderer {
    config: RendererConfig,
}

#[derive(Debug, Serialize)]
struct SlidePayload<'a> {
    topic_id: i64,
    topic_name: &'a str,
    slide_number: usize,
    slide_count: usize,
    heading: &'a str,
    body: String,
    theme: Theme,
    palette: Palette,
}

impl CommandRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    fn output_path(&self, topic_name: &str, index: usize) -> PathBuf {
        let safe = sanitize_filename(topic_name);
        self.config
            .output_dir
            .join(format!("{}_slide_{}.png", safe, index + 1))
    }

    async fn render_one(
        &self,
        payload: &SlidePayload<'_>,
        output_path: &PathBuf,
    ) -> Result<Artifact, RenderError> {
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                RenderError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        let mut args: Vec<String> = vec!["--theme".to_string(), payload.theme.to_string()];
        args.extend(self.config.extra_args.iter().cloned());
        args.push(output_path.to_string_lossy().to_string());

        let mut child = Command::new(&self.config.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RenderError::CommandNotFound {
                        path: self.config.command.clone(),
                    }
                } else {
                    RenderError::Io(e)
                }
            })?;

        let body =
            serde_json::to_vec(payload).map_err(|e| RenderError::render_failed(e.to_string(), None))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body).await?;
            // Drop closes the pipe so the command sees EOF
        }

        let mut stderr_output = String::new();
        let mut stderr = child.stderr.take();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let status = match timeout(timeout_duration, async {
            if let Some(ref mut err) = stderr {
                let _ = err.read_to_string(&mut stderr_output).await;
            }
            child.wait().await
        })
        .await
        {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => return Err(RenderError::Io(e)),
            Err(_) => {
                let _ = child.kill().await;
                return Err(RenderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            return Err(RenderError::render_failed(
                format!("render command exited with code: {:?}", status.code()),
                if stderr_output.is_empty() {
                    None
                } else {
                    Some(stderr_output)
                },
            ));
        }

        if !output_path.exists() {
            return Err(RenderError::OutputMissing {
                path: output_path.clone(),
            });
        }

        Ok(Artifact {
            path: output_path.clone(),
            slide_index: payload.slide_number - 1,
        })
    }
}

#[async_trait]
impl SlideRenderer for CommandRenderer {
    fn name(&self) -> &str {
        "command"
    }

    async fn render(
        &self,
        topic_id: i64,
        topic_name: &str,
        slides: &[Slide],
        theme: Theme,
    ) -> Vec<Result<Artifact, RenderError>> {
        let mut results = Vec::with_capacity(slides.len());

        for (i, slide) in slides.iter().enumerate() {
            let output_path = self.output_path(topic_name, i);
            let payload = SlidePayload {
                topic_id,
                topic_name,
                slide_number: i + 1,
                slide_count: slides.len(),
                heading: &slide.heading,
                body: slide.body.as_text(),
                theme,
                palette: theme.palette(),
            };

            match self.render_one(&payload, &output_path).await {
                Ok(artifact) => {
                    info!("Rendered slide {} for {}: {:?}", i + 1, topic_name, artifact.path);
                    results.push(Ok(artifact));
                }
                Err(e) => {
                    warn!("Failed to render slide {} for {}: {}", i + 1, topic_name, e);
                    results.push(Err(e));
                }
            }
        }

        results
    }
}
