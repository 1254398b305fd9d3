//! Source map upload client.

use crate::config::HttpConfig;
use crate::types::{Result, SnagmapError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use url::Url;

/// One source map upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub api_key: String,
    /// URL the bundle is served from, as it appears in stack traces.
    pub bundle: String,
    /// Source map on disk.
    pub source_map: PathBuf,
    /// Bundle on disk, sent alongside the map when readable.
    pub minified_file: Option<PathBuf>,
    pub app_version: String,
    pub overwrite: bool,
}

/// Remote operation that stores one source map.
#[async_trait]
pub trait SourceMapUploader: Send + Sync {
    async fn upload_one(&self, request: &UploadRequest) -> Result<()>;
}

/// Uploads source maps to the Bugsnag source map API.
#[derive(Clone)]
pub struct BugsnagUploadClient {
    client: Client,
    endpoint: Url,
}

impl BugsnagUploadClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn build_form(request: &UploadRequest) -> Result<Form> {
        let source_map = tokio::fs::read(&request.source_map).await?;

        let mut form = Form::new()
            .text("apiKey", request.api_key.clone())
            .text("appVersion", request.app_version.clone())
            .text("minifiedUrl", request.bundle.clone())
            .text("overwrite", request.overwrite.to_string())
            .part(
                "sourceMap",
                Part::bytes(source_map)
                    .file_name(file_name(&request.source_map))
                    .mime_str("application/json")?,
            );

        if let Some(ref minified) = request.minified_file {
            match tokio::fs::read(minified).await {
                Ok(content) => {
                    form = form.part(
                        "minifiedFile",
                        Part::bytes(content)
                            .file_name(file_name(minified))
                            .mime_str("application/javascript")?,
                    );
                }
                Err(e) => trace!("Not attaching bundle {}: {}", minified.display(), e),
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl SourceMapUploader for BugsnagUploadClient {
    async fn upload_one(&self, request: &UploadRequest) -> Result<()> {
        let form = Self::build_form(request).await?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if response.status().is_success() {
            debug!("Source map accepted for {}", request.bundle);
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(SnagmapError::RemoteRejected { status, body })
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source.map".to_string())
}
