//! Build API client.

use crate::config::HttpConfig;
use crate::types::{Result, SnagmapError};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Build API request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPayload {
    pub api_key: String,
    pub app_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_control: Option<SourceControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_stage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceControl {
    pub provider: String,
    pub repository: String,
    pub revision: String,
}

/// Reports builds to the Bugsnag build API.
pub struct BuildApiClient {
    client: Client,
    endpoint: Url,
}

impl BuildApiClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Send a build report, returning the response body.
    pub async fn report(&self, payload: &BuildPayload) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            debug!("Build API answered {}", status);
            Ok(body)
        } else {
            Err(SnagmapError::RemoteRejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
