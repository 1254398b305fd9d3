//! Build reporter plugin: tells Bugsnag which version was just built.

use crate::bugsnag::{BuildApiClient, BuildPayload, SourceControl};
use crate::config::{non_empty, HttpConfig, ReporterOptions};
use crate::hooks::BuildPlugin;
use crate::notify::ConsoleOutput;
use crate::types::{BuildResult, Result, SnagmapError};
use async_trait::async_trait;
use tracing::{error, info};

/// Reports the app version and source revision of every finished build.
pub struct BuildReporterPlugin {
    options: ReporterOptions,
    client: BuildApiClient,
    console: ConsoleOutput,
}

impl BuildReporterPlugin {
    pub fn new(options: ReporterOptions, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            options,
            client: BuildApiClient::new(http)?,
            console: ConsoleOutput::default(),
        })
    }

    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Build the request body, failing when credentials are missing.
    pub fn payload(&self) -> Result<BuildPayload> {
        let api_key = non_empty(&self.options.api_key)
            .ok_or_else(|| SnagmapError::ConfigError("\"apiKey\" is required".to_string()))?;
        let app_version = non_empty(&self.options.app_version)
            .ok_or_else(|| SnagmapError::ConfigError("\"appVersion\" is required".to_string()))?;

        // The app version doubles as the source revision.
        let source_control = non_empty(&self.options.repository).map(|repository| SourceControl {
            provider: self.options.provider.clone(),
            repository: repository.to_string(),
            revision: app_version.to_string(),
        });

        Ok(BuildPayload {
            api_key: api_key.to_string(),
            app_version: app_version.to_string(),
            source_control,
            builder_name: self.options.builder_name.clone(),
            release_stage: self.options.release_stage.clone(),
        })
    }
}

#[async_trait]
impl BuildPlugin for BuildReporterPlugin {
    fn name(&self) -> &'static str {
        "bugsnag-build-reporter"
    }

    async fn on_end(&self, _result: &BuildResult) -> Result<()> {
        let payload = self.payload()?;
        info!("Build finished. Reporting to Bugsnag...");

        match self.client.report(&payload).await {
            Ok(body) => {
                info!("Build reported successfully: {}", body);
                self.console.print_build_reported(&payload.app_version, true);
            }
            Err(e) => {
                error!("Error reporting build: {}", e);
                self.console.print_build_reported(&payload.app_version, false);
            }
        }

        Ok(())
    }
}
