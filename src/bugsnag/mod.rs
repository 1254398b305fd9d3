//! Bugsnag HTTP clients.
//!
//! - Source map upload API (multipart)
//! - Build API (JSON)

pub mod build;
pub mod upload;

pub use build::{BuildApiClient, BuildPayload, SourceControl};
pub use upload::{BugsnagUploadClient, SourceMapUploader, UploadRequest};

use crate::config::HttpConfig;
use crate::types::Result;
use reqwest::Client;

fn http_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
