//! In-memory collaborators shared by unit tests.

use crate::bugsnag::{SourceMapUploader, UploadRequest};
use crate::types::{Result, SnagmapError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

/// Records every upload and fails the ones whose URL is listed.
#[derive(Default)]
pub struct RecordingUploader {
    requests: Mutex<Vec<UploadRequest>>,
    failing: HashSet<String>,
}

impl RecordingUploader {
    pub fn failing<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requests: Mutex::new(Vec::new()),
            failing: urls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn requests(&self) -> Vec<UploadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceMapUploader for RecordingUploader {
    async fn upload_one(&self, request: &UploadRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing.contains(&request.bundle) {
            return Err(SnagmapError::RemoteRejected {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records every log line it emits.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (value, logs)
}
