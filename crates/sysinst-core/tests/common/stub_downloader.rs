//! In-memory downloader: serves configured bytes for configured locators.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use sysinst_core::downloader::{Downloader, FetchError, FetchFuture, FetchResult};

#[derive(Debug, Clone)]
struct Artifact {
    uri: String,
    bytes: Vec<u8>,
    delay: Duration,
}

#[derive(Debug, Default)]
pub struct StubDownloader {
    artifacts: HashMap<String, Artifact>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl StubDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests for `location` complete with `uri` and `bytes`.
    pub fn serve(self, location: &str, uri: &str, bytes: &[u8]) -> Self {
        self.serve_after(location, uri, bytes, Duration::ZERO)
    }

    /// Like `serve`, but the fetch completes only after `delay`.
    pub fn serve_after(mut self, location: &str, uri: &str, bytes: &[u8], delay: Duration) -> Self {
        self.artifacts.insert(
            location.to_string(),
            Artifact {
                uri: uri.to_string(),
                bytes: bytes.to_vec(),
                delay,
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Locations passed to `download`, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Downloader for StubDownloader {
    fn download(&self, location: &str) -> FetchFuture {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(location.to_string());
        let artifact = self.artifacts.get(location).cloned();
        let location = location.to_string();
        Box::pin(async move {
            let Some(artifact) = artifact else {
                return Err(FetchError::NotFound { location });
            };
            if !artifact.delay.is_zero() {
                tokio::time::sleep(artifact.delay).await;
            }
            let mut temp = tempfile::NamedTempFile::new().map_err(|source| FetchError::Io {
                location: location.clone(),
                source,
            })?;
            temp.write_all(&artifact.bytes)
                .map_err(|source| FetchError::Io { location, source })?;
            Ok(FetchResult::new(artifact.uri, temp.into_temp_path()))
        })
    }
}
