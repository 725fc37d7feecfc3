//! Mock extractor for testing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ExtractError;
use crate::extractor::TextExtractor;

/// What a [`MockExtractor`] does when called.
#[derive(Clone, Debug)]
pub enum MockBehavior {
    /// Return this text for every call.
    Text(String),
    /// Fail every call with [`ExtractError::Internal`] carrying this message.
    Fail(String),
    /// Return the file content, decoded lossily as UTF-8.
    Echo,
}

/// A single observed call.
#[derive(Clone, Debug)]
pub struct MockCall {
    pub path: PathBuf,
    /// Whether `path` existed when the extractor was invoked.
    pub existed: bool,
}

/// A hand-rolled [`TextExtractor`] for tests.
///
/// Records every call so tests can inspect the transient path the service
/// chose, and whether the file was on disk at the time.
pub struct MockExtractor {
    behavior: MockBehavior,
    latency: Option<Duration>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockExtractor {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            latency: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Text(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Sleep for `latency` on every call before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl TextExtractor for MockExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(MockCall {
                path: path.to_path_buf(),
                existed: path.exists(),
            });
        }

        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }

        match &self.behavior {
            MockBehavior::Text(text) => Ok(text.clone()),
            MockBehavior::Fail(message) => Err(ExtractError::Internal(message.clone())),
            MockBehavior::Echo => std::fs::read(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .map_err(|_| ExtractError::FileNotFound {
                    path: path.to_path_buf(),
                }),
        }
    }
}
