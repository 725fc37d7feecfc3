//! Configuration types for the extraction service and the pdfium extractor.
//!
//! The HTTP service is driven by [`ServerConfig`], built via its
//! [`ServerConfigBuilder`]. The server receives the config explicitly at
//! construction time; nothing is read from process-wide state once the
//! binary has parsed its flags.

use crate::error::ExtractError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the HTTP extraction service.
///
/// Built via [`ServerConfig::builder()`] or using [`ServerConfig::default()`].
///
/// # Example
/// ```rust
/// use pdftext::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::builder()
///     .port(8080)
///     .extraction_timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind. Default: `127.0.0.1`.
    pub host: String,

    /// TCP port to listen on. Default: 5001. Port 0 asks the OS for a free port.
    pub port: u16,

    /// Directory that receives transient upload files. Default: the OS temp dir.
    ///
    /// Files are named from an opaque per-request token; the client-supplied
    /// filename never becomes part of a path.
    pub temp_dir: PathBuf,

    /// Largest accepted request body in bytes. Default: 50 MiB.
    pub max_upload_bytes: usize,

    /// Upper bound on a single extraction. Default: 120 s.
    ///
    /// The PDF engine can spin for a long time on hostile input. When the
    /// bound is hit the client receives an error; the engine call keeps its
    /// blocking thread until it returns, and the transient file is removed
    /// at that point.
    pub extraction_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            temp_dir: std::env::temp_dir(),
            max_upload_bytes: 50 * 1024 * 1024,
            extraction_timeout: Duration::from_secs(120),
        }
    }
}

impl ServerConfig {
    /// Create a new builder for `ServerConfig`.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder {
            config: Self::default(),
        }
    }

    /// `host:port` as a string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the bind address, if `host` is a literal IP.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.bind_addr().parse().ok()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = dir.into();
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn extraction_timeout(mut self, timeout: Duration) -> Self {
        self.config.extraction_timeout = timeout;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServerConfig, ExtractError> {
        let c = &self.config;
        if c.host.trim().is_empty() {
            return Err(ExtractError::InvalidConfig("host must not be empty".into()));
        }
        if c.max_upload_bytes == 0 {
            return Err(ExtractError::InvalidConfig(
                "max upload size must be ≥ 1 byte".into(),
            ));
        }
        if c.extraction_timeout.is_zero() {
            return Err(ExtractError::InvalidConfig(
                "extraction timeout must be non-zero".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Options for [`crate::extractor::PdfiumExtractor`].
#[derive(Clone, Default)]
pub struct ExtractOptions {
    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Directory containing the pdfium shared library.
    ///
    /// When `None` the extractor tries the working directory, then the
    /// system library search path.
    pub library_dir: Option<PathBuf>,
}

impl std::fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("library_dir", &self.library_dir)
            .finish()
    }
}
