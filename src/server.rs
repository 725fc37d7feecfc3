//! HTTP API for the extraction service.
//!
//! Routes:
//! - `POST /extract-pdf`: multipart upload (field `file`), answered with `{"text": ...}`
//! - `GET /health`: liveness check
//!
//! The server is assembled explicitly from a [`ServerConfig`] and a
//! [`TextExtractor`]: [`router`] binds handlers to routes, [`serve`] binds a
//! listener and runs until the shutdown future resolves.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{ErrorKind, ExtractError};
use crate::extractor::TextExtractor;
use crate::transient::TransientUpload;

/// Multipart field that carries the PDF.
pub const FILE_FIELD: &str = "file";

/// Application state shared by all handlers.
pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig, extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor, config }
    }
}

/// Successful extraction body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
}

/// Error body for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl ExtractError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Extraction | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = ?self.kind(), error = %self, "Extraction request failed");
        } else {
            warn!(kind = ?self.kind(), error = %self, "Rejected extraction request");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let max_body_size = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/extract-pdf",
            post(extract_pdf_handler).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn serve(
    config: ServerConfig,
    extractor: Arc<dyn TextExtractor>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    tokio::fs::create_dir_all(&config.temp_dir).await?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        addr = %listener.local_addr()?,
        temp_dir = %config.temp_dir.display(),
        "Listening"
    );

    let app = router(Arc::new(AppState::new(config, extractor)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Extract text from an uploaded PDF.
pub async fn extract_pdf_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ExtractError> {
    let multipart = multipart.map_err(|rejection| ExtractError::MalformedUpload {
        detail: rejection.body_text(),
    })?;

    let (filename, data) = read_upload(multipart).await?;

    let request_id = Uuid::new_v4();
    info!(
        request_id = %request_id,
        filename = %filename,
        bytes = data.len(),
        "Received upload"
    );

    let start = Instant::now();
    let text = run_extraction(&state, request_id, filename, data).await?;

    info!(
        request_id = %request_id,
        chars = text.chars().count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Extraction complete"
    );

    Ok(Json(ExtractResponse { text }))
}

/// Pull the first `file` upload out of the form.
///
/// A `file` field without a filename is a plain form value, not an upload,
/// and is skipped.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), ExtractError> {
    let malformed = |e: axum::extract::multipart::MultipartError| ExtractError::MalformedUpload {
        detail: e.body_text(),
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        if filename.is_empty() {
            return Err(ExtractError::EmptyFilename);
        }

        let data = field.bytes().await.map_err(malformed)?;
        return Ok((filename, data));
    }

    Err(ExtractError::MissingFilePart)
}

/// Persist the upload, then extract on a blocking thread bounded by the
/// configured timeout.
///
/// The transient file stays owned by this future and is removed as soon as
/// it returns, whichever branch it takes. A timed-out extraction keeps
/// running on its worker thread but no longer has a file on disk; on Unix a
/// descriptor the engine already opened stays readable after the unlink.
async fn run_extraction(
    state: &AppState,
    request_id: Uuid,
    filename: String,
    data: Bytes,
) -> Result<String, ExtractError> {
    let temp_dir = state.config.temp_dir.clone();
    let upload = tokio::task::spawn_blocking(move || {
        TransientUpload::persist(&temp_dir, request_id, filename, &data)
    })
    .await
    .map_err(|e| ExtractError::Internal(format!("Upload task panicked: {}", e)))??;

    let extractor = state.extractor.clone();
    let path = upload.path().to_path_buf();
    let timeout = state.config.extraction_timeout;
    let task = tokio::task::spawn_blocking(move || extractor.extract(&path));

    let outcome = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined
            .map_err(|e| ExtractError::Internal(format!("Extraction task panicked: {}", e)))
            .and_then(|result| result),
        Err(_) => {
            warn!(
                request_id = %request_id,
                original_name = %upload.original_name(),
                timeout_ms = timeout.as_millis() as u64,
                "Extraction exceeded timeout"
            );
            Err(ExtractError::Timeout {
                elapsed_ms: timeout.as_millis() as u64,
            })
        }
    };

    drop(upload);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockExtractor;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};

    fn test_server(extractor: Arc<dyn TextExtractor>, temp_dir: &std::path::Path) -> TestServer {
        let config = ServerConfig::builder().temp_dir(temp_dir).build().unwrap();
        let app = router(Arc::new(AppState::new(config, extractor)));
        TestServer::new(app).unwrap()
    }

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(
            ExtractError::MissingFilePart.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExtractError::TransientFile {
                source: std::io::Error::other("x")
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ExtractError::Timeout { elapsed_ms: 1 }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn health_reports_version() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(Arc::new(MockExtractor::returning("")), dir.path());

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn plain_file_value_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockExtractor::returning("unused"));
        let server = test_server(mock.clone(), dir.path());

        // `file` sent as a text value carries no filename.
        let response = server
            .post("/extract-pdf")
            .multipart(MultipartForm::new().add_text("file", "not an upload"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "No file part");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn extractor_sees_existing_transient_file() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockExtractor::returning("ok"));
        let server = test_server(mock.clone(), dir.path());

        let part = Part::bytes(b"%PDF-1.4".as_slice()).file_name("doc.pdf");
        server
            .post("/extract-pdf")
            .multipart(MultipartForm::new().add_part("file", part))
            .await
            .assert_status_ok();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].existed);
        assert_eq!(calls[0].path.parent(), Some(dir.path()));
        assert!(!calls[0].path.exists(), "transient file must be removed");
    }
}
