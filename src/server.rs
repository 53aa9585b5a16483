//! HTTP upload glue: a thin axum front-end over [`crate::convert`].
//!
//! Three routes, no state beyond the shared [`ConversionConfig`]:
//!
//! - `GET /` — the upload form
//! - `POST /convert` — multipart upload (field `pdf`) → the converted HTML
//! - `GET /static/styles.css` — the stylesheet the article shell links to
//!
//! The glue owns everything the core does not: extension and empty-selection
//! gating, the upload size ceiling, title derivation from the filename, and
//! the mapping of [`ConvertError`] onto HTTP status codes. Each request is
//! independent — no cache, no session, nothing persisted.

use crate::config::ConversionConfig;
use crate::convert::convert;
use crate::error::ConvertError;
use crate::pipeline::html::escape_text;
use crate::pipeline::input::title_from_filename;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("../assets/index.html");
const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Default upload ceiling: 50 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Server options, separate from the conversion config they wrap.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub addr: SocketAddr,
    /// Requests with bodies above this are rejected with 413 before the core
    /// ever runs.
    pub max_upload_bytes: usize,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<ConversionConfig>,
    max_upload_bytes: usize,
}

/// Build the application router.
///
/// Exposed separately from [`serve`] so tests can drive it without binding a
/// socket.
pub fn app(config: ConversionConfig, max_upload_bytes: usize) -> Router {
    let state = AppState {
        config: Arc::new(config),
        max_upload_bytes,
    };

    Router::new()
        .route("/", get(index))
        .route("/convert", post(convert_upload))
        .route("/static/styles.css", get(stylesheet))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Bind a listener and run the router until the process is stopped.
pub async fn serve(opts: ServeOptions, config: ConversionConfig) -> Result<(), ConvertError> {
    let listener = tokio::net::TcpListener::bind(opts.addr)
        .await
        .map_err(|e| ConvertError::Internal(format!("failed to bind {}: {}", opts.addr, e)))?;

    info!("listening on http://{}", opts.addr);

    axum::serve(listener, app(config, opts.max_upload_bytes))
        .await
        .map_err(|e| ConvertError::Internal(format!("server error: {}", e)))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLES_CSS)
}

/// `POST /convert` — accept one uploaded PDF and return its HTML rendition.
async fn convert_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let max_mb = state.max_upload_bytes / (1024 * 1024);
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, max_mb))?
    {
        if field.name() == Some("pdf") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| map_multipart_error(e, max_mb))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, pdf_bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file part named 'pdf' in form".into()))?;

    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".into()));
    }
    if !allowed_file(&filename) {
        return Err(AppError::BadRequest("Only .pdf files are supported".into()));
    }

    // Filenames are user-controlled, so the derived title is escaped before
    // it reaches the renderer (which embeds it verbatim).
    let title = title_from_filename(&filename)
        .unwrap_or_else(|| state.config.default_title.clone());
    let title = escape_text(&title);

    let rendered = convert(pdf_bytes, &title, &state.config)
        .await
        .map_err(AppError::Convert)?;

    Ok(Html(rendered).into_response())
}

/// `.pdf` extension check, case-insensitive; a bare name without any
/// extension does not qualify.
fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case("pdf"),
        None => false,
    }
}

fn map_multipart_error(e: axum::extract::multipart::MultipartError, max_mb: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::TooLarge { max_mb }
    } else {
        AppError::BadRequest(format!("malformed upload: {}", e.body_text()))
    }
}

// ── Error mapping ────────────────────────────────────────────────────────

/// HTTP-facing error wrapper.
///
/// Client mistakes (bad form, unopenable document) map to 400, the size
/// ceiling to 413, everything else to 500. Per-image failures never reach
/// this type; a dropped image is not an error.
enum AppError {
    BadRequest(String),
    TooLarge { max_mb: usize },
    Convert(ConvertError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::TooLarge { max_mb } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File is too large. Max {}MB.", max_mb),
            )
                .into_response(),
            AppError::Convert(e) => match e {
                ConvertError::DocumentParse { .. }
                | ConvertError::PasswordRequired
                | ConvertError::WrongPassword
                | ConvertError::NotAPdf { .. } => {
                    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
                }
                other => {
                    error!("conversion failed: {}", other);
                    (StatusCode::INTERNAL_SERVER_ERROR, "conversion failed".to_string())
                        .into_response()
                }
            },
        }
    }
}
