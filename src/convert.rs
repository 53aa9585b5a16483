//! Eager (full-document) conversion entry points.
//!
//! There is nothing to stream: extraction runs to completion first, fully
//! materialising every page in memory, then rendering consumes the whole
//! result to build the output string. One linear pass per request, no
//! retries, no partial delivery.

use crate::config::ConversionConfig;
use crate::document::DocumentInfo;
use crate::error::ConvertError;
use crate::pipeline::{extract, html};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert a PDF byte buffer to a reader-mode HTML document.
///
/// This is the primary entry point for the library: the one logical operation
/// the core exposes. The `title` is embedded verbatim — it is expected to be
/// trusted plain text (a filename stem); callers accepting arbitrary titles
/// must escape them first.
///
/// # Errors
/// Fails only when the buffer cannot be opened as a PDF at all
/// ([`ConvertError::DocumentParse`], or the password variants for encrypted
/// documents). Individual images that fail to decode are silently dropped —
/// a document with unreadable images still converts.
pub async fn convert(
    pdf_bytes: Vec<u8>,
    title: &str,
    config: &ConversionConfig,
) -> Result<String, ConvertError> {
    let start = Instant::now();

    // ── Step 1: Extract pages ────────────────────────────────────────────
    let document = extract::extract_document(pdf_bytes, config).await?;

    // ── Step 2: Render HTML ──────────────────────────────────────────────
    let rendered = html::render_document(&document.pages, title);

    info!(
        "converted {} pages, {} images, {} bytes HTML in {}ms",
        document.pages.len(),
        document.image_count(),
        rendered.len(),
        start.elapsed().as_millis()
    );

    Ok(rendered)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    pdf_bytes: Vec<u8>,
    title: &str,
    config: &ConversionConfig,
) -> Result<String, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("failed to create tokio runtime: {}", e)))?
        .block_on(convert(pdf_bytes, title, config))
}

/// Convert a PDF and write the HTML directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_to_file(
    pdf_bytes: Vec<u8>,
    title: &str,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    let rendered = convert(pdf_bytes, title, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConvertError::OutputWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &rendered)
        .await
        .map_err(|e| ConvertError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ConvertError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Read PDF metadata without converting content.
pub async fn inspect(
    pdf_bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<DocumentInfo, ConvertError> {
    extract::extract_info(pdf_bytes, config).await
}
