//! Error types for the pdf2article library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — **Fatal**: the conversion cannot proceed at all
//!   (the buffer is not a PDF, wrong password, pdfium cannot be bound).
//!   Returned as `Err(ConvertError)` from the top-level `convert*` functions.
//!
//! * [`ImageSkip`] — **Non-fatal**: a single embedded image failed to decode
//!   or re-encode. The image is dropped from its page's image list and
//!   conversion continues; the page's text and remaining images are still
//!   produced. Skips are logged, never propagated.
//!
//! Callers must distinguish and react to exactly one condition — an
//! unopenable document, which rejects the whole request. Image failures stay
//! invisible at the document level.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2article library.
///
/// Per-image failures use [`ImageSkip`] and are discarded during extraction
/// rather than propagated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The byte buffer cannot be interpreted as a PDF at all.
    ///
    /// This is the only fatal condition in the core conversion: corrupt
    /// header, truncated cross-reference structure, or a zero-length buffer.
    #[error("input is not a valid PDF document: {detail}")]
    DocumentParse { detail: String },

    /// The PDF is encrypted and no password was configured.
    #[error("PDF is encrypted and requires a password")]
    PasswordRequired,

    /// A password was configured but it is wrong.
    #[error("wrong password for encrypted PDF")]
    WrongPassword,

    // ── Input errors (CLI path) ───────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but does not start with `%PDF`.
    #[error("file is not a valid PDF: '{path}' (first bytes: {magic:?})")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// HTTP URL was syntactically valid but download failed.
    #[error("failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("download timed out after {secs}s for '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "failed to bind to pdfium library: {0}\n\
         Place libpdfium next to the executable, install it system-wide, or \
         set the library path via ConversionConfig / PDFIUM_LIB_PATH."
    )]
    PdfiumBinding(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A non-fatal failure for a single embedded image.
///
/// Produced during extraction when one image on a page cannot be decoded or
/// re-encoded as PNG. The extractor discards the image, logs the skip, and
/// keeps going — a page with failures on all its images still yields its text.
#[derive(Debug, Clone, Error)]
pub enum ImageSkip {
    /// The embedded raster could not be decoded to a pixel buffer.
    #[error("page {page} image {index}: decode failed: {detail}")]
    Decode {
        page: usize,
        index: usize,
        detail: String,
    },

    /// The pixel buffer could not be re-encoded as PNG.
    #[error("page {page} image {index}: PNG encoding failed: {detail}")]
    Encode {
        page: usize,
        index: usize,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_parse_display() {
        let e = ConvertError::DocumentParse {
            detail: "missing %PDF header".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("not a valid PDF"), "got: {msg}");
        assert!(msg.contains("missing %PDF header"));
    }

    #[test]
    fn not_a_pdf_display() {
        let e = ConvertError::NotAPdf {
            path: PathBuf::from("notes.txt"),
            magic: *b"GIF8",
        };
        assert!(e.to_string().contains("notes.txt"));
    }

    #[test]
    fn download_timeout_display() {
        let e = ConvertError::DownloadTimeout {
            url: "https://example.com/a.pdf".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
    }

    #[test]
    fn image_skip_display() {
        let e = ImageSkip::Decode {
            page: 3,
            index: 1,
            detail: "unsupported filter".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("page 3"));
        assert!(msg.contains("image 1"));
    }
}
