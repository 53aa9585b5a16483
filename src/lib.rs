//! # pdf2article
//!
//! Convert PDF documents to clean, reader-mode-friendly HTML.
//!
//! ## Why this crate?
//!
//! Browser "reader mode" features (Safari Reader, Firefox Reader View) work
//! best on a single `<article>` landmark of plain paragraphs. PDFs viewed
//! directly get none of that. This crate extracts each page's text and
//! embedded raster images and re-emits them as one self-contained HTML
//! document — text-first, images inlined as base64 data URIs, no external
//! fetches beyond one stylesheet.
//!
//! It is deliberately a format-conversion utility, not a layout engine:
//! no column reconstruction, no font preservation, no OCR. Best-effort
//! one-way text+image extraction.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract  walk pages via pdfium (CPU-bound, spawn_blocking):
//!  │              reading-order text + embedded raster images
//!  ├─ 2. Encode   colour-normalise each image, re-encode as PNG
//!  └─ 3. Render   escape, paragraph-split, embed data URIs, wrap in the
//!                 fixed article shell
//! ```
//!
//! A failed document open is the only fatal error; a failed individual image
//! is dropped and the rest of its page still converts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2article::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("document.pdf")?;
//!     let config = ConversionConfig::default();
//!     let html = convert(bytes, "My Document", &config).await?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `pdf2article` binary (clap + anyhow + tracing-subscriber) |
//! | `server` | on      | The axum upload front-end ([`server`]) |
//!
//! Disable both when using only the conversion library:
//! ```toml
//! pdf2article = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_sync, convert_to_file, inspect};
pub use document::{Document, DocumentInfo, Page, PageImage};
pub use error::{ConvertError, ImageSkip};
