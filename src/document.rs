//! Value types produced by extraction.
//!
//! A [`Document`] is the fully-materialised result of one extraction pass:
//! every page's text and every surviving image, in source order, held in
//! memory until the renderer has consumed them. Nothing here outlives the
//! conversion request — there is no cache and no identity beyond it.

use serde::{Deserialize, Serialize};

/// An extracted PDF document: an ordered sequence of pages.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Pages in source order. Page order in the rendered output matches
    /// this order exactly.
    pub pages: Vec<Page>,
}

impl Document {
    /// Total number of embedded images that survived extraction.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }
}

/// One page of an extracted document.
#[derive(Debug, Clone)]
pub struct Page {
    /// 1-based page number, used for display labels.
    pub number: usize,

    /// Reading-order plain text, trimmed of leading/trailing whitespace.
    /// May be empty for raster-only pages.
    pub text: String,

    /// Embedded raster images that decoded and re-encoded successfully,
    /// in the order the document lists them. Images that failed are dropped
    /// during extraction and never appear here.
    pub images: Vec<PageImage>,
}

/// A single extracted image, colour-normalised and PNG-encoded.
///
/// Transient: created during extraction, consumed by the renderer (which
/// base64-encodes `png` into a data URI), never retained.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded pixel data.
    pub png: Vec<u8>,
}

/// Document metadata, readable without converting any content.
///
/// Returned by [`crate::convert::inspect`]; the CLI prints it as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}
