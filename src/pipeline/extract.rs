//! Document extraction: walk a PDF's pages and pull text plus embedded images.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto a dedicated thread pool
//! thread designed for blocking operations, preventing the Tokio worker
//! threads from stalling during CPU-heavy decoding.
//!
//! ## Failure policy
//!
//! The top-level open is the only fatal point: a buffer that cannot be parsed
//! as a PDF fails the whole operation with [`ConvertError::DocumentParse`] and
//! no partial document is returned. Below that boundary every failure is
//! local: a single image that will not decode or re-encode becomes an
//! [`ImageSkip`], is logged, and is dropped from its page's image list. A page
//! whose images all fail still yields its text.

use crate::config::ConversionConfig;
use crate::document::{Document, DocumentInfo, Page, PageImage};
use crate::error::{ConvertError, ImageSkip};
use crate::pipeline::encode;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Extract every page of a PDF byte buffer into a [`Document`].
///
/// This runs inside `spawn_blocking` since pdfium operations are CPU-bound.
pub async fn extract_document(
    bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<Document, ConvertError> {
    let password = config.password.clone();
    let library_path = config.pdfium_library_path.clone();

    tokio::task::spawn_blocking(move || {
        extract_document_blocking(&bytes, password.as_deref(), library_path)
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("extraction task panicked: {}", e)))?
}

/// Blocking implementation of document extraction.
pub fn extract_document_blocking(
    bytes: &[u8],
    password: Option<&str>,
    library_path: Option<PathBuf>,
) -> Result<Document, ConvertError> {
    check_magic(bytes)?;

    let pdfium = bind_pdfium(library_path)?;
    let document = load_document(&pdfium, bytes, password)?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages", total_pages);

    let mut out = Vec::with_capacity(total_pages);

    for (index, page) in pages.iter().enumerate() {
        let number = index + 1;

        // Text layer failures are treated like image failures: the page
        // yields empty text and conversion continues.
        let text = match page.text() {
            Ok(text_page) => text_page.all().trim().to_string(),
            Err(e) => {
                warn!("page {}: text extraction failed: {:?}", number, e);
                String::new()
            }
        };

        let images = extract_page_images(&page, number);
        debug!(
            "page {}: {} chars, {} images",
            number,
            text.len(),
            images.len()
        );

        out.push(Page {
            number,
            text,
            images,
        });
    }

    Ok(Document { pages: out })
}

/// Extract every embedded raster image on a page, in listed order.
///
/// Each image is an independent attempt: decode, colour-normalise, PNG-encode.
/// Failures become [`ImageSkip`]s, aggregated by discarding — the skip never
/// raises past the page boundary.
fn extract_page_images(page: &PdfPage<'_>, page_number: usize) -> Vec<PageImage> {
    let mut images = Vec::new();

    for (index, object) in page.objects().iter().enumerate() {
        let Some(image_object) = object.as_image_object() else {
            continue;
        };

        match extract_one_image(image_object, page_number, index) {
            Ok(img) => images.push(img),
            Err(skip) => debug!("dropping image: {}", skip),
        }
    }

    images
}

/// Decode one image object and re-encode it as PNG.
fn extract_one_image(
    image_object: &PdfPageImageObject<'_>,
    page: usize,
    index: usize,
) -> Result<PageImage, ImageSkip> {
    let raw = image_object
        .get_raw_image()
        .map_err(|e| ImageSkip::Decode {
            page,
            index,
            detail: format!("{:?}", e),
        })?;

    encode::encode_image(raw).map_err(|e| ImageSkip::Encode {
        page,
        index,
        detail: e.to_string(),
    })
}

/// Read document metadata from a PDF buffer without extracting content.
pub async fn extract_info(
    bytes: Vec<u8>,
    config: &ConversionConfig,
) -> Result<DocumentInfo, ConvertError> {
    let password = config.password.clone();
    let library_path = config.pdfium_library_path.clone();

    tokio::task::spawn_blocking(move || {
        extract_info_blocking(&bytes, password.as_deref(), library_path)
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("metadata task panicked: {}", e)))?
}

/// Blocking implementation of metadata extraction.
fn extract_info_blocking(
    bytes: &[u8],
    password: Option<&str>,
    library_path: Option<PathBuf>,
) -> Result<DocumentInfo, ConvertError> {
    check_magic(bytes)?;

    let pdfium = bind_pdfium(library_path)?;
    let document = load_document(&pdfium, bytes, password)?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentInfo {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}

// ── pdfium plumbing ──────────────────────────────────────────────────────

/// Reject buffers that cannot possibly be PDFs before binding pdfium.
///
/// Catches the common web-facing cases (zero-length upload, wrong file
/// renamed to .pdf) with a precise message, and without requiring the
/// pdfium library to be present at all.
fn check_magic(bytes: &[u8]) -> Result<(), ConvertError> {
    if bytes.is_empty() {
        return Err(ConvertError::DocumentParse {
            detail: "empty input buffer".into(),
        });
    }
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        return Err(ConvertError::DocumentParse {
            detail: "missing %PDF header".into(),
        });
    }
    Ok(())
}

/// Bind to a pdfium shared library.
///
/// Search order: explicit configured path, a library next to the current
/// directory, then the system library paths.
fn bind_pdfium(library_path: Option<PathBuf>) -> Result<Pdfium, ConvertError> {
    let bindings = match library_path {
        Some(path) => Pdfium::bind_to_library(path.to_string_lossy().to_string())
            .map_err(|e| ConvertError::PdfiumBinding(format!("{:?} (at {:?})", e, path)))?,
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| ConvertError::PdfiumBinding(format!("{:?}", e)))?,
    };

    Ok(Pdfium::new(bindings))
}

/// Open a PDF byte buffer, mapping pdfium failures to the fatal taxonomy.
fn load_document<'a>(
    pdfium: &'a Pdfium,
    bytes: &'a [u8],
    password: Option<&str>,
) -> Result<PdfDocument<'a>, ConvertError> {
    pdfium.load_pdf_from_byte_slice(bytes, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ConvertError::WrongPassword
            } else {
                ConvertError::PasswordRequired
            }
        } else {
            ConvertError::DocumentParse { detail: err_str }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_parse_error() {
        let err = check_magic(b"").unwrap_err();
        assert!(matches!(err, ConvertError::DocumentParse { .. }));
    }

    #[test]
    fn non_pdf_magic_is_parse_error() {
        let err = check_magic(b"GIF89a not a pdf").unwrap_err();
        let ConvertError::DocumentParse { detail } = err else {
            panic!("expected DocumentParse");
        };
        assert!(detail.contains("%PDF"));
    }

    #[test]
    fn pdf_magic_accepted() {
        assert!(check_magic(b"%PDF-1.7\n...").is_ok());
    }

    #[test]
    fn short_buffer_is_parse_error() {
        assert!(check_magic(b"%P").is_err());
    }
}
