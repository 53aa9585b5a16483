//! Input resolution: normalise a user-supplied path or URL to PDF bytes.
//!
//! The extractor opens byte slices directly, so both local files and URL
//! downloads land in memory — no temp files. We validate the PDF magic bytes
//! (`%PDF`) before returning so callers get a meaningful error rather than a
//! parser failure deep inside pdfium.
//!
//! The web glue never goes through this module (it already holds the upload
//! bytes); this is the CLI path.

use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A resolved input: raw PDF bytes plus the title suggested by its filename.
#[derive(Debug)]
pub struct ResolvedInput {
    pub bytes: Vec<u8>,
    /// Title derived from the file or URL name; `None` when nothing usable
    /// could be extracted (the caller substitutes its default).
    pub suggested_title: Option<String>,
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to in-memory PDF bytes.
///
/// If the input is a URL, download it. If the input is a local file, validate
/// it exists and is readable.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedInput, ConvertError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(input)
    }
}

/// Derive a display title from a file name: strip any directory components
/// and the final extension. Returns `None` for empty results.
pub fn title_from_filename(name: &str) -> Option<String> {
    let base = Path::new(name).file_name()?.to_str()?;
    let stem = match base.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => base,
    };
    let stem = stem.trim();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Resolve a local file path, validating existence and PDF magic bytes.
fn resolve_local(path_str: &str) -> Result<ResolvedInput, ConvertError> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(ConvertError::FileNotFound { path });
    }

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(ConvertError::FileNotFound { path });
        }
    };

    check_magic(&bytes, &path)?;

    debug!("resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    let suggested_title = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(title_from_filename);

    Ok(ResolvedInput {
        bytes,
        suggested_title,
    })
}

/// Download a URL straight into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedInput, ConvertError> {
    info!("downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ConvertError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            ConvertError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            ConvertError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(ConvertError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ConvertError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    let filename = extract_filename(url);
    check_magic(&bytes, Path::new(&filename))?;

    info!("downloaded {} bytes", bytes.len());

    Ok(ResolvedInput {
        suggested_title: title_from_filename(&filename),
        bytes,
    })
}

/// Verify the buffer starts with the PDF magic bytes.
fn check_magic(bytes: &[u8], path: &Path) -> Result<(), ConvertError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(ConvertError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }
    Ok(())
}

/// Extract a reasonable filename from the last URL path segment.
fn extract_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("report.pdf").as_deref(), Some("report"));
        assert_eq!(
            title_from_filename("a/b/annual.report.pdf").as_deref(),
            Some("annual.report")
        );
        assert_eq!(title_from_filename("noext").as_deref(), Some("noext"));
        assert_eq!(title_from_filename(".pdf"), None);
        assert_eq!(title_from_filename(""), None);
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(
            extract_filename("https://example.com/papers/attention.pdf"),
            "attention.pdf"
        );
        assert_eq!(extract_filename("https://example.com/"), "downloaded.pdf");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let err = resolve_input("/no/such/file.pdf", 5).await.unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn non_pdf_file_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"just some text, definitely not a pdf").unwrap();

        let err = resolve_input(tmp.path().to_str().unwrap(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotAPdf { .. }));
    }

    #[tokio::test]
    async fn pdf_magic_file_resolves() {
        let mut tmp = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        tmp.write_all(b"%PDF-1.4\n%fake but well-prefixed").unwrap();

        let resolved = resolve_input(tmp.path().to_str().unwrap(), 5)
            .await
            .unwrap();
        assert!(resolved.bytes.starts_with(b"%PDF"));
        assert!(resolved.suggested_title.is_some());
    }
}
