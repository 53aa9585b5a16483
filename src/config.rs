//! Configuration types for PDF-to-HTML conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config between the web handlers and the CLI, and to
//! log exactly what a given conversion ran with.

use crate::error::ConvertError;
use std::path::PathBuf;

/// Configuration for a PDF-to-HTML conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2article::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .default_title("Untitled document")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// PDF user password for encrypted documents. Default: None.
    ///
    /// Only meaningful on the CLI path — the upload form has no password
    /// field, so encrypted uploads are rejected as a client error.
    pub password: Option<String>,

    /// Title substituted when the caller cannot derive one from a filename.
    /// Default: "Converted PDF".
    ///
    /// The renderer itself performs no defaulting; it embeds whatever title
    /// string it is handed. This field belongs to the calling glue.
    pub default_title: String,

    /// Explicit path to a pdfium shared library. Default: None.
    ///
    /// When unset, binding falls back to a library next to the executable and
    /// then to the system library paths. The `PDFIUM_LIB_PATH` environment
    /// variable populates this field on the CLI.
    pub pdfium_library_path: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            password: None,
            default_title: "Converted PDF".to_string(),
            pdfium_library_path: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.config.default_title = title.into();
        self
    }

    pub fn pdfium_library_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library_path = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.default_title.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "default_title must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let config = ConversionConfig::builder().build().unwrap();
        assert_eq!(config.default_title, "Converted PDF");
        assert!(config.password.is_none());
    }

    #[test]
    fn empty_default_title_rejected() {
        let err = ConversionConfig::builder()
            .default_title("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfig(_)));
    }

    #[test]
    fn builder_sets_fields() {
        let config = ConversionConfig::builder()
            .password("secret")
            .default_title("My Paper")
            .pdfium_library_path("/opt/pdfium")
            .build()
            .unwrap();
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.default_title, "My Paper");
        assert_eq!(
            config.pdfium_library_path,
            Some(PathBuf::from("/opt/pdfium"))
        );
    }
}
