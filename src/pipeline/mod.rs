//! Pipeline stages for PDF-to-HTML conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the PDF backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ encode ──▶ html
//! (bytes)   (pdfium)    (PNG)     (article shell)
//! ```
//!
//! 1. [`input`]   — resolve a user-supplied path or URL to in-memory PDF
//!    bytes (CLI path; the web glue already holds the upload bytes)
//! 2. [`extract`] — walk pages, pull text and embedded images; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 3. [`encode`]  — colour-normalise each decoded image and PNG-encode it
//!    (called per image from within extraction)
//! 4. [`html`]    — escape, paragraph-split, embed images as data URIs, and
//!    wrap everything in the fixed reader-mode article shell

pub mod encode;
pub mod extract;
pub mod html;
pub mod input;
