//! HTML rendering: extracted pages → one reader-mode article document.
//!
//! Browser reading-assistance features ("reader mode") look for a main
//! content area, especially a single `<article>` landmark. This stage builds
//! exactly that: per-page `<section>`s of paragraphs and inline figures,
//! wrapped in a fixed `main > article` shell. Everything is a pure function
//! of its inputs — no I/O, no randomness, no shared state — so converting
//! the same document twice yields byte-identical HTML.
//!
//! The title is embedded verbatim: it is trusted plain text derived from a
//! filename by the caller, which escapes it first (see
//! [`crate::pipeline::input::title_from_filename`]).

use crate::document::Page;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Escape text for safe embedding in HTML.
///
/// Ampersand must be replaced first so the entities introduced by the other
/// two substitutions are not double-escaped.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render one page as a labelled `<section>`.
///
/// Escaped text is split on newlines into candidate paragraphs; paragraphs
/// empty after trimming are dropped, survivors are wrapped in `<p>` with no
/// separator. Figures follow all paragraphs, in extraction order.
pub fn render_page(page: &Page) -> String {
    let safe_text = escape_text(&page.text);
    let mut body = String::new();

    for paragraph in safe_text.split('\n') {
        let paragraph = paragraph.trim();
        if !paragraph.is_empty() {
            body.push_str("<p>");
            body.push_str(paragraph);
            body.push_str("</p>");
        }
    }

    for image in &page.images {
        let b64 = STANDARD.encode(&image.png);
        body.push_str(&format!(
            "<figure><img src=\"data:image/png;base64,{}\" alt=\"Page {} image\"></figure>",
            b64, page.number
        ));
    }

    format!(
        "<section aria-label=\"Page {}\">{}</section>",
        page.number, body
    )
}

/// Render the complete HTML document.
///
/// The shell is constant across all conversions except for the interpolated
/// title and the per-document body. Sections are newline-joined in source
/// page order.
pub fn render_document(pages: &[Page], title: &str) -> String {
    let article_inner = pages
        .iter()
        .map(render_page)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <meta name="description" content="PDF converted to reader-mode HTML.">
  <link rel="stylesheet" href="/static/styles.css">
</head>
<body>
  <main>
    <article>
      <header>
        <h1>{title}</h1>
        <p class="byline">Converted with pdf2article</p>
      </header>
      {article_inner}
    </article>
  </main>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageImage;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn text_page(number: usize, text: &str) -> Page {
        Page {
            number,
            text: text.to_string(),
            images: Vec::new(),
        }
    }

    fn tiny_png(width: u32, height: u32) -> PageImage {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([0, 0, 255, 255]),
        ));
        crate::pipeline::encode::encode_image(img).unwrap()
    }

    #[test]
    fn escape_order_prevents_double_escaping() {
        assert_eq!(escape_text("a & b"), "a &amp; b");
        assert_eq!(escape_text("<b>"), "&lt;b&gt;");
        // A pre-existing entity is escaped once, not twice.
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
    }

    #[test]
    fn escaped_output_contains_no_raw_markup() {
        let page = text_page(1, "1 < 2 & 3 > 2");
        let html = render_page(&page);
        let inner = html
            .strip_prefix("<section aria-label=\"Page 1\">")
            .and_then(|s| s.strip_suffix("</section>"))
            .unwrap();
        let inner = inner.replace("<p>", "").replace("</p>", "");
        assert!(!inner.contains('<'));
        assert!(!inner.contains('>'));
        assert!(inner.contains("&lt;"));
        assert!(inner.contains("&amp;"));
        assert!(inner.contains("&gt;"));
    }

    #[test]
    fn newlines_become_paragraphs() {
        let page = text_page(1, "Hello\nWorld");
        let html = render_page(&page);
        assert!(html.contains("<p>Hello</p><p>World</p>"));
        assert!(!html.contains("<figure>"));
    }

    #[test]
    fn blank_lines_are_dropped() {
        let page = text_page(1, "a\n\n   \nb");
        let html = render_page(&page);
        assert!(html.contains("<p>a</p><p>b</p>"));
    }

    #[test]
    fn paragraphs_are_trimmed() {
        let page = text_page(1, "  spaced  ");
        let html = render_page(&page);
        assert!(html.contains("<p>spaced</p>"));
    }

    #[test]
    fn images_follow_paragraphs_in_order() {
        let page = Page {
            number: 2,
            text: "caption".into(),
            images: vec![tiny_png(3, 3), tiny_png(5, 5)],
        };
        let html = render_page(&page);
        let p_pos = html.find("<p>caption</p>").unwrap();
        let fig_pos = html.find("<figure>").unwrap();
        assert!(p_pos < fig_pos, "paragraphs must precede figures");
        assert_eq!(html.matches("<figure>").count(), 2);
        assert!(html.contains("alt=\"Page 2 image\""));
    }

    #[test]
    fn embedded_image_round_trips() {
        let page = Page {
            number: 1,
            text: String::new(),
            images: vec![tiny_png(9, 4)],
        };
        let html = render_page(&page);

        let start = html.find("base64,").unwrap() + "base64,".len();
        let end = start + html[start..].find('"').unwrap();
        let png = STANDARD.decode(&html[start..end]).expect("valid base64");

        let decoded = image::load_from_memory(&png).expect("valid PNG");
        assert_eq!(decoded.width(), 9);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn section_count_matches_page_order() {
        let pages = vec![
            text_page(1, "first"),
            text_page(2, "second"),
            text_page(3, "third"),
        ];
        let html = render_document(&pages, "Doc");
        assert_eq!(html.matches("<section ").count(), 3);

        let p1 = html.find("aria-label=\"Page 1\"").unwrap();
        let p2 = html.find("aria-label=\"Page 2\"").unwrap();
        let p3 = html.find("aria-label=\"Page 3\"").unwrap();
        assert!(p1 < p2 && p2 < p3);
    }

    #[test]
    fn zero_pages_yields_wellformed_shell() {
        let html = render_document(&[], "Empty");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<article>"));
        assert!(html.contains("</article>"));
        assert!(html.contains("<title>Empty</title>"));
        assert!(html.contains("<h1>Empty</h1>"));
        assert!(!html.contains("<section"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let pages = vec![Page {
            number: 1,
            text: "Hello\nWorld".into(),
            images: vec![tiny_png(2, 2)],
        }];
        let a = render_document(&pages, "T");
        let b = render_document(&pages, "T");
        assert_eq!(a, b);
    }

    #[test]
    fn shell_carries_fixed_metadata() {
        let html = render_document(&[], "X");
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("width=device-width, initial-scale=1"));
        assert!(html.contains("href=\"/static/styles.css\""));
        assert!(html.contains("class=\"byline\""));
    }
}
