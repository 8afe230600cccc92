//! Loading and flattening of the per-page HTML reconstructions.
//!
//! Pages live at `{base}/{document_id}_{page:03}.html`. The base is either an
//! `http(s)` URL or a local directory. Markup is flattened into lines of text
//! segments, each flagged when it sits inside a superscript so the panel can
//! highlight it.

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

static SUPERSCRIPT_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)vertical-align\s*:\s*super").expect("valid superscript style regex")
});

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tbody",
    "thead",
    "tfoot",
    "tr",
    "ul",
];

const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Where the HTML pages of one document live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSource {
    base: String,
    document_id: String,
}

impl HtmlSource {
    pub fn new(base: impl Into<String>, document_id: impl Into<String>) -> Self {
        let base = base.into();
        let trimmed = base.trim_end_matches('/');
        let base = if trimmed.is_empty() && base.starts_with('/') {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            base,
            document_id: document_id.into(),
        }
    }

    pub fn page_location(&self, page: u32) -> String {
        let file = format!("{}_{:03}.html", self.document_id, page);
        if self.base.is_empty() {
            file
        } else if self.base == "/" {
            format!("/{file}")
        } else {
            format!("{}/{}", self.base, file)
        }
    }

    fn is_remote(&self) -> bool {
        let lower = self.base.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// Fetch the raw markup for `page`.
    pub fn fetch(&self, page: u32) -> Result<String> {
        let location = self.page_location(page);
        if self.is_remote() {
            info!(%location, "Fetching HTML page");
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .context("Failed to build HTTP client")?;
            let response = client
                .get(&location)
                .send()
                .with_context(|| format!("Request for {location} failed"))?;
            let status = response.status();
            if !status.is_success() {
                bail!("{location} returned {status}");
            }
            return response
                .text()
                .with_context(|| format!("Failed to read body of {location}"));
        }

        info!(%location, "Reading HTML page from disk");
        fs::read_to_string(Path::new(&location))
            .with_context(|| format!("Failed to read {location}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub superscript: bool,
}

/// Flattened page ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlPage {
    pub lines: Vec<Vec<Segment>>,
    pub superscripts: Vec<String>,
}

impl HtmlPage {
    pub fn superscript_count(&self) -> usize {
        self.superscripts.len()
    }

    pub fn is_blank(&self) -> bool {
        self.lines
            .iter()
            .flatten()
            .all(|segment| segment.text.trim().is_empty())
    }
}

/// Parse markup into display lines and collect the superscripts it contains.
pub fn parse_page(markup: &str) -> HtmlPage {
    let document = Html::parse_document(markup);
    let mut builder = PageBuilder::default();
    builder.walk(document.root_element(), false);
    let page = builder.finish();
    debug!(
        lines = page.lines.len(),
        superscripts = page.superscript_count(),
        "Parsed HTML page"
    );
    page
}

/// Same predicate the highlighter uses: `<sup>`, a `superscript` class, or an
/// inline `vertical-align: super` style.
fn is_superscript(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if value.name().eq_ignore_ascii_case("sup") {
        return true;
    }
    if value
        .classes()
        .any(|class| class.eq_ignore_ascii_case("superscript"))
    {
        return true;
    }
    value
        .attr("style")
        .is_some_and(|style| SUPERSCRIPT_STYLE.is_match(style))
}

#[derive(Default)]
struct PageBuilder {
    lines: Vec<Vec<Segment>>,
    current: Vec<Segment>,
    superscripts: Vec<String>,
    pending_space: bool,
}

impl PageBuilder {
    fn walk(&mut self, element: ElementRef<'_>, inside_superscript: bool) {
        let name = element.value().name().to_ascii_lowercase();
        if SKIPPED_TAGS.contains(&name.as_str()) {
            return;
        }

        let marks_superscript = is_superscript(&element);
        if marks_superscript {
            let text: String = element.text().collect::<Vec<_>>().join("");
            self.superscripts.push(collapse_whitespace(&text));
        }
        let superscript = inside_superscript || marks_superscript;
        let is_block = BLOCK_TAGS.contains(&name.as_str());

        if is_block {
            self.break_line();
        }
        if name == "td" || name == "th" {
            self.push_cell_separator();
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text, superscript),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        if child_element.value().name().eq_ignore_ascii_case("br") {
                            self.break_line();
                        } else {
                            self.walk(child_element, superscript);
                        }
                    }
                }
                _ => {}
            }
        }

        if is_block {
            self.break_line();
        }
    }

    fn push_text(&mut self, raw: &str, superscript: bool) {
        let leading_space = raw.starts_with(char::is_whitespace);
        let trailing_space = raw.ends_with(char::is_whitespace);
        let collapsed = collapse_whitespace(raw);
        if collapsed.is_empty() {
            if !raw.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        let mut text = String::with_capacity(collapsed.len() + 1);
        if (leading_space || self.pending_space) && !self.current.is_empty() {
            text.push(' ');
        }
        text.push_str(&collapsed);
        self.pending_space = trailing_space;

        match self.current.last_mut() {
            Some(last) if last.superscript == superscript => last.text.push_str(&text),
            _ => self.current.push(Segment { text, superscript }),
        }
    }

    fn push_cell_separator(&mut self) {
        if !self.current.is_empty() {
            self.current.push(Segment {
                text: " | ".to_string(),
                superscript: false,
            });
        }
        self.pending_space = false;
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        }
        self.pending_space = false;
    }

    fn finish(mut self) -> HtmlPage {
        self.break_line();
        HtmlPage {
            lines: self.lines,
            superscripts: self.superscripts,
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn page_location_is_zero_padded() {
        let source = HtmlSource::new("/html_output/", "complex_tables_all");
        assert_eq!(
            source.page_location(7),
            "/html_output/complex_tables_all_007.html"
        );
        assert_eq!(
            source.page_location(123),
            "/html_output/complex_tables_all_123.html"
        );
        let remote = HtmlSource::new("https://example.org/out", "doc");
        assert_eq!(remote.page_location(1), "https://example.org/out/doc_001.html");
    }

    #[test]
    fn detects_all_superscript_forms() {
        let page = parse_page(
            r#"<html><body>
                <p>E = mc<sup>2</sup> and x<span class="note superscript">n</span></p>
                <p>Footnote<span style="font-size:8px; vertical-align:super">3</span></p>
                <p>Plain <sub>low</sub></p>
            </body></html>"#,
        );
        assert_eq!(page.superscript_count(), 3);
        assert_eq!(page.superscripts, vec!["2", "n", "3"]);
    }

    #[test]
    fn segments_mark_superscript_text() {
        let page = parse_page("<p>Value<sup>12</sup> follows</p>");
        assert_eq!(page.lines.len(), 1);
        let line = &page.lines[0];
        assert_eq!(
            line,
            &vec![
                Segment {
                    text: "Value".to_string(),
                    superscript: false
                },
                Segment {
                    text: "12".to_string(),
                    superscript: true
                },
                Segment {
                    text: " follows".to_string(),
                    superscript: false
                },
            ]
        );
    }

    #[test]
    fn blocks_and_cells_become_lines() {
        let page = parse_page(
            "<style>p { color: red }</style><table><tr><td>A</td><td>B</td></tr>\
             <tr><td>C</td></tr></table><p>Tail<br>Next</p>",
        );
        let lines: Vec<String> = page
            .lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect())
            .collect();
        assert_eq!(lines, vec!["A | B", "C", "Tail", "Next"]);
    }

    #[test]
    fn empty_markup_is_blank() {
        assert!(parse_page("<html><body>   </body></html>").is_blank());
        assert_eq!(parse_page("").superscript_count(), 0);
    }

    #[test]
    fn reads_local_pages_and_reports_missing_ones() {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let dir = std::env::temp_dir().join(format!(
            "pdf-html-validator-test-{}-{stamp}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        fs::write(dir.join("doc_002.html"), "<p>x<sup>1</sup></p>").expect("write page");

        let source = HtmlSource::new(dir.to_string_lossy(), "doc");
        let markup = source.fetch(2).expect("page 2 exists");
        assert_eq!(parse_page(&markup).superscript_count(), 1);
        assert!(source.fetch(3).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
