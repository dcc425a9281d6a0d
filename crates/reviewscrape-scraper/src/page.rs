//! Rendered HTML and the DOM helpers the extractors share.

use scraper::{ElementRef, Html, Node};

use crate::error::ScraperError;

/// Fully rendered HTML of one page, plus the URL it was rendered from.
///
/// Holds the markup as a string: `scraper::Html` is not `Send`, so the DOM
/// is parsed on demand inside synchronous extraction code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    url: String,
    html: String,
}

impl RenderedPage {
    #[must_use]
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Resolves an `href` found on this page to an absolute URL.
    ///
    /// Falls back to the raw `href` when this page's URL is not absolute
    /// (fixture pages in tests).
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        reqwest::Url::parse(&self.url)
            .and_then(|base| base.join(href))
            .map_or_else(|_| href.to_owned(), |u| u.to_string())
    }
}

/// Elements whose boundaries start a new line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "li", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Visible text of an element, approximating `innerText`.
///
/// `<br>` and block element boundaries start a new line; within a line,
/// runs of whitespace collapse to single spaces. Blank lines are dropped.
#[must_use]
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let mut lines = vec![String::new()];
    collect_lines(element, &mut lines);
    lines
        .iter()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_lines(element: ElementRef<'_>, lines: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if let Some(line) = lines.last_mut() {
                    line.push_str(text);
                }
            }
            Node::Element(el) if el.name() == "br" => lines.push(String::new()),
            Node::Element(el) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&el.name());
                if block {
                    lines.push(String::new());
                }
                collect_lines(child, lines);
                if block {
                    lines.push(String::new());
                }
            }
            _ => {}
        }
    }
}

/// First child that is an element, skipping text and comment nodes.
pub(crate) fn first_element_child(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.children().find_map(ElementRef::wrap)
}

/// Builds an [`ScraperError::Extraction`] for `page`.
pub(crate) fn extraction_error(page: &RenderedPage, reason: impl Into<String>) -> ScraperError {
    ScraperError::Extraction {
        url: page.url().to_owned(),
        reason: reason.into(),
    }
}
