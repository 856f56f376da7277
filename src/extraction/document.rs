//! Lenient HTML document
//!
//! Wraps a `scraper::Html` tree. html5ever never rejects input: unclosed
//! tags, stray end tags and a missing doctype all produce a best-effort tree.

use crate::error::ExtractionError;
use crate::extraction::charset;
use scraper::{ElementRef, Html, Selector};

/// A parsed page, shared by all field queries of one check
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    /// Parse raw response bytes.
    ///
    /// `content_type` is the response's Content-Type header; its `charset`
    /// is honoured, otherwise a `<meta>` declaration or UTF-8. Undecodable
    /// sequences are replaced rather than rejected.
    pub fn parse(bytes: &[u8], content_type: Option<&str>) -> Self {
        Self::parse_str(&charset::decode(bytes, content_type))
    }

    /// Parse an already decoded document
    pub fn parse_str(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Number of errors html5ever recovered from while parsing
    pub fn recovered_errors(&self) -> usize {
        self.html.errors.len()
    }

    /// First element matching `selector` in document order
    fn first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }

    /// Trimmed text content of the first match
    pub fn first_text(&self, selector: &str) -> Result<Option<String>, ExtractionError> {
        let selector = compile(selector)?;
        Ok(self
            .first(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string()))
    }

    /// Trimmed attribute value of the first match.
    ///
    /// `None` when nothing matches or the first match lacks the attribute.
    pub fn first_attr(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, ExtractionError> {
        let selector = compile(selector)?;
        Ok(self
            .first(&selector)
            .and_then(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string()))
    }
}

fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
