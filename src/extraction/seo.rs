//! h1 / title / meta description extraction
//!
//! Each field is an independent query over one shared [`PageDocument`].
//! A query never panics or propagates: it yields a [`FieldOutcome`], and a
//! failed query only blanks its own field.

use crate::check::ErrorLog;
use crate::error::ExtractionError;
use crate::extraction::document::PageDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

/// The SEO fields a check records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// First `<h1>` text
    H1,
    /// `<title>` text
    Title,
    /// `<meta name="description">` content
    Description,
}

impl Field {
    /// All fields in record order
    pub const ALL: [Field; 3] = [Field::H1, Field::Title, Field::Description];

    /// Column / log name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::H1 => "h1",
            Field::Title => "title",
            Field::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted (or normalized) field values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoFields {
    /// First `<h1>` text
    pub h1: Option<String>,
    /// Page title
    pub title: Option<String>,
    /// Meta description
    pub description: Option<String>,
}

impl SeoFields {
    /// Value of one field
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::H1 => self.h1.as_deref(),
            Field::Title => self.title.as_deref(),
            Field::Description => self.description.as_deref(),
        }
    }

    /// Mutable slot of one field
    pub fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::H1 => &mut self.h1,
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    /// True when no field was found
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Result of one field query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Non-empty value
    Found(String),
    /// Element missing, attribute missing or value empty
    Absent,
    /// The query itself failed
    Failed(ExtractionError),
}

impl FieldOutcome {
    fn from_lookup(result: Result<Option<String>, ExtractionError>) -> Self {
        match result {
            Ok(Some(value)) if !value.is_empty() => FieldOutcome::Found(value),
            Ok(_) => FieldOutcome::Absent,
            Err(e) => FieldOutcome::Failed(e),
        }
    }

    /// Collapse to an optional value
    pub fn into_value(self) -> Option<String> {
        match self {
            FieldOutcome::Found(value) => Some(value),
            FieldOutcome::Absent | FieldOutcome::Failed(_) => None,
        }
    }
}

/// How to locate one field in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery {
    /// Which field this fills
    pub field: Field,
    /// CSS selector; the first match in document order wins
    pub selector: String,
    /// Read this attribute instead of the text content
    pub attribute: Option<String>,
}

impl FieldQuery {
    /// Text content of the first match
    pub fn text(field: Field, selector: impl Into<String>) -> Self {
        Self {
            field,
            selector: selector.into(),
            attribute: None,
        }
    }

    /// Attribute value of the first match
    pub fn attr(field: Field, selector: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            field,
            selector: selector.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// Run against a parsed document
    pub fn run(&self, doc: &PageDocument) -> FieldOutcome {
        let result = match &self.attribute {
            Some(attr) => doc.first_attr(&self.selector, attr),
            None => doc.first_text(&self.selector),
        };
        FieldOutcome::from_lookup(result)
    }
}

/// SEO field extractor
#[derive(Debug, Clone)]
pub struct SeoExtractor {
    queries: Vec<FieldQuery>,
}

impl Default for SeoExtractor {
    fn default() -> Self {
        Self {
            queries: vec![
                FieldQuery::text(Field::H1, "h1"),
                FieldQuery::text(Field::Title, "title"),
                // attribute values match case-sensitively: `name="Description"` is not picked up
                FieldQuery::attr(Field::Description, r#"meta[name="description"]"#, "content"),
            ],
        }
    }
}

impl SeoExtractor {
    /// Extractor with the standard h1/title/description queries
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query for a field
    pub fn with_query(mut self, query: FieldQuery) -> Self {
        self.queries.retain(|q| q.field != query.field);
        self.queries.push(query);
        self
    }

    /// First `<h1>` text
    pub fn extract_h1(&self, doc: &PageDocument) -> FieldOutcome {
        self.run_field(Field::H1, doc)
    }

    /// `<title>` text
    pub fn extract_title(&self, doc: &PageDocument) -> FieldOutcome {
        self.run_field(Field::Title, doc)
    }

    /// `<meta name="description">` content
    pub fn extract_description(&self, doc: &PageDocument) -> FieldOutcome {
        self.run_field(Field::Description, doc)
    }

    fn run_field(&self, field: Field, doc: &PageDocument) -> FieldOutcome {
        match self.queries.iter().find(|q| q.field == field) {
            Some(query) => query.run(doc),
            None => FieldOutcome::Absent,
        }
    }

    /// Decode and parse `html` once and run all three queries.
    ///
    /// `content_type` selects the body charset. Failed queries are recorded
    /// in `errors` and leave their field absent.
    #[instrument(skip_all, fields(bytes = html.len(), content_type = ?content_type))]
    pub fn extract(
        &self,
        html: &[u8],
        content_type: Option<&str>,
        errors: &mut ErrorLog,
    ) -> SeoFields {
        let doc = PageDocument::parse(html, content_type);
        debug!(recovered = doc.recovered_errors(), "Parsed document");

        let mut fields = SeoFields::default();
        for field in Field::ALL {
            match self.run_field(field, &doc) {
                FieldOutcome::Found(value) => *fields.slot_mut(field) = Some(value),
                FieldOutcome::Absent => {}
                FieldOutcome::Failed(e) => {
                    warn!(%field, error = %e, "Field extraction failed");
                    errors.push(format!("Could not extract {field}: {e}"));
                }
            }
        }

        debug!(
            "Extracted fields: h1={:?}, title={:?}, description={:?}",
            fields.h1, fields.title, fields.description
        );
        fields
    }
}
