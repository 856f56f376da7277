//! SEO field extraction
//!
//! This module decodes fetched bodies by their declared charset, parses them
//! leniently and pulls out the first `<h1>`, the `<title>` and the meta
//! description.

pub mod charset;
pub mod document;
pub mod seo;

pub use document::PageDocument;
pub use seo::{Field, FieldOutcome, FieldQuery, SeoExtractor, SeoFields};
