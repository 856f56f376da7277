//! Field length normalization
//!
//! Keeps extracted text within the storage column widths. Lengths are
//! counted in Unicode scalar values so multi-byte characters are never split.

use crate::config::FieldLimits;
use crate::extraction::SeoFields;
use tracing::debug;

/// Appended to every truncated value
pub const ELLIPSIS: &str = "...";

/// Enforces per-field maximum lengths
pub struct FieldNormalizer;

impl FieldNormalizer {
    /// Truncate every field longer than its limit.
    ///
    /// An over-long value keeps its first `max - 3` characters followed by
    /// `"..."`, so the result is exactly `max` characters. Values at or under
    /// the limit, absent values and fields without a limit are unchanged.
    pub fn normalize(mut fields: SeoFields, limits: &FieldLimits) -> SeoFields {
        for (field, max) in limits.iter() {
            let slot = fields.slot_mut(field);
            if let Some(value) = slot.take() {
                let normalized = Self::truncate(value, max);
                *slot = Some(normalized);
            }
        }
        fields
    }

    /// Truncate one value to at most `max` characters
    pub fn truncate(value: String, max: usize) -> String {
        let length = value.chars().count();
        if length <= max {
            return value;
        }
        debug!(length, max, "Truncating field");

        // limits under 3 are rejected by FieldLimits; a hand-built one just gets a hard cut
        if max < ELLIPSIS.len() {
            return value.chars().take(max).collect();
        }

        let mut out: String = value.chars().take(max - ELLIPSIS.len()).collect();
        out.push_str(ELLIPSIS);
        out
    }
}
