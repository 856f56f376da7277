//! Response body decoding
//!
//! Encoding precedence: byte-order mark, then the `charset` parameter of the
//! Content-Type header, then a `<meta>` declaration in the first 1024 bytes,
//! then UTF-8. Undecodable sequences are replaced, never rejected.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use regex::bytes::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// How far into the body a `<meta>` charset declaration is looked for
pub const PRESCAN_BYTES: usize = 1024;

/// Where the chosen encoding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    /// Leading byte-order mark
    Bom,
    /// Content-Type header
    Header,
    /// `<meta charset>` or `<meta http-equiv="Content-Type">`
    Meta,
    /// Nothing declared
    Default,
}

/// Pick the encoding for a response body
pub fn detect(bytes: &[u8], content_type: Option<&str>) -> (&'static Encoding, CharsetSource) {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return (encoding, CharsetSource::Bom);
    }
    if let Some(encoding) = content_type.and_then(from_content_type) {
        return (encoding, CharsetSource::Header);
    }
    if let Some(encoding) = from_meta(bytes) {
        return (encoding, CharsetSource::Meta);
    }
    (UTF_8, CharsetSource::Default)
}

/// Decode a response body to text, dropping any byte-order mark
pub fn decode(bytes: &[u8], content_type: Option<&str>) -> String {
    let (encoding, source) = detect(bytes, content_type);
    let (text, _, had_errors) = encoding.decode(bytes);
    debug!(encoding = encoding.name(), ?source, had_errors, "Decoded body");
    text.into_owned()
}

/// `charset` parameter of a Content-Type value
pub fn from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let label = value.trim().trim_matches(|c| c == '"' || c == '\'');
        Encoding::for_label(label.as_bytes())
    })
}

/// Charset declared by a `<meta>` tag near the start of the document
pub fn from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(PRESCAN_BYTES)];
    let label = meta_charset_regex()?.captures(head)?.get(1)?;
    let encoding = Encoding::for_label(label.as_bytes())?;

    // a document that was readable as ASCII cannot really be UTF-16
    Some(if encoding == UTF_16LE || encoding == UTF_16BE {
        UTF_8
    } else if encoding == X_USER_DEFINED {
        WINDOWS_1252
    } else {
        encoding
    })
}

fn meta_charset_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i-u)<meta\b[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).ok()
    })
    .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1251;

    fn cp1251(text: &str) -> Vec<u8> {
        WINDOWS_1251.encode(text).0.into_owned()
    }

    #[test]
    fn test_header_charset_wins_over_default() {
        let body = cp1251("<title>Привет</title>");
        assert_eq!(
            detect(&body, Some("text/html; charset=windows-1251")),
            (WINDOWS_1251, CharsetSource::Header)
        );
        assert_eq!(
            decode(&body, Some("text/html; charset=windows-1251")),
            "<title>Привет</title>"
        );
    }

    #[test]
    fn test_header_parameter_parsing() {
        assert_eq!(from_content_type("text/html; Charset=\"cp1251\""), Some(WINDOWS_1251));
        assert_eq!(from_content_type("text/html;charset=utf-8"), Some(UTF_8));
        assert_eq!(from_content_type("text/html"), None);
        assert_eq!(from_content_type("text/html; charset=bogus"), None);
    }

    #[test]
    fn test_meta_charset_declarations() {
        let short = cp1251(r#"<html><head><meta charset="windows-1251"><title>Мир</title>"#);
        assert_eq!(from_meta(&short), Some(WINDOWS_1251));
        assert!(decode(&short, Some("text/html")).contains("<title>Мир</title>"));

        let http_equiv = br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=koi8-r">"#;
        assert_eq!(from_meta(http_equiv), Some(encoding_rs::KOI8_R));
    }

    #[test]
    fn test_meta_after_prescan_window_is_ignored() {
        let mut body = vec![b' '; PRESCAN_BYTES];
        body.extend_from_slice(br#"<meta charset="windows-1251">"#);
        assert_eq!(detect(&body, None), (UTF_8, CharsetSource::Default));
    }

    #[test]
    fn test_meta_utf16_means_utf8() {
        assert_eq!(from_meta(br#"<meta charset="utf-16">"#), Some(UTF_8));
    }

    #[test]
    fn test_bom_overrides_header() {
        let body = b"\xEF\xBB\xBF<title>caf\xC3\xA9</title>";
        assert_eq!(detect(body, Some("text/html; charset=windows-1251")).1, CharsetSource::Bom);
        assert_eq!(decode(body, Some("text/html; charset=windows-1251")), "<title>café</title>");
    }

    #[test]
    fn test_undeclared_invalid_utf8_is_replaced() {
        let text = decode(b"<title>caf\xE9</title>", None);
        assert!(text.contains('\u{FFFD}'));
    }
}
