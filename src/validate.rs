//! Submitted URL validation utilities

use crate::error::ValidationError;
use url::Url;

/// Maximum length of a submitted URL
pub const MAX_URL_LENGTH: usize = 255;

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Validate a submitted URL and return it parsed.
    ///
    /// Must be non-empty, at most [`MAX_URL_LENGTH`] characters, and an
    /// absolute `http`/`https` URL with a host.
    pub fn validate(raw: &str) -> Result<Url, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty);
        }

        if raw.chars().count() > MAX_URL_LENGTH {
            return Err(ValidationError::TooLong(MAX_URL_LENGTH));
        }

        let url = Url::parse(raw).map_err(|e| ValidationError::Invalid(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::Invalid(format!(
                "URL must start with http:// or https://: {raw}"
            )));
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(ValidationError::Invalid(format!("URL has no host: {raw}")));
        }

        Ok(url)
    }

    /// Extract the lowercase host from a URL string
    pub fn extract_host(raw: &str) -> Option<String> {
        Url::parse(raw.trim())
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(UrlValidator::validate("https://example.com").is_ok());
        assert!(UrlValidator::validate("  http://example.com/path?q=1  ").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        assert_eq!(UrlValidator::validate("   "), Err(ValidationError::Empty));
        assert!(matches!(
            UrlValidator::validate("example.com"),
            Err(ValidationError::Invalid(_))
        ));
        assert!(matches!(
            UrlValidator::validate("ftp://example.com"),
            Err(ValidationError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(300));
        assert_eq!(
            UrlValidator::validate(&url),
            Err(ValidationError::TooLong(MAX_URL_LENGTH))
        );
    }

    #[test]
    fn test_extract_host() {
        assert_eq!(
            UrlValidator::extract_host("https://Example.COM:8080/a"),
            Some("example.com".to_string())
        );
        assert_eq!(UrlValidator::extract_host("not a url"), None);
    }
}
