//! Field-level form checks shared by every editor.

use thiserror::Error;
use url::Url;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_COMPANY_LEN: usize = 100;
pub const MAX_URL_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0} must be a valid http(s) URL")]
    InvalidUrl(&'static str),
}

/// Parses an absolute `http`/`https` URL with a host. Anything else is rejected.
pub fn parse_http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    (web && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

pub fn is_valid_url(raw: &str) -> bool {
    parse_http_url(raw).is_some()
}

/// Returns the trimmed value, or `Required` when nothing is left.
pub fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::Required(field))
    } else {
        Ok(trimmed)
    }
}

/// Lengths are counted in characters, not bytes.
pub fn check_max_len(field: &'static str, value: &str, max: usize) -> Result<(), FieldError> {
    if value.chars().count() > max {
        Err(FieldError::TooLong { field, max })
    } else {
        Ok(())
    }
}

pub fn check_url(field: &'static str, value: &str) -> Result<(), FieldError> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidUrl(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_url("https://acme.com/job/1"));
        assert!(is_valid_url("http://localhost:3000/jobs?id=2"));
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(!is_valid_url("acme.com/job/1"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("mailto:jobs@acme.com"));
        assert!(!is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("title", "  Engineer "), Ok("Engineer"));
        assert_eq!(
            require_non_empty("title", "   "),
            Err(FieldError::Required("title"))
        );
    }

    #[test]
    fn test_max_len_counts_characters() {
        let accented = "é".repeat(MAX_TITLE_LEN);
        assert!(check_max_len("title", &accented, MAX_TITLE_LEN).is_ok());
        let err = check_max_len("title", &"a".repeat(101), MAX_TITLE_LEN).unwrap_err();
        assert_eq!(err.to_string(), "title must be at most 100 characters");
    }
}
