//! Request header utilities
//!
//! The session token travels in a plain request header, not a cookie.

use axum::http::HeaderMap;

/// Read a header as trimmed UTF-8.
///
/// Absent, non-UTF-8 and blank values all come back as `None`.
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_present_header() {
        let mut headers = HeaderMap::new();
        headers.insert("token", HeaderValue::from_static("  abc123 "));
        assert_eq!(extract_header(&headers, "token"), Some("abc123".to_string()));
    }

    #[test]
    fn test_missing_or_blank_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_header(&headers, "token"), None);

        headers.insert("token", HeaderValue::from_static("   "));
        assert_eq!(extract_header(&headers, "token"), None);
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-token", HeaderValue::from_static("abc"));
        assert_eq!(extract_header(&headers, "X-Token"), Some("abc".to_string()));
    }
}
