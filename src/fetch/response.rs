//! Buffered response returned by the fetcher.

use reqwest::header::{HeaderMap, CONTENT_TYPE, SET_COOKIE};
use reqwest::{StatusCode, Url};

/// A fully-read HTTP response.
///
/// The body is buffered so validation can sniff it and HTML probes can parse
/// it without holding the connection open.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    /// URL after any transport-level redirects
    pub final_url: Url,
    /// Status code of the final response
    pub status: StatusCode,
    /// Response headers, including repeated `Set-Cookie` values
    pub headers: HeaderMap,
    /// Complete response body
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Declared media type without parameters, lowercased (`text/html; charset=utf-8` -> `text/html`).
    pub fn declared_content_type(&self) -> Option<String> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
    }

    /// Every `Set-Cookie` value sent with the response.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// Builds a `Cookie` request header from the response's `Set-Cookie` values.
    ///
    /// Only the `name=value` pair of each cookie is forwarded; attributes such
    /// as `Path` or `Expires` are dropped.
    pub fn cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = self
            .set_cookies()
            .iter()
            .filter_map(|c| c.split(';').next())
            .map(|pair| pair.trim().to_string())
            .filter(|pair| pair.contains('='))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with_headers(headers: HeaderMap) -> FetchedResponse {
        FetchedResponse {
            final_url: Url::parse("http://example.com/").expect("valid url"),
            status: StatusCode::OK,
            headers,
            body: Vec::new(),
        }
    }

    #[test]
    fn test_declared_content_type_strips_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("Text/HTML; charset=UTF-8"),
        );
        let response = response_with_headers(headers);
        assert_eq!(
            response.declared_content_type(),
            Some("text/html".to_string())
        );
    }

    #[test]
    fn test_declared_content_type_missing() {
        let response = response_with_headers(HeaderMap::new());
        assert_eq!(response.declared_content_type(), None);
    }

    #[test]
    fn test_repeated_set_cookie_values() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1; Path=/"));
        headers.append(
            SET_COOKIE,
            HeaderValue::from_static("session=xyz; HttpOnly; Secure"),
        );
        let response = response_with_headers(headers);

        assert_eq!(response.set_cookies().len(), 2);
        assert_eq!(
            response.cookie_header(),
            Some("a=1; session=xyz".to_string())
        );
    }

    #[test]
    fn test_cookie_header_absent_without_cookies() {
        let response = response_with_headers(HeaderMap::new());
        assert!(response.set_cookies().is_empty());
        assert_eq!(response.cookie_header(), None);
    }
}
