//! Bounded-timeout HTTP GET shared by every probe.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::header::COOKIE;
use reqwest::Url;

use super::deadline::Deadline;
use super::response::FetchedResponse;
use crate::config::Config;
use crate::error_handling::{FetchError, InitializationError};
use crate::initialization::init_client;

/// Performs single GET requests under two nested timeouts.
///
/// Each call is limited by the per-connection timeout and by whatever is left
/// of the request's [`Deadline`], whichever is shorter. A call made after the
/// deadline has passed fails with [`FetchError::Timeout`] without touching the
/// network.
#[derive(Clone)]
pub struct Fetcher {
    client: Arc<reqwest::Client>,
    connection_timeout: Duration,
    max_body_size: usize,
}

impl Fetcher {
    /// Creates a fetcher around an existing client.
    pub fn new(
        client: Arc<reqwest::Client>,
        connection_timeout: Duration,
        max_body_size: usize,
    ) -> Self {
        Self {
            client,
            connection_timeout,
            max_body_size,
        }
    }

    /// Builds the HTTP client from configuration and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::new(
            client,
            config.connection_timeout(),
            config.max_body_size,
        ))
    }

    /// Timeout for the next call, or `Timeout` if the budget is already spent.
    fn call_timeout(&self, deadline: &Deadline) -> Result<Duration, FetchError> {
        match deadline.remaining() {
            Some(left) => Ok(left.min(self.connection_timeout)),
            None => Err(FetchError::Timeout {
                elapsed_ms: deadline.elapsed().as_millis(),
            }),
        }
    }

    /// Fetches `url` and buffers the whole body.
    ///
    /// `cookie` is sent verbatim as the `Cookie` request header.
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` if the budget is spent before or during the call
    /// - `FetchError::Transport` for connection, DNS, TLS, or URL errors
    /// - `FetchError::BodyTooLarge` if the body exceeds the buffer limit
    pub async fn fetch(
        &self,
        url: &str,
        deadline: &Deadline,
        cookie: Option<&str>,
    ) -> Result<FetchedResponse, FetchError> {
        let timeout = self.call_timeout(deadline)?;

        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let result = tokio::time::timeout(timeout, async {
            let response = request.send().await?;
            log::debug!("{} =redirect=> {}", url, response.url());
            self.read_response(response).await
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => {
                log::debug!("Fetch of {} timed out after {:?}", url, timeout);
                Err(FetchError::Timeout {
                    elapsed_ms: deadline.elapsed().as_millis(),
                })
            }
        }
    }

    /// Issues a GET and reports only the URL the transport ended on.
    ///
    /// The body is never read.
    pub async fn final_url(&self, url: &str, deadline: &Deadline) -> Result<Url, FetchError> {
        let timeout = self.call_timeout(deadline)?;

        match tokio::time::timeout(timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => {
                log::debug!("{} =redirect=> {}", url, response.url());
                Ok(response.url().clone())
            }
            Ok(Err(e)) => Err(FetchError::Transport(e)),
            Err(_) => Err(FetchError::Timeout {
                elapsed_ms: deadline.elapsed().as_millis(),
            }),
        }
    }

    /// Streams the body with a size cap (same pattern as the favicon download).
    async fn read_response(
        &self,
        response: reqwest::Response,
    ) -> Result<FetchedResponse, FetchError> {
        let limit = self.max_body_size;
        if response.content_length().is_some_and(|len| len as usize > limit) {
            return Err(FetchError::BodyTooLarge { limit });
        }

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let mut stream = response.bytes_stream();
        let mut body = Vec::with_capacity(limit.min(16 * 1024));
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > limit {
                log::debug!(
                    "Body of {} exceeds {} bytes (aborting at {} bytes)",
                    final_url,
                    limit,
                    body.len() + chunk.len()
                );
                return Err(FetchError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedResponse {
            final_url,
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn test_fetcher(max_body_size: usize) -> Fetcher {
        let client = reqwest::Client::builder()
            .user_agent("favicon_service_test/1.0")
            .build()
            .expect("Failed to build client");
        Fetcher::new(Arc::new(client), Duration::from_secs(5), max_body_size)
    }

    #[tokio::test]
    async fn test_fetch_reads_status_headers_and_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/page")).respond_with(
                status_code(200)
                    .append_header("Content-Type", "text/html")
                    .append_header("Set-Cookie", "a=1; Path=/")
                    .append_header("Set-Cookie", "b=2")
                    .body("<html></html>"),
            ),
        );

        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::from_secs(5));
        let url = server.url("/page").to_string();
        let response = fetcher
            .fetch(&url, &deadline, None)
            .await
            .expect("fetch should succeed");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"<html></html>");
        assert_eq!(response.set_cookies().len(), 2);
        assert_eq!(response.declared_content_type(), Some("text/html".into()));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_cookie() {
        let server = Server::run();
        server.expect(
            Expectation::matching(httptest::all_of![
                request::method_path("GET", "/icon.png"),
                request::headers(contains(("user-agent", "favicon_service_test/1.0"))),
                request::headers(contains(("cookie", "a=1; b=2"))),
            ])
            .respond_with(status_code(200).body("ok")),
        );

        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::from_secs(5));
        let url = server.url("/icon.png").to_string();
        let response = fetcher
            .fetch(&url, &deadline, Some("a=1; b=2"))
            .await
            .expect("fetch should succeed");
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_fetch_exhausted_deadline_makes_no_request() {
        // No expectations: any request reaching the server fails the test.
        let server = Server::run();
        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::ZERO);
        let url = server.url("/never").to_string();

        let result = fetcher.fetch(&url, &deadline, None).await;
        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/big"))
                .respond_with(status_code(200).body(vec![b'x'; 4096])),
        );

        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::from_secs(5));
        let url = server.url("/big").to_string();
        let result = fetcher.fetch(&url, &deadline, None).await;
        assert!(matches!(
            result,
            Err(FetchError::BodyTooLarge { limit: 1024 })
        ));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::from_secs(5));
        // Port 9 (discard) is essentially never listening on loopback.
        let result = fetcher.fetch("http://127.0.0.1:9/", &deadline, None).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_final_url_follows_redirect() {
        let server = Server::run();
        let target = server.url("/landing").to_string();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(301).append_header("Location", target.as_str())),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/landing"))
                .respond_with(status_code(200).body("home")),
        );

        let fetcher = test_fetcher(1024);
        let deadline = Deadline::new(Duration::from_secs(5));
        let url = server.url("/").to_string();
        let final_url = fetcher
            .final_url(&url, &deadline)
            .await
            .expect("redirect should resolve");
        assert_eq!(final_url.path(), "/landing");
    }
}
