//! HTTP access to the weather archive.

use crate::config::{ARCHIVE_URL, DEFAULT_TIMEOUT};
use crate::request::error::ArchiveRequestError;
use crate::request::params::ArchiveRequest;
use bon::bon;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Anything that can answer an [`ArchiveRequest`] with a JSON body.
///
/// [`ArchiveClient`] talks to the real archive; tests substitute fixtures.
pub trait ArchiveSource {
    fn fetch(
        &self,
        request: &ArchiveRequest,
    ) -> impl Future<Output = Result<Value, ArchiveRequestError>> + Send;
}

/// Error payload the archive returns for rejected queries.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// Fetches archive responses over HTTP with `reqwest`.
///
/// # Examples
///
/// ```no_run
/// use weather_archive::ArchiveClient;
/// use std::time::Duration;
///
/// let client = ArchiveClient::builder()
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(client.endpoint(), "https://archive-api.open-meteo.com/v1/archive");
/// ```
pub struct ArchiveClient {
    endpoint: String,
    http: Client,
}

#[bon]
impl ArchiveClient {
    /// Creates a client for `endpoint` (defaults to the Open-Meteo archive)
    /// whose requests give up after `timeout` (defaults to 30 seconds).
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveRequestError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    #[builder]
    pub fn new(
        #[builder(into, default = ARCHIVE_URL.to_string())] endpoint: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, ArchiveRequestError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ArchiveRequestError::ClientBuild)?;
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_json(&self, request: &ArchiveRequest) -> Result<Value, ArchiveRequestError> {
        let url = self.endpoint.clone();
        info!(
            "Requesting archive data from {} for {},{}",
            url, request.params.latitude, request.params.longitude
        );

        let response = self
            .http
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(|e| ArchiveRequestError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ArchiveRequestError::NetworkRequest(url.clone(), e))?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.reason);
            warn!("HTTP error for {}: {} ({:?})", url, status, reason);
            return Err(ArchiveRequestError::HttpStatus {
                url,
                status,
                reason,
            });
        }

        let body = parse_body(&url, &bytes)?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(body)
    }
}

impl ArchiveSource for ArchiveClient {
    async fn fetch(&self, request: &ArchiveRequest) -> Result<Value, ArchiveRequestError> {
        self.get_json(request).await
    }
}

/// Decodes a successful response body, turning the archive's in-band
/// `{"error": true, "reason": ...}` payload into an error.
pub(crate) fn parse_body(url: &str, bytes: &[u8]) -> Result<Value, ArchiveRequestError> {
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|e| ArchiveRequestError::JsonParse(url.to_string(), e))?;

    if let Ok(ApiErrorBody {
        error: true,
        reason,
    }) = ApiErrorBody::deserialize(&body)
    {
        return Err(ArchiveRequestError::ApiRejected {
            url: url.to_string(),
            reason: reason.unwrap_or_else(|| "unspecified".to_string()),
        });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::params::build_params;
    use crate::types::location::Location;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const URL: &str = "https://archive.test/v1/archive";

    #[test]
    fn test_parse_body_accepts_series() {
        let body = parse_body(URL, br#"{"hourly": {"time": []}, "daily": {"time": []}}"#).unwrap();
        assert!(body.get("hourly").is_some());
        assert!(body.get("daily").is_some());
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        let err = parse_body(URL, b"{\"hourly\": ").unwrap_err();
        assert!(matches!(err, ArchiveRequestError::JsonParse(ref url, _) if url == URL));
    }

    #[test]
    fn test_parse_body_surfaces_api_reason() {
        let err = parse_body(
            URL,
            br#"{"error": true, "reason": "Cannot initialize WeatherVariable from invalid String value foo"}"#,
        )
        .unwrap_err();
        match err {
            ArchiveRequestError::ApiRejected { reason, .. } => assert!(reason.contains("foo")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_defaults() -> Result<(), ArchiveRequestError> {
        let client = ArchiveClient::builder().build()?;
        assert_eq!(client.endpoint(), ARCHIVE_URL);

        let custom = ArchiveClient::builder().endpoint(URL).build()?;
        assert_eq!(custom.endpoint(), URL);
        Ok(())
    }

    /// Serves a single canned HTTP response on a local port and yields the
    /// request line it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> std::io::Result<(String, JoinHandle<std::io::Result<String>>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/v1/archive", listener.local_addr()?);
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await?;
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await?;
            stream.shutdown().await?;
            let head = String::from_utf8_lossy(&head);
            Ok::<String, std::io::Error>(head.lines().next().unwrap_or_default().to_string())
        });
        Ok((endpoint, handle))
    }

    fn makapuu_request() -> ArchiveRequest {
        let location = Location::new("Makapu'u", 21.3096, -157.6499, "Pacific/Honolulu").unwrap();
        ArchiveRequest::new(build_params(&location, &["a", "b"], &["c"]), None)
    }

    #[tokio::test]
    async fn test_http_error_status_carries_reason() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 400 Bad Request",
            r#"{"error":true,"reason":"Parameter 'start_date' is required"}"#,
        )
        .await?;
        let client = ArchiveClient::builder().endpoint(endpoint.clone()).build()?;

        let err = client.fetch(&makapuu_request()).await.unwrap_err();
        match err {
            ArchiveRequestError::HttpStatus {
                url,
                status,
                reason,
            } => {
                assert_eq!(url, endpoint);
                assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
                assert_eq!(reason.as_deref(), Some("Parameter 'start_date' is required"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let request_line = server.await??;
        assert_eq!(
            request_line,
            "GET /v1/archive?latitude=21.3096&longitude=-157.6499&timezone=Pacific%2FHonolulu&hourly=a%2Cb&daily=c HTTP/1.1"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_success_status_with_error_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"error":true,"reason":"Cannot initialize WeatherVariable from invalid String value a"}"#,
        )
        .await?;
        let client = ArchiveClient::builder().endpoint(endpoint).build()?;

        let err = client.fetch(&makapuu_request()).await.unwrap_err();
        assert!(matches!(
            err,
            ArchiveRequestError::ApiRejected { ref reason, .. } if reason.contains("invalid String value a")
        ));
        server.await??;
        Ok(())
    }

    #[tokio::test]
    async fn test_success_body_is_returned() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"hourly":{"time":["t0"],"a":[1.0]},"daily":{"time":["d0"],"c":[2.0]}}"#,
        )
        .await?;
        let client = ArchiveClient::builder().endpoint(endpoint).build()?;

        let body = client.fetch(&makapuu_request()).await?;
        assert_eq!(body["hourly"]["a"][0], 1.0);
        assert_eq!(body["daily"]["time"][0], "d0");
        server.await??;
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() -> Result<(), Box<dyn std::error::Error>> {
        // Reserve a port, then release it so nothing is listening there.
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let endpoint = format!("http://{}/v1/archive", listener.local_addr()?);
        drop(listener);

        let client = ArchiveClient::builder()
            .endpoint(endpoint.clone())
            .timeout(Duration::from_secs(5))
            .build()?;
        let err = client.fetch(&makapuu_request()).await.unwrap_err();
        assert!(matches!(err, ArchiveRequestError::NetworkRequest(ref url, _) if *url == endpoint));
        Ok(())
    }
}
