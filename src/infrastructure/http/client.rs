//! Outbound HTTP client with per-attempt timeout and linear-backoff retries.

use super::error::{FetchError, FetchResult, Fetched};
use reqwest::Method;
use reqwest::header::{
    ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER, USER_AGENT,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8_000);
/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 2;
/// Base retry delay; attempt `n` waits `n × delay`.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Upstream statuses that are worth another attempt.
pub const RETRY_STATUS: [u16; 7] = [408, 425, 429, 500, 502, 503, 504];

/// How a successful body is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// JSON when possible, raw text otherwise.
    #[default]
    Json,
    /// Always the raw text.
    Text,
}

/// Client-wide defaults applied to every [`FetchOptions`] built by
/// [`FetchClient::options`].
#[derive(Debug, Clone)]
pub struct FetchDefaults {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: concat!("trade-data-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Per-call request options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
    pub format: ResponseFormat,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            format: ResponseFormat::Json,
        }
    }
}

impl FetchOptions {
    /// Switches to `POST` with the given body.
    pub fn post(mut self, body: impl Into<String>) -> Self {
        self.method = Method::POST;
        self.body = Some(body.into());
        self
    }

    /// Adds a header. Invalid values are dropped with a warning.
    pub fn header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(v) => {
                self.headers.insert(name, v);
            }
            Err(_) => warn!("Dropping invalid value for header {}", name),
        }
        self
    }

    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

/// Shared outbound client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    defaults: FetchDefaults,
}

impl FetchClient {
    /// Builds the underlying connection pool.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(defaults: FetchDefaults) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, defaults })
    }

    /// Options pre-filled with this client's defaults.
    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            timeout: self.defaults.timeout,
            retries: self.defaults.retries,
            retry_delay: self.defaults.retry_delay,
            ..FetchOptions::default()
        }
    }

    /// Performs the request, retrying transient failures.
    ///
    /// Network errors, timeouts and statuses in [`RETRY_STATUS`] are retried
    /// up to `options.retries` times, waiting `attempt × retry_delay` between
    /// attempts. Any other non-2xx status fails immediately.
    pub async fn fetch_json(&self, url: &str, options: FetchOptions) -> FetchResult {
        let headers = self.merge_default_headers(&options.headers);
        let mut attempt: u32 = 0;

        loop {
            metrics::counter!("upstream_requests_total").increment(1);

            match self.attempt(url, &options, &headers).await {
                Ok(fetched) => return Ok(fetched),
                Err(err) if attempt < options.retries && is_retryable(&err) => {
                    attempt += 1;
                    let delay = options.retry_delay * attempt;
                    debug!(
                        url,
                        attempt,
                        code = %err.code(),
                        delay_ms = delay.as_millis() as u64,
                        "Retrying upstream request"
                    );
                    metrics::counter!("upstream_retries_total").increment(1);
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    warn!(
                        url,
                        attempts = attempt + 1,
                        code = %err.code(),
                        "Upstream request failed: {}",
                        err
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, url: &str, options: &FetchOptions, headers: &HeaderMap) -> FetchResult {
        let mut request = self
            .http
            .request(options.method.clone(), url)
            .headers(headers.clone());
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let is_json = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|ct| ct.contains("json"));
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, is_json, retry_after, text))
        };

        let timeout_ms = options.timeout.as_millis() as u64;
        let outcome = tokio::time::timeout(options.timeout, exchange).await;
        let (status, is_json, retry_after, text) = match outcome {
            Err(_) => return Err(FetchError::Timeout { timeout_ms }),
            Ok(Err(e)) if e.is_timeout() => return Err(FetchError::Timeout { timeout_ms }),
            Ok(Err(e)) => {
                return Err(FetchError::Network {
                    message: e.to_string(),
                });
            }
            Ok(Ok(parts)) => parts,
        };

        let data = decode_body(&text, is_json, options.format);

        if status.is_success() {
            Ok(Fetched {
                data,
                status: status.as_u16(),
            })
        } else {
            Err(FetchError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("REQUEST_FAILED")
                    .to_string(),
                details: data,
                retry_after,
            })
        }
    }

    fn merge_default_headers(&self, headers: &HeaderMap) -> HeaderMap {
        let mut merged = headers.clone();
        if !merged.contains_key(USER_AGENT)
            && let Ok(ua) = HeaderValue::from_str(&self.defaults.user_agent)
        {
            merged.insert(USER_AGENT, ua);
        }
        if !merged.contains_key(ACCEPT) {
            merged.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        merged
    }
}

fn is_retryable(err: &FetchError) -> bool {
    match err {
        FetchError::Timeout { .. } | FetchError::Network { .. } => true,
        FetchError::Http { status, .. } => RETRY_STATUS.contains(status),
    }
}

fn decode_body(text: &str, is_json: bool, format: ResponseFormat) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match format {
        ResponseFormat::Text => Value::String(text.to_string()),
        ResponseFormat::Json => match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                if is_json {
                    debug!("Upstream declared JSON but body did not parse: {}", e);
                }
                Value::String(text.to_string())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_body() {
        assert_eq!(
            decode_body(r#"{"a":1}"#, true, ResponseFormat::Json),
            json!({ "a": 1 })
        );
    }

    #[test]
    fn test_decode_json_without_content_type() {
        assert_eq!(decode_body("[1,2]", false, ResponseFormat::Json), json!([1, 2]));
    }

    #[test]
    fn test_decode_falls_back_to_text() {
        assert_eq!(
            decode_body("<html>oops</html>", true, ResponseFormat::Json),
            json!("<html>oops</html>")
        );
    }

    #[test]
    fn test_decode_text_format_keeps_raw() {
        assert_eq!(decode_body(r#"{"a":1}"#, true, ResponseFormat::Text), json!(r#"{"a":1}"#));
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode_body("", true, ResponseFormat::Json), Value::Null);
    }

    #[test]
    fn test_retryable_statuses() {
        for status in RETRY_STATUS {
            let err = FetchError::Http {
                status,
                message: String::new(),
                details: Value::Null,
                retry_after: None,
            };
            assert!(is_retryable(&err), "{status} should be retryable");
        }
        let not_found = FetchError::Http {
            status: 404,
            message: String::new(),
            details: Value::Null,
            retry_after: None,
        };
        assert!(!is_retryable(&not_found));
        assert!(is_retryable(&FetchError::Timeout { timeout_ms: 1 }));
    }

    #[test]
    fn test_options_take_client_defaults() {
        let client = FetchClient::new(FetchDefaults {
            timeout: Duration::from_millis(1234),
            retries: 5,
            retry_delay: Duration::from_millis(7),
            user_agent: "ua".into(),
        })
        .unwrap();

        let options = client.options();
        assert_eq!(options.timeout, Duration::from_millis(1234));
        assert_eq!(options.retries, 5);
        assert_eq!(options.retry_delay, Duration::from_millis(7));
        assert_eq!(options.method, Method::GET);
    }

    #[test]
    fn test_default_headers_do_not_override_caller() {
        let client = FetchClient::new(FetchDefaults::default()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/xml"));

        let merged = client.merge_default_headers(&headers);
        assert_eq!(merged.get(ACCEPT).unwrap(), "text/xml");
        assert!(merged.get(USER_AGENT).is_some());
    }
}
