//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use phonenumber::country;

use crate::domain::{ApiError, ApiKey, SendSms, SendSmsResponse, SubAccountId, ValidationError};

/// Base URL of the Wavecell API.
pub const DEFAULT_BASE_URL: &str = "https://sms.8x8.com";

/// Minimum (and default) request timeout enforced by the builder.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
/// Raw HTTP exchange result handed back by a [`HttpTransport`].
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Injected HTTP executor performing one authenticated call.
///
/// The default implementation wraps [`reqwest::Client`]. Supply your own via
/// [`WavecellClientBuilder::transport`] to add retry or circuit-breaking
/// policy; this crate itself never retries and issues exactly one call per
/// [`WavecellClient::send`] invocation. Implementations must be safe to share
/// across concurrent callers.
pub trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(&'static str, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(&'static str, String)>,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(body);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication material for Wavecell API calls.
///
/// Validated at construction: both the API key and the sub-account id must be
/// non-empty.
pub struct Credentials {
    api_key: ApiKey,
    sub_account_id: SubAccountId,
}

impl Credentials {
    /// Create validated [`Credentials`].
    pub fn new(
        api_key: impl Into<String>,
        sub_account_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            sub_account_id: SubAccountId::new(sub_account_id)?,
        })
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn sub_account_id(&self) -> &SubAccountId {
        &self.sub_account_id
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`WavecellClient`].
///
/// This error preserves:
/// - transport failures (DNS, TLS, timeouts, connection resets),
/// - vendor failures (HTTP 400+ with a structured error body),
/// - validation/parse failures.
pub enum WavecellError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure. No response body was read.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The platform rejected the request with a structured error payload.
    #[error("{0}")]
    Api(ApiError),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Clone)]
/// Builder for [`WavecellClient`].
///
/// Use this when you need to customize the base URL, timeout, destination
/// region, or inject your own [`HttpTransport`].
pub struct WavecellClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_region: Option<country::Id>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl WavecellClientBuilder {
    /// Create a builder with the default base URL, timeout, and region.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            default_region: Some(country::Id::ID),
            transport: None,
        }
    }

    /// Override the API base URL. A trailing `/` is trimmed at build time.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout. Values below [`DEFAULT_TIMEOUT`] are floored
    /// to it at build time.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header of the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the region applied when normalizing destinations without a country
    /// prefix, or `None` to only accept fully-qualified numbers.
    pub fn default_region(mut self, region: Option<country::Id>) -> Self {
        self.default_region = region;
        self
    }

    /// Inject a custom HTTP executor (e.g. one wrapped in a circuit breaker).
    ///
    /// The builder's timeout and user-agent only apply to the default
    /// transport; an injected executor owns its own policy.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`WavecellClient`].
    ///
    /// The client owns a copy of the configuration; the builder can be reused
    /// or mutated afterwards without affecting it.
    pub fn build(self) -> Result<WavecellClient, WavecellError> {
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        let timeout = effective_timeout(self.timeout);

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder().timeout(timeout);
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| WavecellError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(WavecellClient {
            credentials: self.credentials,
            base_url,
            default_region: self.default_region,
            http,
        })
    }
}

// Requested timeouts below the vendor minimum are floored, not rejected.
fn effective_timeout(requested: Duration) -> Duration {
    requested.max(DEFAULT_TIMEOUT)
}

#[derive(Clone)]
/// High-level Wavecell (8x8) SMS client.
///
/// This type orchestrates destination normalization, JSON encoding, the
/// single authenticated POST, and status-code driven response decoding.
pub struct WavecellClient {
    credentials: Credentials,
    base_url: String,
    default_region: Option<country::Id>,
    http: Arc<dyn HttpTransport>,
}

impl WavecellClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`WavecellClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            default_region: Some(country::Id::ID),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> WavecellClientBuilder {
        WavecellClientBuilder::new(credentials)
    }

    /// Send one message to one recipient.
    ///
    /// The destination is normalized to E.164 before serialization. Exactly
    /// one HTTP call is made per invocation; retrying is the caller's (or the
    /// injected transport's) concern.
    ///
    /// Errors:
    /// - [`WavecellError::Transport`] when the call never produced a response
    ///   (the body is never parsed in that case),
    /// - [`WavecellError::Api`] when the platform answered HTTP 400+ with a
    ///   structured error payload,
    /// - [`WavecellError::Parse`] when a body of either shape is malformed.
    pub async fn send(&self, request: SendSms) -> Result<SendSmsResponse, WavecellError> {
        let destination = request
            .destination()
            .map(|dest| dest.normalized(self.default_region));

        let body = crate::transport::encode_send_sms_body(&request, destination.as_deref())
            .map_err(|err| WavecellError::Parse(Box::new(err)))?;

        let url = format!(
            "{}/api/v1/subaccounts/{}/messages",
            self.base_url,
            self.credentials.sub_account_id().as_str()
        );
        let headers = vec![
            (
                "Authorization",
                format!("Bearer {}", self.credentials.api_key().as_str()),
            ),
            ("Content-Type", "application/json".to_owned()),
            ("Accept", "application/json".to_owned()),
        ];

        let response = self
            .http
            .post_json(&url, headers, body)
            .await
            .map_err(WavecellError::Transport)?;

        if response.status >= 400 {
            let api_error = crate::transport::decode_error_response(&response.body)
                .map_err(|err| WavecellError::Parse(Box::new(err)))?;
            return Err(WavecellError::Api(api_error));
        }

        crate::transport::decode_send_sms_response(&response.body)
            .map_err(|err| WavecellError::Parse(Box::new(err)))
    }
}
