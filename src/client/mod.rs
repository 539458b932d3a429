//! Client layer: configuration, request preparation, and the send orchestration.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    AccountSid, AuthToken, ContentType, Route, SendRequest, SendResponse, ValidationError,
};
use crate::transport::{SIG_PARAM, Signature};

const DEFAULT_HOST: &str = "https://app.cloopen.com:8883";

const HEADER_CONTENT_TYPE: &str = "Content-Type";
const HEADER_ACCEPT: &str = "Accept";
const HEADER_AUTHORIZATION: &str = "Authorization";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        request: &'a PreparedRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        request: &'a PreparedRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.post(request.url.clone());
            for (name, value) in &request.headers {
                builder = builder.header(*name, value);
            }
            let response = builder.body(request.body.clone()).send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`CloopenClient`].
///
/// A provider reply that decodes but carries a non-success `statusCode` is not an
/// error; it is returned as a [`SendResponse`].
pub enum CloopenError {
    /// The request or configuration was rejected before any network activity.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The request body could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Read-only settings shared by every call made through a client.
pub struct Config {
    account: AccountSid,
    token: AuthToken,
    content_type: ContentType,
    host: Url,
    unprefixed_route: Route,
}

impl Config {
    /// Config with the default host, JSON bodies, and international routing for
    /// destinations without a `00` prefix.
    pub fn new(account: AccountSid, token: AuthToken) -> Result<Self, ValidationError> {
        Ok(Self {
            account,
            token,
            content_type: ContentType::default(),
            host: parse_host(DEFAULT_HOST)?,
            unprefixed_route: Route::International,
        })
    }

    pub fn account(&self) -> &AccountSid {
        &self.account
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Route used when the first destination has no `00` prefix.
    pub fn unprefixed_route(&self) -> Route {
        self.unprefixed_route
    }
}

fn parse_host(host: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(host.trim()).map_err(|err| ValidationError::InvalidHost {
        input: host.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ValidationError::InvalidHost {
            input: host.to_owned(),
            reason: "URL cannot be a base".to_owned(),
        });
    }
    Ok(url)
}

#[derive(Debug, Clone)]
/// A fully assembled HTTP request, ready for the transport.
pub struct PreparedRequest {
    pub route: Route,
    /// Host, endpoint path, and the `sig` query parameter.
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl PreparedRequest {
    /// Route, validate, and encode `request`, signing it with `signature`.
    ///
    /// Performs no I/O.
    pub fn build(
        config: &Config,
        request: &SendRequest,
        signature: &Signature,
    ) -> Result<Self, CloopenError> {
        let route = request.route(config.unprefixed_route);
        request.validate(route)?;

        let mut url = config.host.clone();
        let base = config.host.path().trim_end_matches('/');
        url.set_path(&format!("{base}{}", route.path(&config.account)));
        url.query_pairs_mut().append_pair(SIG_PARAM, &signature.sig);

        let content_type = config.content_type.header_value();
        let headers = vec![
            (HEADER_CONTENT_TYPE, content_type.to_owned()),
            (HEADER_ACCEPT, content_type.to_owned()),
            (HEADER_AUTHORIZATION, signature.authorization.clone()),
        ];

        let body = crate::transport::encode_send_body(request, route, config.content_type)
            .map_err(|err| CloopenError::Serialization(Box::new(err)))?;

        Ok(Self {
            route,
            url,
            headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
/// Builder for [`CloopenClient`].
///
/// Use this when you need to customize the body format, host, routing fallback,
/// timeout, or user-agent.
pub struct CloopenClientBuilder {
    config: Config,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CloopenClientBuilder {
    pub fn new(account: AccountSid, token: AuthToken) -> Result<Self, ValidationError> {
        Ok(Self {
            config: Config::new(account, token)?,
            timeout: None,
            user_agent: None,
        })
    }

    /// Body encoding for requests and responses (JSON by default).
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.config.content_type = content_type;
        self
    }

    /// Override the API host, e.g. `https://sandboxapp.cloopen.com:8883`.
    pub fn host(mut self, host: impl AsRef<str>) -> Result<Self, ValidationError> {
        self.config.host = parse_host(host.as_ref())?;
        Ok(self)
    }

    /// Route used for destinations without a `00` prefix (international by default).
    pub fn unprefixed_route(mut self, route: Route) -> Self {
        self.config.unprefixed_route = route;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`CloopenClient`].
    pub fn build(self) -> Result<CloopenClient, CloopenError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| CloopenError::Transport(Box::new(err)))?;

        Ok(CloopenClient {
            config: Arc::new(self.config),
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Cloopen SMS client.
///
/// Cloning is cheap; clones share the configuration and the HTTP connection pool.
pub struct CloopenClient {
    config: Arc<Config>,
    http: Arc<dyn HttpTransport>,
}

impl CloopenClient {
    /// Create a client from a ready configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(
        account: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<CloopenClientBuilder, ValidationError> {
        CloopenClientBuilder::new(AccountSid::new(account)?, AuthToken::new(token)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send an SMS through the domestic template API or the international API,
    /// depending on the first destination.
    ///
    /// Errors:
    /// - [`CloopenError::Validation`] for a missing `appId`, `to`, or domestic `templateId`,
    /// - [`CloopenError::Serialization`] if the body cannot be encoded,
    /// - [`CloopenError::Transport`] and [`CloopenError::HttpStatus`] for HTTP failures,
    /// - [`CloopenError::Decode`] if the reply cannot be parsed.
    ///
    /// A provider rejection is returned as `Ok`; check [`SendResponse::is_success`].
    pub async fn send_sms(&self, request: &SendRequest) -> Result<SendResponse, CloopenError> {
        let signature = crate::transport::sign(&self.config.account, &self.config.token);
        let prepared = PreparedRequest::build(&self.config, request, &signature)?;
        tracing::debug!(
            route = ?prepared.route,
            path = prepared.url.path(),
            content_type = ?self.config.content_type,
            "sending sms"
        );

        let response = self
            .http
            .post(&prepared)
            .await
            .map_err(CloopenError::Transport)?;
        tracing::debug!(status = response.status, "sms endpoint replied");

        if !(200..=299).contains(&response.status) {
            let body = String::from_utf8_lossy(&response.body);
            let body = if body.trim().is_empty() {
                None
            } else {
                Some(body.into_owned())
            };
            return Err(CloopenError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed =
            crate::transport::decode_send_response(self.config.content_type, &response.body)
                .map_err(|err| CloopenError::Decode(Box::new(err)))?;
        tracing::debug!(status_code = %parsed.status_code, "sms response decoded");

        Ok(parsed)
    }
}
