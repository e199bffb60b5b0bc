//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod error;
mod pagination;
mod request;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::domain::{ApiKey, ValidationError};

pub use error::{ApiError, ApiErrorKind, TelnyxError};
pub use pagination::Paginated;
pub use request::ApiRequest;

const DEFAULT_BASE_URL: &str = "https://api.telnyx.com/v2";
const DEFAULT_USER_AGENT: &str = concat!("telnyx-rust/", env!("CARGO_PKG_VERSION"));
const REQUEST_ID_HEADER: &str = "x-request-id";

const BASE_URL_ENV: &str = "TELNYX_BASE_URL";
const TIMEOUT_ENV: &str = "TELNYX_TIMEOUT_SECS";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    request_id: Option<String>,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.header(CONTENT_TYPE, "application/json").body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let request_id = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                request_id,
                body,
            })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for Telnyx API calls.
pub enum Auth {
    /// Authenticate with an API v2 key sent as `Authorization: Bearer <key>`.
    ApiKey(ApiKey),
}

impl Auth {
    /// Create [`Auth::ApiKey`] and validate that the value is non-empty after trimming.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey(ApiKey::new(value)?))
    }

    fn push_headers(&self, headers: &mut Vec<(String, String)>) {
        match self {
            Self::ApiKey(key) => {
                headers.push((
                    AUTHORIZATION.as_str().to_owned(),
                    format!("Bearer {}", key.as_str()),
                ));
            }
        }
    }
}

#[derive(Debug, Clone)]
/// Raw HTTP envelope kept next to the parsed body.
pub struct RawResponse<T> {
    pub status: u16,
    pub request_id: Option<String>,
    pub body: String,
    pub parsed: T,
}

#[derive(Debug, Clone)]
/// Builder for [`TelnyxClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct TelnyxClientBuilder {
    auth: Auth,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelnyxClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Configure a builder from the process environment.
    ///
    /// - `TELNYX_API_KEY` (required)
    /// - `TELNYX_BASE_URL` (optional)
    /// - `TELNYX_TIMEOUT_SECS` (optional, positive integer)
    pub fn from_env() -> Result<Self, TelnyxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TelnyxError> {
        let key = lookup(ApiKey::ENV)
            .ok_or_else(|| TelnyxError::Config(format!("{} is not set", ApiKey::ENV)))?;
        let mut builder = Self::new(Auth::api_key(key)?);

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    TelnyxError::Config(format!(
                        "{TIMEOUT_ENV} must be a positive integer, got {raw:?}"
                    ))
                })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Override the API base URL (defaults to `https://api.telnyx.com/v2`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
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

    /// Build a [`TelnyxClient`].
    pub fn build(self) -> Result<TelnyxClient, TelnyxError> {
        let base_url = parse_base_url(&self.base_url)?.into();

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| TelnyxError::Transport(Box::new(err)))?;

        Ok(TelnyxClient {
            auth: self.auth,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TelnyxError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| TelnyxError::Config(format!("invalid base URL {raw:?}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(TelnyxError::Config(format!(
            "base URL {raw:?} cannot carry path segments"
        )));
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Telnyx client.
///
/// Each service method issues exactly one HTTP request: it validates the parameters,
/// encodes the path, query and JSON body, and decodes the response into the declared
/// model. Nothing is retried or cached here.
pub struct TelnyxClient {
    auth: Auth,
    base_url: String,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for TelnyxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnyxClient")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TelnyxClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`TelnyxClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> TelnyxClientBuilder {
        TelnyxClientBuilder::new(auth)
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue `request` and decode the body as `T`, keeping the HTTP envelope.
    ///
    /// Errors:
    /// - [`TelnyxError::InvalidRequest`] when the path template cannot be expanded,
    /// - [`TelnyxError::Api`] for non-2xx HTTP responses,
    /// - [`TelnyxError::Parse`] when the body does not decode as `T`.
    pub async fn send_raw<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<RawResponse<T>, TelnyxError> {
        let response = self.dispatch(&request).await?;
        let parsed = crate::transport::decode_bare(&response.body)
            .map_err(|err| TelnyxError::Parse(Box::new(err)))?;
        Ok(RawResponse {
            status: response.status,
            request_id: response.request_id,
            body: response.body,
            parsed,
        })
    }

    /// Issue `request` and decode a `{"data": T}` body.
    pub(crate) async fn send_data<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, TelnyxError> {
        let response = self.dispatch(&request).await?;
        crate::transport::decode_data(&response.body)
            .map_err(|err| TelnyxError::Parse(Box::new(err)))
    }

    /// Issue `request` and decode a body that is the model itself.
    pub(crate) async fn send_bare<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, TelnyxError> {
        let response = self.dispatch(&request).await?;
        crate::transport::decode_bare(&response.body)
            .map_err(|err| TelnyxError::Parse(Box::new(err)))
    }

    /// Issue a list `request` and wrap the decoded page for further traversal.
    pub(crate) async fn send_page<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Paginated<'_, T>, TelnyxError> {
        let response = self.dispatch(&request).await?;
        let page = crate::transport::decode_page(&response.body)
            .map_err(|err| TelnyxError::Parse(Box::new(err)))?;
        Ok(Paginated::new(self, request, page))
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<HttpResponse, TelnyxError> {
        let segments = request
            .segments
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        let base_url = parse_base_url(&self.base_url)?;
        let mut url = crate::transport::expand_path(&base_url, request.template, &segments)
            .map_err(|err| TelnyxError::InvalidRequest(Box::new(err)))?;

        if let Some(query) = request.query.as_ref() {
            let pairs = crate::transport::encode_query(query);
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }

        let body = request
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| TelnyxError::InvalidRequest(Box::new(err)))?;

        let mut headers = vec![("accept".to_owned(), "application/json".to_owned())];
        self.auth.push_headers(&mut headers);

        let span = tracing::debug_span!(
            "telnyx.http",
            method = %request.method,
            path = request.template,
        );

        async move {
            let started = Instant::now();
            let response = self
                .http
                .execute(HttpRequest {
                    method: request.method.clone(),
                    url,
                    headers,
                    body,
                })
                .await
                .map_err(TelnyxError::Transport)?;

            tracing::debug!(
                status = response.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request completed"
            );

            if !(200..=299).contains(&response.status) {
                tracing::warn!(
                    status = response.status,
                    request_id = response.request_id.as_deref().unwrap_or("-"),
                    "API returned an error status"
                );
                return Err(TelnyxError::Api(ApiError::from_response(
                    response.status,
                    response.request_id,
                    response.body,
                )));
            }

            Ok(response)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone)]
    /// Records requests and replays scripted responses in order.
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug, Default)]
    struct FakeTransportState {
        requests: Vec<RecordedRequest>,
        responses: VecDeque<(u16, String)>,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub method: Method,
        pub url: Url,
        pub headers: Vec<(String, String)>,
        pub body: Option<String>,
    }

    impl RecordedRequest {
        pub(crate) fn json_body(&self) -> serde_json::Value {
            serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
        }

        pub(crate) fn query(&self) -> Vec<(String, String)> {
            self.url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }
    }

    impl FakeTransport {
        pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
            Self::scripted(vec![(status, body.into())])
        }

        pub(crate) fn scripted(responses: Vec<(u16, String)>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    requests: Vec::new(),
                    responses: responses.into(),
                })),
            }
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.state.lock().unwrap().requests.clone()
        }

        pub(crate) fn last_request(&self) -> RecordedRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(RecordedRequest {
                        method: request.method,
                        url: request.url,
                        headers: request.headers,
                        body: request.body,
                    });
                    state
                        .responses
                        .pop_front()
                        .unwrap_or((500, "no scripted response".to_owned()))
                };
                Ok(HttpResponse {
                    status,
                    request_id: Some("req-test".to_owned()),
                    body,
                })
            })
        }
    }

    pub(crate) fn make_client(transport: FakeTransport) -> TelnyxClient {
        TelnyxClient {
            auth: Auth::api_key("KEY_TEST").unwrap(),
            base_url: "https://example.invalid/v2".to_owned(),
            http: Arc::new(transport),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Deserialize;

    use super::testing::{FakeTransport, make_client};
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    #[tokio::test]
    async fn send_data_adds_bearer_auth_and_decodes_envelope() {
        let transport = FakeTransport::new(200, r#"{"data": {"ok": true}}"#);
        let client = make_client(transport.clone());

        let ping: Ping = client
            .send_data(ApiRequest::get("/ping/{}").segment("a b"))
            .await
            .unwrap();
        assert_eq!(ping, Ping { ok: true });

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url.as_str(), "https://example.invalid/v2/ping/a%20b");
        assert!(
            sent.headers
                .iter()
                .any(|(k, v)| k == "authorization" && v == "Bearer KEY_TEST")
        );
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let body = r#"{"errors":[{"code":"10005","title":"Resource not found"}]}"#;
        let client = make_client(FakeTransport::new(404, body));

        let err = client
            .send_data::<Ping>(ApiRequest::get("/ping"))
            .await
            .unwrap_err();
        match err {
            TelnyxError::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.kind, ApiErrorKind::NotFound);
                assert_eq!(api.code(), Some("10005"));
                assert_eq!(api.request_id.as_deref(), Some("req-test"));
                assert_eq!(api.body.as_deref(), Some(body));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let client = make_client(FakeTransport::new(200, "{ not json }"));
        let err = client
            .send_data::<Ping>(ApiRequest::get("/ping"))
            .await
            .unwrap_err();
        assert!(matches!(err, TelnyxError::Parse(_)));
    }

    #[tokio::test]
    async fn template_arity_mismatch_fails_before_io() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());
        let err = client
            .send_bare::<serde_json::Value>(ApiRequest::get("/ping/{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, TelnyxError::InvalidRequest(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn send_raw_keeps_envelope() {
        let client = make_client(FakeTransport::new(200, r#"{"ok": false}"#));
        let raw: RawResponse<Ping> = client.send_raw(ApiRequest::get("/ping")).await.unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.request_id.as_deref(), Some("req-test"));
        assert_eq!(raw.body, r#"{"ok": false}"#);
        assert_eq!(raw.parsed, Ping { ok: false });
    }

    #[test]
    fn auth_constructor_validates_input() {
        assert!(Auth::api_key("   ").is_err());
        assert!(Auth::api_key("KEY").is_ok());
    }

    #[test]
    fn default_client_targets_the_public_api() {
        let client = TelnyxClient::new(Auth::api_key("key").unwrap());
        assert_eq!(client.base_url(), "https://api.telnyx.com/v2");
        assert_eq!(
            parse_base_url(client.base_url()).unwrap().as_str(),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn builder_overrides_are_applied() {
        let client = TelnyxClient::builder(Auth::api_key("key").unwrap())
            .base_url("http://127.0.0.1:9000/v2")
            .timeout(Duration::from_secs(5))
            .user_agent("test-agent")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000/v2");

        let err = TelnyxClient::builder(Auth::api_key("key").unwrap())
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, TelnyxError::Config(_)));
    }

    #[test]
    fn builder_reads_configuration_from_lookup() {
        let env = HashMap::from([
            ("TELNYX_API_KEY", "KEY_ENV"),
            ("TELNYX_BASE_URL", "http://localhost:4010"),
            ("TELNYX_TIMEOUT_SECS", "30"),
        ]);
        let builder =
            TelnyxClientBuilder::from_lookup(|name| env.get(name).map(|v| (*v).to_owned()))
                .unwrap();
        assert_eq!(builder.base_url, "http://localhost:4010");
        assert_eq!(builder.timeout, Some(Duration::from_secs(30)));

        let missing = TelnyxClientBuilder::from_lookup(|_| None).err().unwrap();
        assert!(matches!(missing, TelnyxError::Config(_)));

        let bad_timeout = TelnyxClientBuilder::from_lookup(|name| match name {
            "TELNYX_API_KEY" => Some("KEY".to_owned()),
            "TELNYX_TIMEOUT_SECS" => Some("0".to_owned()),
            _ => None,
        })
        .err()
        .unwrap();
        assert!(matches!(bad_timeout, TelnyxError::Config(_)));
    }
}
