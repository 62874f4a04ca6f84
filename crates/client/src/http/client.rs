//! HTTP transport with endpoint resolution and error classification
//!
//! Turns a resource path, a method and an optional payload into a
//! decoded response, uniformly attaching the `User-Agent` and
//! `Authorization` headers and classifying every response by status
//! family.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{multipart, Client as ReqwestClient, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;
use weblate_domain::{Result, WeblateError};

/// Base product identifier sent as the `User-Agent` header.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

/// Mutable session state: credential and the authentication probe
/// result. Everything else on the transport is fixed at construction.
#[derive(Debug, Default)]
struct Session {
    token: Option<String>,
    authenticated: bool,
}

/// Authenticated HTTP session against a Weblate API endpoint.
///
/// The endpoint and user-agent are fixed when the client is built; the
/// credential and the authenticated flag live behind a lock so that
/// `logout` and re-authentication can share one client instance. The
/// guard is never held across an await.
#[derive(Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    endpoint: Url,
    user_agent: String,
    session: RwLock<Session>,
}

impl HttpClient {
    /// Start building a new transport.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// The API root every resource path is resolved against.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The full user-agent string sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Store a bearer token for subsequent requests.
    ///
    /// The `Token ` prefix required by the API is applied when the
    /// header is built, not here.
    pub fn set_token(&self, token: impl Into<String>) {
        self.session.write().token = Some(token.into());
    }

    /// Clear the credential and the authenticated flag.
    ///
    /// Endpoint and user-agent are left intact, so the session can be
    /// re-authenticated without reconfiguration.
    pub fn clear_session(&self) {
        let mut session = self.session.write();
        session.token = None;
        session.authenticated = false;
    }

    /// Whether the last authentication probe succeeded.
    ///
    /// False until [`authenticate`](Self::authenticate) returns `Ok`;
    /// a stale or invalid token yields false after a failed probe.
    pub fn is_authenticated(&self) -> bool {
        self.session.read().authenticated
    }

    /// Probe the endpoint root to validate the credential.
    ///
    /// Any HTTP response updates the authenticated flag (true on 2xx,
    /// false otherwise) before the error propagates. A transport-level
    /// failure maps to [`WeblateError::Processing`] and leaves the flag
    /// untouched.
    pub async fn authenticate(&self) -> Result<()> {
        let url = self.endpoint.clone();
        debug!(%url, "GET authentication probe");

        let request = self.request(&url).header(ACCEPT, "application/json");
        let result = self.dispatch(request, &url).await;

        match &result {
            Ok(_) => self.session.write().authenticated = true,
            Err(WeblateError::Client { .. } | WeblateError::Server { .. }) => {
                self.session.write().authenticated = false;
            }
            Err(WeblateError::Processing(_)) => {}
        }

        result.map(|_| ())
    }

    /// GET a single JSON object resource.
    pub async fn get(&self, resource: &str) -> Result<Value> {
        let url = self.resource_url(resource)?;
        debug!(%url, "GET request");

        let request = self.request(&url).header(ACCEPT, "application/json");
        let response = self.dispatch(request, &url).await?;
        Self::read_json(response, &url).await
    }

    /// GET one page of a collection resource (`?page=N`).
    ///
    /// Collection endpoints answer with
    /// `{ "results": [...], "next": <url-or-null> }`.
    pub async fn get_paged(&self, resource: &str, page: u32) -> Result<Value> {
        let mut url = self.resource_url(resource)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        debug!(%url, "GET request");

        let request = self.request(&url).header(ACCEPT, "application/json");
        let response = self.dispatch(request, &url).await?;
        Self::read_json(response, &url).await
    }

    /// GET a resource as plain text, returned verbatim.
    pub async fn get_text(&self, resource: &str) -> Result<String> {
        let url = self.resource_url(resource)?;
        debug!(%url, "GET request");

        let request = self.request(&url).header(ACCEPT, "text/plain");
        let response = self.dispatch(request, &url).await?;
        response
            .text()
            .await
            .map_err(|err| WeblateError::Processing(format!("failed to read body from {url}: {err}")))
    }

    /// POST a translation file as a multipart form.
    ///
    /// The form carries `method=translate`, `conflicts=replace-translated`
    /// and a `file` part named `strings.po` with the given contents.
    pub async fn post_file(&self, resource: &str, contents: &str) -> Result<Value> {
        let url = self.resource_url(resource)?;
        debug!(%url, "POST multipart request");

        let file = multipart::Part::text(contents.to_owned())
            .file_name("strings.po")
            .mime_str("text/plain")
            .map_err(|err| WeblateError::Processing(format!("invalid file part: {err}")))?;
        let form = multipart::Form::new()
            .text("method", "translate")
            .text("conflicts", "replace-translated")
            .part("file", file);

        let request = self
            .client
            .post(url.clone())
            .header(USER_AGENT_HEADER, &self.user_agent)
            .header(ACCEPT, "application/json")
            .multipart(form);
        let request = self.authorize(request);

        let response = self.dispatch(request, &url).await?;
        Self::read_json(response, &url).await
    }

    fn request(&self, url: &Url) -> RequestBuilder {
        let builder = self.client.get(url.clone()).header(USER_AGENT_HEADER, &self.user_agent);
        self.authorize(builder)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let header = self.session.read().token.as_ref().map(|token| format!("Token {token}"));
        match header {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    fn resource_url(&self, resource: &str) -> Result<Url> {
        self.endpoint.join(resource).map_err(|err| {
            WeblateError::Processing(format!("invalid resource path '{resource}': {err}"))
        })
    }

    /// Send the request and classify the outcome: 2xx passes through,
    /// 4xx/5xx become status errors carrying the body text, a failure
    /// to obtain a response becomes a processing error.
    async fn dispatch(&self, request: RequestBuilder, url: &Url) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| WeblateError::Processing(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        debug!(%url, %status, "received response");

        if status.is_success() {
            return Ok(response);
        }

        let detail = response.text().await.unwrap_or_default();
        Err(WeblateError::from_status(status.as_u16(), detail))
    }

    /// Decode a JSON body, fully buffered so callers own the tree.
    async fn read_json(response: Response, url: &Url) -> Result<Value> {
        response.json().await.map_err(|err| {
            WeblateError::Processing(format!("failed to parse response from {url}: {err}"))
        })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    endpoint: Option<String>,
    token: Option<String>,
    user_agent: String,
    timeout: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            token: None,
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpClientBuilder {
    /// Set the API root. A trailing slash is appended if missing so
    /// relative resource paths resolve underneath it.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the initial bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Append `" " + suffix` to the user-agent string.
    ///
    /// Append-only: calling twice appends twice, no deduplication.
    pub fn extend_user_agent(mut self, suffix: &str) -> Self {
        self.user_agent.push(' ');
        self.user_agent.push_str(suffix);
        self
    }

    /// Per-request timeout (default 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Fails fast with [`WeblateError::Processing`] if the endpoint is
    /// missing or not an absolute URL.
    pub fn build(self) -> Result<HttpClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| WeblateError::Processing("endpoint not configured".into()))?;
        let mut endpoint = Url::parse(&endpoint)
            .map_err(|err| WeblateError::Processing(format!("invalid endpoint: {err}")))?;
        if !endpoint.path().ends_with('/') {
            endpoint.set_path(&format!("{}/", endpoint.path()));
        }

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| {
                WeblateError::Processing(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(HttpClient {
            client,
            endpoint,
            user_agent: self.user_agent,
            session: RwLock::new(Session { token: self.token, authenticated: false }),
        })
    }
}
