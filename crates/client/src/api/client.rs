//! Weblate provider: paginated listings and file transfer
//!
//! Implements [`TranslationProvider`] in terms of the HTTP transport.
//! The central piece is the pagination walk that flattens a
//! multi-page collection endpoint into one ordered list of field
//! values.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use weblate_domain::{Result, WeblateError};

use super::provider::TranslationProvider;
use crate::http::HttpClient;

/// Upper bound on the pagination walk. A server that never clears the
/// `next` cursor is a protocol violation; failing fast beats looping
/// forever.
const MAX_PAGES: u32 = 10_000;

/// Weblate API client.
///
/// Construct the transport with [`HttpClient::builder`], then wrap it:
///
/// ```no_run
/// use weblate_client::{HttpClient, TranslationProvider, Weblate};
///
/// # async fn run() -> weblate_client::Result<()> {
/// let http = HttpClient::builder()
///     .endpoint("https://translate.example.org/api/")
///     .token("wlu_...")
///     .build()?;
/// let weblate = Weblate::new(http);
///
/// weblate.authenticate().await?;
/// let projects = weblate.projects().await?;
/// # Ok(())
/// # }
/// ```
pub struct Weblate {
    http: HttpClient,
}

impl Weblate {
    /// Wrap a configured transport.
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Access the underlying transport (endpoint, user-agent,
    /// credential management).
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Walk a collection endpoint page by page, collecting `field`
    /// from every result object in server order.
    ///
    /// Pages are visited in increasing order starting at 1; traversal
    /// stops when `next` is null or absent. An empty `results` array
    /// does not stop the walk on its own. The first page-fetch or
    /// field-extraction failure aborts and discards partial results.
    async fn list_field(&self, resource: &str, field: &str) -> Result<Vec<String>> {
        let mut elements = Vec::new();
        let mut page = 1u32;

        loop {
            let body = self.http.get_paged(resource, page).await?;

            let results = body.get("results").and_then(Value::as_array).ok_or_else(|| {
                WeblateError::Processing(format!(
                    "collection response for '{resource}' page {page} has no results array"
                ))
            })?;
            for entry in results {
                let value = entry.get(field).and_then(Value::as_str).ok_or_else(|| {
                    WeblateError::Processing(format!(
                        "result object in '{resource}' page {page} missing string field '{field}'"
                    ))
                })?;
                elements.push(value.to_owned());
            }

            match body.get("next") {
                Some(next) if !next.is_null() => {
                    page += 1;
                    if page > MAX_PAGES {
                        return Err(WeblateError::Processing(format!(
                            "pagination for '{resource}' exceeded {MAX_PAGES} pages"
                        )));
                    }
                }
                _ => break,
            }
        }

        debug!(resource, pages = page, count = elements.len(), "collection listing complete");
        Ok(elements)
    }
}

#[async_trait]
impl TranslationProvider for Weblate {
    fn is_authenticated(&self) -> bool {
        self.http.is_authenticated()
    }

    async fn authenticate(&self) -> Result<()> {
        self.http.authenticate().await
    }

    fn logout(&self) {
        self.http.clear_session();
    }

    async fn projects(&self) -> Result<Vec<String>> {
        self.list_field("projects/", "slug").await
    }

    async fn components(&self, project: &str) -> Result<Vec<String>> {
        self.list_field(&format!("projects/{project}/components/"), "slug").await
    }

    async fn translations(&self, project: &str, component: &str) -> Result<Vec<String>> {
        self.list_field(&format!("components/{project}/{component}/translations/"), "language_code")
            .await
    }

    async fn file_format(
        &self,
        project: &str,
        component: &str,
        language: &str,
    ) -> Result<String> {
        let resource = format!("translations/{project}/{component}/{language}/");
        let body = self.http.get(&resource).await?;

        body.get("component")
            .and_then(|component| component.get("file_format"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                WeblateError::Processing(format!(
                    "translation resource '{resource}' missing component.file_format"
                ))
            })
    }

    async fn file(&self, project: &str, component: &str, language: &str) -> Result<String> {
        let resource = format!("translations/{project}/{component}/{language}/file/");
        self.http.get_text(&resource).await
    }

    async fn submit(
        &self,
        project: &str,
        component: &str,
        language: &str,
        contents: &str,
    ) -> Result<BTreeMap<String, String>> {
        let resource = format!("translations/{project}/{component}/{language}/file/");
        let body = self.http.post_file(&resource, contents).await?;
        debug!(%body, "upload response");

        let object = body.as_object().ok_or_else(|| {
            WeblateError::Processing(format!("upload response for '{resource}' is not an object"))
        })?;

        // The server answers 200 even for some partial failures; the
        // body's `result` field is the sole success signal.
        match object.get("result") {
            Some(result) if !result.is_null() => {}
            _ => {
                return Err(WeblateError::Processing(format!(
                    "upload response for '{resource}' missing 'result' field"
                )))
            }
        }

        Ok(object.iter().map(|(key, value)| (key.clone(), value.to_string())).collect())
    }
}
