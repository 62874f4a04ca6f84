//! Provider seam for translation-management services

use std::collections::BTreeMap;

use async_trait::async_trait;
use weblate_domain::Result;

/// Operation set of a translation-management service.
///
/// This trait allows dependency injection and testing with mock
/// providers; [`Weblate`](super::Weblate) is the shipped
/// implementation.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Whether the last authentication probe succeeded.
    fn is_authenticated(&self) -> bool;

    /// Validate the configured credential against the endpoint root.
    async fn authenticate(&self) -> Result<()>;

    /// Clear the credential and the authenticated flag.
    ///
    /// Unconditional: succeeds whether or not a token was present.
    fn logout(&self);

    /// Slugs of all projects, every page of the listing.
    async fn projects(&self) -> Result<Vec<String>>;

    /// Slugs of all components of a project.
    async fn components(&self, project: &str) -> Result<Vec<String>>;

    /// Language codes of all translations of a component.
    async fn translations(&self, project: &str, component: &str) -> Result<Vec<String>>;

    /// Native file format of a translation (e.g. `"po"`).
    async fn file_format(&self, project: &str, component: &str, language: &str)
        -> Result<String>;

    /// Translation file contents in their native format, verbatim.
    async fn file(&self, project: &str, component: &str, language: &str) -> Result<String>;

    /// Upload a translated file, merging with `replace-translated`
    /// conflict resolution server-side.
    ///
    /// Returns the server's result fields with every value stringified
    /// via [`serde_json::Value::to_string`], so string values keep
    /// their JSON quotes (`"ok"` becomes `"\"ok\""`) and numbers their
    /// decimal form.
    async fn submit(
        &self,
        project: &str,
        component: &str,
        language: &str,
        contents: &str,
    ) -> Result<BTreeMap<String, String>>;
}
