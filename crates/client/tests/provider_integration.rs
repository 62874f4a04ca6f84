//! Integration tests for the full provider flow
//!
//! **Purpose**: exercise the path authenticate → list → download →
//! upload through the `TranslationProvider` trait object, the way a
//! translation editor would drive the library.
//!
//! **Infrastructure:**
//! - WireMock HTTP server simulating a Weblate instance
//! - Real transport and provider, no mocks inside the crate

use std::sync::Arc;

use serde_json::json;
use weblate_client::{HttpClient, TranslationProvider, Weblate};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PO_FILE: &str = "msgid \"hello\"\nmsgstr \"hola\"\n";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("weblate_client=debug").try_init();
}

async fn mount_weblate_fixture(server: &MockServer) {
    // Authentication probe at the endpoint root.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Authorization", "Token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": format!("{}/projects/", server.uri())
        })))
        .mount(server)
        .await;

    // Two-page project listing.
    Mock::given(method("GET"))
        .and(path("/projects/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"slug": "fedora"}],
            "next": format!("{}/projects/?page=2", server.uri())
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"slug": "libreoffice"}],
            "next": null
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/fedora/components/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"slug": "anaconda"}],
            "next": null
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/components/fedora/anaconda/translations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"language_code": "es"}],
            "next": null
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/translations/fedora/anaconda/es/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "component": {"file_format": "po"}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/translations/fedora/anaconda/es/file/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PO_FILE))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/translations/fedora/anaconda/es/file/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "count": 1,
            "accepted": 1
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_session_against_mock_weblate() {
    init_tracing();
    let server = MockServer::start().await;
    mount_weblate_fixture(&server).await;

    let http = HttpClient::builder()
        .endpoint(server.uri())
        .token("secret")
        .extend_user_agent("IntegrationSuite/1.0")
        .build()
        .expect("http client");
    let provider: Arc<dyn TranslationProvider> = Arc::new(Weblate::new(http));

    provider.authenticate().await.expect("authenticate");
    assert!(provider.is_authenticated());

    let projects = provider.projects().await.expect("projects");
    assert_eq!(projects, vec!["fedora", "libreoffice"]);

    let components = provider.components("fedora").await.expect("components");
    assert_eq!(components, vec!["anaconda"]);

    let translations = provider.translations("fedora", "anaconda").await.expect("translations");
    assert_eq!(translations, vec!["es"]);

    let format = provider.file_format("fedora", "anaconda", "es").await.expect("file format");
    assert_eq!(format, "po");

    let file = provider.file("fedora", "anaconda", "es").await.expect("file");
    assert_eq!(file, PO_FILE);

    let outcome =
        provider.submit("fedora", "anaconda", "es", &file).await.expect("submit");
    assert_eq!(outcome.get("result").map(String::as_str), Some("true"));
    assert_eq!(outcome.get("count").map(String::as_str), Some("1"));

    provider.logout();
    assert!(!provider.is_authenticated());
}

#[tokio::test]
async fn session_survives_failed_probe_and_reauthentication() {
    init_tracing();
    let server = MockServer::start().await;

    // First probe rejects the stale token, second accepts the new one.
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Authorization", "Token stale"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("Authorization", "Token fresh"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let http = HttpClient::builder()
        .endpoint(server.uri())
        .token("stale")
        .build()
        .expect("http client");
    let weblate = Weblate::new(http);

    let err = weblate.authenticate().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!weblate.is_authenticated());

    // Same instance, same endpoint and user-agent, new credential.
    weblate.http().set_token("fresh");
    weblate.authenticate().await.expect("re-authentication");
    assert!(weblate.is_authenticated());
}
