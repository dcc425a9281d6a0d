//! Integration tests for the Browserless-backed [`Browser`].
//!
//! Uses `wiremock` to stand in for the Browserless `/content` endpoint so no
//! real browser or network traffic is involved.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reviewscrape_scraper::{Browser, BrowserlessBrowser, BrowserlessOptions, PageSession, ScraperError};

const PAGE: &str =
    "https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-Le_Cinq-Paris.html";

fn test_browser(server: &MockServer, token: Option<&str>) -> BrowserlessBrowser {
    BrowserlessBrowser::new(BrowserlessOptions {
        base_url: format!("{}/", server.uri()),
        token: token.map(str::to_owned),
        request_timeout_secs: 5,
        wait_timeout_ms: 2_000,
        user_agent: "reviewscrape-test/0.1".to_owned(),
        max_sessions: 2,
    })
    .expect("failed to build test browser")
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("JSON request body"))
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn content_posts_url_and_returns_rendered_html() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .and(body_partial_json(json!({
            "url": PAGE,
            "gotoOptions": { "waitUntil": "networkidle2", "timeout": 2000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rendered</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let browser = test_browser(&server, None);
    let mut session = browser.open().await.unwrap();
    session.goto(PAGE).await.unwrap();
    let page = session.content().await.unwrap();
    session.close().await.unwrap();

    assert_eq!(page.url(), PAGE);
    assert_eq!(page.html(), "<html>rendered</html>");

    let bodies = request_bodies(&server).await;
    assert!(bodies[0].get("addScriptTag").is_none());
    assert!(bodies[0].get("waitForFunction").is_none());
}

#[tokio::test]
async fn token_is_sent_as_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .and(query_param("token", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let browser = test_browser(&server, Some("s3cret"));
    let mut session = browser.open().await.unwrap();
    session.goto(PAGE).await.unwrap();
    let result = session.content().await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn queued_interactions_become_script_and_ready_wait() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let browser = test_browser(&server, None);
    let mut session = browser.open().await.unwrap();
    session.goto(PAGE).await.unwrap();
    session
        .click("[id=filters_detail_language_filterLang_ALL]")
        .await
        .unwrap();
    session.wait_for_text("Show less").await.unwrap();
    session.content().await.unwrap();

    let bodies = request_bodies(&server).await;
    let script = bodies[0]["addScriptTag"][0]["content"]
        .as_str()
        .expect("script content");
    assert!(script.contains(r#"{"click":"[id=filters_detail_language_filterLang_ALL]"}"#));
    assert!(script.contains(r#"{"text":"Show less"}"#));
    assert_eq!(
        bodies[0]["waitForFunction"],
        json!({ "fn": "() => window.__reviewscrapeReady === true", "timeout": 2000 })
    );
}

#[tokio::test]
async fn goto_discards_interactions_for_previous_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let browser = test_browser(&server, None);
    let mut session = browser.open().await.unwrap();
    session.goto(PAGE).await.unwrap();
    session.wait_for_selector(".reviews_header_count").await.unwrap();
    session.goto("https://example.test/next.html").await.unwrap();
    session.content().await.unwrap();

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["url"], "https://example.test/next.html");
    assert!(bodies[0].get("addScriptTag").is_none());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_a_navigation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(408).set_body_string("Timeout waiting for function"))
        .mount(&server)
        .await;

    let browser = test_browser(&server, None);
    let mut session = browser.open().await.unwrap();
    session.goto(PAGE).await.unwrap();
    let err = session.content().await.unwrap_err();

    match err {
        ScraperError::Navigation { url, reason } => {
            assert_eq!(url, PAGE);
            assert!(reason.contains("408"), "reason: {reason}");
            assert!(reason.contains("Timeout waiting for function"), "reason: {reason}");
        }
        other => panic!("expected Navigation, got: {other:?}"),
    }
}

#[tokio::test]
async fn content_without_goto_is_a_navigation_error() {
    let server = MockServer::start().await;
    let browser = test_browser(&server, None);
    let mut session = browser.open().await.unwrap();
    let err = session.content().await.unwrap_err();
    assert!(matches!(err, ScraperError::Navigation { .. }), "got: {err:?}");
}
