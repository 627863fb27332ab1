use wiremock::matchers::{any, body_partial_json, header_exists, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

use crate::helpers::{spawn_app, spawn_app_without_api_key};

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Ann",
        "email": "ann@x.com",
        "subject": "Hi",
        "message": "1234567890"
    })
}

#[tokio::test]
async fn valid_submission_is_relayed_and_returns_200() {
    // arrange
    let test_app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header_exists("Authorization"))
        .and(body_partial_json(serde_json::json!({
            "subject": "[Portfolio] Hi",
            "reply_to": "ann@x.com"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // act
    let response = test_app.post_contact(valid_body()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Мессеж амжилттай илгээгдлээ");
}

#[tokio::test]
async fn invalid_submission_returns_400_with_all_field_errors() {
    // arrange
    let test_app = spawn_app().await;

    // no provider call for invalid input
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    // act
    let response = test_app
        .post_contact(serde_json::json!({
            "name": "",
            "email": "bad",
            "subject": "",
            "message": "short"
        }))
        .await;

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Оролтын мэдээлэл буруу байна");
    for field in ["name", "email", "subject", "message"] {
        assert!(
            body["errors"][field].is_array(),
            "missing error entry for {}",
            field
        );
    }
}

#[tokio::test]
async fn missing_api_key_returns_500_without_calling_the_provider() {
    // arrange
    let test_app = spawn_app_without_api_key().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    // act
    let response = test_app.post_contact(valid_body()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Имэйл илгээх тохиргоо дутуу байна");
}

#[tokio::test]
async fn provider_failure_returns_500_and_is_not_retried() {
    // arrange
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // act
    let response = test_app.post_contact(valid_body()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Имэйл илгээхэд алдаа гарлаа");
}

#[tokio::test]
async fn get_request_returns_405() {
    // arrange
    let test_app = spawn_app().await;

    // act
    let response = test_app
        .api_client
        .get(&format!("{}/api/contact", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request");

    // assert
    assert_eq!(405, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn malformed_json_returns_400_with_a_json_body() {
    // arrange
    let test_app = spawn_app().await;

    // act
    let response = test_app
        .api_client
        .post(&format!("{}/api/contact", &test_app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    // assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response body");
    assert_eq!(body["message"], "Оролтын мэдээлэл буруу байна");
}

/// Markup in the free-text fields must arrive escaped; newlines in the
/// message become line breaks after escaping.
struct EscapedHtmlBodyMatcher;

impl wiremock::Match for EscapedHtmlBodyMatcher {
    fn matches(&self, request: &Request) -> bool {
        let body: serde_json::Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return false,
        };
        let html = match body.get("html").and_then(|html| html.as_str()) {
            Some(html) => html,
            None => return false,
        };
        html.contains("&lt;script&gt;alert(1)&lt;/script&gt;")
            && html.contains("line one<br />line two")
            && !html.contains("<script>")
    }
}

#[tokio::test]
async fn user_text_is_escaped_and_newlines_become_line_breaks() {
    // arrange
    let test_app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(EscapedHtmlBodyMatcher)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    // act
    let response = test_app
        .post_contact(serde_json::json!({
            "name": "Ann",
            "email": "ann@x.com",
            "subject": "Hi",
            "message": "line one\nline two <script>alert(1)</script>"
        }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
}
