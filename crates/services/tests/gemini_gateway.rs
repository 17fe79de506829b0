use std::collections::HashMap;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{Value, json};
use services::{GatewayConfig, GatewayError, GeminiGateway, TutorGateway};
use tutor_core::model::{MediaType, UploadedImage};

const API_KEY: &str = "test-key";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn gateway(server: &MockServer, extra: &[(&str, &str)]) -> GeminiGateway {
    let base_url = format!("{}/v1beta", server.base_url());
    let mut vars: HashMap<String, String> = [
        ("TUTOR_API_KEY", API_KEY),
        ("TUTOR_AI_BASE_URL", base_url.as_str()),
        ("TUTOR_AI_MODEL", "gemini-test"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect();
    vars.extend(extra.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())));

    let config = GatewayConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
    GeminiGateway::new(config).unwrap()
}

fn image() -> UploadedImage {
    UploadedImage::new(vec![0x89, b'P', b'N', b'G'], MediaType::Png).unwrap()
}

/// A `generateContent` reply whose text is split over two parts.
fn reply(payload: &Value) -> Value {
    let text = payload.to_string();
    let mid = text
        .char_indices()
        .nth(text.chars().count() / 2)
        .map_or(0, |(index, _)| index);
    let (head, tail) = text.split_at(mid);
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": head }, { "text": tail }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80, "totalTokenCount": 200 }
    })
}

fn analysis_payload() -> Value {
    json!({
        "subject": "数学",
        "mistakeAnalysis": "你把 3 × 4 算成了 7。",
        "correctSolution": "3 × 4 = 12",
        "coreConcept": "乘法口诀",
        "encouragement": "细心一点就全对了！"
    })
}

fn quiz_payload() -> Value {
    let questions: Vec<Value> = (1..=3)
        .map(|id| {
            json!({
                "id": id,
                "question": format!("{id} × 4 = ?"),
                "options": [(id * 4).to_string(), "7", "9", "15"],
                "correctAnswer": (id * 4).to_string(),
                "explanation": "乘法是连加。"
            })
        })
        .collect();
    Value::Array(questions)
}

#[tokio::test]
async fn analyze_posts_to_model_endpoint_with_api_key_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .header("x-goog-api-key", API_KEY)
                .header("content-type", "application/json");
            then.status(200).json_body(reply(&analysis_payload()));
        })
        .await;

    let analysis = gateway(&server, &[]).analyze(&image()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(analysis.subject, "数学");
    assert_eq!(analysis.core_concept, "乘法口诀");
    assert_eq!(analysis.correct_solution, "3 × 4 = 12");
}

#[tokio::test]
async fn generate_quiz_returns_validated_questions() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT).header("x-goog-api-key", API_KEY);
            then.status(200).json_body(reply(&quiz_payload()));
        })
        .await;

    let questions = gateway(&server, &[])
        .generate_quiz("乘法口诀", "数学")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[1].question(), "2 × 4 = ?");
    assert_eq!(questions[1].correct_answer(), "8");
}

#[tokio::test]
async fn error_status_carries_endpoint_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(429)
                .json_body(json!({ "error": { "code": 429, "message": "quota exceeded" } }));
        })
        .await;

    let err = gateway(&server, &[]).analyze(&image()).await.unwrap_err();

    match &err {
        GatewayError::HttpStatus { status, message } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(err.is_transport_failure());
}

#[tokio::test]
async fn error_status_without_json_body_uses_reason_phrase() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = gateway(&server, &[])
        .generate_quiz("乘法口诀", "数学")
        .await
        .unwrap_err();

    assert!(
        matches!(&err, GatewayError::HttpStatus { status, message }
            if status.as_u16() == 503 && message == "Service Unavailable"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn reply_without_candidates_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200)
                .json_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        })
        .await;

    let err = gateway(&server, &[]).analyze(&image()).await.unwrap_err();

    assert!(matches!(err, GatewayError::EmptyResponse), "unexpected error: {err:?}");
    assert!(!err.is_transport_failure());
}

#[tokio::test]
async fn reply_that_is_not_json_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = gateway(&server, &[]).analyze(&image()).await.unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(reply(&analysis_payload()));
        })
        .await;

    let err = gateway(&server, &[("TUTOR_AI_TIMEOUT_SECS", "1")])
        .analyze(&image())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Timeout), "unexpected error: {err:?}");
    assert!(err.is_transport_failure());
}
