// SPDX-License-Identifier: PMPL-1.0-or-later

//! Integration tests for the OpenAI-compatible assistant client.
//!
//! All tests use wiremock to mock the API - no real API calls are made.

use wcag_auditor::assist::{Assistant, OpenAiClient};
use wcag_auditor::config::OpenAiConfig;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a client pointing at the mock server
fn mock_client(server: &MockServer) -> OpenAiClient {
    let config = OpenAiConfig {
        api_key: Some("sk-test".to_string()),
        base_url: format!("{}/v1", server.uri()),
        timeout_secs: 5,
        ..OpenAiConfig::default()
    };
    OpenAiClient::new(&config).expect("client")
}

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_describe_image_sends_data_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o", "max_tokens": 300 })))
        .and(body_string_contains("data:image/png;base64,iVBORw=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  A lighthouse at dusk \n")))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let alt = client
        .describe_image(&[0x89, 0x50, 0x4e, 0x47], "image/png")
        .await
        .expect("alt text");

    assert_eq!(alt, "A lighthouse at dusk");
}

#[tokio::test]
async fn test_simplify_text_uses_text_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4", "temperature": 0.7 })))
        .and(body_string_contains("Utilize the form."))
        .and(body_string_contains("grade4 reading level"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Use the form.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let simplified = client
        .simplify_text("Utilize the form.", "grade4")
        .await
        .expect("simplified");

    assert_eq!(simplified, "Use the form.");
}

#[tokio::test]
async fn test_transcribe_audio_posts_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(body_string_contains("whisper-1"))
        .and(body_string_contains("filename=\"talk.mp3\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "Hello and welcome."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let transcript = client
        .transcribe_audio(b"ID3fake".to_vec(), "talk.mp3", "audio/mpeg")
        .await
        .expect("transcript");

    assert_eq!(transcript, "Hello and welcome.");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "message": "Rate limit reached" }
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client
        .simplify_text("Some text.", "grade6")
        .await
        .expect_err("should fail");

    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn test_empty_completion_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    assert!(client.describe_image(b"GIF89a", "image/gif").await.is_err());
}
