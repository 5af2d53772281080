// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTTP API integration tests
//!
//! Each test builds the router over a temporary upload directory and drives
//! it with `oneshot`; no socket is opened.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use wcag_auditor::assist::Assistant;
use wcag_auditor::fallback::FallbackGenerator;
use wcag_auditor::templates::FixedSelector;
use wcag_auditor::{build_router, AppState, Config, Error};

const BOUNDARY: &str = "wcag-auditor-test-boundary";

/// Assistant that answers every request with fixed text
struct CannedAssistant;

#[async_trait]
impl Assistant for CannedAssistant {
    async fn describe_image(&self, _image: &[u8], _mime: &str) -> wcag_auditor::Result<String> {
        Ok("A red apple on a wooden table".to_string())
    }

    async fn simplify_text(&self, _text: &str, target_level: &str) -> wcag_auditor::Result<String> {
        Ok(format!("Short text for {}.", target_level))
    }

    async fn transcribe_audio(&self, _audio: Vec<u8>, file_name: &str, _mime: &str) -> wcag_auditor::Result<String> {
        Ok(format!("Transcript of {}", file_name))
    }
}

/// Assistant whose every call fails
struct BrokenAssistant;

#[async_trait]
impl Assistant for BrokenAssistant {
    async fn describe_image(&self, _image: &[u8], _mime: &str) -> wcag_auditor::Result<String> {
        Err(Error::Assistant("unavailable".into()))
    }

    async fn simplify_text(&self, _text: &str, _target_level: &str) -> wcag_auditor::Result<String> {
        Err(Error::Assistant("unavailable".into()))
    }

    async fn transcribe_audio(&self, _audio: Vec<u8>, _file_name: &str, _mime: &str) -> wcag_auditor::Result<String> {
        Err(Error::Assistant("unavailable".into()))
    }
}

struct TestApp {
    router: Router,
    uploads: TempDir,
}

fn test_config(uploads: &TempDir) -> Config {
    let mut config = Config::default();
    config.uploads.dir = uploads.path().to_path_buf();
    config.openai.api_key = None;
    config
}

fn app_with(configure: impl FnOnce(&mut Config), assistant: Option<Arc<dyn Assistant>>) -> TestApp {
    let uploads = tempfile::tempdir().expect("temp dir");
    let mut config = test_config(&uploads);
    configure(&mut config);

    let mut state = AppState::new(config)
        .expect("state")
        .with_fallback(FallbackGenerator::new(Arc::new(FixedSelector(0))));
    if let Some(assistant) = assistant {
        state = state.with_assistant(assistant);
    }

    TestApp { router: build_router(state), uploads }
}

fn app() -> TestApp {
    app_with(|_| {}, None)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(router, request).await
}

/// (field, file name, content type, bytes)
type Part<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_multipart(router: &Router, uri: &str, parts: &[Part<'_>]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(parts)))
        .expect("request");
    send(router, request).await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let request = Request::builder().uri("/api/health").body(Body::empty()).expect("request");
    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn contrast_suggest_darkens_gray_on_white() {
    let app = app();
    let (status, body) = post_json(
        &app.router,
        "/api/contrast/suggest",
        json!({ "foreground": "#777777", "background": "#ffffff" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["required"], 7.0);
    assert_eq!(body["passes"], true);
    assert_eq!(body["original"]["ratio"], 4.48);
    assert!(body["improved"]["ratio"].as_f64().expect("ratio") >= 7.0);
    assert_eq!(body["improved"]["background"], "#ffffff");
}

#[tokio::test]
async fn contrast_suggest_keeps_compliant_color() {
    let app = app();
    let (_, body) = post_json(
        &app.router,
        "/api/contrast/suggest",
        json!({ "foreground": "black", "background": "#FFF", "required": 4.5 }),
    )
    .await;

    assert_eq!(body["improved"]["foreground"], "#000000");
    assert_eq!(body["improved"]["ratio"], 21.0);
}

#[tokio::test]
async fn contrast_rejects_bad_input() {
    let app = app();

    let (status, body) =
        post_json(&app.router, "/api/contrast/suggest", json!({ "foreground": "#777777" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Foreground and background colors are required");

    let (status, _) = post_json(
        &app.router,
        "/api/contrast/check",
        json!({ "foreground": "notacolor", "background": "#ffffff" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app.router,
        "/api/contrast/suggest",
        json!({ "foreground": "#777777", "background": "#ffffff", "required": -1.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contrast_check_reports_thresholds() {
    let app = app();
    let (status, body) = post_json(
        &app.router,
        "/api/contrast/check",
        json!({ "foreground": "#000000", "background": "#ffffff" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ratio"], 21.0);
    assert_eq!(body["passesAA"], true);
    assert_eq!(body["passesAAA"], true);
    assert_eq!(body["passesAALarge"], true);
    assert_eq!(body["passesAAALarge"], true);
}

#[tokio::test]
async fn contrast_analyze_finds_inline_pair() {
    let app = app();
    let html = r#"<html><body><p style="color: #999999; background-color: #ffffff">faint</p></body></html>"#;
    let (status, body) = post_json(&app.router, "/api/contrast/analyze", json!({ "html": html })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analyzed"], 1);
    assert_eq!(body["issues"].as_array().expect("issues").len(), 1);
    assert_eq!(body["issues"][0]["required"], 7.0);
}

#[tokio::test]
async fn alt_text_analyze_suggests_from_file_name() {
    let app = app();
    let html = r#"<html><body>
        <img src="/img/red-apple.jpg?v=2">
        <img src="/img/team.jpg" alt="Our support team at the spring meetup">
    </body></html>"#;
    let (status, body) = post_json(&app.router, "/api/alt-text/analyze", json!({ "html": html })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalImages"], 2);
    assert_eq!(body["issuesFound"], 1);
    assert_eq!(body["images"][0]["imageId"], 1);
    assert_eq!(body["images"][0]["hasAlt"], false);
    assert_eq!(
        body["images"][0]["suggestedAlt"],
        "Red Apple displayed prominently against a clean background"
    );
}

#[tokio::test]
async fn alt_text_check_scores_redundant_phrase() {
    let app = app();
    let (status, body) =
        post_json(&app.router, "/api/alt-text/check", json!({ "altText": "image of a dog" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["altText"], "image of a dog");
    assert_eq!(body["analysis"]["score"], 50);
    assert_eq!(body["analysis"]["quality"], "fair");

    let (status, body) = post_json(&app.router, "/api/alt-text/check", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Alt text is required");
}

#[tokio::test]
async fn alt_text_generate_uses_template_without_assistant() {
    let app = app();
    let (status, body) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("image", "red-apple.png", "image/png", b"\x89PNG fake")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["altText"], "Red Apple displayed prominently against a clean background");
    assert_eq!(body["image"]["originalName"], "red-apple.png");

    let filename = body["image"]["filename"].as_str().expect("filename");
    assert!(app.uploads.path().join("images").join(filename).exists());
    assert_eq!(body["image"]["url"], format!("/uploads/images/{}", filename));
}

#[tokio::test]
async fn alt_text_generate_prefers_assistant() {
    let app = app_with(|_| {}, Some(Arc::new(CannedAssistant)));
    let (_, body) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("image", "photo.jpg", "image/jpeg", b"jpeg")],
    )
    .await;
    assert_eq!(body["altText"], "A red apple on a wooden table");
}

#[tokio::test]
async fn alt_text_generate_falls_back_when_assistant_fails() {
    let app = app_with(|_| {}, Some(Arc::new(BrokenAssistant)));
    let (status, body) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("image", "blue-car.jpg", "image/jpeg", b"jpeg")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["altText"], "Blue Car displayed prominently against a clean background");
}

#[tokio::test]
async fn alt_text_generate_rejects_non_images_and_oversize() {
    let app = app_with(|config| config.uploads.max_image_bytes = 16, None);

    let (status, _) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("image", "notes.txt", "text/plain", b"hello")],
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, body) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("image", "big.png", "image/png", &[0u8; 32])],
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "File too large");

    let (status, body) = post_multipart(
        &app.router,
        "/api/alt-text/generate",
        &[("other", "a.png", "image/png", b"png")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No image file provided");
}

#[tokio::test]
async fn text_readability_of_simple_sentence() {
    let app = app();
    let (status, body) = post_json(
        &app.router,
        "/api/text/analyze-readability",
        json!({ "text": "The cat sat on the mat." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["readingLevel"], "grade5");
    assert_eq!(body["fleschKincaidScore"], 100.0);
    assert_eq!(body["meetsWcagAAA"], true);
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn text_endpoints_require_text() {
    let app = app();
    for uri in [
        "/api/text/simplify",
        "/api/text/analyze-readability",
        "/api/text/unusual-words",
        "/api/text/abbreviations",
        "/api/text/pronunciation",
    ] {
        let (status, body) = post_json(&app.router, uri, json!({ "text": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Text content is required");
    }
}

#[tokio::test]
async fn text_simplify_locally() {
    let app = app();
    let (status, body) =
        post_json(&app.router, "/api/text/simplify", json!({ "text": "Please utilize this." })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original"]["text"], "Please utilize this.");
    assert_eq!(body["simplified"]["text"], "Please use this.");
    assert_eq!(body["targetReadingLevel"], "grade6");
    assert!(body["simplified"]["readingLevel"].is_string());
}

#[tokio::test]
async fn text_simplify_with_assistant() {
    let app = app_with(|_| {}, Some(Arc::new(CannedAssistant)));
    let (_, body) = post_json(
        &app.router,
        "/api/text/simplify",
        json!({ "text": "Long words abound.", "targetReadingLevel": "grade8-9" }),
    )
    .await;
    assert_eq!(body["simplified"]["text"], "Short text for grade8-9.");
    assert_eq!(body["targetReadingLevel"], "grade8-9");
}

#[tokio::test]
async fn text_dictionary_lookups() {
    let app = app();
    let text = "Follow WCAG. Our paradigm is clear. I read it yesterday.";

    let (_, body) = post_json(&app.router, "/api/text/abbreviations", json!({ "text": text })).await;
    assert_eq!(body["abbreviations"][0]["abbreviation"], "WCAG");
    assert_eq!(body["text"], text);

    let (_, body) = post_json(&app.router, "/api/text/unusual-words", json!({ "text": text })).await;
    assert_eq!(body["unusualWords"][0]["word"], "paradigm");

    let (_, body) = post_json(&app.router, "/api/text/pronunciation", json!({ "text": text })).await;
    assert_eq!(body["pronunciationGuidance"][0]["word"], "read");
}

#[tokio::test]
async fn media_analyze_video_lists_alternatives() {
    let app = app();
    let (status, body) = post_multipart(
        &app.router,
        "/api/media/analyze",
        &[("media", "intro.mp4", "video/mp4", b"mp4")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["media"]["type"], "video");
    let ids: Vec<&str> = body["issues"]
        .as_array()
        .expect("issues")
        .iter()
        .filter_map(|issue| issue["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "transcript",
            "captions",
            "audio-description",
            "sign-language",
            "extended-audio-description",
            "media-alternative"
        ]
    );
}

#[tokio::test]
async fn media_analyze_audio_needs_transcript_only() {
    let app = app();
    let (_, body) = post_multipart(
        &app.router,
        "/api/media/analyze",
        &[("media", "talk.mp3", "audio/mpeg", b"mp3")],
    )
    .await;
    assert_eq!(body["media"]["type"], "audio");
    assert_eq!(body["issues"].as_array().expect("issues").len(), 1);
    assert_eq!(body["issues"][0]["wcagCriteria"], "1.2.1 Audio-only and Video-only (Prerecorded)");
}

#[tokio::test]
async fn media_transcript_paths() {
    let app = app_with(|_| {}, Some(Arc::new(CannedAssistant)));
    let (_, body) = post_multipart(
        &app.router,
        "/api/media/generate-transcript",
        &[("media", "talk.mp3", "audio/mpeg", b"mp3")],
    )
    .await;
    assert_eq!(body["transcript"], "Transcript of talk.mp3");

    let (_, body) = post_multipart(
        &app.router,
        "/api/media/generate-transcript",
        &[("media", "intro.mp4", "video/mp4", b"mp4")],
    )
    .await;
    assert!(body["transcript"]
        .as_str()
        .expect("transcript")
        .starts_with("Welcome to our video tutorial"));
}

#[tokio::test]
async fn media_video_only_endpoints() {
    let app = app();

    let (status, body) = post_multipart(
        &app.router,
        "/api/media/generate-captions",
        &[("video", "intro.mp4", "video/mp4", b"mp4")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["captions"].as_array().expect("captions").len(), 12);
    assert!(body["video"]["url"].as_str().expect("url").starts_with("/uploads/video/"));

    let (_, body) = post_multipart(
        &app.router,
        "/api/media/audio-description",
        &[("video", "intro.mp4", "video/mp4", b"mp4")],
    )
    .await;
    assert_eq!(body["audioDescriptions"][0]["timeCode"], "00:00:20");

    let (_, body) = post_multipart(
        &app.router,
        "/api/media/sign-language",
        &[("video", "intro.mp4", "video/mp4", b"mp4")],
    )
    .await;
    assert_eq!(body["signLanguageGuidance"]["required"], true);

    let (status, _) = post_multipart(
        &app.router,
        "/api/media/generate-captions",
        &[("video", "talk.mp3", "audio/mpeg", b"mp3")],
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn aria_validate_counts_each_group() {
    let app = app();
    let html = r#"<html><body>
        <div role="button">Click</div>
        <section><p>No heading here</p></section>
        <div class="toast">Saved</div>
    </body></html>"#;
    let (status, body) = post_json(&app.router, "/api/aria/validate", json!({ "html": html })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ariaIssues"], 1);
    assert_eq!(body["issues"][0]["id"], "aria-button-1");
    assert!(body["semanticIssues"].as_u64().expect("count") >= 1);
    assert_eq!(body["statusMessageIssues"], 1);
    let total = body["issues"].as_array().expect("issues").len();
    assert_eq!(body["totalIssues"], total);
}

#[tokio::test]
async fn aria_fix_by_id_and_unknown_id() {
    let app = app();
    let html = r#"<html><body><div role="button">Click</div></body></html>"#;

    let (status, body) =
        post_json(&app.router, "/api/aria/fix", json!({ "html": html, "issueId": "aria-button-1" })).await;
    assert_eq!(status, StatusCode::OK);
    let fixes = body["fixes"].as_array().expect("fixes");
    assert_eq!(fixes.len(), 1);
    assert!(fixes[0]["suggestedCode"].as_str().expect("code").contains("tabindex=\"0\""));

    let (status, body) =
        post_json(&app.router, "/api/aria/fix", json!({ "html": html, "issueId": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Issue with ID nope not found");

    let (status, body) = post_json(&app.router, "/api/aria/fix", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "HTML content is required");
}

#[tokio::test]
async fn aria_semantic_structure_reports_outline() {
    let app = app();
    let html = r#"<html><body><header></header><main><h1>Title</h1><h3>Deep</h3></main></body></html>"#;
    let (status, body) =
        post_json(&app.router, "/api/aria/semantic-structure", json!({ "html": html })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headingStructure"]["totalHeadings"], 2);
    assert_eq!(body["headingStructure"]["hasProperH1"], true);
    assert_eq!(body["headingStructure"]["hasSkippedLevels"], true);
    assert_eq!(body["landmarkRegions"]["landmarks"]["main"], 1);
}

#[tokio::test]
async fn upload_single_and_serve_back() {
    let app = app();
    let (status, body) = post_multipart(
        &app.router,
        "/api/upload",
        &[("file", "report.pdf", "application/pdf", b"%PDF-1.7")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(body["file"]["size"], 8);
    assert_eq!(body["file"]["mimetype"], "application/pdf");
    let url = body["file"]["url"].as_str().expect("url").to_string();
    assert!(url.starts_with("/uploads/other/"));

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(&url).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    assert_eq!(&bytes[..], b"%PDF-1.7");
}

#[tokio::test]
async fn upload_multiple_and_limits() {
    let app = app_with(|config| config.uploads.max_files = 2, None);

    let (status, body) = post_multipart(
        &app.router,
        "/api/upload/multiple",
        &[
            ("files", "a.png", "image/png", b"a"),
            ("files", "b.mp3", "audio/mpeg", b"b"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["files"].as_array().expect("files").len(), 2);
    assert!(body["files"][1]["url"].as_str().expect("url").starts_with("/uploads/audio/"));

    let (status, _) = post_multipart(
        &app.router,
        "/api/upload/multiple",
        &[
            ("files", "a.png", "image/png", b"a"),
            ("files", "b.png", "image/png", b"b"),
            ("files", "c.png", "image/png", b"c"),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_multipart(&app.router, "/api/upload", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn audit_summarizes_findings() {
    let app = app();
    let html = r#"<html><body><img src="photo.jpg"></body></html>"#;
    let (status, body) = post_json(&app.router, "/api/audit", json!({ "html": html, "level": "AA" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["passes"], false);
    let rules: Vec<&str> = body["findings"]
        .as_array()
        .expect("findings")
        .iter()
        .filter_map(|f| f["ruleId"].as_str())
        .collect();
    assert!(rules.contains(&"WCAG-1.1.1-missing-alt"));
    assert!(rules.contains(&"WCAG-3.1.1-missing-lang"));
    assert_eq!(body["summary"]["byLevel"]["AAA"], 0);

    let (status, _) = post_json(&app.router, "/api/audit", json!({ "html": html, "level": "ZZ" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn raw_post(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

#[tokio::test]
async fn test_malformed_json_gets_json_error() {
    let app = app();
    let (status, body) = send(
        &app.router,
        raw_post("/api/contrast/check", Some("application/json"), "{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mistyped_field_gets_json_error() {
    let app = app();
    let (status, body) = send(
        &app.router,
        raw_post("/api/aria/validate", Some("application/json"), r#"{"html": 5}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|m| m.contains("html")));
}

#[tokio::test]
async fn test_missing_content_type_gets_json_error() {
    let app = app();
    let (status, body) = send(&app.router, raw_post("/api/audit", None, r#"{"html": "<p>x</p>"}"#)).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_audit_with_prefixed_tags() {
    let app = app();
    let html = "<html lang=\"en\"><body>\n<x:y aria-expanded=\"true\">menu</x:y>\n</body></html>";
    let (status, body) = post_json(&app.router, "/api/audit", json!({ "html": html })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.to_string().contains("WCAG-4.1.2-missing-role"));

    let (status, body) = post_json(&app.router, "/api/aria/validate", json!({ "html": html })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["issues"][0]["element"], "x:y");
}
