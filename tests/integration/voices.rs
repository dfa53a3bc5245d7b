//! Voice listing and health checks over HTTP

use crate::integration::mock_server::MockServerFixture;
use voice_studio::backend::SpeechBackend;
use voice_studio::{Error, HttpSpeechBackend};

#[tokio::test]
async fn test_refresh_voices_merges_server_custom_voices() {
    let mut fixture = MockServerFixture::new().await;
    let voices = fixture
        .mock_json(
            "GET",
            "/voices",
            200,
            r#"{
                "presets": ["gentleman_deep", "girl_story"],
                "custom": {
                    "custom_deep_story_male": {"file_path": "voices/custom_deep_story_male.wav"},
                    "custom_1a2b3c4d": {"file_path": "voices/custom_1a2b3c4d.wav", "name": "Grandpa", "language": "en"}
                }
            }"#,
        )
        .await;
    let studio = fixture.studio();
    let before = studio.catalog().len();

    let added = studio.refresh_voices().await.unwrap();

    voices.assert_async().await;
    assert_eq!(added, 1);
    assert_eq!(studio.catalog().len(), before + 1);
    let grandpa = studio.catalog().find_by_id("custom_1a2b3c4d").unwrap();
    assert_eq!(grandpa.label, "Custom: Grandpa");
    assert!(grandpa.is_custom);
    // Merging never changes the selection.
    assert_eq!(studio.catalog().selected(), "gentleman_deep");
}

#[tokio::test]
async fn test_health_reports_backend_status() {
    let mut fixture = MockServerFixture::new().await;
    let _root = fixture
        .mock_json(
            "GET",
            "/",
            200,
            r#"{"status":"ok","message":"Indic voice TTS backend running"}"#,
        )
        .await;
    let studio = fixture.studio();

    let health = studio.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.message.as_deref(), Some("Indic voice TTS backend running"));
}

#[tokio::test]
async fn test_custom_paths_from_builder() {
    let mut fixture = MockServerFixture::new().await;
    let voices = fixture
        .mock_json("GET", "/api/voices", 200, r#"{"presets":[],"custom":{}}"#)
        .await;
    let backend = HttpSpeechBackend::builder()
        .voices_path("api/voices")
        .build(&fixture.config())
        .unwrap();

    let listed = backend.list_voices().await.unwrap();
    voices.assert_async().await;
    assert!(listed.custom.is_empty());
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_reason() {
    let mut fixture = MockServerFixture::new().await;
    let _voices = fixture
        .server
        .mock("GET", "/voices")
        .with_status(503)
        .create_async()
        .await;
    let backend = HttpSpeechBackend::new(&fixture.config()).unwrap();

    let err = backend.list_voices().await.unwrap_err();
    match err {
        Error::RemoteRequestFailed { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
