//! Synthesis jobs over HTTP: request shape, audio install, failure reporting

use crate::integration::mock_server::{MockServerFixture, POLL_INTERVAL};
use mockito::Matcher;
use std::sync::atomic::Ordering;
use voice_studio::{Error, JobStatus, Language, StudioConfig, VoiceStudio};

#[tokio::test]
async fn test_submit_success_installs_audio_and_stops_polling() {
    let mut fixture = MockServerFixture::new().await;
    let tts = fixture
        .server
        .mock("POST", "/tts")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "text": "Hello world",
            "language": "en",
            "voice_id": "gentleman_deep"
        })))
        .with_status(200)
        .with_header("content-type", "audio/wav")
        .with_body(vec![7u8; 10])
        .expect(1)
        .create_async()
        .await;
    let (_progress, hits) = fixture.mock_progress(2, 2).await;
    let studio = fixture.studio();

    let handle = studio
        .synthesis()
        .submit("Hello world", Language::English, "gentleman_deep")
        .await
        .unwrap();

    tts.assert_async().await;
    assert_eq!(handle.len(), 10);
    assert_eq!(handle.format(), voice_studio::AudioFormat::Wav);
    assert_eq!(studio.audio().resolve(&handle).unwrap().to_vec(), vec![7u8; 10]);
    assert_eq!(studio.synthesis().status(), JobStatus::Succeeded);
    assert!(!studio.synthesis().is_running());

    let polls = hits.load(Ordering::SeqCst);
    tokio::time::sleep(POLL_INTERVAL * 10).await;
    assert_eq!(hits.load(Ordering::SeqCst), polls);
}

#[tokio::test]
async fn test_unknown_voice_makes_no_http_calls() {
    let mut fixture = MockServerFixture::new().await;
    let tts = fixture.mock_never("POST", "/tts").await;
    let progress = fixture.mock_never("GET", "/tts/progress").await;
    let studio = fixture.studio();

    let err = studio
        .synthesis()
        .submit("Hello world", Language::English, "nonexistent")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownVoice { .. }));

    let err = studio
        .synthesis()
        .submit("   ", Language::English, "gentleman_deep")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));

    tokio::time::sleep(POLL_INTERVAL * 5).await;
    tts.assert_async().await;
    progress.assert_async().await;
}

#[tokio::test]
async fn test_server_detail_surfaces_on_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _tts = fixture
        .mock_json(
            "POST",
            "/tts",
            400,
            r#"{"detail":"Preset voices currently support only English (en). Select a cloned/custom voice if you want Hindi or other languages."}"#,
        )
        .await;
    let (_progress, _) = fixture.mock_progress(0, 0).await;
    let studio = fixture.studio();

    let err = studio
        .synthesis()
        .submit("Namaste duniya", Language::Hindi, "gentleman_deep")
        .await
        .unwrap_err();

    match err {
        Error::RemoteRequestFailed { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("Preset voices currently support only English"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(studio.synthesis().status(), JobStatus::Failed);
    assert!(studio.audio().current().is_none());
}

#[tokio::test]
async fn test_error_without_detail_uses_status_text() {
    let mut fixture = MockServerFixture::new().await;
    let _tts = fixture
        .server
        .mock("POST", "/tts")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;
    let (_progress, _) = fixture.mock_progress(0, 0).await;
    let studio = fixture.studio();

    let err = studio
        .speak("Hello", Language::English)
        .await
        .unwrap_err();
    assert_eq!(err.remote_detail(), Some("Internal Server Error"));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Port 1 is reserved and refuses connections.
    let config = StudioConfig::default()
        .with_base_url("http://127.0.0.1:1")
        .with_poll_interval(POLL_INTERVAL);
    let studio = VoiceStudio::new(config).unwrap();

    let err = studio
        .speak("Hello", Language::English)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(!err.is_local());
    assert_eq!(studio.synthesis().status(), JobStatus::Failed);
    assert!(!studio.synthesis().is_running());
}

#[tokio::test]
async fn test_repeated_jobs_release_previous_artifact() {
    let mut fixture = MockServerFixture::new().await;
    let _tts = fixture.mock_audio(b"RIFF....WAVE".to_vec()).await;
    let (_progress, _) = fixture.mock_progress(1, 1).await;
    let studio = fixture.studio();

    let first = studio.speak("One", Language::English).await.unwrap();
    let second = studio.speak("Two", Language::English).await.unwrap();

    assert!(studio.audio().resolve(&first).is_none());
    assert!(studio.audio().is_live(&second));
    assert_eq!(studio.audio().stats().live(), 1);
}

#[tokio::test]
async fn test_progress_endpoint_decoding() {
    use voice_studio::backend::SpeechBackend;

    let mut fixture = MockServerFixture::new().await;
    let (_progress, hits) = fixture.mock_progress(3, 7).await;
    let backend = voice_studio::HttpSpeechBackend::new(&fixture.config()).unwrap();

    let progress = backend.progress().await.unwrap();
    assert_eq!(progress, voice_studio::Progress::new(3, 7));
    assert_eq!(progress.percent(), 43);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
