//! Voice clone uploads over HTTP

use crate::integration::mock_server::MockServerFixture;
use mockito::Matcher;
use voice_studio::{Error, Gender, Language};

#[tokio::test]
async fn test_upload_sends_multipart_and_selects_voice() {
    let mut fixture = MockServerFixture::new().await;
    let clone = fixture
        .server
        .mock("POST", "/voices/clone")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="audio"; filename="me.wav""#.to_string()),
            Matcher::Regex("Content-Type: audio/wav".to_string()),
            Matcher::Regex("sample-bytes".to_string()),
            Matcher::Regex(r#"name="name"\r\n\r\nDeep"#.to_string()),
            Matcher::Regex(r#"name="language"\r\n\r\nen"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voice_id":"v1","name":"Deep","language":"en"}"#)
        .expect(1)
        .create_async()
        .await;
    let studio = fixture.studio();
    let before = studio.catalog().len();

    let profile = studio
        .clone_voice(b"sample-bytes".to_vec(), "me.wav", Some(" Deep "))
        .await
        .unwrap();

    clone.assert_async().await;
    assert_eq!(profile.id, "v1");
    assert_eq!(profile.label, "Custom: Deep");
    assert_eq!(profile.gender, Gender::Other);
    assert_eq!(studio.catalog().len(), before + 1);
    assert_eq!(studio.catalog().selected(), "v1");
}

#[tokio::test]
async fn test_blank_name_is_not_sent() {
    let mut fixture = MockServerFixture::new().await;
    let clone = fixture
        .server
        .mock("POST", "/voices/clone")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="audio""#.to_string()),
            Matcher::Regex(r#"name="language""#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voice_id":"custom_0badf00d"}"#)
        .create_async()
        .await;
    // Fails the upload if a name field is present.
    let _named = fixture
        .server
        .mock("POST", "/voices/clone")
        .match_body(Matcher::Regex(r#"name="name""#.to_string()))
        .with_status(418)
        .expect(0)
        .create_async()
        .await;
    let studio = fixture.studio();

    let profile = studio
        .clone_voice(b"abc".to_vec(), "clip.mp3", Some("   "))
        .await
        .unwrap();
    clone.assert_async().await;
    assert_eq!(profile.label, "Custom: custom_0badf00d");
}

#[tokio::test]
async fn test_hindi_controller_sends_language_field() {
    let mut fixture = MockServerFixture::new().await;
    let clone = fixture
        .server
        .mock("POST", "/voices/clone")
        .match_body(Matcher::Regex(r#"name="language"\r\n\r\nhi"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voice_id":"custom_hindi01"}"#)
        .expect(1)
        .create_async()
        .await;
    let studio = fixture.studio();
    let backend = std::sync::Arc::new(
        voice_studio::HttpSpeechBackend::new(&fixture.config()).unwrap(),
    );
    let catalog = std::sync::Arc::new(voice_studio::VoiceCatalog::standard());
    let controller = voice_studio::CloneUploadController::new(backend, catalog.clone())
        .with_language(Language::Hindi);

    controller
        .upload(b"abc".to_vec(), "clip.wav", None)
        .await
        .unwrap();
    clone.assert_async().await;
    assert_eq!(catalog.selected(), "custom_hindi01");
    // The session's own catalog is untouched.
    assert!(!studio.catalog().contains("custom_hindi01"));
}

#[tokio::test]
async fn test_empty_file_makes_no_request() {
    let mut fixture = MockServerFixture::new().await;
    let clone = fixture.mock_never("POST", "/voices/clone").await;
    let studio = fixture.studio();
    let before = studio.catalog().list_all();

    let err = studio
        .clone_voice(Vec::new(), "me.wav", Some("Deep"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NoFileSelected));
    assert!(err.is_local());
    clone.assert_async().await;
    assert_eq!(studio.catalog().list_all(), before);
}

#[tokio::test]
async fn test_server_rejection_keeps_catalog() {
    let mut fixture = MockServerFixture::new().await;
    let _clone = fixture
        .mock_json(
            "POST",
            "/voices/clone",
            500,
            r#"{"detail":"Failed to save uploaded audio file."}"#,
        )
        .await;
    let studio = fixture.studio();
    let before = studio.catalog().list_all();

    let err = studio
        .clone_voice(b"abc".to_vec(), "me.wav", None)
        .await
        .unwrap_err();

    assert_eq!(err.remote_detail(), Some("Failed to save uploaded audio file."));
    assert_eq!(studio.catalog().list_all(), before);
    assert_eq!(studio.catalog().selected(), "gentleman_deep");
}

#[tokio::test]
async fn test_malformed_response_is_transport_error() {
    let mut fixture = MockServerFixture::new().await;
    let _clone = fixture
        .mock_json("POST", "/voices/clone", 200, r#"{"id":"missing voice_id"}"#)
        .await;
    let studio = fixture.studio();

    let err = studio
        .clone_voice(b"abc".to_vec(), "me.wav", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
