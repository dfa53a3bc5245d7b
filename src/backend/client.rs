//! HTTP implementation of [`SpeechBackend`].

use super::types::{
    BackendHealth, CloneRequest, ClonedVoice, RemoteVoices, SynthesisRequest, SynthesizedAudio,
};
use super::SpeechBackend;
use crate::audio::AudioFormat;
use crate::config::StudioConfig;
use crate::progress::Progress;
use crate::transport::{HttpTransport, TransportError};
use crate::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

/// Client for the studio backend.
pub struct HttpSpeechBackend {
    transport: HttpTransport,
    synthesize_path: String,
    progress_path: String,
    clone_path: String,
    voices_path: String,
}

impl HttpSpeechBackend {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        HttpSpeechBackendBuilder::new().build(config)
    }

    pub fn builder() -> HttpSpeechBackendBuilder {
        HttpSpeechBackendBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl SpeechBackend for HttpSpeechBackend {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio> {
        let response = self.transport.post_json(&self.synthesize_path, request).await?;
        let format = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(AudioFormat::from_content_type)
            .unwrap_or_default();
        let data = response.bytes().await.map_err(TransportError::Http)?;
        info!(voice_id = %request.voice_id, bytes = data.len(), "synthesis response received");
        Ok(SynthesizedAudio { data, format })
    }

    async fn progress(&self) -> Result<Progress> {
        let response = self.transport.get(&self.progress_path).await?;
        HttpTransport::read_json(response).await
    }

    async fn clone_voice(&self, request: CloneRequest) -> Result<ClonedVoice> {
        let mime = AudioFormat::from_file_name(&request.file_name)
            .map(|f| f.mime_type())
            .unwrap_or("application/octet-stream");
        let part = reqwest::multipart::Part::bytes(request.audio.to_vec())
            .file_name(request.file_name)
            .mime_str(mime)
            .map_err(TransportError::Http)?;
        let mut form = reqwest::multipart::Form::new()
            .part("audio", part)
            .text("language", request.language.code());
        if let Some(name) = request.name {
            form = form.text("name", name);
        }
        let response = self.transport.post_multipart(&self.clone_path, form).await?;
        HttpTransport::read_json(response).await
    }

    async fn list_voices(&self) -> Result<RemoteVoices> {
        let response = self.transport.get(&self.voices_path).await?;
        HttpTransport::read_json(response).await
    }

    async fn health(&self) -> Result<BackendHealth> {
        let response = self.transport.get("/").await?;
        HttpTransport::read_json(response).await
    }
}

pub struct HttpSpeechBackendBuilder {
    synthesize_path: Option<String>,
    progress_path: Option<String>,
    clone_path: Option<String>,
    voices_path: Option<String>,
}

impl HttpSpeechBackendBuilder {
    pub fn new() -> Self {
        Self {
            synthesize_path: None,
            progress_path: None,
            clone_path: None,
            voices_path: None,
        }
    }

    pub fn synthesize_path(mut self, path: impl Into<String>) -> Self {
        self.synthesize_path = Some(path.into());
        self
    }

    pub fn progress_path(mut self, path: impl Into<String>) -> Self {
        self.progress_path = Some(path.into());
        self
    }

    pub fn clone_path(mut self, path: impl Into<String>) -> Self {
        self.clone_path = Some(path.into());
        self
    }

    pub fn voices_path(mut self, path: impl Into<String>) -> Self {
        self.voices_path = Some(path.into());
        self
    }

    pub fn build(self, config: &StudioConfig) -> Result<HttpSpeechBackend> {
        config.validate()?;
        Ok(HttpSpeechBackend {
            transport: HttpTransport::new(config)?,
            synthesize_path: normalize(self.synthesize_path, "/tts"),
            progress_path: normalize(self.progress_path, "/tts/progress"),
            clone_path: normalize(self.clone_path, "/voices/clone"),
            voices_path: normalize(self.voices_path, "/voices"),
        })
    }
}

impl Default for HttpSpeechBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: Option<String>, default: &str) -> String {
    let path = path.unwrap_or_else(|| default.to_string());
    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}
