//! One studio session: catalog, controllers and the live audio artifact,
//! wired together once at startup.

use crate::audio::{AudioHandle, AudioResourceManager};
use crate::backend::{BackendHealth, HttpSpeechBackend, SpeechBackend};
use crate::catalog::{VoiceCatalog, VoiceProfile};
use crate::cloning::CloneUploadController;
use crate::config::StudioConfig;
use crate::job::SynthesisJobController;
use crate::language::Language;
use crate::progress::Progress;
use crate::Result;
use bytes::Bytes;
use std::sync::Arc;
use tracing::info;

pub struct VoiceStudio {
    config: StudioConfig,
    backend: Arc<dyn SpeechBackend>,
    catalog: Arc<VoiceCatalog>,
    audio: Arc<AudioResourceManager>,
    synthesis: SynthesisJobController,
    cloning: CloneUploadController,
}

impl VoiceStudio {
    /// Session against the HTTP backend at `config.base_url`.
    pub fn new(config: StudioConfig) -> Result<Self> {
        let backend = Arc::new(HttpSpeechBackend::new(&config)?);
        info!(base_url = %config.base_url, "voice studio session created");
        Ok(Self::with_backend(config, backend))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(StudioConfig::from_env()?)
    }

    /// Session over any backend, starting from the standard catalog.
    pub fn with_backend(config: StudioConfig, backend: Arc<dyn SpeechBackend>) -> Self {
        Self::with_catalog(config, backend, VoiceCatalog::standard())
    }

    pub fn with_catalog(
        config: StudioConfig,
        backend: Arc<dyn SpeechBackend>,
        catalog: VoiceCatalog,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let audio = Arc::new(AudioResourceManager::new());
        let synthesis = SynthesisJobController::new(
            Arc::clone(&backend),
            Arc::clone(&catalog),
            Arc::clone(&audio),
        )
        .with_poll_interval(config.poll_interval);
        let cloning = CloneUploadController::new(Arc::clone(&backend), Arc::clone(&catalog));
        Self {
            config,
            backend,
            catalog,
            audio,
            synthesis,
            cloning,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn audio(&self) -> &AudioResourceManager {
        &self.audio
    }

    pub fn synthesis(&self) -> &SynthesisJobController {
        &self.synthesis
    }

    pub fn cloning(&self) -> &CloneUploadController {
        &self.cloning
    }

    /// Synthesize `text` with the currently selected voice.
    pub async fn speak(&self, text: &str, language: Language) -> Result<AudioHandle> {
        let voice_id = self.catalog.selected();
        self.synthesis.submit(text, language, &voice_id).await
    }

    pub async fn clone_voice(
        &self,
        file_bytes: impl Into<Bytes>,
        file_name: &str,
        display_name: Option<&str>,
    ) -> Result<VoiceProfile> {
        self.cloning.upload(file_bytes, file_name, display_name).await
    }

    /// Pull custom voices the server knows about into the catalog.
    /// Returns how many were new.
    pub async fn refresh_voices(&self) -> Result<usize> {
        let remote = self.backend.list_voices().await?;
        Ok(self.catalog.merge_custom(remote.custom_profiles()))
    }

    pub async fn health(&self) -> Result<BackendHealth> {
        self.backend.health().await
    }

    pub fn progress(&self) -> Progress {
        self.synthesis.progress()
    }
}
