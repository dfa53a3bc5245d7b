//! Voice cloning: upload a sample, register the resulting voice, select it.

use crate::backend::{CloneRequest, SpeechBackend};
use crate::catalog::{VoiceCatalog, VoiceProfile};
use crate::language::Language;
use crate::{Error, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CloneUploadController {
    backend: Arc<dyn SpeechBackend>,
    catalog: Arc<VoiceCatalog>,
    language: Language,
}

impl CloneUploadController {
    pub fn new(backend: Arc<dyn SpeechBackend>, catalog: Arc<VoiceCatalog>) -> Self {
        Self {
            backend,
            catalog,
            language: Language::default(),
        }
    }

    /// Language the server records for voices cloned through this controller.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Upload `file_bytes` as a voice sample.
    ///
    /// On success the new voice is appended to the catalog and becomes the
    /// active selection. A blank `display_name` is treated as absent.
    pub async fn upload(
        &self,
        file_bytes: impl Into<Bytes>,
        file_name: &str,
        display_name: Option<&str>,
    ) -> Result<VoiceProfile> {
        let audio = file_bytes.into();
        if audio.is_empty() {
            return Err(Error::NoFileSelected);
        }
        let name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let request = CloneRequest {
            audio,
            file_name: file_name.to_string(),
            name,
            language: self.language,
        };
        let cloned = self.backend.clone_voice(request).await.map_err(|e| {
            warn!(file_name, error = %e, "voice clone upload failed");
            e
        })?;

        let profile = VoiceProfile::cloned(cloned.voice_id, cloned.name.as_deref());
        self.catalog.register_custom(profile.clone())?;
        self.catalog.select(&profile.id)?;
        info!(voice_id = %profile.id, label = %profile.label, "cloned voice selected");
        Ok(profile)
    }
}
