//! Wire types for the synthesis backend.

use crate::audio::AudioFormat;
use crate::catalog::VoiceProfile;
use crate::language::Language;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /tts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: Language,
    pub voice_id: String,
}

/// Audio returned by a successful synthesis.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Bytes,
    pub format: AudioFormat,
}

/// Multipart upload for `POST /voices/clone`.
#[derive(Debug, Clone)]
pub struct CloneRequest {
    pub audio: Bytes,
    pub file_name: String,
    /// Already trimmed; `None` when the user left it blank.
    pub name: Option<String>,
    pub language: Language,
}

/// Response of `POST /voices/clone`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClonedVoice {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response of `GET /voices`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteVoices {
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub custom: BTreeMap<String, RemoteCustomVoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoteCustomVoice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl RemoteVoices {
    /// Catalog profiles for the server's custom voices, ordered by id.
    pub fn custom_profiles(&self) -> Vec<VoiceProfile> {
        self.custom
            .iter()
            .map(|(id, voice)| VoiceProfile::cloned(id.clone(), voice.name.as_deref()))
            .collect()
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
