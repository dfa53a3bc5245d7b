//! The remote synthesis backend.
//!
//! [`SpeechBackend`] is the seam the controllers talk to; [`HttpSpeechBackend`]
//! implements it over HTTP:
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`SpeechBackend::synthesize`] | `POST /tts` |
//! | [`SpeechBackend::progress`] | `GET /tts/progress` |
//! | [`SpeechBackend::clone_voice`] | `POST /voices/clone` (multipart) |
//! | [`SpeechBackend::list_voices`] | `GET /voices` |
//! | [`SpeechBackend::health`] | `GET /` |

mod client;
mod types;

pub use client::{HttpSpeechBackend, HttpSpeechBackendBuilder};
pub use types::{
    BackendHealth, CloneRequest, ClonedVoice, RemoteCustomVoice, RemoteVoices, SynthesisRequest,
    SynthesizedAudio,
};

use crate::progress::Progress;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Run one synthesis request to completion and return the audio body.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio>;

    /// Read the server's chunk counters for the job in flight.
    async fn progress(&self) -> Result<Progress>;

    /// Upload a voice sample and get the id of the new voice.
    async fn clone_voice(&self, request: CloneRequest) -> Result<ClonedVoice>;

    /// List every voice the server knows about.
    async fn list_voices(&self) -> Result<RemoteVoices>;

    async fn health(&self) -> Result<BackendHealth>;
}
