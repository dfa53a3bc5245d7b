//! # voice-studio
//!
//! Client-side orchestration core for a local speech-synthesis studio.
//!
//! A user picks a voice from a catalog of built-in presets and custom
//! (cloned) voices, submits a script, watches chunk progress while the
//! backend synthesizes, and gets back one live audio artifact. New voices are
//! cloned by uploading a short speech sample.
//!
//! ## Key Features
//!
//! - **Voice catalog**: [`catalog::VoiceCatalog`] merges immutable presets with an
//!   append-only list of custom voices; ids are unique across both
//! - **Synthesis jobs**: [`job::SynthesisJobController`] runs the main request and a
//!   progress poller side by side, one job at a time
//! - **Progress polling**: [`progress::ProgressTracker`] is a cancellable polling task
//!   that never applies a reading after it was stopped
//! - **Audio ownership**: [`audio::AudioResourceManager`] keeps exactly one live artifact
//!   and releases the previous one on every install
//! - **Voice cloning**: [`cloning::CloneUploadController`] uploads a sample and registers
//!   and selects the new voice
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voice_studio::{Language, VoiceStudio};
//!
//! #[tokio::main]
//! async fn main() -> voice_studio::Result<()> {
//!     // VOICE_STUDIO_API_URL, default http://localhost:8000
//!     let studio = VoiceStudio::from_env()?;
//!
//!     studio.catalog().select("girl_story")?;
//!     let handle = studio.speak("Once upon a time...", Language::English).await?;
//!     studio.audio().save(&handle, "story.wav").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Voice profiles, presets, selection |
//! | [`job`] | Synthesis job controller and job state |
//! | [`progress`] | Progress polling task |
//! | [`audio`] | Audio artifact lifecycle |
//! | [`cloning`] | Voice clone uploads |
//! | [`backend`] | Backend trait and HTTP implementation |
//! | [`transport`] | HTTP client and response classification |
//! | [`config`] | Environment configuration |
//! | [`session`] | [`VoiceStudio`] façade |

pub mod audio;
pub mod backend;
pub mod catalog;
pub mod cloning;
pub mod config;
pub mod job;
pub mod language;
pub mod progress;
pub mod session;
pub mod transport;


// Re-export main types for convenience
pub use audio::{AudioFormat, AudioHandle, AudioResourceManager};
pub use backend::{HttpSpeechBackend, SpeechBackend};
pub use catalog::{Gender, VoiceCatalog, VoiceProfile};
pub use cloning::CloneUploadController;
pub use config::StudioConfig;
pub use job::{JobStatus, SynthesisJob, SynthesisJobController};
pub use language::Language;
pub use progress::{Progress, ProgressTracker};
pub use session::VoiceStudio;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
