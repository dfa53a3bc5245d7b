//! Synthesis job controller.
//!
//! One controller runs at most one job at a time. A job goes
//! `Idle -> Running -> {Succeeded, Failed}`; the terminal states are only
//! what the last job ended with and never block the next submission.
//!
//! While the main request is in flight a [`ProgressTracker`] polls the
//! backend's progress endpoint. The tracker is stopped on every exit path,
//! including when the `submit` future is dropped before completion.

use crate::audio::{AudioHandle, AudioResourceManager};
use crate::backend::{SpeechBackend, SynthesisRequest};
use crate::catalog::VoiceCatalog;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::language::Language;
use crate::progress::{Progress, ProgressTracker};
use crate::{Error, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// Snapshot of one synthesis request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisJob {
    pub id: Uuid,
    pub input_text: String,
    pub language: Language,
    pub voice_id: String,
    pub status: JobStatus,
    pub progress: Progress,
}

pub struct SynthesisJobController {
    backend: Arc<dyn SpeechBackend>,
    catalog: Arc<VoiceCatalog>,
    audio: Arc<AudioResourceManager>,
    tracker: ProgressTracker,
    poll_interval: Duration,
    busy: AtomicBool,
    last_job: Mutex<Option<SynthesisJob>>,
}

impl SynthesisJobController {
    pub fn new(
        backend: Arc<dyn SpeechBackend>,
        catalog: Arc<VoiceCatalog>,
        audio: Arc<AudioResourceManager>,
    ) -> Self {
        Self {
            backend,
            catalog,
            audio,
            tracker: ProgressTracker::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            busy: AtomicBool::new(false),
            last_job: Mutex::new(None),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Synthesize `input_text` with `voice_id` and install the result as the
    /// live audio artifact.
    ///
    /// Rejected without any request when the text is blank
    /// ([`Error::EmptyInput`]), the voice is not in the catalog
    /// ([`Error::UnknownVoice`]) or another job is running
    /// ([`Error::JobAlreadyInProgress`]). There is no timeout: the call waits
    /// as long as the backend takes.
    pub async fn submit(
        &self,
        input_text: &str,
        language: Language,
        voice_id: &str,
    ) -> Result<AudioHandle> {
        if input_text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if !self.catalog.contains(voice_id) {
            return Err(Error::unknown_voice(voice_id));
        }
        let mut run = RunGuard::acquire(self)?;

        let job = SynthesisJob {
            id: Uuid::new_v4(),
            input_text: input_text.to_string(),
            language,
            voice_id: voice_id.to_string(),
            status: JobStatus::Running,
            progress: Progress::UNKNOWN,
        };
        let job_id = job.id;
        *self.jobs() = Some(job);
        info!(%job_id, voice_id, language = language.code(), chars = input_text.len(), "synthesis job started");

        self.tracker.reset();
        let backend = Arc::clone(&self.backend);
        self.tracker.start(self.poll_interval, move || {
            let backend = Arc::clone(&backend);
            async move { backend.progress().await }
        });
        run.tracking = true;

        let request = SynthesisRequest {
            text: input_text.to_string(),
            language,
            voice_id: voice_id.to_string(),
        };
        let outcome = self.backend.synthesize(&request).await;
        run.stop_tracking();

        match outcome {
            Ok(audio) => {
                let handle = self.audio.install(audio.data, audio.format);
                run.settle(JobStatus::Succeeded);
                info!(%job_id, bytes = handle.len(), locator = handle.locator(), "synthesis job succeeded");
                Ok(handle)
            }
            Err(e) => {
                run.settle(JobStatus::Failed);
                warn!(%job_id, error = %e, "synthesis job failed");
                Err(e)
            }
        }
    }

    pub fn status(&self) -> JobStatus {
        self.jobs()
            .as_ref()
            .map(|job| job.status)
            .unwrap_or_default()
    }

    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Latest progress reading of the current (or last) job.
    pub fn progress(&self) -> Progress {
        self.tracker.current()
    }

    pub fn last_job(&self) -> Option<SynthesisJob> {
        let mut job = self.jobs().clone()?;
        if job.status == JobStatus::Running {
            job.progress = self.tracker.current();
        }
        Some(job)
    }

    /// Clear a terminal status back to `Idle`. No effect while a job runs.
    pub fn acknowledge(&self) {
        if let Some(job) = self.jobs().as_mut() {
            if job.status.is_terminal() {
                job.status = JobStatus::Idle;
            }
        }
    }

    pub fn audio(&self) -> &AudioResourceManager {
        &self.audio
    }

    fn jobs(&self) -> MutexGuard<'_, Option<SynthesisJob>> {
        self.last_job.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Holds the busy flag for one job.
///
/// Dropping it stops the tracker (once), marks an unsettled job `Failed`
/// and re-arms the controller.
struct RunGuard<'a> {
    controller: &'a SynthesisJobController,
    tracking: bool,
    settled: bool,
}

impl<'a> RunGuard<'a> {
    fn acquire(controller: &'a SynthesisJobController) -> Result<Self> {
        controller
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::JobAlreadyInProgress)?;
        Ok(Self {
            controller,
            tracking: false,
            settled: false,
        })
    }

    fn stop_tracking(&mut self) {
        if self.tracking {
            self.controller.tracker.stop();
            self.tracking = false;
        }
    }

    fn settle(&mut self, status: JobStatus) {
        self.stop_tracking();
        let progress = self.controller.tracker.current();
        if let Some(job) = self.controller.jobs().as_mut() {
            job.status = status;
            job.progress = progress;
        }
        self.settled = true;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("synthesis job abandoned before completion");
            self.settle(JobStatus::Failed);
        }
        self.controller.busy.store(false, Ordering::SeqCst);
    }
}
