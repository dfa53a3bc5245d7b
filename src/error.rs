use thiserror::Error;

/// Structured error context for configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Setting or field that caused the error (e.g., "VOICE_STUDIO_API_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config", "transport")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the studio client.
///
/// Local validation and catalog errors are raised before any side effect;
/// remote and transport errors come from the backend boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Unknown voice: {voice_id}")]
    UnknownVoice { voice_id: String },

    #[error("Unsupported language code: {code}")]
    UnsupportedLanguage { code: String },

    #[error("A synthesis job is already in progress")]
    JobAlreadyInProgress,

    #[error("No voice sample file selected")]
    NoFileSelected,

    #[error("Voice id already exists in the catalog: {voice_id}")]
    DuplicateVoiceId { voice_id: String },

    #[error("Remote error: HTTP {status}: {message}")]
    RemoteRequestFailed { status: u16, message: String },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// Only ever produced inside the progress tracker, where it is logged and dropped.
    #[error("Progress poll failed: {message}")]
    ProgressPollFailed { message: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn unknown_voice(voice_id: impl Into<String>) -> Self {
        Error::UnknownVoice {
            voice_id: voice_id.into(),
        }
    }

    pub fn duplicate_voice(voice_id: impl Into<String>) -> Self {
        Error::DuplicateVoiceId {
            voice_id: voice_id.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// True for errors rejected locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput
                | Error::UnknownVoice { .. }
                | Error::UnsupportedLanguage { .. }
                | Error::JobAlreadyInProgress
                | Error::NoFileSelected
                | Error::DuplicateVoiceId { .. }
        )
    }

    /// Server-provided detail for remote failures.
    pub fn remote_detail(&self) -> Option<&str> {
        match self {
            Error::RemoteRequestFailed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }
}
