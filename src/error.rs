//! Error types for clue image generation.

/// Exit status for a run that halted on a fetch, API, or filesystem failure.
pub const EXIT_RUN_FAILED: u8 = 1;

/// Exit status for a run that never started because configuration was missing.
pub const EXIT_CONFIG: u8 = 2;

/// Errors that can occur while generating clue images.
#[derive(Debug, thiserror::Error)]
pub enum ClueGenError {
    /// API credential missing from the environment.
    #[error("missing {0}; export it and rerun")]
    MissingApiKey(&'static str),

    /// The job list cannot be processed as defined.
    #[error("invalid job list: {0}")]
    InvalidJob(String),

    /// API returned a non-success status. The body is kept verbatim.
    #[error("API error: HTTP {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response carried no result elements.
    #[error("response did not include image data")]
    EmptyResponse,

    /// The first result element carried neither an inline payload nor a URL.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Network or HTTP error, including timeouts.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., writing an output file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A failure while processing a specific job.
    #[error("clue {id}: {source}")]
    Job {
        /// Id of the failing job.
        id: String,
        /// What went wrong.
        #[source]
        source: Box<ClueGenError>,
    },
}

impl ClueGenError {
    /// Wraps this error with the id of the job that produced it.
    pub fn for_job(self, id: impl Into<String>) -> Self {
        Self::Job {
            id: id.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through job annotations.
    pub fn root(&self) -> &ClueGenError {
        match self {
            Self::Job { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns the id of the job this error belongs to, if any.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::Job { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Returns true if the failure happened before any job was attempted
    /// because configuration was missing.
    pub fn is_config(&self) -> bool {
        matches!(self.root(), Self::MissingApiKey(_))
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_config() {
            EXIT_CONFIG
        } else {
            EXIT_RUN_FAILED
        }
    }
}

/// Result type alias for clue generation operations.
pub type Result<T> = std::result::Result<T, ClueGenError>;
