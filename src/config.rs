//! Run configuration: the API credential and orchestrator options.

use crate::error::{ClueGenError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default directory generated images are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "assets/clues";

/// Default pause after each generated image, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 1200;

/// Default pause after each generated image.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(DEFAULT_DELAY_MS);

/// Default timeout for each HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// An API credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps an explicit key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads the key through `lookup`, treating an unset or blank value as
    /// missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .map(Self)
            .ok_or(ClueGenError::MissingApiKey(API_KEY_ENV))
    }

    /// Returns the raw key for use in an authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Options controlling a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory each job's file is written into.
    pub output_dir: PathBuf,
    /// Regenerate jobs whose output already exists.
    pub force: bool,
    /// Pause after every written image.
    pub delay: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            force: false,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RunOptions {
    /// Creates options writing into `output_dir` with default pacing.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Sets whether existing outputs are overwritten.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Sets the pause after each written image.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}
