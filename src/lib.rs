#![warn(missing_docs)]
//! cluegen - batch generation of clue scene images.
//!
//! Walks a fixed list of scenes, asks the OpenAI Images API for one
//! picture per scene, and writes each PNG into an output directory.
//! Scenes whose file already exists are skipped, so an interrupted run
//! can simply be started again. The first failure halts the run.
//!
//! # Quick Start
//!
//! ```no_run
//! use cluegen::{jobs, ApiKey, OpenAiImageFetcher, RunOptions, Runner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> cluegen::Result<()> {
//!     let fetcher = OpenAiImageFetcher::builder()
//!         .api_key(ApiKey::from_env()?)
//!         .build()?;
//!     let runner = Runner::new(fetcher, RunOptions::new("assets/clues"));
//!     let summary = runner.run(jobs()).await?;
//!     println!("{} generated, {} skipped", summary.generated.len(), summary.skipped.len());
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod image;
pub mod jobs;
pub mod prompt;
pub mod runner;

// Re-export error types at crate root
pub use error::{ClueGenError, Result, EXIT_CONFIG, EXIT_RUN_FAILED};

pub use config::{ApiKey, RunOptions};
pub use image::providers::{OpenAiImageFetcher, OpenAiImageFetcherBuilder};
pub use image::{GeneratedImage, ImageFetcher};
pub use jobs::{jobs, Job};
pub use prompt::build_prompt;
pub use runner::{PlannedJob, RunSummary, Runner};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ApiKey, RunOptions};
    pub use crate::error::{ClueGenError, Result};
    pub use crate::image::providers::OpenAiImageFetcher;
    pub use crate::image::{GeneratedImage, ImageFetcher};
    pub use crate::jobs::{jobs, Job};
    pub use crate::runner::Runner;
}
