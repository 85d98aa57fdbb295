//! Sequential run over the job list: skip, fetch, write, pause.
//!
//! Jobs are processed strictly one at a time. The first fetch or write
//! failure halts the run; later jobs are never attempted.

use crate::config::RunOptions;
use crate::error::Result;
use crate::image::ImageFetcher;
use crate::jobs::{validate_jobs, Job};
use crate::prompt::build_prompt;
use std::path::{Path, PathBuf};

/// Outcome of a run that processed every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths written during this run, in processing order.
    pub generated: Vec<PathBuf>,
    /// Paths left untouched because they were already complete.
    pub skipped: Vec<PathBuf>,
}

impl RunSummary {
    /// Total number of jobs the run went through.
    pub fn total(&self) -> usize {
        self.generated.len() + self.skipped.len()
    }
}

/// What a run would do for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedJob {
    /// The job.
    pub job: Job,
    /// Where its image goes.
    pub path: PathBuf,
    /// Whether the existing output would be kept.
    pub skip: bool,
    /// The prompt that would be sent.
    pub prompt: String,
}

/// Drives one fetcher over a list of jobs.
#[derive(Debug)]
pub struct Runner<F> {
    fetcher: F,
    options: RunOptions,
}

impl<F: ImageFetcher> Runner<F> {
    /// Creates a runner.
    pub fn new(fetcher: F, options: RunOptions) -> Self {
        Self { fetcher, options }
    }

    /// Returns the fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the run options.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Output path for a job.
    pub fn output_path(&self, job: &Job) -> PathBuf {
        self.options.output_dir.join(job.filename)
    }

    /// Reports what [`Runner::run`] would do, without touching the network
    /// or the filesystem.
    pub fn plan(&self, jobs: &[Job]) -> Result<Vec<PlannedJob>> {
        plan(&self.options, jobs)
    }

    /// Processes every job in order.
    ///
    /// The configured delay follows every written image, the last one
    /// included. Skipped jobs are not followed by a delay.
    pub async fn run(&self, jobs: &[Job]) -> Result<RunSummary> {
        validate_jobs(jobs)?;
        std::fs::create_dir_all(&self.options.output_dir)?;

        let mut summary = RunSummary::default();

        for job in jobs {
            let path = self.output_path(job);

            if should_skip(&self.options, &path) {
                println!(
                    "Skipping {} (already exists). Use --force to replace.",
                    job.filename
                );
                summary.skipped.push(path);
                continue;
            }

            let prompt = build_prompt(job);
            println!("Generating clue {} -> {}", job.id, job.filename);

            let image = match self.fetcher.fetch(&prompt).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!(
                        job = job.id,
                        fetcher = self.fetcher.name(),
                        error = %e,
                        "fetch failed, halting run"
                    );
                    return Err(e.for_job(job.id));
                }
            };

            image.save(&path).map_err(|e| e.for_job(job.id))?;
            println!("Wrote {}", path.display());
            tracing::debug!(
                job = job.id,
                bytes = image.size(),
                model = ?image.metadata.model,
                duration_ms = ?image.metadata.duration_ms,
                downloaded = image.metadata.downloaded,
                "image written"
            );
            summary.generated.push(path);

            tokio::time::sleep(self.options.delay).await;
        }

        tracing::info!(
            generated = summary.generated.len(),
            skipped = summary.skipped.len(),
            "run complete"
        );
        Ok(summary)
    }
}

/// Reports, per job, its output path, whether it would be skipped, and
/// the prompt that would be sent.
pub fn plan(options: &RunOptions, jobs: &[Job]) -> Result<Vec<PlannedJob>> {
    validate_jobs(jobs)?;
    Ok(jobs
        .iter()
        .map(|job| {
            let path = options.output_dir.join(job.filename);
            PlannedJob {
                job: *job,
                skip: should_skip(options, &path),
                prompt: build_prompt(job),
                path,
            }
        })
        .collect())
}

fn should_skip(options: &RunOptions, path: &Path) -> bool {
    !options.force && is_complete(path)
}

/// A job is complete when a non-empty file exists at its output path.
fn is_complete(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}
