//! CLI for cluegen - generate the clue scene images.

use anyhow::Context;
use clap::Parser;
use cluegen::config::{DEFAULT_DELAY_MS, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT};
use cluegen::{jobs, ApiKey, ClueGenError, OpenAiImageFetcher, RunOptions, Runner};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cluegen")]
#[command(about = "Generate clue scene PNGs with the OpenAI Images API (gpt-image-1)")]
#[command(version)]
struct Cli {
    /// Replace existing output images
    #[arg(long)]
    force: bool,

    /// Directory the images are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Pause after each generated image, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Print what would be generated and exit without calling the API
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions::new(&self.output_dir)
            .with_force(self.force)
            .with_delay(Duration::from_millis(self.delay_ms))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cluegen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            let code = err
                .downcast_ref::<ClueGenError>()
                .map(ClueGenError::exit_code)
                .unwrap_or(cluegen::EXIT_RUN_FAILED);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.run_options();

    if cli.dry_run {
        return print_plan(options);
    }

    // Checked before anything touches the network or the output directory
    let api_key = ApiKey::from_env()?;

    let fetcher = OpenAiImageFetcher::builder()
        .api_key(api_key)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;

    tracing::debug!(
        output_dir = %options.output_dir.display(),
        force = options.force,
        delay_ms = cli.delay_ms,
        timeout_secs = cli.timeout_secs,
        "starting run"
    );

    let runner = Runner::new(fetcher, options);
    runner.run(jobs()).await?;
    Ok(())
}

fn print_plan(options: RunOptions) -> anyhow::Result<()> {
    for planned in cluegen::runner::plan(&options, jobs())? {
        let action = if planned.skip { "skip" } else { "generate" };
        println!(
            "[{action}] clue {} -> {}",
            planned.job.id,
            planned.path.display()
        );
        println!("    {}", planned.prompt.replace('\n', "\n    "));
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    let Some(gen_err) = err.downcast_ref::<ClueGenError>() else {
        eprintln!("Error: {err:#}");
        return;
    };

    match (gen_err.job_id(), gen_err.root()) {
        (_, ClueGenError::MissingApiKey(var)) => {
            eprintln!("Missing {var}. Export it and rerun this command.");
        }
        (Some(id), ClueGenError::Api { status, body }) => {
            eprintln!("OpenAI API error for clue {id}: HTTP {status}");
            eprintln!("{body}");
        }
        (Some(id), root) => {
            eprintln!("Generation failed for clue {id}: {root}");
        }
        (None, root) => {
            eprintln!("Error: {root}");
        }
    }
}
