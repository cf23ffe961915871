mod cli;
mod cursor_types;
mod driver;
mod error;
mod session;
mod sink;
mod splash;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs, OutputFormat};
use driver::{DriverConfig, ReleaseDepth, ThreadSleeper};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::Session;
use sink::{CursorSink, JsonLinesSink, MontageSink, ProgressSink, RecordingSink};
use std::io;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Test {
            count,
            delay,
            release_depth,
            output,
        } => {
            let config = DriverConfig::new(count, Duration::ZERO)
                .with_delay_secs(delay)?
                .with_id(output.id.clone())
                .with_release_depth(release_depth);
            run_cursor(&config, &output)?;
        }
        Commands::Demo { output } => {
            let config = DriverConfig::new(10, Duration::from_millis(200))
                .with_id(output.id.clone())
                .with_release_depth(ReleaseDepth::Random);
            run_cursor(&config, &output)?;
        }
        Commands::Replay {
            path,
            delay,
            format,
            region,
        } => {
            let session = Session::load(&path)?;
            let config = DriverConfig::default()
                .with_delay_secs(delay.unwrap_or(session.delay_secs))?;
            let mut sink = event_writer(format, &region);
            driver::replay(&session.events, config.delay, &mut ThreadSleeper, &mut sink)?;
        }
        Commands::Splash { lines, width } => {
            let banner = splash::Banner::from_args(&lines);
            println!("{}", banner.render(width));
        }
    }

    Ok(())
}

fn run_cursor(config: &DriverConfig, output: &OutputArgs) -> Result<()> {
    let mut rng = match output.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut recorder = RecordingSink::forwarding(event_writer(output.format, &output.region));

    let summary = if output.progress {
        let pb = ProgressBar::new(u64::from(config.count));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30}] {pos}/{len} pairs {elapsed_precise}")
                .context("Invalid progress bar template")?,
        );
        let mut sink = ProgressSink::new(&mut recorder, pb);
        let result = driver::run(config, &mut rng, &mut ThreadSleeper, &mut sink);
        sink.finish();
        result?
    } else {
        driver::run(config, &mut rng, &mut ThreadSleeper, &mut recorder)?
    };

    if let Some(path) = &output.record {
        Session::new(config, output.seed, recorder.into_events()).save(path)?;
        info!(path = %path.display(), events = summary.events, "Saved session");
    }

    Ok(())
}

/// Sink that writes events to stdout in the chosen format
fn event_writer(format: OutputFormat, region: &str) -> Box<dyn CursorSink> {
    match format {
        OutputFormat::Json => Box::new(JsonLinesSink::new(io::stdout())),
        OutputFormat::Montage => Box::new(MontageSink::with_region(io::stdout(), region)),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cursorgen={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
