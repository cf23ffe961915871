use crate::driver::ReleaseDepth;
use crate::sink::DEFAULT_REGION;
use crate::splash::DEFAULT_WIDTH;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cursorgen")]
#[command(about = "Drive synthetic cursor down/up events into an event sink")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send COUNT random down/up pairs, pausing DELAY seconds after each event
    Test {
        /// Number of down/up pairs
        #[arg(default_value_t = 10)]
        count: u32,

        /// Seconds to wait after every event
        #[arg(default_value_t = 0.1)]
        delay: f64,

        /// Depth used for "up" events
        #[arg(long, value_enum, default_value_t = ReleaseDepth::Zero)]
        release_depth: ReleaseDepth,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Send 10 random down/up pairs, 0.2 seconds apart, with random "up" depth
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-send the events of a session saved with --record
    Replay {
        /// Session file
        path: PathBuf,

        /// Seconds to wait after every event (defaults to the recorded delay)
        #[arg(long)]
        delay: Option<f64>,

        /// Output format for events written to stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Montage region (only used with --format montage)
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },

    /// Print a centered message banner
    Splash {
        /// Message lines; a literal \n inside a line starts a new row
        lines: Vec<String>,

        /// Banner width in columns
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: usize,
    },
}

#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Cursor identifier carried by every event
    #[arg(long, default_value = "0")]
    pub id: String,

    /// Seed for reproducible coordinates
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format for events written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Montage region (only used with --format montage)
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Save the run (parameters and events) to a JSON file
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON cursor event per line
    Json,
    /// Montage subscribed-event arguments (cursor_down / cursor_up)
    Montage,
}
