use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "unwind", version, about = "Unwind: guided exercises to settle down")]
struct Cli {
    /// Log debug output to stderr (UNWIND_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available tools
    Tools,
    /// 4-4-4-2 breathing session
    Breathe {
        /// Session length in seconds: 60, 120 or 300
        #[arg(long)]
        duration: Option<u64>,
        #[command(flatten)]
        run: commands::timed::RunArgs,
    },
    /// Start breathing right away with the configured defaults
    Panic {
        #[command(flatten)]
        run: commands::timed::RunArgs,
    },
    /// 90-second guided body reset
    BodyReset {
        #[command(flatten)]
        run: commands::timed::RunArgs,
    },
    /// 5-4-3-2-1 grounding; one answer per line on stdin
    Ground,
    /// Write out a thought from stdin, then release or save it
    Dump {
        /// Save to thought-YYYY-MM-DD.txt instead of releasing
        #[arg(long)]
        save: bool,
        /// Directory to save into (defaults to export.directory)
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },
    /// Random prompts to shift your perspective
    Reframe {
        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
        /// Number of prompts to draw
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("UNWIND_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tools => commands::tools::run(),
        Commands::Breathe { duration, run } => commands::timed::breathe(duration, run),
        Commands::Panic { run } => commands::timed::breathe(None, run),
        Commands::BodyReset { run } => commands::timed::body_reset(run),
        Commands::Ground => commands::ground::run(),
        Commands::Dump { save, dir } => commands::dump::run(save, dir),
        Commands::Reframe { seed, count } => commands::reframe::run(seed, count),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
