use clap::Parser;
use eyre::Result;
use std::io;
use std::path::PathBuf;
use todostore::{IdGenerator, SequentialIds, Shell, TaskStore, UuidIds, seed};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todostore")]
#[command(about = "todostore - interactive in-memory to-do list")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// JSONL file of tasks to start the session with
    #[arg(short, long, conflicts_with = "empty")]
    seed: Option<PathBuf>,

    /// Start with no tasks instead of the built-in samples
    #[arg(long)]
    empty: bool,

    /// Generate UUID v7 ids instead of sequential numbers
    #[arg(long)]
    uuid: bool,

    /// Log store activity at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    let tasks = match (&cli.seed, cli.empty) {
        (Some(path), _) => seed::load_jsonl(path)?,
        (None, true) => Vec::new(),
        (None, false) => seed::builtin(),
    };

    let ids: Box<dyn IdGenerator> = if cli.uuid {
        Box::new(UuidIds)
    } else {
        Box::new(SequentialIds::new())
    };

    println!("todostore {} - type `help` for commands", env!("GIT_DESCRIBE"));

    let mut shell = Shell::new(TaskStore::with_seed(ids, tasks));
    shell.run(io::stdin().lock(), io::stdout())?;

    Ok(())
}
