use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use crate::config::{default_config_path, Config};
use crate::output::{ConsoleOutput, FileOutput, Format, QuizOutput};
use crate::prompt::TerminalPrompt;
use crate::quiz::substitution::{AlwaysSubstitute, FailFast, SubstitutionPolicy};
use crate::quiz::Composer;

mod batch;
mod config;
mod error;
mod output;
mod prompt;
mod quiz;

#[derive(Parser)]
#[command(name = "quizgen", version, about = "Generates randomized practice quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a batch of quizzes
    Generate(GenerateArgs),
    /// Show how many key and regular questions each type has
    Pools(PoolsArgs),
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides number_to_generate
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    format: Option<Format>,
    /// Fail instead of asking before substituting regular questions for key ones
    #[arg(long, conflicts_with = "substitute")]
    non_interactive: bool,
    /// Substitute regular questions for key ones without asking
    #[arg(long)]
    substitute: bool,
    #[arg(long)]
    debug: bool,
}

#[derive(Args)]
struct PoolsArgs {
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }
    builder.init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => default_config_path()?,
    };
    info!("Reading config from {}", path.display());
    Config::open(&path)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config(args.config)?;
    if let Some(format) = args.format {
        config.format = format;
    }
    let mut pools = batch::load_pools(&config)?;

    let rng = match args.seed.or(config.seed) {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let substitution: Box<dyn SubstitutionPolicy> = if args.non_interactive {
        Box::new(FailFast)
    } else if args.substitute {
        Box::new(AlwaysSubstitute)
    } else {
        Box::new(TerminalPrompt::new(io::stdin().lock(), io::stdout()))
    };
    let mut composer = Composer::new(rng, substitution);

    let mut output: Box<dyn QuizOutput> = match &config.paths.results_directory {
        Some(directory) => {
            fs::create_dir_all(directory)
                .with_context(|| format!("Could not create {}", directory.display()))?;
            Box::new(FileOutput::new(directory.clone(), config.format))
        }
        None => Box::new(ConsoleOutput::new(io::stdout())),
    };

    let quiz_count = args.count.map_or_else(|| config.quiz_count(), |count| count.max(1));
    batch::run_batch(&config, &mut pools, quiz_count, &mut composer, output.as_mut())
}

fn show_pools(args: PoolsArgs) -> Result<()> {
    let config = load_config(args.config)?;
    let pools = batch::load_pools(&config)?;
    let counts = pools.counts();
    for (question_type, info) in config.question_types.iter() {
        if let Some(count) = counts.get(question_type) {
            println!(
                "{:<6} key: {:>4}  regular: {:>4}  {}",
                question_type,
                count.key,
                count.regular,
                info.description.as_deref().unwrap_or("")
            );
        }
    }
    let empty = config
        .question_types
        .codes()
        .filter(|question_type| !counts.contains_key(*question_type))
        .join(", ");
    if !empty.is_empty() {
        println!("No questions for: {}", empty);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let debug = match &cli.command {
        Command::Generate(args) => args.debug,
        Command::Pools(_) => false,
    };
    init_logging(debug);

    let result = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Pools(args) => show_pools(args),
    };
    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}
