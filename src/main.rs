use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studybreak::cli::args::{Cli, Commands};
use studybreak::cli::commands;
use studybreak::config::Paths;
use studybreak::error::StudyError;

fn main() {
    let cli = Cli::parse();

    if cli.command.writes_log() {
        if let Err(e) = init_tracing() {
            eprintln!("{}: logging disabled: {e}", "warning".yellow().bold());
        }
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), StudyError> {
    let format = cli.output;
    let explicit = cli.config.as_deref();

    let output = match cli.command {
        Commands::Run(args) => {
            let config = commands::load_config(explicit)?;
            let music = config.audio.music_enabled && !args.no_music;
            studybreak::tui::run(&config, args.minutes, music)?;
            String::new()
        }
        Commands::Durations => commands::durations(&commands::load_config(explicit)?, format)?,
        Commands::Config(args) => {
            commands::config(&args.command, &commands::config_path(explicit)?, format)?
        }
        Commands::Simulate(args) => {
            commands::simulate(&commands::load_config(explicit)?, &args, format)?
        }
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to `~/.studybreak/studybreak.log`; the TUI owns the terminal.
fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,studybreak=info"));

    let paths = Paths::new()?;
    paths.ensure_dirs()?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}
