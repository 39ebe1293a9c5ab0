use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "studybreak")]
#[command(about = "A terminal study/break timer with ambient music")]
#[command(long_about = "studybreak - study/break timer for the terminal

Counts down a study interval, switches to a break, plays study music and a
rotating break playlist, and now and then stops to say well done.

QUICK START:
  studybreak run                 Open the timer with the default duration
  studybreak run --minutes 45    Start with 45-minute study sessions
  studybreak durations           List the selectable durations
  studybreak config init         Write the default config to ~/.studybreak/

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Path to the config file (default: ~/.studybreak/config.yaml)
    #[arg(long, global = true, env = "STUDYBREAK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer
    ///
    /// Keys: s start, p pause, r reset, m music on/off, n next break track,
    /// 1-9 pick a study duration, Enter continue, q quit.
    #[command(alias = "r")]
    Run(RunArgs),

    /// List selectable study durations
    ///
    /// Shows each study duration with its break length and how many
    /// sessions pass between appreciation cards.
    #[command(alias = "d")]
    Durations,

    /// Show, check or create the config file
    Config(ConfigArgs),

    /// Run sessions headless and print what happens
    ///
    /// Drives the timer without audio or a terminal UI, continuing past
    /// every prompt immediately. Handy for checking a config.
    ///
    /// # Examples
    ///
    ///   studybreak simulate --minutes 45 --cycles 4
    ///   studybreak simulate -o json --seed 7
    Simulate(SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Whether the command drives a session and should log to the file.
    ///
    /// Informational commands leave `~/.studybreak/` untouched.
    #[must_use]
    pub const fn writes_log(&self) -> bool {
        matches!(self, Self::Run(_) | Self::Simulate(_))
    }
}

/// Arguments for `run`.
#[derive(Args)]
pub struct RunArgs {
    /// Study duration in minutes (must be one of the configured durations)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Start with music switched off
    #[arg(long)]
    pub no_music: bool,
}

/// Arguments for `config`.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings
    Show,
    /// Check the settings and report problems
    Validate,
    /// Write the default settings to disk
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

/// Arguments for `simulate`.
#[derive(Args)]
pub struct SimulateArgs {
    /// Study duration in minutes (default: from config)
    #[arg(short, long)]
    pub minutes: Option<u32>,

    /// Number of study+break cycles to run
    #[arg(short, long, default_value_t = 3)]
    pub cycles: u32,

    /// Seed for the motivation message picker
    #[arg(long)]
    pub seed: Option<u64>,
}
