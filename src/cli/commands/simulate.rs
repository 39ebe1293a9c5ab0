//! Simulate command implementation.
//!
//! Drives a session controller headless, one simulated second at a time,
//! and reports every state change it produced.

use std::time::Instant;

use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use crate::audio::SilentAudio;
use crate::cli::args::{OutputFormat, SimulateArgs};
use crate::config::Config;
use crate::error::StudyError;
use crate::output::{format_clock, to_json};
use crate::session::{
    format_duration, render_progress_bar, AppreciationPolicy, Interstitial, IntervalScheduler,
    MotivationMessages, SessionController, SessionEvent, TICK_PERIOD,
};

type HeadlessController = SessionController<SilentAudio, Vec<SessionEvent>, IntervalScheduler>;

/// One recorded state change.
#[derive(Debug, Serialize)]
pub struct SimulationStep {
    /// Simulated seconds since the first start.
    pub at_seconds: u64,
    /// Session number when the change happened.
    pub session: u32,
    /// What changed.
    pub event: SessionEvent,
}

/// Result of a headless run.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub study_minutes: u32,
    pub break_minutes: u32,
    pub appreciation: AppreciationPolicy,
    pub cycles: u32,
    pub total_seconds: u64,
    pub steps: Vec<SimulationStep>,
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the requested duration is
/// not configured, or output formatting fails.
pub fn simulate(
    config: &Config,
    args: &SimulateArgs,
    format: OutputFormat,
) -> Result<String, StudyError> {
    let report = run_simulation(config, args)?;

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(format_report(&report)),
    }
}

/// Run the configured number of study+break cycles.
///
/// Every prompt is continued as soon as it appears. The run stops at the
/// final break-complete prompt.
///
/// # Errors
///
/// Returns `StudyError::Configuration` if the settings or `args.minutes`
/// are invalid.
pub fn run_simulation(config: &Config, args: &SimulateArgs) -> Result<SimulationReport, StudyError> {
    let mut controller: HeadlessController = SessionController::from_config(
        config,
        SilentAudio,
        Vec::new(),
        IntervalScheduler::starting_now(),
    )?;

    if let Some(seed) = args.seed {
        controller = controller.with_messages(MotivationMessages::with_seed(
            config.messages.motivation.clone(),
            seed,
        ));
    }
    if let Some(minutes) = args.minutes {
        controller.select_duration(minutes)?;
    }

    let origin = controller.scheduler().now();
    let mut recorder = Recorder::new(origin);

    controller.refresh();
    controller.start();
    recorder.collect(&controller, origin);
    let mut now = origin;

    for cycle in 1..=args.cycles {
        loop {
            if !controller.is_running() {
                match controller.interstitial() {
                    Interstitial::AwaitingStudyContinue => {
                        controller.resolve_interstitial();
                        recorder.collect(&controller, now);
                        continue;
                    }
                    Interstitial::AwaitingBreakContinue => break,
                    Interstitial::None => {
                        return Err(StudyError::Configuration(
                            "timer stopped without a pending prompt".to_string(),
                        ));
                    }
                }
            }

            now += TICK_PERIOD;
            controller.advance(now);
            recorder.collect(&controller, now);
        }

        debug!(cycle, session = controller.session_count(), "cycle finished");
        if cycle < args.cycles {
            controller.resolve_interstitial();
            recorder.collect(&controller, now);
        }
    }

    let session = controller.config();
    let total_seconds = now.duration_since(origin).as_secs();
    info!(cycles = args.cycles, total_seconds, "simulation finished");

    Ok(SimulationReport {
        study_minutes: session.study_minutes,
        break_minutes: session.break_minutes,
        appreciation: controller.table().policy(),
        cycles: args.cycles,
        total_seconds,
        steps: recorder.steps,
    })
}

/// Turns new presenter events into timestamped steps, skipping ticks.
struct Recorder {
    origin: Instant,
    seen: usize,
    steps: Vec<SimulationStep>,
}

impl Recorder {
    const fn new(origin: Instant) -> Self {
        Self {
            origin,
            seen: 0,
            steps: Vec::new(),
        }
    }

    fn collect(&mut self, controller: &HeadlessController, now: Instant) {
        let events = controller.presenter();
        let at_seconds = now.duration_since(self.origin).as_secs();

        for event in &events[self.seen..] {
            if matches!(event, SessionEvent::Tick { .. }) {
                continue;
            }
            self.steps.push(SimulationStep {
                at_seconds,
                session: controller.session_count(),
                event: event.clone(),
            });
        }
        self.seen = events.len();
    }
}

fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Tick {
            remaining_seconds, ..
        } => format!("{remaining_seconds}s left"),
        SessionEvent::PhaseChanged { phase } => {
            if phase.is_break() {
                phase.display_name().green().bold().to_string()
            } else {
                phase.display_name().cyan().bold().to_string()
            }
        }
        SessionEvent::MusicStateChanged { enabled } => {
            format!("music {}", if *enabled { "on" } else { "off" })
        }
        SessionEvent::InterstitialShown { kind, message } => {
            format!("{}: {}", kind.title().yellow(), message)
        }
        SessionEvent::InterstitialHidden => format!("{}", "continued".dimmed()),
        SessionEvent::DurationChanged { config } => format!(
            "{} min study / {} min break",
            config.study_minutes, config.break_minutes
        ),
    }
}

fn format_report(report: &SimulationReport) -> String {
    let mut lines = vec![
        format!(
            "{} {} cycle(s) of {} min study / {} min break",
            "Simulated".bold(),
            report.cycles,
            report.study_minutes,
            report.break_minutes
        ),
        "─".repeat(50),
    ];

    for step in &report.steps {
        lines.push(format!(
            "{}  #{:<3} {}",
            format_clock(step.at_seconds).dimmed(),
            step.session,
            describe(&step.event)
        ));
    }

    let total = i64::try_from(report.total_seconds).unwrap_or(i64::MAX);
    let study_share = f64::from(report.study_minutes)
        / f64::from(report.study_minutes + report.break_minutes).max(1.0);

    lines.push(String::new());
    lines.push(format!(
        "Study share {} {:.0}%",
        render_progress_bar(study_share, 20),
        study_share * 100.0
    ));
    lines.push(format!(
        "Total: {} ({})",
        format_clock(report.total_seconds),
        format_duration(chrono::Duration::seconds(total))
    ));
    lines.join("\n")
}
