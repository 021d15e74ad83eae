//! Headless battle runner.
//!
//! Loads a battle document, then drives the controller with a fixed time step
//! and an autopilot standing in for the player: the first ready unit always
//! uses its first move on the default target.

use atb_battle::{
    BattleConfig, BattleController, BattleEvent, BattleOutcome, BattleResult, BattleView,
    EventBus, SelectionPhase, Side,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "atb-battle")]
#[command(about = "Run an active-time battle with an autopilot player")]
struct Args {
    /// Battle document in RON; the built-in skirmish when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the enemy AI, overriding the document's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds of battle time per tick
    #[arg(long, default_value_t = 0.5)]
    dt: f32,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 1000)]
    max_ticks: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One line per visible event
    Text,
    /// A single JSON report once the run stops
    Json,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleReport {
    outcome: Option<BattleOutcome>,
    ticks: u32,
    events: Vec<BattleEvent>,
    final_state: BattleView,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => BattleConfig::load(path),
        None => BattleConfig::default_battle(),
    };
    let mut controller = match config.and_then(|config| config.build_controller(args.seed)) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Error setting up battle: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut log = EventLog::new(args.format);
    let ticks = match run(&mut controller, &args, &mut log) {
        Ok(ticks) => ticks,
        Err(e) => {
            eprintln!("Battle aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.format {
        OutputFormat::Text => {
            if controller.outcome().is_none() {
                println!("No winner after {} ticks.", ticks);
            }
        }
        OutputFormat::Json => {
            let report = BattleReport {
                outcome: controller.outcome(),
                ticks,
                events: log.collected,
                final_state: controller.view(),
            };
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing report: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }
    ExitCode::SUCCESS
}

/// Prints events as they happen, or keeps them for the JSON report.
struct EventLog {
    format: OutputFormat,
    collected: Vec<BattleEvent>,
}

impl EventLog {
    fn new(format: OutputFormat) -> Self {
        Self {
            format,
            collected: Vec::new(),
        }
    }

    fn record(&mut self, events: EventBus) {
        match self.format {
            OutputFormat::Text => {
                for line in events.formatted() {
                    println!("{}", line);
                }
            }
            OutputFormat::Json => self.collected.extend(events.into_events()),
        }
    }
}

/// Returns the number of ticks run.
fn run(controller: &mut BattleController, args: &Args, log: &mut EventLog) -> BattleResult<u32> {
    let mut ticks = 0;
    while ticks < args.max_ticks && !controller.is_finished() {
        ticks += 1;
        log.record(controller.tick(args.dt)?);
        if !controller.is_finished() {
            autopilot(controller, log)?;
        }
    }

    if let Some(outcome) = controller.outcome() {
        tracing::info!(?outcome, ticks, "battle over");
    }
    Ok(ticks)
}

/// Select the first ready unit and confirm through all three menus.
fn autopilot(controller: &mut BattleController, log: &mut EventLog) -> BattleResult<()> {
    if controller.phase() != SelectionPhase::UnitSelect {
        return Ok(());
    }
    let Some(ready_index) = controller
        .roster(Side::Player)
        .iter()
        .position(|unit| unit.is_action_ready())
    else {
        return Ok(());
    };

    while controller.unit_cursor() != ready_index {
        log.record(controller.navigate_down()?);
    }
    for _ in 0..3 {
        log.record(controller.confirm()?);
    }
    Ok(())
}
