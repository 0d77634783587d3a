//! Head Soccer headless runner
//!
//! Plays a full match from an input script at a simulated 60 Hz and prints
//! the final snapshot as JSON. Rendering and keyboard input live elsewhere.
//!
//! Usage: head-soccer [--settings PATH] [--script PATH] [--seed N]

use std::process::ExitCode;

use head_soccer::script::InputScript;
use head_soccer::sim::{MatchController, MatchPhase};
use head_soccer::{ConfigError, Roster, Settings};

/// Simulated display refresh
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Bail out if a match somehow never ends (one hour of frames)
const MAX_FRAMES: u64 = 60 * 60 * 60;

#[derive(Debug, Default)]
struct Args {
    settings: Option<String>,
    script: Option<String>,
    seed: u64,
}

fn parse_args() -> Result<Args, ConfigError> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| ConfigError::invalid(format!("{flag} needs a value")))
        };
        match flag.as_str() {
            "--settings" => args.settings = Some(value()?),
            "--script" => args.script = Some(value()?),
            "--seed" => {
                let raw = value()?;
                args.seed = raw
                    .parse()
                    .map_err(|_| ConfigError::invalid(format!("bad seed: {raw}")))?;
            }
            other => return Err(ConfigError::invalid(format!("unknown argument: {other}"))),
        }
    }
    Ok(args)
}

fn run() -> Result<(), ConfigError> {
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::default(),
    };
    log::info!("Input script covers {} frames", script.total_frames());

    // Same default picks as the selection screen: first two characters
    let roster = Roster::default();
    let (p1, p2) = (roster.get(0), roster.get(roster.cycle(0, 1)));
    let (Some(p1), Some(p2)) = (p1, p2) else {
        return Err(ConfigError::invalid("roster needs at least one character"));
    };
    log::info!("{} ({}) vs {} ({})", p1.name, p1.team, p2.name, p2.team);

    let mut game = MatchController::new(&settings, p1.id, p2.id, args.seed);

    let mut frame = 0u64;
    while game.phase() != MatchPhase::Ended && frame < MAX_FRAMES {
        let input = script.input_at(frame);
        game.update(frame as f64 * FRAME_MS, &input);
        frame += 1;
    }
    if game.phase() != MatchPhase::Ended {
        log::warn!("Match still running after {MAX_FRAMES} frames, stopping");
    }

    let json = serde_json::to_string_pretty(&game.snapshot())?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Head Soccer (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
