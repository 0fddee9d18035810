// src/bin/altitude_sim.rs

//! Runs a mission script through the closed-loop altitude simulation.
//!
//! Usage:
//!   cargo run --bin altitude_sim -- [MISSION] [OPTIONS]
//!
//! Options:
//!   --seed <N>        Seed the sensor noise for a reproducible run
//!   --steps <N>       Step budget (default: 500)
//!   --noise <SIGMA>   Sensor noise standard deviation in meters (default: 0.5)
//!
//! Set `RUST_LOG=debug` to see each command complete.

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use quadcopter_altitude_sim::{load_mission, run_mission_seeded, SimulationConfig, SimulationStatus};

const DEFAULT_MISSION: &str = "data/mission.txt";

struct Args {
    mission: PathBuf,
    config: SimulationConfig,
}

fn parse_args() -> Args {
    let mut args = Args {
        mission: PathBuf::from(DEFAULT_MISSION),
        config: SimulationConfig::new(),
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--seed" => {
                i += 1;
                args.config.seed = Some(parse_arg(&raw, i, "seed"));
            }
            "--steps" => {
                i += 1;
                args.config.max_steps = parse_arg(&raw, i, "steps");
            }
            "--noise" => {
                i += 1;
                args.config.noise_std_dev = parse_arg(&raw, i, "noise");
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
            path => args.mission = PathBuf::from(path),
        }
        i += 1;
    }

    args
}

fn parse_arg<T: FromStr>(raw: &[String], i: usize, name: &str) -> T {
    raw.get(i)
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --{name}");
            process::exit(1);
        })
}

fn print_usage() {
    eprintln!(
        "Usage: altitude_sim [MISSION] [OPTIONS]\n\
         \n\
         Arguments:\n\
         \x20 MISSION          Mission script (default: {DEFAULT_MISSION})\n\
         \n\
         Options:\n\
         \x20 --seed <N>       Seed the sensor noise for a reproducible run\n\
         \x20 --steps <N>      Step budget (default: 500)\n\
         \x20 --noise <SIGMA>  Sensor noise standard deviation in meters (default: 0.5)\n\
         \x20 -h, --help       Show this help"
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    let commands = match load_mission(&args.mission) {
        Ok(commands) => commands,
        Err(error) => {
            log::error!("{error}");
            process::exit(1);
        }
    };
    log::info!(
        "loaded {} commands from {}",
        commands.len(),
        args.mission.display()
    );

    let outcome = match run_mission_seeded(commands, args.config) {
        Ok(outcome) => outcome,
        Err(error) => {
            log::error!("{error}");
            process::exit(1);
        }
    };

    // One line per simulated second
    let stride = ((1.0 / args.config.dt).round() as usize).max(1);
    println!("   Time,     True, Estimate");
    for sample in outcome.history.iter().step_by(stride) {
        println!(
            "{:7.1}, {:8.3}, {:8.3}",
            sample.time, sample.true_altitude, sample.estimate
        );
    }

    match (outcome.status, outcome.history.last()) {
        (SimulationStatus::Completed, Some(last)) => log::info!(
            "mission completed at t={:.1}s, altitude {:.3} m (estimate {:.3} m)",
            last.time,
            last.true_altitude,
            last.estimate
        ),
        (SimulationStatus::Completed, None) => log::info!("mission completed without flying"),
        (SimulationStatus::Exhausted, _) => log::warn!(
            "mission incomplete after {} steps",
            args.config.max_steps
        ),
    }
}
