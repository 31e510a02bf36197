use std::time::{Duration, Instant};

use clap::{App, Arg};
use colored::*;
use skybus::subsystems::{BiteStatus, FlightMode, ThreatLevel};
use skybus::{ComputerConfig, MissionComputer};
use tokio::time;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let matches = App::new("skybus")
        .version("0.1.0")
        .author("Avionics Systems Engineering Team")
        .about("Avionics mission computer simulator")
        .arg(
            Arg::with_name("refresh")
                .short("r")
                .long("refresh")
                .value_name("MS")
                .help("Display refresh rate in milliseconds")
                .takes_value(true)
                .default_value("1000")
                .validator(|v| match v.parse::<u64>() {
                    Ok(ms) if ms > 0 => Ok(()),
                    _ => Err("Refresh rate must be a positive number".into()),
                }),
        )
        .arg(
            Arg::with_name("duration")
                .short("d")
                .long("duration")
                .value_name("SECONDS")
                .help("Run duration in seconds (default: until Ctrl-C)")
                .takes_value(true)
                .validator(|v| match v.parse::<u64>() {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Duration must be a number".into()),
                }),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("Fixed RNG seed for a replayable run")
                .takes_value(true)
                .validator(|v| match v.parse::<u64>() {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Seed must be a number".into()),
                }),
        )
        .arg(
            Arg::with_name("dropout")
                .long("dropout")
                .value_name("RATE")
                .help("Primary sensor dropout probability per tick (0.0-1.0)")
                .takes_value(true)
                .default_value("0.0")
                .validator(|v| match v.parse::<f64>() {
                    Ok(rate) if (0.0..=1.0).contains(&rate) => Ok(()),
                    _ => Err("Dropout must be between 0.0 and 1.0".into()),
                }),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .value_name("FORMAT")
                .help("Status output format")
                .takes_value(true)
                .possible_values(&["table", "compact", "json"])
                .default_value("table"),
        )
        .get_matches();

    let refresh_ms: u64 = matches.value_of("refresh").unwrap().parse()?;
    let duration = matches
        .value_of("duration")
        .map(|v| v.parse::<u64>())
        .transpose()?;
    let format = matches.value_of("format").unwrap().to_string();

    let config = ComputerConfig {
        seed: matches.value_of("seed").map(|v| v.parse::<u64>()).transpose()?,
        primary_dropout: matches.value_of("dropout").unwrap().parse()?,
        ..ComputerConfig::default()
    };

    let mut computer = MissionComputer::new(config);
    computer.start();
    info!("mission computer running, press Ctrl-C to stop");

    if format == "table" {
        print_table_header();
    }

    let started = Instant::now();
    let deadline = duration.map(|secs| started + Duration::from_secs(secs));
    let mut refresh = time::interval(Duration::from_millis(refresh_ms));

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                render_status(&computer, &format, started).await;
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    computer.stop().await;
    println!("{}", "Mission computer stopped".bright_green());
    Ok(())
}

fn print_table_header() {
    println!(
        "{}",
        "┌──────────────────────────────────────────────────────────────────────────────────────────┐"
            .bright_white()
    );
    println!(
        "{}",
        "│                            AVIONICS MISSION COMPUTER STATUS                              │"
            .bright_blue()
            .bold()
    );
    println!(
        "{}",
        "├──────────────────────────────────────────────────────────────────────────────────────────┤"
            .bright_white()
    );
    println!(
        "{}",
        "│ Uptime │ Altitude │ Speed  │ Fuel   │ Battery │ Mode          │ Threat │ BITE  │ Errors │"
            .bright_white()
    );
    println!(
        "{}",
        "├──────────────────────────────────────────────────────────────────────────────────────────┤"
            .bright_white()
    );
}

async fn render_status(computer: &MissionComputer, format: &str, started: Instant) {
    let state = computer.current_state().await;
    let mode = computer.current_mode().await;
    let power = computer.power_status().await;
    let threat = computer.threat_level().await;
    let bite = computer.bite_status().await;
    let commands = computer.commands().await;
    let route = computer.route().await;
    let errors = computer.journals().errors.len();
    let uptime = started.elapsed().as_secs();

    match format {
        "json" => {
            let report = serde_json::json!({
                "uptime_s": uptime,
                "state": state,
                "mode": mode,
                "commands": commands,
                "route": route,
                "power": power,
                "threat_level": threat,
                "bite_status": bite,
                "failover_pending": computer.failover_pending(),
                "error_count": errors,
            });
            println!("{report}");
        }
        "compact" => {
            let status = if bite == BiteStatus::Error {
                "BITE".yellow()
            } else if threat == ThreatLevel::High {
                "THREAT".red()
            } else {
                "OK".green()
            };
            println!(
                "[{uptime:>5}s] {status} | alt {:>7.1} | spd {:>6.1} | fuel {:>5.1}% | batt {:>5.1}% | {mode}",
                state.altitude, state.speed, state.fuel_level, power.battery_level,
            );
        }
        _ => {
            let fuel_str = if state.fuel_level < 10.0 {
                format!("{:>5.1}%", state.fuel_level).red()
            } else {
                format!("{:>5.1}%", state.fuel_level).green()
            };
            let battery_str = if power.battery_level < 20.0 {
                format!("{:>6.1}%", power.battery_level).red()
            } else {
                format!("{:>6.1}%", power.battery_level).green()
            };
            let mode_str = match mode {
                FlightMode::Normal => format!("{:<13}", mode.to_string()).bright_green(),
                FlightMode::HighAltitude => format!("{:<13}", mode.to_string()).bright_yellow(),
            };
            let threat_str = match threat {
                ThreatLevel::Low => format!("{:<6}", threat.to_string()).green(),
                ThreatLevel::Medium => format!("{:<6}", threat.to_string()).yellow(),
                ThreatLevel::High => format!("{:<6}", threat.to_string()).red(),
            };
            let bite_str = match bite {
                BiteStatus::Ok => format!("{:<5}", bite.to_string()).green(),
                BiteStatus::Error => format!("{:<5}", bite.to_string()).red(),
            };
            println!(
                "│ {:>5}s │ {:>8.1} │ {:>6.1} │ {} │ {} │ {} │ {} │ {} │ {:>6} │",
                uptime,
                state.altitude,
                state.speed,
                fuel_str,
                battery_str,
                mode_str,
                threat_str,
                bite_str,
                errors,
            );
        }
    }
}
