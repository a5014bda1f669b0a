pub mod cli;

use std::io::{self, BufRead, Write};

use clap::Parser;

use cli::{apply_overrides, Cli, StrategyArg};
use model::{Direction, SimConfig, SimEvent};
use sim::Simulator;

fn main() -> anyhow::Result<()> {
    common::init_logger("elevator-sim");

    let args = Cli::parse();
    let mut cfg = SimConfig::from_env();
    apply_overrides(&args, &mut cfg);

    let mut sim = Simulator::new(cfg);
    if args.warmup_ticks > 0 {
        let step = sim.config().floor_travel_time_ms;
        for _ in 0..args.warmup_ticks {
            sim.tick(step);
        }
        sim.take_events();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut io_error_seen = false;

    loop {
        print_menu();
        let Some(choice) = prompt_line(&mut lines, "> ") else {
            break;
        };

        match choice.trim() {
            "1" => {
                let ticks = prompt_u32(&mut lines, "ticks to run [10]: ").unwrap_or(10);
                let step = sim.config().floor_travel_time_ms;
                for _ in 0..ticks {
                    sim.tick(step);
                }
                print_events(&sim_take_events(&mut sim));
            }
            "2" => {
                sim.reset();
                println!("simulation reset");
                sim_take_events(&mut sim);
            }
            "3" => {
                if let Some((source, target, count)) = prompt_triple(&mut lines) {
                    match sim.submit(source, target, count) {
                        Ok(Some(id)) => println!("admitted request #{id}"),
                        Ok(None) => println!("rejected by an admission cap"),
                        Err(e) => println!("invalid request: {e}"),
                    }
                }
            }
            "4" => match prompt_line(&mut lines, "file path: ") {
                Some(path) => {
                    if let Err(e) = load_requests_from_file(&mut sim, path.trim()) {
                        eprintln!("failed to load {}: {e}", path.trim());
                        io_error_seen = true;
                    }
                }
                None => break,
            },
            "5" => print_status(&sim),
            "6" => {
                if let Some(choice) = prompt_line(&mut lines, "strategy [nearest-first|load-aware|energy-saving]: ") {
                    match parse_strategy(choice.trim()) {
                        Some(s) => {
                            sim.set_strategy(s.into());
                            println!("strategy changed");
                        }
                        None => println!("unrecognized strategy"),
                    }
                }
            }
            "7" => print_stats(&sim),
            "8" => {
                if let Some(path) = prompt_line(&mut lines, "file path: ") {
                    match export_stats_json(&sim, path.trim()) {
                        Ok(()) => println!("wrote statistics to {}", path.trim()),
                        Err(e) => {
                            eprintln!("failed to write {}: {e}", path.trim());
                            io_error_seen = true;
                        }
                    }
                }
            }
            "9" => break,
            other => println!("unrecognized option: {other}"),
        }
    }

    std::process::exit(if io_error_seen { 1 } else { 0 });
}

fn sim_take_events(sim: &mut Simulator) -> Vec<SimEvent> {
    sim.take_events()
}

fn print_menu() {
    println!(
        "\n1) start  2) reset  3) submit request  4) load from file  5) status  6) strategy  7) statistics  8) export statistics (json)  9) exit"
    );
}

fn prompt_line(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok();
    lines.next()?.ok()
}

fn prompt_u32(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Option<u32> {
    prompt_line(lines, prompt)?.trim().parse().ok()
}

fn prompt_triple(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<(u32, u32, u32)> {
    let line = prompt_line(lines, "source target count: ")?;
    parse_triple(&line)
}

fn parse_triple(line: &str) -> Option<(u32, u32, u32)> {
    let mut parts = line.split_whitespace();
    let source = parts.next()?.parse().ok()?;
    let target = parts.next()?.parse().ok()?;
    let count = parts.next()?.parse().ok()?;
    Some((source, target, count))
}

fn parse_strategy(s: &str) -> Option<StrategyArg> {
    match s {
        "nearest-first" => Some(StrategyArg::NearestFirst),
        "load-aware" => Some(StrategyArg::LoadAware),
        "energy-saving" => Some(StrategyArg::EnergySaving),
        _ => None,
    }
}

/// Load whitespace-triple requests from a file, one per line; malformed
/// lines are skipped (spec.md section 6). Only the file-open itself is
/// treated as fatal -- a malformed line is not an I/O failure.
fn load_requests_from_file(sim: &mut Simulator, path: &str) -> io::Result<()> {
    let file = std::fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    let mut admitted = 0;
    let mut skipped = 0;

    for line in reader.lines() {
        let line = line?;
        match parse_triple(&line) {
            Some((source, target, count)) => match sim.submit(source, target, count) {
                Ok(Some(_)) => admitted += 1,
                _ => skipped += 1,
            },
            None => skipped += 1,
        }
    }

    println!("loaded {admitted} requests, skipped {skipped} malformed/rejected lines");
    sim_take_events(sim);
    Ok(())
}

/// Dump the active strategy's running statistics as pretty-printed JSON,
/// for feeding a dashboard or a scripted comparison across strategies.
fn export_stats_json(sim: &Simulator, path: &str) -> io::Result<()> {
    let body = serde_json::to_string_pretty(sim.stats())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, body)
}

fn direction_char(d: Direction) -> char {
    d.as_char()
}

fn print_status(sim: &Simulator) {
    println!("-- cabins --");
    for cabin in sim.cabins() {
        println!(
            "cabin {}: floor {} dir {} load {}/{} stops {:?}",
            cabin.id,
            cabin.current_floor,
            direction_char(cabin.direction),
            cabin.load,
            sim.config().capacity,
            cabin.stops
        );
    }

    println!("-- floors --");
    for floor in 1..=sim.config().floor_count {
        let waiting = sim.waiting(floor);
        if waiting.is_empty() {
            continue;
        }
        let groups: Vec<(u32, u32)> = waiting.iter().map(|g| (g.target_floor, g.count)).collect();
        let total: u32 = waiting.iter().map(|g| g.count).sum();
        println!("floor {floor}: waiting {total} groups {groups:?}");
    }

    println!(
        "pending (unassigned): {}  admission cap drops: {}",
        sim.pending_count(),
        sim.admission_cap_drops()
    );
}

fn print_stats(sim: &Simulator) {
    let stats = sim.stats();
    println!(
        "strategy {:?}: attempts {} successes {} ({:.1}% ) mean wait {:.0}ms mean pickup distance {:.2}",
        sim.config().strategy,
        stats.total_assignments,
        stats.successful_assignments,
        stats.success_rate() * 100.0,
        stats.mean_wait_ms,
        stats.mean_distance
    );
}

fn print_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::Admitted { request_id } => println!("admitted #{request_id}"),
            SimEvent::AdmissionRejected { reason } => println!("rejected: {reason}"),
            SimEvent::AdmissionCapped { source_floor } => {
                println!("capped at floor {source_floor}")
            }
            SimEvent::Assigned { request_id, cabin_id } => {
                println!("assigned #{request_id} -> cabin {cabin_id}")
            }
            SimEvent::PickedUp { request_id, cabin_id, floor, count } => {
                println!("picked up #{request_id} at floor {floor} by cabin {cabin_id} ({count})")
            }
            SimEvent::DroppedOff { request_id, cabin_id, floor, count } => {
                println!("dropped off #{request_id} at floor {floor} by cabin {cabin_id} ({count})")
            }
            SimEvent::TimedOut { request_id, source_floor, target_floor, count } => println!(
                "timed out #{request_id} ({source_floor} -> {target_floor}, {count})"
            ),
            SimEvent::StrategyChanged { from, to } => {
                println!("strategy changed {from:?} -> {to:?}")
            }
            SimEvent::Reset => println!("-- reset --"),
        }
    }
}
