//! Cost functions for the three dispatch strategies (spec.md section
//! 4.C). Lower cost wins; ties are broken by lower cabin id at the call
//! site in `engine.rs`.

use cabin::Cabin;
use model::{Direction, Request, SimConfig, Strategy};

fn distance(cabin: &Cabin, request: &Request) -> f64 {
    (cabin.current_floor as i64 - request.source_floor as i64).unsigned_abs() as f64
}

fn load_factor_penalty(cabin: &Cabin, cfg: &SimConfig) -> f64 {
    ((cabin.load * 10) / cfg.capacity) as f64
}

fn direction_penalty(cabin: &Cabin, request: &Request) -> f64 {
    match cabin.direction {
        Direction::Idle => 5.0,
        dir if dir == request.direction() => 0.0,
        _ => 15.0,
    }
}

fn queue_penalty(cabin: &Cabin) -> f64 {
    2.0 * cabin.assigned_count() as f64
}

fn detour_penalty(cabin: &Cabin, request: &Request) -> f64 {
    let last = cabin.last_stop();
    let lo = cabin.current_floor.min(last);
    let hi = cabin.current_floor.max(last);
    if request.source_floor >= lo && request.source_floor <= hi {
        0.0
    } else {
        10.0
    }
}

fn near_full_penalty(cabin: &Cabin, request: &Request, cfg: &SimConfig) -> f64 {
    if (cabin.load + request.count) as f64 > 0.8 * cfg.capacity as f64 {
        20.0
    } else {
        0.0
    }
}

/// Score `cabin` as a candidate for `request` under the configured
/// strategy. Lower is better.
pub fn cost(cabin: &Cabin, request: &Request, cfg: &SimConfig) -> f64 {
    match cfg.strategy {
        Strategy::NearestFirst => distance(cabin, request),
        Strategy::EnergySaving => {
            let multiplier = if cabin.direction == Direction::Idle { 2.0 } else { 1.0 };
            distance(cabin, request) * multiplier
        }
        Strategy::NearestLoadAware => {
            distance(cabin, request)
                + load_factor_penalty(cabin, cfg)
                + direction_penalty(cabin, request)
                + queue_penalty(cabin)
                + detour_penalty(cabin, request)
                + near_full_penalty(cabin, request, cfg)
        }
    }
}
