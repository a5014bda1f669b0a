//! End-to-end scenarios from the building's testable-properties table:
//! drive a `Simulator` through `submit`/`tick` and check externally
//! observable outcomes only (positions, modes, events), never internals.

use model::{Direction, SimConfig};
use sim::Simulator;

fn default_sim() -> Simulator {
    Simulator::new(SimConfig::default())
}

fn run_until(sim: &mut Simulator, total_ms: u64, step_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        sim.tick(step_ms);
        elapsed += step_ms;
    }
}

#[test]
fn single_request_is_delivered_and_cabin_goes_idle_at_destination() {
    let mut sim = default_sim();
    sim.submit(1, 5, 3).unwrap();

    // comfortably past completion: 4 floors travelled twice plus two door
    // cycles, under default timings.
    run_until(&mut sim, 60_000, 500);

    let events = sim.take_events();
    let delivered: u32 = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::DroppedOff { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    assert_eq!(delivered, 3);

    let cabin = &sim.cabins()[0];
    assert_eq!(cabin.current_floor, 5);
    assert_eq!(cabin.mode, cabin::CabinMode::IdleWaiting);
    assert_eq!(cabin.load, 0);
}

#[test]
fn pickup_merge_delivers_both_groups_in_travel_order() {
    let mut cfg = SimConfig::default();
    cfg.cabin_count = 1;
    let mut sim = Simulator::new(cfg);

    sim.submit(1, 10, 1).unwrap();
    sim.tick(100);
    sim.submit(3, 8, 1).unwrap();

    run_until(&mut sim, 120_000, 500);
    let events = sim.take_events();

    let dropoff_floor = |id: u64| {
        events.iter().find_map(|e| match e {
            model::SimEvent::DroppedOff { request_id, floor, .. } if *request_id == id => {
                Some(*floor)
            }
            _ => None,
        })
    };

    // request 2 (3 -> 8) alights before request 1 (1 -> 10), since floor 8
    // is visited on the way to floor 10.
    assert_eq!(dropoff_floor(2), Some(8));
    assert_eq!(dropoff_floor(1), Some(10));

    let delivered_count = events
        .iter()
        .filter(|e| matches!(e, model::SimEvent::DroppedOff { .. }))
        .count();
    assert_eq!(delivered_count, 2);
}

#[test]
fn capacity_split_residual_is_served_by_the_next_available_cabin() {
    // Two cabins, both idle at the home floor. `NearestFirst` breaks the
    // resulting distance-0 tie in favor of the first-encountered (lowest
    // id) cabin every time, so both requests land on cabin 1 first --
    // exactly the setup needed to force a genuine capacity split there,
    // with cabin 2 left idle as the "next available cabin" spec.md
    // section 8 scenario 3 expects to pick up the residual.
    let mut cfg = SimConfig::default();
    cfg.capacity = 12;
    cfg.cabin_count = 2;
    cfg.strategy = model::Strategy::NearestFirst;
    let mut sim = Simulator::new(cfg);

    sim.submit(1, 5, 8).unwrap();
    sim.submit(1, 5, 7).unwrap();

    run_until(&mut sim, 180_000, 500);
    let events = sim.take_events();

    // The 3-person residual can only be served once cabin 1 has left
    // floor 1 (it is full at 12/12), so it must be cabin 2 that boards
    // it -- which is only possible because the residual carries a fresh
    // id, not the original id still tied up in cabin 1's ledger.
    let floor1_pickups: Vec<(u32, u32)> = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::PickedUp { cabin_id, floor: 1, count, .. } => Some((*cabin_id, *count)),
            _ => None,
        })
        .collect();
    assert!(
        floor1_pickups.iter().any(|&(cabin_id, count)| cabin_id == 2 && count == 3),
        "expected cabin 2 to serve the 3-person residual, got {floor1_pickups:?}"
    );

    let delivered: u32 = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::DroppedOff { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    assert_eq!(delivered, 15);
}

#[test]
fn idle_cabin_at_a_mixed_direction_floor_conserves_every_person() {
    // Both requests start at floor 5, one upward and one downward; the
    // lone cabin (home floor 1) arrives idle and must commit to a single
    // direction before boarding either -- `Direction::Idle` is compatible
    // with everything, so boarding under it directly (instead of the
    // adopted direction) would accept both and strand the incompatible
    // one with no stop for its destination.
    let mut cfg = SimConfig::default();
    cfg.cabin_count = 1;
    let mut sim = Simulator::new(cfg);

    sim.submit(5, 9, 1).unwrap();
    sim.submit(5, 2, 1).unwrap();

    // Comfortably past one full round trip to floor 5, then to floor 9,
    // under default timings -- short of the default wait-time cap, so the
    // unboarded group is still waiting, not yet timed out.
    run_until(&mut sim, 45_000, 500);
    let events = sim.take_events();

    let delivered: u32 = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::DroppedOff { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    let timed_out: u32 = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::TimedOut { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    let waiting: u32 = (1..=sim.config().floor_count)
        .map(|f| sim.waiting(f).iter().map(|g| g.count).sum::<u32>())
        .sum();
    let onboard: u32 = sim.cabins().iter().map(|c| c.load).sum();

    // Conservation of persons (spec.md section 8): every admitted person
    // is exactly one of delivered, timed out, still waiting, or still
    // riding -- never silently dropped.
    assert_eq!(delivered + timed_out + waiting + onboard, 2);

    // Only the upward group (submitted first, so first in the FIFO floor
    // queue) should have boarded and been delivered this cycle; the
    // downward group is left behind, still waiting.
    assert_eq!(delivered, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        model::SimEvent::DroppedOff { floor: 9, count: 1, .. }
    )));
    assert_eq!(waiting, 1);
    assert_eq!(timed_out, 0);
}

#[test]
fn direction_incompatible_request_waits_for_the_cabin_to_go_idle() {
    let mut cfg = SimConfig::default();
    cfg.cabin_count = 1;
    let mut sim = Simulator::new(cfg);

    sim.submit(1, 10, 1).unwrap();
    // Let the pickup at floor 1 (where the cabin already sits) finish
    // dwelling and boarding, so the cabin commits to travelling up.
    run_until(&mut sim, 1_500, 100);
    assert_eq!(sim.cabins()[0].direction, Direction::Up);

    sim.submit(5, 2, 1).unwrap();
    sim.tick(100);
    // Still pending: the lone cabin is committed upward.
    assert_eq!(sim.pending_count(), 1);

    run_until(&mut sim, 120_000, 500);
    assert_eq!(sim.pending_count(), 0);
}

#[test]
fn unreachable_request_times_out_with_zero_delivered() {
    let mut cfg = SimConfig::default();
    cfg.max_wait_time_ms = 5_000;
    cfg.cabin_count = 1;
    let mut sim = Simulator::new(cfg);

    // Send the lone cabin upward first (pickup not at its current floor,
    // so its committed direction resolves to Up within this same tick),
    // so it cannot turn around for the downward floor-7 request in time.
    sim.submit(2, 14, 1).unwrap();
    sim.tick(50);
    assert_eq!(sim.cabins()[0].direction, Direction::Up);

    sim.submit(7, 1, 1).unwrap();

    run_until(&mut sim, 6_000, 250);

    let events = sim.take_events();
    assert!(events.iter().any(|e| matches!(
        e,
        model::SimEvent::TimedOut {
            source_floor: 7,
            target_floor: 1,
            count: 1,
            ..
        }
    )));
    let delivered: u32 = events
        .iter()
        .filter_map(|e| match e {
            model::SimEvent::DroppedOff { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    assert_eq!(delivered, 0);
}

#[test]
fn idle_cabin_returns_home_without_any_request() {
    let mut cfg = SimConfig::default();
    cfg.max_idle_time_ms = 10_000;
    cfg.home_floor = 1;
    cfg.cabin_count = 1;
    let mut sim = Simulator::new(cfg);

    // Deliver a request up to floor 9 first, so the cabin goes idle there
    // rather than at its home floor.
    sim.submit(1, 9, 1).unwrap();
    run_until(&mut sim, 60_000, 500);
    assert_eq!(sim.cabins()[0].current_floor, 9);
    assert_eq!(sim.cabins()[0].mode, cabin::CabinMode::IdleWaiting);
    sim.take_events();

    run_until(&mut sim, 10_500, 500);

    let cabin = &sim.cabins()[0];
    assert_eq!(cabin.direction, Direction::Down);
    assert!(cabin.current_floor < 9);
}

#[test]
fn reset_twice_is_equivalent_to_reset_once() {
    let mut sim = default_sim();
    sim.submit(1, 5, 3).unwrap();
    sim.tick(1_000);

    sim.reset();
    let after_one = (
        sim.now_ms(),
        sim.pending_count(),
        sim.cabins()[0].current_floor,
    );
    sim.reset();
    let after_two = (
        sim.now_ms(),
        sim.pending_count(),
        sim.cabins()[0].current_floor,
    );

    assert_eq!(after_one, after_two);
}
