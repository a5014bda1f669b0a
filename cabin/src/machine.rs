//! Per-tick motion, dwelling, and boarding/alighting for a single cabin.
//!
//! Mirrors the shape of a session manager advancing one entity's lifecycle
//! per call, but synchronously: there is exactly one caller (the tick
//! driver in the `sim` crate) and no interior locking.

use model::stops::{recompute_direction, sorted_insert};
use model::{Direction, RequestId, SimConfig, SimEvent};

use crate::state::{Cabin, CabinMode, OnboardGroup};
use model::FloorWaitingModel;

/// Advance one cabin by `delta_ms`, letting it react to whatever the
/// dispatcher committed to its `stops` this tick. Returns events for
/// anything externally observable that happened. `next_request_id` is the
/// building's single request-id counter, shared with intake, so a
/// capacity split's residual (see `board_and_alight`) never collides with
/// a freshly submitted request.
pub fn tick(
    cabin: &mut Cabin,
    delta_ms: u64,
    floor_queues: &mut FloorWaitingModel,
    cfg: &SimConfig,
    next_request_id: &mut RequestId,
) -> Vec<SimEvent> {
    let mut events = Vec::new();

    // A stop may have just been committed by the dispatcher this tick
    // while the cabin was idle; react to it before applying `delta_ms` so
    // both the direction adoption and the resulting motion/dwell happen
    // within the same tick the assignment landed.
    if cabin.mode == CabinMode::IdleWaiting && !cabin.stops.is_empty() {
        cabin.direction = recompute_direction(&cabin.stops, cabin.current_floor);
        cabin.idle_elapsed_ms = 0;
        if cabin.stops.first() == Some(&cabin.current_floor) {
            enter_dwelling(cabin, cfg);
        } else {
            cabin.mode = CabinMode::Moving;
            cabin.travel_remaining_ms = 0;
        }
    }

    match cabin.mode {
        CabinMode::IdleWaiting => {
            cabin.idle_elapsed_ms += delta_ms;
            if cabin.idle_elapsed_ms >= cfg.max_idle_time_ms && cabin.current_floor != cfg.home_floor
            {
                sorted_insert(&mut cabin.stops, cfg.home_floor, cabin.current_floor, Direction::Idle);
                cabin.direction = recompute_direction(&cabin.stops, cabin.current_floor);
                cabin.mode = CabinMode::Moving;
                cabin.travel_remaining_ms = 0;
                cabin.idle_elapsed_ms = 0;
                tracing::debug!(cabin_id = cabin.id, home_floor = cfg.home_floor, "idle return");
            }
        }
        CabinMode::Moving => {
            cabin.travel_remaining_ms += delta_ms;
            while cabin.travel_remaining_ms >= cfg.floor_travel_time_ms {
                cabin.travel_remaining_ms -= cfg.floor_travel_time_ms;
                cabin.current_floor = match cabin.direction {
                    Direction::Up => cabin.current_floor + 1,
                    Direction::Down => cabin.current_floor - 1,
                    Direction::Idle => cabin.current_floor,
                };
                if cabin.stops.first() == Some(&cabin.current_floor) {
                    enter_dwelling(cabin, cfg);
                    break;
                }
            }
        }
        CabinMode::Dwelling => {
            cabin.dwell_remaining_ms = cabin.dwell_remaining_ms.saturating_sub(delta_ms);
            if cabin.dwell_remaining_ms == 0 {
                board_and_alight(cabin, floor_queues, cfg, next_request_id, &mut events);
            }
        }
    }

    #[cfg(debug_assertions)]
    cabin.check_invariants();

    events
}

fn enter_dwelling(cabin: &mut Cabin, cfg: &SimConfig) {
    cabin.mode = CabinMode::Dwelling;
    cabin.dwell_remaining_ms = cfg.door_time_ms;
}

/// Dwell-complete handling per spec.md section 4.D: alight first, then
/// board. Direction is recomputed from the stops that remain *after*
/// removing the just-arrived floor, and that single recomputed value is
/// used both to decide which waiting groups may board and as the cabin's
/// direction going forward — resolving the apparent ordering conflict in
/// the prose (boarding filters on "the recomputed direction", but the
/// stop removal/recompute is described as happening after boarding).
///
/// When the recomputed direction is `Idle` (this was the cabin's last
/// stop), a direction is committed *before* boarding by adopting whichever
/// direction the head of the floor's queue wants to travel. Calling
/// `take_boardable` with `Idle` itself would accept both an upward and a
/// downward group at once, since `Idle` is compatible with everything —
/// the cabin would then board passengers headed in two directions while
/// only ever adopting one, stranding the other with no stop for their
/// destination.
fn board_and_alight(
    cabin: &mut Cabin,
    floor_queues: &mut FloorWaitingModel,
    cfg: &SimConfig,
    next_request_id: &mut RequestId,
    events: &mut Vec<SimEvent>,
) {
    let floor = cabin.current_floor;

    if cabin.stops.first() == Some(&floor) {
        cabin.stops.remove(0);
    }

    let mut direction = recompute_direction(&cabin.stops, floor);

    // 1. Alight.
    let mut i = 0;
    while i < cabin.onboard.len() {
        if cabin.onboard[i].target_floor == floor {
            let group = cabin.onboard.remove(i);
            cabin.load -= group.count;
            cabin.ledger.retain(|&id| id != group.request_id);
            events.push(SimEvent::DroppedOff {
                request_id: group.request_id,
                cabin_id: cabin.id,
                floor,
                count: group.count,
            });
        } else {
            i += 1;
        }
    }

    // 2. Board. An idle cabin commits to the head of the queue's direction
    // before asking what is boardable, so only groups travelling that way
    // are ever taken this stop.
    if direction == Direction::Idle {
        if let Some(head) = floor_queues.queue(floor).front() {
            direction = head.direction();
        }
    }

    let available = cfg.capacity.saturating_sub(cabin.load);
    let boarded = floor_queues.take_boardable(floor, direction, available, next_request_id);
    for group in boarded {
        cabin.load += group.count;

        sorted_insert(&mut cabin.stops, group.target_floor, floor, direction);

        events.push(SimEvent::PickedUp {
            request_id: group.request_id,
            cabin_id: cabin.id,
            floor,
            count: group.count,
        });

        cabin.onboard.push(OnboardGroup {
            request_id: group.request_id,
            source_floor: group.source_floor,
            target_floor: group.target_floor,
            count: group.count,
        });
    }

    cabin.direction = direction;
    if cabin.stops.is_empty() {
        cabin.mode = CabinMode::IdleWaiting;
        cabin.idle_elapsed_ms = 0;
    } else {
        cabin.mode = CabinMode::Moving;
        cabin.travel_remaining_ms = 0;
    }
}
