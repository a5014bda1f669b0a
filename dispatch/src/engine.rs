//! The dispatcher: combines the feasibility filter and the strategy cost
//! function into one committed assignment, the way the original
//! `Dispatcher::assignCab` combined its own eligibility/scoring helpers.

use cabin::Cabin;
use model::stops::sorted_insert;
use model::{Direction, Request};
use model::SimConfig;

use crate::feasibility::check_feasibility;
use crate::stats::DispatchStats;
use crate::strategy::cost;

/// Owns the running statistics for whichever strategy is currently
/// configured. Stateless otherwise: every assignment call is given the
/// full cabin roster and config fresh.
#[derive(Debug, Default)]
pub struct Dispatcher {
    pub stats: DispatchStats,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to assign `request` to one of `cabins`. Filters to feasible
    /// candidates, scores them under the configured strategy, and commits
    /// to the lowest-cost one (ties broken by cabin order, i.e. lower
    /// cabin id, since `cabins` is kept sorted by id). Returns the chosen
    /// cabin's id, or `None` if no cabin is feasible right now — the
    /// request stays in the Floor Waiting Model for a later tick.
    pub fn assign(
        &mut self,
        request: &Request,
        cabins: &mut [Cabin],
        now_ms: u64,
        cfg: &SimConfig,
    ) -> Option<u32> {
        self.stats.record_attempt();

        let mut best: Option<(usize, f64)> = None;
        for (i, cabin) in cabins.iter().enumerate() {
            if !check_feasibility(cabin, request, cfg).is_feasible() {
                continue;
            }
            let c = cost(cabin, request, cfg);
            let is_better = match best {
                None => true,
                Some((_, best_cost)) => c < best_cost,
            };
            if is_better {
                best = Some((i, c));
            }
        }

        let (idx, _) = best?;
        let distance =
            (cabins[idx].current_floor as i64 - request.source_floor as i64).unsigned_abs() as f64;

        commit(&mut cabins[idx], request);

        let wait_ms = now_ms.saturating_sub(request.submitted_at);
        self.stats.record_success(wait_ms, distance);

        tracing::debug!(
            request_id = request.id,
            cabin_id = cabins[idx].id,
            wait_ms,
            distance,
            "request assigned"
        );

        Some(cabins[idx].id)
    }
}

/// Insert the request's pickup floor into the chosen cabin's stops. The
/// drop-off floor is deliberately *not* inserted here: it is added by
/// `cabin::machine` when the group actually boards, once the cabin's
/// travel direction past the pickup floor is known. Inserting both up
/// front would make a one-stop reversal (pick up behind the cabin's
/// eventual direction of travel) impossible to express in a single
/// monotone stop list.
fn commit(cabin: &mut Cabin, request: &Request) {
    let pickup_direction = if cabin.direction != Direction::Idle {
        cabin.direction
    } else if request.source_floor > cabin.current_floor {
        Direction::Up
    } else if request.source_floor < cabin.current_floor {
        Direction::Down
    } else {
        request.direction()
    };

    sorted_insert(
        &mut cabin.stops,
        request.source_floor,
        cabin.current_floor,
        pickup_direction,
    );
    cabin.ledger.push(request.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Strategy;

    fn req(id: u64, source: u32, target: u32, count: u32) -> Request {
        Request {
            id,
            source_floor: source,
            target_floor: target,
            count,
            submitted_at: 0,
        }
    }

    #[test]
    fn nearest_idle_cabin_wins_and_commits_pickup_stop() {
        let mut cabins = vec![Cabin::new(1, 1), Cabin::new(2, 1)];
        cabins[1].current_floor = 9;
        let cfg = SimConfig::default();
        let mut dispatcher = Dispatcher::new();

        let chosen = dispatcher.assign(&req(1, 10, 12, 1), &mut cabins, 0, &cfg);

        assert_eq!(chosen, Some(2));
        assert_eq!(cabins[1].stops, vec![10]);
        assert_eq!(cabins[1].ledger, vec![1]);
        assert_eq!(dispatcher.stats.successful_assignments, 1);
    }

    #[test]
    fn no_feasible_cabin_returns_none_and_counts_the_attempt() {
        let mut cabins = vec![Cabin::new(1, 1)];
        cabins[0].load = cabins[0].load.max(20); // over capacity
        let cfg = SimConfig::default();
        let mut dispatcher = Dispatcher::new();

        let chosen = dispatcher.assign(&req(1, 2, 5, 1), &mut cabins, 0, &cfg);

        assert_eq!(chosen, None);
        assert_eq!(dispatcher.stats.total_assignments, 1);
        assert_eq!(dispatcher.stats.successful_assignments, 0);
    }

    #[test]
    fn second_pickup_merges_onto_same_committed_cabin_ahead_of_existing_stop() {
        let mut cabins = vec![Cabin::new(1, 1)];
        let cfg = SimConfig::default();
        let mut dispatcher = Dispatcher::new();

        dispatcher.assign(&req(1, 1, 10, 1), &mut cabins, 0, &cfg);
        // Simulate the cabin having already committed to Up and boarded,
        // leaving stops = [10], before the second request lands.
        cabins[0].stops = vec![10];
        cabins[0].direction = Direction::Up;

        dispatcher.assign(&req(2, 3, 8, 1), &mut cabins, 0, &cfg);

        assert_eq!(cabins[0].stops, vec![3, 10]);
    }

    #[test]
    fn strategy_switch_does_not_reset_stats_by_itself() {
        // Resetting stats on a strategy change is the caller's
        // responsibility (the `sim` crate, on `reconfigure`), not the
        // dispatcher's -- it has no way to observe the previous strategy.
        let mut cabins = vec![Cabin::new(1, 1)];
        let mut cfg = SimConfig::default();
        cfg.strategy = Strategy::EnergySaving;
        let mut dispatcher = Dispatcher::new();

        dispatcher.assign(&req(1, 1, 5, 1), &mut cabins, 0, &cfg);
        assert_eq!(dispatcher.stats.total_assignments, 1);
    }
}
