//! Determines whether a given cabin is a candidate to serve a request.
//!
//! Deliberately pure: no mutation, no IO. Mirrors the shape of an
//! eligibility check that classifies *why* a candidate was rejected
//! rather than collapsing straight to a boolean, so a caller (or a test)
//! can tell a capacity rejection from a direction mismatch.

use cabin::Cabin;
use model::{Direction, Request, SimConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Feasible,
    CapacityExceeded,
    LedgerFull,
    DirectionIncompatible,
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Check whether `cabin` may be assigned `request` (spec.md section 4.C,
/// "Feasibility filter").
pub fn check_feasibility(cabin: &Cabin, request: &Request, cfg: &SimConfig) -> Feasibility {
    if cabin.load + request.count > cfg.capacity {
        return Feasibility::CapacityExceeded;
    }

    if cabin.assigned_count() >= cfg.max_per_cabin_assignments {
        return Feasibility::LedgerFull;
    }

    let compatible = match cabin.direction {
        Direction::Idle => true,
        Direction::Up => request.source_floor >= cabin.current_floor && request.direction() == Direction::Up,
        Direction::Down => {
            request.source_floor <= cabin.current_floor && request.direction() == Direction::Down
        }
    };

    if !compatible {
        return Feasibility::DirectionIncompatible;
    }

    Feasibility::Feasible
}
