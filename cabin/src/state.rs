use model::{Direction, RequestId};

/// The cabin's current phase (spec.md section 4.D). Deliberately three
/// states, not two: `IdleWaiting` is distinct from "moving with a single
/// stop equal to the current floor" — conflating them was a recurring bug
/// in the iterations this core replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinMode {
    IdleWaiting,
    Moving,
    Dwelling,
}

/// A request currently riding in a cabin's `onboard` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardGroup {
    pub request_id: RequestId,
    pub source_floor: u32,
    pub target_floor: u32,
    pub count: u32,
}

/// A single elevator car.
#[derive(Debug, Clone)]
pub struct Cabin {
    pub id: u32,
    pub current_floor: u32,
    pub direction: Direction,
    pub load: u32,
    pub mode: CabinMode,
    pub dwell_remaining_ms: u64,
    pub travel_remaining_ms: u64,
    /// Time spent in `IdleWaiting` since the door last closed with nothing
    /// pending. Tracked as an elapsed duration rather than an absolute
    /// timestamp — the core has no wall clock, only a tick delta.
    pub idle_elapsed_ms: u64,
    /// Floors this cabin is committed to visit, in travel order.
    pub stops: Vec<u32>,
    /// Passengers currently riding.
    pub onboard: Vec<OnboardGroup>,
    /// Requests committed to this cabin (waiting for pickup or already
    /// boarded) — ids only; the Floor Waiting Model is the sole owner of
    /// count data until boarding, `onboard` owns it after.
    pub ledger: Vec<RequestId>,
}

impl Cabin {
    pub fn new(id: u32, home_floor: u32) -> Self {
        Self {
            id,
            current_floor: home_floor,
            direction: Direction::Idle,
            load: 0,
            mode: CabinMode::IdleWaiting,
            dwell_remaining_ms: 0,
            travel_remaining_ms: 0,
            idle_elapsed_ms: 0,
            stops: Vec::new(),
            onboard: Vec::new(),
            ledger: Vec::new(),
        }
    }

    pub fn reset(&mut self, home_floor: u32) {
        *self = Cabin::new(self.id, home_floor);
    }

    pub fn assigned_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn last_stop(&self) -> u32 {
        *self.stops.last().unwrap_or(&self.current_floor)
    }

    /// `current_floor`, `stops`, and a diagnostic invariant check that
    /// panics in debug builds if the load/onboard or stop-monotonicity
    /// invariants from spec.md section 3 are ever violated.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) {
        let onboard_sum: u32 = self.onboard.iter().map(|g| g.count).sum();
        debug_assert_eq!(self.load, onboard_sum, "cabin {}: load != sum(onboard)", self.id);

        match self.direction {
            Direction::Up => {
                debug_assert!(
                    self.stops.windows(2).all(|w| w[0] < w[1]),
                    "cabin {}: stops not strictly ascending while UP",
                    self.id
                );
            }
            Direction::Down => {
                debug_assert!(
                    self.stops.windows(2).all(|w| w[0] > w[1]),
                    "cabin {}: stops not strictly descending while DOWN",
                    self.id
                );
            }
            Direction::Idle => {}
        }
    }
}
