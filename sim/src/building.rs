//! The top-level `Simulator`: owns the cabin roster, the Floor Waiting
//! Model, and the dispatcher, and drives them all forward one logical
//! tick at a time. Mirrors the shape of the old tick-driver glue that sat
//! between a scheduler and its workers, but single-threaded and
//! synchronous throughout -- there is no `.await` anywhere in `tick`.

use std::collections::HashSet;

use cabin::Cabin;
use dispatch::Dispatcher;
use model::{FloorWaitingModel, IntakeError, Request, RequestId, SimConfig, SimEvent, WaitingGroup};

/// The full elevator bank. Constructed once per run; `reset` rebuilds the
/// cabins and queues from whatever config is currently staged.
pub struct Simulator {
    cfg: SimConfig,
    staged_cfg: Option<SimConfig>,
    cabins: Vec<Cabin>,
    floor_queues: FloorWaitingModel,
    dispatcher: Dispatcher,
    events: Vec<SimEvent>,
    next_request_id: RequestId,
    now_ms: u64,
    admission_cap_drops: u64,
}

impl Simulator {
    pub fn new(cfg: SimConfig) -> Self {
        let cabins = (1..=cfg.cabin_count)
            .map(|id| Cabin::new(id, cfg.home_floor))
            .collect();
        let floor_queues = FloorWaitingModel::new(cfg.floor_count);

        Self {
            cfg,
            staged_cfg: None,
            cabins,
            floor_queues,
            dispatcher: Dispatcher::new(),
            events: Vec::new(),
            next_request_id: 1,
            now_ms: 0,
            admission_cap_drops: 0,
        }
    }

    // ---- Intake -----------------------------------------------------

    /// Validate and admit a new request straight into the Floor Waiting
    /// Model -- there is no separate "pending" container. A request sits
    /// there as soon as it is admitted, whether or not a cabin has been
    /// committed to it yet, so the wait-timeout clock (spec.md section
    /// 4.E) runs from the moment of submission regardless of dispatch
    /// outcome. Returns:
    /// - `Err(IntakeError)` if the request itself is malformed,
    /// - `Ok(None)` if well-formed but silently dropped by an admission
    ///   cap (spec.md section 7 -- caps are enforced without surfacing an
    ///   error to the caller),
    /// - `Ok(Some(id))` once it has been queued.
    pub fn submit(
        &mut self,
        source_floor: u32,
        target_floor: u32,
        count: u32,
    ) -> Result<Option<RequestId>, IntakeError> {
        model::request::validate(
            source_floor,
            target_floor,
            count,
            self.cfg.floor_count,
            self.cfg.capacity,
        )
        .map_err(|e| {
            self.events.push(SimEvent::AdmissionRejected {
                reason: intake_error_reason(&e),
            });
            e
        })?;

        if self.floor_queues.queue(source_floor).len() as u32 >= self.cfg.max_requests_per_floor
            || self.total_inflight() >= self.cfg.max_total_inflight
        {
            self.admission_cap_drops += 1;
            self.events.push(SimEvent::AdmissionCapped { source_floor });
            return Ok(None);
        }

        let id = self.next_request_id;
        self.next_request_id += 1;

        let request = Request {
            id,
            source_floor,
            target_floor,
            count,
            submitted_at: self.now_ms,
        };
        self.floor_queues.enqueue(WaitingGroup::from_request(&request));
        self.events.push(SimEvent::Admitted { request_id: id });

        Ok(Some(id))
    }

    /// Count of distinct requests currently in the system: present in some
    /// floor queue (awaiting dispatch or awaiting pickup) or in some
    /// cabin's ledger (already boarded, floor queue entry consumed).
    /// Recomputed rather than tracked incrementally -- a request can
    /// appear split across two cabins after a capacity split, so a simple
    /// counter would either double-count or need its own bookkeeping,
    /// exactly the class of bug the single-owner-per-container design
    /// avoids.
    fn total_inflight(&self) -> u32 {
        let mut ids: HashSet<RequestId> = HashSet::new();
        for floor in 1..=self.cfg.floor_count {
            for group in self.floor_queues.queue(floor) {
                ids.insert(group.request_id);
            }
        }
        for cabin in &self.cabins {
            for id in &cabin.ledger {
                ids.insert(*id);
            }
        }
        ids.len() as u32
    }

    // ---- Tick ---------------------------------------------------------

    /// Advance the whole building by `delta_ms`. Phases, in order:
    /// 1. advance per-floor wait timers, evicting anything past
    ///    `max_wait_time_ms`;
    /// 2. scan every floor queue for groups not yet committed to any
    ///    cabin's ledger, and hand each to the dispatcher -- this covers
    ///    both freshly submitted requests and residuals left behind by an
    ///    earlier capacity-limited partial board;
    /// 3. advance every cabin's motion/dwell/boarding state machine.
    pub fn tick(&mut self, delta_ms: u64) {
        self.now_ms += delta_ms;

        self.advance_wait_timers(delta_ms);
        self.dispatch_unassigned();

        for cabin in self.cabins.iter_mut() {
            let cabin_events = cabin::tick(
                cabin,
                delta_ms,
                &mut self.floor_queues,
                &self.cfg,
                &mut self.next_request_id,
            );
            self.events.extend(cabin_events);
        }
    }

    fn advance_wait_timers(&mut self, delta_ms: u64) {
        let evicted = self
            .floor_queues
            .advance_wait(delta_ms, self.cfg.max_wait_time_ms);

        for group in evicted {
            for cabin in self.cabins.iter_mut() {
                cabin.ledger.retain(|&id| id != group.request_id);
            }
            self.events.push(SimEvent::TimedOut {
                request_id: group.request_id,
                source_floor: group.source_floor,
                target_floor: group.target_floor,
                count: group.count,
            });
        }
    }

    /// Attempt to dispatch every waiting group that is not yet committed
    /// to any cabin's ledger. "Committed" is tracked solely by ledger
    /// membership -- no separate pending/assigned flag per group -- since
    /// the ledger is already the single place that ownership is recorded
    /// (spec.md section 9, request lifecycle note).
    fn dispatch_unassigned(&mut self) {
        for floor in 1..=self.cfg.floor_count {
            let ids: Vec<RequestId> = self
                .floor_queues
                .queue(floor)
                .iter()
                .map(|g| g.request_id)
                .collect();

            for request_id in ids {
                if self.cabins.iter().any(|c| c.ledger.contains(&request_id)) {
                    continue;
                }

                let group = match self
                    .floor_queues
                    .queue(floor)
                    .iter()
                    .find(|g| g.request_id == request_id)
                {
                    Some(g) => g.clone(),
                    None => continue,
                };

                let synthetic = Request {
                    id: group.request_id,
                    source_floor: floor,
                    target_floor: group.target_floor,
                    count: group.count,
                    submitted_at: self.now_ms.saturating_sub(group.wait_elapsed_ms),
                };

                if let Some(cabin_id) =
                    self.dispatcher
                        .assign(&synthetic, &mut self.cabins, self.now_ms, &self.cfg)
                {
                    self.events.push(SimEvent::Assigned {
                        request_id,
                        cabin_id,
                    });
                }
            }
        }
    }

    // ---- Lifecycle ------------------------------------------------------

    /// Stage a new configuration. It takes effect at the next `reset`,
    /// never mid-run (spec.md section 9's note on global config).
    pub fn reconfigure(&mut self, cfg: SimConfig) {
        self.staged_cfg = Some(cfg);
    }

    /// Change the active dispatch strategy immediately. Unlike the rest of
    /// `SimConfig`, the strategy only affects how the dispatcher scores
    /// candidates -- it has no bearing on cabin/queue sizing -- so it
    /// takes effect without a full reset, and resets the per-strategy
    /// statistics since they are not comparable across strategies.
    pub fn set_strategy(&mut self, strategy: model::Strategy) {
        if strategy == self.cfg.strategy {
            return;
        }
        let from = self.cfg.strategy;
        self.cfg.strategy = strategy;
        self.dispatcher.stats.reset();
        self.events.push(SimEvent::StrategyChanged { from, to: strategy });
    }

    pub fn reset(&mut self) {
        if let Some(cfg) = self.staged_cfg.take() {
            self.cfg = cfg;
        }

        self.cabins = (1..=self.cfg.cabin_count)
            .map(|id| Cabin::new(id, self.cfg.home_floor))
            .collect();
        self.floor_queues = FloorWaitingModel::new(self.cfg.floor_count);
        self.dispatcher = Dispatcher::new();
        self.next_request_id = 1;
        self.now_ms = 0;
        self.admission_cap_drops = 0;
        self.events.clear();
        self.events.push(SimEvent::Reset);
    }

    // ---- Observation surface --------------------------------------------

    pub fn cabins(&self) -> &[Cabin] {
        &self.cabins
    }

    pub fn waiting(&self, floor: u32) -> &std::collections::VecDeque<WaitingGroup> {
        self.floor_queues.queue(floor)
    }

    /// Number of distinct requests waiting somewhere in the building that
    /// no cabin has yet committed to (i.e. still candidates for dispatch).
    pub fn pending_count(&self) -> usize {
        let mut ids: HashSet<RequestId> = HashSet::new();
        for floor in 1..=self.cfg.floor_count {
            for group in self.floor_queues.queue(floor) {
                if !self.cabins.iter().any(|c| c.ledger.contains(&group.request_id)) {
                    ids.insert(group.request_id);
                }
            }
        }
        ids.len()
    }

    pub fn stats(&self) -> &dispatch::DispatchStats {
        &self.dispatcher.stats
    }

    pub fn admission_cap_drops(&self) -> u64 {
        self.admission_cap_drops
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Drain and return every event recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

fn intake_error_reason(e: &IntakeError) -> &'static str {
    match e {
        IntakeError::SameFloor => "same_floor",
        IntakeError::FloorOutOfRange { .. } => "floor_out_of_range",
        IntakeError::InvalidCount { .. } => "invalid_count",
    }
}
