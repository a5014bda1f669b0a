use std::collections::VecDeque;

use crate::direction::Direction;
use crate::request::{Request, RequestId};

/// A Request that has been admitted to a per-floor queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingGroup {
    pub request_id: RequestId,
    pub source_floor: u32,
    pub target_floor: u32,
    pub count: u32,
    pub wait_elapsed_ms: u64,
}

impl WaitingGroup {
    pub fn from_request(req: &Request) -> Self {
        Self {
            request_id: req.id,
            source_floor: req.source_floor,
            target_floor: req.target_floor,
            count: req.count,
            wait_elapsed_ms: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::of_travel(self.source_floor, self.target_floor)
    }
}

/// Ordered per-floor queues of waiting groups, keyed by source floor.
///
/// This is the sole owner of waiting-group count data: the dispatcher's
/// Assigned Ledger only ever stores request ids, never counts, so there is
/// exactly one place a passenger count can be mutated before boarding.
#[derive(Debug, Clone)]
pub struct FloorWaitingModel {
    queues: Vec<VecDeque<WaitingGroup>>,
    floor_count: u32,
}

impl FloorWaitingModel {
    pub fn new(floor_count: u32) -> Self {
        Self {
            queues: (0..floor_count).map(|_| VecDeque::new()).collect(),
            floor_count,
        }
    }

    fn idx(&self, floor: u32) -> usize {
        debug_assert!(floor >= 1 && floor <= self.floor_count);
        (floor - 1) as usize
    }

    pub fn enqueue(&mut self, group: WaitingGroup) {
        let idx = self.idx(group.source_floor);
        self.queues[idx].push_back(group);
    }

    pub fn queue(&self, floor: u32) -> &VecDeque<WaitingGroup> {
        &self.queues[self.idx(floor)]
    }

    pub fn waiting_count(&self, floor: u32) -> u32 {
        self.queue(floor).iter().map(|g| g.count).sum()
    }

    pub fn total_waiting(&self) -> u32 {
        (1..=self.floor_count).map(|f| self.waiting_count(f)).sum()
    }

    pub fn is_empty_at(&self, floor: u32) -> bool {
        self.queue(floor).is_empty()
    }

    /// Advance every waiting group's elapsed wait time by `delta_ms`,
    /// evicting (and returning) any that reach `max_wait_ms`.
    pub fn advance_wait(&mut self, delta_ms: u64, max_wait_ms: u64) -> Vec<WaitingGroup> {
        let mut evicted = Vec::new();
        for queue in self.queues.iter_mut() {
            let mut i = 0;
            while i < queue.len() {
                queue[i].wait_elapsed_ms += delta_ms;
                if queue[i].wait_elapsed_ms >= max_wait_ms {
                    evicted.push(queue.remove(i).unwrap());
                } else {
                    i += 1;
                }
            }
        }
        evicted
    }

    /// Board as many FIFO-ordered, direction-compatible groups at `floor`
    /// as fit into `available_capacity`. Incompatible groups are left in
    /// place, never consumed; a group that only partially fits is split,
    /// leaving the residual at the head of the queue for a later visit.
    ///
    /// The boarded slice of a split keeps the original `request_id` (it is
    /// already the id the calling cabin's ledger committed to), and the
    /// residual left behind is reassigned a fresh id drawn from
    /// `next_id`. Without that, both halves would share one id and the
    /// residual would stay invisible to dispatch until the boarded half is
    /// delivered and drops the id from the ledger -- it would sit there
    /// even after another cabin frees up (spec.md section 8, scenario 3).
    ///
    /// Stops as soon as capacity is exhausted or the queue has no more
    /// compatible groups to offer.
    pub fn take_boardable(
        &mut self,
        floor: u32,
        direction: Direction,
        available_capacity: u32,
        next_id: &mut RequestId,
    ) -> Vec<WaitingGroup> {
        let idx = self.idx(floor);
        let queue = &mut self.queues[idx];

        let mut boarded = Vec::new();
        let mut remaining = available_capacity;
        let mut i = 0;

        while i < queue.len() && remaining > 0 {
            if !queue[i].direction().compatible_with(direction) {
                i += 1;
                continue;
            }

            if queue[i].count <= remaining {
                let group = queue.remove(i).unwrap();
                remaining -= group.count;
                boarded.push(group);
                // Do not advance `i`: the removal shifted the next entry
                // into this slot.
            } else {
                let take = remaining;
                let mut partial = queue[i].clone();
                partial.count = take;
                queue[i].count -= take;
                queue[i].request_id = *next_id;
                *next_id += 1;
                remaining = 0;
                boarded.push(partial);
            }
        }

        boarded
    }

    /// Remove a specific waiting group's claim by request id (used when a
    /// timed-out eviction or a cabin reassignment needs to drop a stale
    /// reference without touching count data it does not own).
    pub fn remove_by_request(&mut self, request_id: RequestId) -> Option<WaitingGroup> {
        for queue in self.queues.iter_mut() {
            if let Some(pos) = queue.iter().position(|g| g.request_id == request_id) {
                return queue.remove(pos);
            }
        }
        None
    }

    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grp(id: RequestId, source: u32, target: u32, count: u32) -> WaitingGroup {
        WaitingGroup {
            request_id: id,
            source_floor: source,
            target_floor: target,
            count,
            wait_elapsed_ms: 0,
        }
    }

    #[test]
    fn fifo_order_preserved_with_split() {
        let mut model = FloorWaitingModel::new(14);
        model.enqueue(grp(1, 1, 5, 8));
        model.enqueue(grp(2, 1, 5, 7));

        let mut next_id: RequestId = 100;
        let boarded = model.take_boardable(1, Direction::Up, 12, &mut next_id);
        assert_eq!(boarded.len(), 2);
        assert_eq!(boarded[0].request_id, 1);
        assert_eq!(boarded[0].count, 8);
        assert_eq!(boarded[1].request_id, 2);
        assert_eq!(boarded[1].count, 4);

        // residual stays at head, under a fresh id so it is no longer the
        // same physical request as the boarded slice that kept id 2.
        assert_eq!(model.queue(1).len(), 1);
        assert_eq!(model.queue(1)[0].count, 3);
        assert_eq!(model.queue(1)[0].request_id, 100);
        assert_eq!(next_id, 101);
    }

    #[test]
    fn incompatible_direction_is_skipped_not_consumed() {
        let mut model = FloorWaitingModel::new(14);
        model.enqueue(grp(1, 5, 2, 1)); // downward
        model.enqueue(grp(2, 5, 9, 1)); // upward

        let mut next_id: RequestId = 100;
        let boarded = model.take_boardable(5, Direction::Up, 12, &mut next_id);
        assert_eq!(boarded.len(), 1);
        assert_eq!(boarded[0].request_id, 2);
        assert_eq!(model.queue(5).len(), 1);
        assert_eq!(model.queue(5)[0].request_id, 1);
        assert_eq!(next_id, 100);
    }

    #[test]
    fn timeout_eviction_removes_group() {
        let mut model = FloorWaitingModel::new(14);
        model.enqueue(grp(1, 7, 1, 1));

        let evicted = model.advance_wait(5_000, 5_000);
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].request_id, 1);
        assert!(model.is_empty_at(7));
    }
}
