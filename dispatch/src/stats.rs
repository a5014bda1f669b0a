//! Per-strategy running statistics, recovered from the original
//! `Dispatcher::Statistics` (total/successful assignments, mean wait,
//! mean pickup distance). Reset whenever the active strategy changes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DispatchStats {
    pub total_assignments: u64,
    pub successful_assignments: u64,
    pub mean_wait_ms: f64,
    pub mean_distance: f64,
}

impl DispatchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_assignments == 0 {
            0.0
        } else {
            self.successful_assignments as f64 / self.total_assignments as f64
        }
    }

    pub fn record_attempt(&mut self) {
        self.total_assignments += 1;
    }

    /// Record a successful assignment: `wait_ms` is how long the request
    /// had been waiting (since `submitted_at`) at the moment it was
    /// committed; `distance` is the chosen cabin's pickup distance.
    pub fn record_success(&mut self, wait_ms: u64, distance: f64) {
        self.successful_assignments += 1;
        let n = self.successful_assignments as f64;
        self.mean_wait_ms += (wait_ms as f64 - self.mean_wait_ms) / n;
        self.mean_distance += (distance - self.mean_distance) / n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_mean_matches_simple_average() {
        let mut stats = DispatchStats::default();
        stats.record_attempt();
        stats.record_success(100, 4.0);
        stats.record_attempt();
        stats.record_success(200, 6.0);

        assert_eq!(stats.total_assignments, 2);
        assert_eq!(stats.successful_assignments, 2);
        assert!((stats.mean_wait_ms - 150.0).abs() < 1e-9);
        assert!((stats.mean_distance - 5.0).abs() < 1e-9);
        assert_eq!(stats.success_rate(), 1.0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stats = DispatchStats::default();
        stats.record_attempt();
        stats.record_success(50, 2.0);
        stats.reset();
        assert_eq!(stats, DispatchStats::default());
    }
}
