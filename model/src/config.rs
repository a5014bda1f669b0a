use serde::{Deserialize, Serialize};

/// Dispatcher strategy selected at construction (spec.md section 4.C).
/// Immutable for the lifetime of a run; changing it resets per-strategy
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Default: distance + load/direction/queue/detour/near-full penalties.
    NearestLoadAware,
    /// Distance only.
    NearestFirst,
    /// Distance, doubled when the candidate cabin is idle.
    EnergySaving,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::NearestLoadAware
    }
}

/// Immutable configuration for one simulation run (spec.md section 6).
///
/// Built once via [`SimConfig::default`] or [`SimConfig::from_env`] and
/// injected at construction. Per the design note on global mutable
/// configuration, a running simulation never observes a config change
/// mid-run: callers stage a new value and it is applied only at the next
/// `reset()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub floor_count: u32,
    pub cabin_count: u32,
    pub capacity: u32,
    pub floor_travel_time_ms: u64,
    pub door_time_ms: u64,
    pub max_idle_time_ms: u64,
    pub max_wait_time_ms: u64,
    pub home_floor: u32,
    pub max_requests_per_floor: u32,
    pub max_total_inflight: u32,
    pub max_per_cabin_assignments: usize,
    pub strategy: Strategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floor_count: 14,
            cabin_count: 4,
            capacity: 12,
            floor_travel_time_ms: 5_000,
            door_time_ms: 1_000,
            max_idle_time_ms: 10_000,
            max_wait_time_ms: 120_000,
            home_floor: 1,
            max_requests_per_floor: 2,
            max_total_inflight: 20,
            max_per_cabin_assignments: 8,
            strategy: Strategy::NearestLoadAware,
        }
    }
}

impl SimConfig {
    /// Override defaults from environment variables, matching the
    /// `AppConfig::from_env` convention: unset or unparsable variables
    /// fall back to the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        macro_rules! env_override {
            ($field:ident, $var:literal) => {
                if let Ok(v) = std::env::var($var) {
                    if let Ok(parsed) = v.parse() {
                        cfg.$field = parsed;
                    }
                }
            };
        }

        env_override!(floor_count, "FLOOR_COUNT");
        env_override!(cabin_count, "CABIN_COUNT");
        env_override!(capacity, "CAPACITY");
        env_override!(floor_travel_time_ms, "FLOOR_TRAVEL_TIME_MS");
        env_override!(door_time_ms, "DOOR_TIME_MS");
        env_override!(max_idle_time_ms, "MAX_IDLE_TIME_MS");
        env_override!(max_wait_time_ms, "MAX_WAIT_TIME_MS");
        env_override!(home_floor, "HOME_FLOOR");
        env_override!(max_requests_per_floor, "MAX_REQUESTS_PER_FLOOR");
        env_override!(max_total_inflight, "MAX_TOTAL_INFLIGHT");
        env_override!(max_per_cabin_assignments, "MAX_PER_CABIN_ASSIGNMENTS");

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.floor_count, 14);
        assert_eq!(cfg.cabin_count, 4);
        assert_eq!(cfg.capacity, 12);
        assert_eq!(cfg.floor_travel_time_ms, 5_000);
        assert_eq!(cfg.door_time_ms, 1_000);
        assert_eq!(cfg.max_idle_time_ms, 10_000);
        assert_eq!(cfg.max_wait_time_ms, 120_000);
        assert_eq!(cfg.home_floor, 1);
        assert_eq!(cfg.max_requests_per_floor, 2);
        assert_eq!(cfg.max_total_inflight, 20);
        assert_eq!(cfg.max_per_cabin_assignments, 8);
        assert_eq!(cfg.strategy, Strategy::NearestLoadAware);
    }
}
