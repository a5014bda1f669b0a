use crate::config::Strategy;
use crate::request::RequestId;

/// The single observability channel (spec.md section 9): every externally
/// meaningful state change is emitted here rather than being reconstructed
/// by peeking at internal fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    Admitted {
        request_id: RequestId,
    },
    AdmissionRejected {
        reason: &'static str,
    },
    AdmissionCapped {
        source_floor: u32,
    },
    Assigned {
        request_id: RequestId,
        cabin_id: u32,
    },
    PickedUp {
        request_id: RequestId,
        cabin_id: u32,
        floor: u32,
        count: u32,
    },
    DroppedOff {
        request_id: RequestId,
        cabin_id: u32,
        floor: u32,
        count: u32,
    },
    TimedOut {
        request_id: RequestId,
        source_floor: u32,
        target_floor: u32,
        count: u32,
    },
    StrategyChanged {
        from: Strategy,
        to: Strategy,
    },
    Reset,
}
