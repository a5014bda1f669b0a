use thiserror::Error;

use crate::direction::Direction;

/// Stable identity for a request, assigned at intake.
///
/// Preserved across the Pending -> Assigned Ledger -> onboard lifecycle so
/// the same logical request can be tracked through all three containers
/// without ever being copied into more than one at a time.
pub type RequestId = u64;

/// A floor-to-floor request, validated at intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: RequestId,
    pub source_floor: u32,
    pub target_floor: u32,
    pub count: u32,
    pub submitted_at: u64,
}

impl Request {
    pub fn direction(&self) -> Direction {
        Direction::of_travel(self.source_floor, self.target_floor)
    }
}

/// Rejections raised by Request Intake (spec.md section 4.B / 7).
///
/// `AdmissionCap` is not an error surfaced to the caller of `submit` (the
/// cap is enforced silently, per spec); it is retained here only so the
/// intake layer can classify *why* a request never reached the core
/// without inventing a second taxonomy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntakeError {
    #[error("source and target floor must differ")]
    SameFloor,

    #[error("floor out of range [1, {floor_count}]")]
    FloorOutOfRange { floor_count: u32 },

    #[error("count must be between 1 and {capacity} (got {count})")]
    InvalidCount { count: u32, capacity: u32 },
}

/// Validate a raw (source, target, count) triple against the building's
/// bounds. Construction of the `Request` (assigning `id`/`submitted_at`)
/// happens one layer up, in the intake surface, which owns the request-id
/// counter and the logical clock.
pub fn validate(
    source_floor: u32,
    target_floor: u32,
    count: u32,
    floor_count: u32,
    capacity: u32,
) -> Result<(), IntakeError> {
    if source_floor == target_floor {
        return Err(IntakeError::SameFloor);
    }
    if source_floor < 1 || source_floor > floor_count || target_floor < 1 || target_floor > floor_count
    {
        return Err(IntakeError::FloorOutOfRange { floor_count });
    }
    if count < 1 || count > capacity {
        return Err(IntakeError::InvalidCount { count, capacity });
    }
    Ok(())
}
