use serde::{Deserialize, Serialize};

/// The macroscopic intent of a cabin, or of a request's implied travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Direction implied by travelling from `source` to `target`.
    ///
    /// Panics if `source == target`; callers validate that at intake.
    pub fn of_travel(source: u32, target: u32) -> Direction {
        match source.cmp(&target) {
            std::cmp::Ordering::Less => Direction::Up,
            std::cmp::Ordering::Greater => Direction::Down,
            std::cmp::Ordering::Equal => {
                panic!("source and target floor must differ")
            }
        }
    }

    /// Whether a request/group travelling in `self` is acceptable to a
    /// cabin currently heading in `cabin_direction`. An idle cabin accepts
    /// any direction.
    pub fn compatible_with(self, cabin_direction: Direction) -> bool {
        match cabin_direction {
            Direction::Idle => true,
            other => self == other,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Idle => Direction::Idle,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Down => 'D',
            Direction::Idle => '-',
        }
    }
}
