pub mod machine;
pub mod state;

pub use machine::tick;
pub use state::{Cabin, CabinMode, OnboardGroup};
