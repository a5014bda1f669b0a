pub mod engine;
pub mod feasibility;
pub mod stats;
pub mod strategy;

pub use engine::Dispatcher;
pub use feasibility::Feasibility;
pub use stats::DispatchStats;
