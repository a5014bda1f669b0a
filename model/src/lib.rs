pub mod config;
pub mod direction;
pub mod events;
pub mod request;
pub mod stops;
pub mod waiting;

pub use config::{SimConfig, Strategy};
pub use direction::Direction;
pub use events::SimEvent;
pub use request::{IntakeError, Request, RequestId};
pub use waiting::{FloorWaitingModel, WaitingGroup};
