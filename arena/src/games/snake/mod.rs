pub mod autopilot;
pub mod engine;
pub mod settings;
pub mod snake;
pub mod types;

pub use autopilot::Autopilot;
pub use engine::{EnginePhase, GameEngine, TickResult};
pub use settings::EngineSettings;
pub use snake::Snake;
pub use types::{Direction, EndReason, Point, RoundStats};
