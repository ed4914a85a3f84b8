pub mod config;
pub mod events;
pub mod games;
pub mod logger;
pub mod matches;

pub use events::{EngineEvents, MatchEvents, NullEvents};
pub use games::SessionRng;
pub use games::snake::{Direction, EngineSettings, GameEngine, RoundStats};
pub use matches::{MatchCoordinator, MatchResult, MatchSettings, SimulatedOpponent};
