pub mod coordinator;
pub mod opponent;
pub mod session;
pub mod settings;
pub mod types;

pub use coordinator::{MatchCoordinator, RoundTransition, TickFlow};
pub use opponent::{OpponentSimulator, SimulatedOpponent};
pub use session::{PlayerCommand, run_match};
pub use settings::MatchSettings;
pub use types::{
    MatchInfo, MatchResult, MatchState, MatchWinner, OpponentStats, RoundOutcome, RoundResult,
};
