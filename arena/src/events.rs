use crate::games::snake::RoundStats;
use crate::matches::types::{MatchInfo, MatchResult, MatchState, RoundOutcome};

/// Per-round notifications produced by the game engine. One typed method per
/// event kind; dispatched synchronously, in emission order, on the thread
/// that mutated the state.
pub trait EngineEvents {
    fn time_update(&mut self, survival_secs: u64);
    fn score_change(&mut self, score: u32);
    fn game_over(&mut self, stats: &RoundStats);
}

/// Match lifecycle notifications produced by the coordinator.
pub trait MatchEvents {
    fn match_start(&mut self, info: &MatchInfo);
    fn round_start(&mut self, round: u32);
    fn round_end(&mut self, outcome: &RoundOutcome);
    fn match_end(&mut self, result: &MatchResult);
    fn state_change(&mut self, state: MatchState);
}

/// Sink that drops every notification. Used by benches and by hosts that
/// only care about return values.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEvents;

impl EngineEvents for NullEvents {
    fn time_update(&mut self, _survival_secs: u64) {}
    fn score_change(&mut self, _score: u32) {}
    fn game_over(&mut self, _stats: &RoundStats) {}
}

impl MatchEvents for NullEvents {
    fn match_start(&mut self, _info: &MatchInfo) {}
    fn round_start(&mut self, _round: u32) {}
    fn round_end(&mut self, _outcome: &RoundOutcome) {}
    fn match_end(&mut self, _result: &MatchResult) {}
    fn state_change(&mut self, _state: MatchState) {}
}
