use arena::events::{EngineEvents, MatchEvents};
use arena::games::snake::RoundStats;
use arena::log;
use arena::matches::{MatchInfo, MatchResult, MatchState, RoundOutcome};

/// Logs engine notifications. Time updates arrive every tick, so only
/// whole-second changes are written out.
#[derive(Default)]
pub struct EngineEventLog {
    last_secs: Option<u64>,
}

impl EngineEvents for EngineEventLog {
    fn time_update(&mut self, survival_secs: u64) {
        if self.last_secs != Some(survival_secs) {
            self.last_secs = Some(survival_secs);
            log!("Survived {}s", survival_secs);
        }
    }

    fn score_change(&mut self, score: u32) {
        log!("Score: {}", score);
    }

    fn game_over(&mut self, stats: &RoundStats) {
        self.last_secs = None;
        log!(
            "Game over: score {}, survived {}s, length {}",
            stats.score,
            stats.survival_secs,
            stats.snake_length
        );
    }
}

pub struct MatchEventLog;

impl MatchEvents for MatchEventLog {
    fn match_start(&mut self, info: &MatchInfo) {
        log!(
            "Match against {} underway, stake {:.2}",
            info.opponent_name,
            info.stake
        );
    }

    fn round_start(&mut self, round: u32) {
        log!("Round {} started", round);
    }

    fn round_end(&mut self, outcome: &RoundOutcome) {
        log!(
            "Round {} ended: {} ({}s vs {}s)",
            outcome.round,
            outcome.result,
            outcome.player.survival_secs,
            outcome.opponent.survival_secs
        );
    }

    fn match_end(&mut self, result: &MatchResult) {
        log!(
            "Match over: {:?} wins {}:{} after {:.1}s",
            result.winner,
            result.player_rounds_won,
            result.opponent_rounds_won,
            result.duration.as_secs_f64()
        );
    }

    fn state_change(&mut self, state: MatchState) {
        log!("Match state: {}", state);
    }
}
