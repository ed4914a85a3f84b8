use crate::games::session_rng::SessionRng;

use super::types::OpponentStats;

/// Narrow seam standing in for a remote peer: one call per round producing
/// the opponent's terminal statistics. A real network session would
/// implement this without touching round or match logic.
pub trait OpponentSimulator {
    fn simulate_round(&mut self, rng: &mut SessionRng) -> OpponentStats;
}

const BASE_TIME_MIN_SECS: f64 = 15.0;
const BASE_TIME_SPREAD_SECS: f64 = 45.0;
const DIFFICULTY_MIN: f64 = 0.8;
const DIFFICULTY_SPREAD: f64 = 0.4;

/// Draws a base survival time in [15, 60) seconds, scaled by a difficulty
/// factor in [0.8, 1.2). The score tracks double the survival time.
pub struct SimulatedOpponent;

impl OpponentSimulator for SimulatedOpponent {
    fn simulate_round(&mut self, rng: &mut SessionRng) -> OpponentStats {
        let base_time = BASE_TIME_MIN_SECS + rng.random_unit() * BASE_TIME_SPREAD_SECS;
        let factor = DIFFICULTY_MIN + rng.random_unit() * DIFFICULTY_SPREAD;

        OpponentStats {
            survival_secs: (base_time * factor) as u64,
            score: (base_time * 2.0 * factor) as u32,
        }
    }
}

const OPPONENT_ADJECTIVES: &[&str] = &[
    "Swift", "Sly", "Silent", "Golden", "Wild", "Fierce", "Quick", "Bold",
];

const OPPONENT_NOUNS: &[&str] = &[
    "Viper", "Cobra", "Python", "Mamba", "Boa", "Adder", "Taipan", "Krait",
];

pub fn generate_opponent_name(rng: &mut SessionRng) -> String {
    let adjective = OPPONENT_ADJECTIVES[rng.random_range(0..OPPONENT_ADJECTIVES.len())];
    let noun = OPPONENT_NOUNS[rng.random_range(0..OPPONENT_NOUNS.len())];
    format!("{} {}", adjective, noun)
}
