use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::snake::RoundStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    Waiting,
    Playing,
    Finished,
    Abandoned,
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchState::Waiting => "waiting",
            MatchState::Playing => "playing",
            MatchState::Finished => "finished",
            MatchState::Abandoned => "abandoned",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Lose,
    Draw,
}

impl RoundResult {
    /// Round decision law: strictly longer survival wins, equal times draw.
    pub fn from_times(player_secs: u64, opponent_secs: u64) -> Self {
        use std::cmp::Ordering;
        match player_secs.cmp(&opponent_secs) {
            Ordering::Greater => RoundResult::Win,
            Ordering::Less => RoundResult::Lose,
            Ordering::Equal => RoundResult::Draw,
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundResult::Win => "win",
            RoundResult::Lose => "lose",
            RoundResult::Draw => "draw",
        };
        write!(f, "{}", name)
    }
}

/// Synthetic per-round statistics standing in for a remote peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentStats {
    pub survival_secs: u64,
    pub score: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub result: RoundResult,
    pub player: RoundStats,
    pub opponent: OpponentStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchWinner {
    Player,
    Opponent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub stake: f64,
    pub opponent_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: MatchWinner,
    pub player_rounds_won: u32,
    pub opponent_rounds_won: u32,
    pub rounds: Vec<RoundOutcome>,
    pub stake: f64,
    pub duration: Duration,
}

impl MatchResult {
    /// Winner takes double the stake; a lost or forfeited match pays nothing.
    pub fn payout(&self) -> f64 {
        match self.winner {
            MatchWinner::Player => self.stake * 2.0,
            MatchWinner::Opponent => 0.0,
        }
    }
}
