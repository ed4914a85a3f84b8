use std::time::Duration;

use serde::{Deserialize, Serialize};

use arena::config::Validate;
use arena::games::snake::EngineSettings;
use arena::matches::MatchSettings;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub engine: EngineSection,
    pub matches: MatchSection,
    pub wallet: WalletSection,
    pub autopilot: AutopilotSection,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    pub canvas_size: u32,
    pub cell_size: u32,
    pub tick_interval_ms: u64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            canvas_size: 400,
            cell_size: 20,
            tick_interval_ms: 150,
        }
    }
}

impl From<&EngineSection> for EngineSettings {
    fn from(section: &EngineSection) -> Self {
        Self {
            canvas_size: section.canvas_size,
            cell_size: section.cell_size,
            tick_interval: Duration::from_millis(section.tick_interval_ms),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSection {
    pub matchmaking_delay_ms: u64,
    pub round_break_ms: u64,
    pub max_rounds: u32,
    pub rounds_to_win: u32,
}

impl Default for MatchSection {
    fn default() -> Self {
        Self {
            matchmaking_delay_ms: 2000,
            round_break_ms: 3000,
            max_rounds: 3,
            rounds_to_win: 2,
        }
    }
}

impl From<&MatchSection> for MatchSettings {
    fn from(section: &MatchSection) -> Self {
        Self {
            matchmaking_delay: Duration::from_millis(section.matchmaking_delay_ms),
            round_break: Duration::from_millis(section.round_break_ms),
            max_rounds: section.max_rounds,
            rounds_to_win: section.rounds_to_win,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletSection {
    pub starting_balance: f64,
    pub tables: Vec<f64>,
    pub default_stake: f64,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            starting_balance: 100.0,
            tables: vec![5.0, 10.0, 15.0, 20.0],
            default_stake: 10.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSection {
    pub enabled: bool,
}

impl Default for AutopilotSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        EngineSettings::from(&self.engine).validate()?;
        MatchSettings::from(&self.matches).validate()?;

        if self.wallet.starting_balance < 0.0 {
            return Err("Starting balance cannot be negative".to_string());
        }
        if self.wallet.tables.is_empty() {
            return Err("At least one table stake must be configured".to_string());
        }
        if self.wallet.tables.iter().any(|stake| *stake <= 0.0) {
            return Err("Table stakes must be positive".to_string());
        }
        if !self.wallet.tables.contains(&self.wallet.default_stake) {
            return Err("Default stake must be one of the configured tables".to_string());
        }
        Ok(())
    }
}
