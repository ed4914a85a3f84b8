use std::time::Duration;

#[derive(Clone, Debug)]
pub struct MatchSettings {
    pub matchmaking_delay: Duration,
    pub round_break: Duration,
    pub max_rounds: u32,
    pub rounds_to_win: u32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            matchmaking_delay: Duration::from_millis(2000),
            round_break: Duration::from_millis(3000),
            max_rounds: 3,
            rounds_to_win: 2,
        }
    }
}

impl MatchSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds < 1 {
            return Err("A match needs at least one round".to_string());
        }
        if self.rounds_to_win < 1 {
            return Err("Rounds to win must be at least 1".to_string());
        }
        if self.rounds_to_win > self.max_rounds {
            return Err("Rounds to win cannot exceed the round count".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(MatchSettings::default().validate().is_ok());
    }

    #[test]
    fn test_rounds_to_win_bounded_by_max_rounds() {
        let settings = MatchSettings {
            rounds_to_win: 4,
            max_rounds: 3,
            ..MatchSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
