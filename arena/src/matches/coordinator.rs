use std::cmp::Ordering;
use std::time::Instant;

use crate::events::{EngineEvents, MatchEvents};
use crate::games::session_rng::SessionRng;
use crate::games::snake::{Direction, GameEngine, RoundStats, TickResult};
use crate::log;

use super::opponent::{OpponentSimulator, generate_opponent_name};
use super::settings::MatchSettings;
use super::types::{
    MatchInfo, MatchResult, MatchState, MatchWinner, OpponentStats, RoundOutcome, RoundResult,
};

/// What the session loop must do once a round has ended.
pub enum RoundTransition {
    NextRound,
    MatchOver(MatchResult),
}

pub enum TickFlow {
    Continue,
    RoundOver(RoundTransition),
}

struct CurrentMatch {
    info: MatchInfo,
    started_at: Instant,
}

/// Best-of-N orchestration between the player's engine and a synthetic
/// opponent. Owns exactly one engine, injected at construction; all timing
/// (matchmaking delay, tick cadence, round breaks) lives in the session loop.
pub struct MatchCoordinator<E, O, M>
where
    E: EngineEvents,
    O: OpponentSimulator,
    M: MatchEvents,
{
    engine: GameEngine<E>,
    opponent: O,
    settings: MatchSettings,
    events: M,
    rng: SessionRng,
    state: MatchState,
    current: Option<CurrentMatch>,
    current_round: u32,
    player_rounds_won: u32,
    opponent_rounds_won: u32,
    rounds: Vec<RoundOutcome>,
    opponent_stats: Option<OpponentStats>,
}

impl<E, O, M> MatchCoordinator<E, O, M>
where
    E: EngineEvents,
    O: OpponentSimulator,
    M: MatchEvents,
{
    pub fn new(
        engine: GameEngine<E>,
        opponent: O,
        settings: MatchSettings,
        events: M,
        rng: SessionRng,
    ) -> Self {
        Self {
            engine,
            opponent,
            settings,
            events,
            rng,
            state: MatchState::Waiting,
            current: None,
            current_round: 1,
            player_rounds_won: 0,
            opponent_rounds_won: 0,
            rounds: Vec::new(),
            opponent_stats: None,
        }
    }

    /// Captures the stake and enters matchmaking. The session loop owns the
    /// matchmaking delay and calls `begin_play` when it elapses.
    pub fn start_match(&mut self, stake: f64) {
        let opponent_name = generate_opponent_name(&mut self.rng);
        self.current = Some(CurrentMatch {
            info: MatchInfo {
                stake,
                opponent_name,
            },
            started_at: Instant::now(),
        });
        self.state = MatchState::Waiting;
        self.current_round = 1;
        self.player_rounds_won = 0;
        self.opponent_rounds_won = 0;
        self.rounds.clear();
        self.opponent_stats = None;
        self.events.state_change(MatchState::Waiting);
        log!("Match started for stake {:.2}, waiting for an opponent", stake);
    }

    /// Matchmaking finished: transition to playing and start round 1.
    /// No-op if the match was abandoned while waiting.
    pub fn begin_play(&mut self) {
        if self.state != MatchState::Waiting {
            return;
        }
        let Some(current) = self.current.as_ref() else {
            return;
        };
        let info = current.info.clone();

        self.state = MatchState::Playing;
        self.events.state_change(MatchState::Playing);
        self.events.match_start(&info);
        log!("Matched against {}, starting round 1", info.opponent_name);
        self.start_round();
    }

    pub fn start_round(&mut self) {
        if self.state != MatchState::Playing {
            return;
        }
        self.engine.reset(&mut self.rng);
        let stats = self.opponent.simulate_round(&mut self.rng);
        log!(
            "Round {} in progress, opponent plays for {}s",
            self.current_round,
            stats.survival_secs
        );
        self.opponent_stats = Some(stats);
        self.events.round_start(self.current_round);
    }

    /// One simulation step. An engine game-over while playing feeds straight
    /// into `end_round`; reports from a stopped or stale engine are ignored.
    pub fn tick(&mut self) -> TickFlow {
        match self.engine.tick(&mut self.rng) {
            TickResult::Continue => TickFlow::Continue,
            TickResult::GameOver(stats) => match self.end_round(stats) {
                Some(transition) => TickFlow::RoundOver(transition),
                None => TickFlow::Continue,
            },
        }
    }

    /// Compares the player's terminal stats against the opponent's synthetic
    /// result for this round. Returns what the session should do next, or
    /// None when no round is in play.
    pub fn end_round(&mut self, player: RoundStats) -> Option<RoundTransition> {
        if self.state != MatchState::Playing {
            return None;
        }
        let Some(opponent) = self.opponent_stats.take() else {
            return None;
        };

        let result = RoundResult::from_times(player.survival_secs, opponent.survival_secs);
        match result {
            RoundResult::Win => self.player_rounds_won += 1,
            RoundResult::Lose => self.opponent_rounds_won += 1,
            RoundResult::Draw => {}
        }

        let outcome = RoundOutcome {
            round: self.current_round,
            result,
            player,
            opponent,
        };
        self.rounds.push(outcome);
        log!(
            "Round {} {}: {}s vs {}s, rounds {}:{}",
            outcome.round,
            result,
            player.survival_secs,
            opponent.survival_secs,
            self.player_rounds_won,
            self.opponent_rounds_won
        );
        self.events.round_end(&outcome);

        let match_over = self.current_round >= self.settings.max_rounds
            || self.player_rounds_won >= self.settings.rounds_to_win
            || self.opponent_rounds_won >= self.settings.rounds_to_win;

        if match_over {
            Some(RoundTransition::MatchOver(self.end_match()))
        } else {
            self.current_round += 1;
            Some(RoundTransition::NextRound)
        }
    }

    fn end_match(&mut self) -> MatchResult {
        self.state = MatchState::Finished;
        let current = self
            .current
            .take()
            .expect("A match being decided must have been started");

        // A fully drawn match (three draws) stays level; the house rules
        // that it goes to the opponent.
        let winner = match self.player_rounds_won.cmp(&self.opponent_rounds_won) {
            Ordering::Greater => MatchWinner::Player,
            Ordering::Less | Ordering::Equal => MatchWinner::Opponent,
        };

        let result = MatchResult {
            winner,
            player_rounds_won: self.player_rounds_won,
            opponent_rounds_won: self.opponent_rounds_won,
            rounds: self.rounds.clone(),
            stake: current.info.stake,
            duration: current.started_at.elapsed(),
        };
        log!(
            "Match finished {}:{}, winner: {:?}",
            result.player_rounds_won,
            result.opponent_rounds_won,
            result.winner
        );
        self.events.match_end(&result);
        self.events.state_change(MatchState::Finished);
        result
    }

    /// Abandons the active match, if any. The engine is force-stopped so no
    /// game-over fires, and every pending scheduled continuation becomes a
    /// no-op through the state guards above.
    pub fn leave_match(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.engine.stop();
        self.state = MatchState::Abandoned;
        self.current = None;
        self.opponent_stats = None;
        self.events.state_change(MatchState::Abandoned);
        log!("Match abandoned");
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.engine.set_direction(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.engine.toggle_pause();
    }

    pub fn engine(&self) -> &GameEngine<E> {
        &self.engine
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// True while a match is waiting or playing; delayed continuations check
    /// this before acting.
    pub fn is_active(&self) -> bool {
        matches!(self.state, MatchState::Waiting | MatchState::Playing)
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn rounds(&self) -> &[RoundOutcome] {
        &self.rounds
    }

    pub fn rounds_won(&self) -> (u32, u32) {
        (self.player_rounds_won, self.opponent_rounds_won)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::events::NullEvents;
    use crate::games::snake::EngineSettings;

    use super::*;

    struct FixedOpponent {
        times: Vec<u64>,
        next: usize,
    }

    impl FixedOpponent {
        fn new(times: &[u64]) -> Self {
            Self {
                times: times.to_vec(),
                next: 0,
            }
        }
    }

    impl OpponentSimulator for FixedOpponent {
        fn simulate_round(&mut self, _rng: &mut SessionRng) -> OpponentStats {
            let secs = self.times[self.next % self.times.len()];
            self.next += 1;
            OpponentStats {
                survival_secs: secs,
                score: secs as u32 * 2,
            }
        }
    }

    #[derive(Default)]
    struct Recorded {
        states: Vec<MatchState>,
        infos: Vec<MatchInfo>,
        rounds_started: Vec<u32>,
        outcomes: Vec<RoundOutcome>,
        results: Vec<MatchResult>,
    }

    #[derive(Clone, Default)]
    struct MatchRecorder {
        recorded: Rc<RefCell<Recorded>>,
    }

    impl MatchEvents for MatchRecorder {
        fn match_start(&mut self, info: &MatchInfo) {
            self.recorded.borrow_mut().infos.push(info.clone());
        }

        fn round_start(&mut self, round: u32) {
            self.recorded.borrow_mut().rounds_started.push(round);
        }

        fn round_end(&mut self, outcome: &RoundOutcome) {
            self.recorded.borrow_mut().outcomes.push(*outcome);
        }

        fn match_end(&mut self, result: &MatchResult) {
            self.recorded.borrow_mut().results.push(result.clone());
        }

        fn state_change(&mut self, state: MatchState) {
            self.recorded.borrow_mut().states.push(state);
        }
    }

    type TestCoordinator = MatchCoordinator<NullEvents, FixedOpponent, MatchRecorder>;

    fn create_coordinator(opponent_times: &[u64]) -> (TestCoordinator, Rc<RefCell<Recorded>>) {
        let recorder = MatchRecorder::default();
        let recorded = recorder.recorded.clone();
        let engine = GameEngine::new(&EngineSettings::default(), NullEvents);
        let coordinator = MatchCoordinator::new(
            engine,
            FixedOpponent::new(opponent_times),
            MatchSettings::default(),
            recorder,
            SessionRng::new(42),
        );
        (coordinator, recorded)
    }

    fn player_stats(survival_secs: u64) -> RoundStats {
        RoundStats {
            score: survival_secs as u32 * 2,
            survival_secs,
            snake_length: 3,
        }
    }

    fn start_playing(coordinator: &mut TestCoordinator, stake: f64) {
        coordinator.start_match(stake);
        coordinator.begin_play();
    }

    #[test]
    fn test_player_outlasting_opponent_wins_round() {
        let (mut coordinator, _) = create_coordinator(&[25]);
        start_playing(&mut coordinator, 10.0);

        let transition = coordinator.end_round(player_stats(40));
        assert!(matches!(transition, Some(RoundTransition::NextRound)));
        assert_eq!(coordinator.rounds_won(), (1, 0));
        assert_eq!(coordinator.rounds()[0].result, RoundResult::Win);
        assert_eq!(coordinator.current_round(), 2);
    }

    #[test]
    fn test_match_ends_when_player_reaches_two_wins() {
        let (mut coordinator, _) = create_coordinator(&[10, 10, 10]);
        start_playing(&mut coordinator, 10.0);

        assert!(matches!(
            coordinator.end_round(player_stats(40)),
            Some(RoundTransition::NextRound)
        ));
        coordinator.start_round();
        let transition = coordinator.end_round(player_stats(40));

        let Some(RoundTransition::MatchOver(result)) = transition else {
            panic!("Two wins should end the match");
        };
        assert_eq!(result.winner, MatchWinner::Player);
        assert_eq!(result.player_rounds_won, 2);
        assert_eq!(result.opponent_rounds_won, 0);
        assert_eq!(result.rounds.len(), 2);
        assert_eq!(coordinator.state(), MatchState::Finished);
    }

    #[test]
    fn test_match_ends_when_opponent_reaches_two_wins() {
        let (mut coordinator, _) = create_coordinator(&[50, 50, 50]);
        start_playing(&mut coordinator, 10.0);

        coordinator.end_round(player_stats(5));
        coordinator.start_round();
        let transition = coordinator.end_round(player_stats(5));

        let Some(RoundTransition::MatchOver(result)) = transition else {
            panic!("Two opponent wins should end the match");
        };
        assert_eq!(result.winner, MatchWinner::Opponent);
        assert_eq!(result.payout(), 0.0);
    }

    #[test]
    fn test_split_match_goes_the_full_three_rounds() {
        let (mut coordinator, _) = create_coordinator(&[10, 50, 10]);
        start_playing(&mut coordinator, 10.0);

        assert!(matches!(
            coordinator.end_round(player_stats(30)),
            Some(RoundTransition::NextRound)
        ));
        coordinator.start_round();
        assert!(matches!(
            coordinator.end_round(player_stats(30)),
            Some(RoundTransition::NextRound)
        ));
        coordinator.start_round();
        let transition = coordinator.end_round(player_stats(30));

        let Some(RoundTransition::MatchOver(result)) = transition else {
            panic!("Round 3 should end the match");
        };
        assert_eq!(result.winner, MatchWinner::Player);
        assert_eq!(result.player_rounds_won, 2);
        assert_eq!(result.opponent_rounds_won, 1);
        assert_eq!(result.rounds.len(), 3);
    }

    #[test]
    fn test_three_draws_go_to_the_opponent() {
        let (mut coordinator, _) = create_coordinator(&[20, 20, 20]);
        start_playing(&mut coordinator, 10.0);

        coordinator.end_round(player_stats(20));
        coordinator.start_round();
        coordinator.end_round(player_stats(20));
        coordinator.start_round();
        let transition = coordinator.end_round(player_stats(20));

        let Some(RoundTransition::MatchOver(result)) = transition else {
            panic!("Round 3 should end the match");
        };
        assert_eq!(coordinator.rounds_won(), (0, 0));
        assert_eq!(result.winner, MatchWinner::Opponent);
        assert!(result.rounds.iter().all(|r| r.result == RoundResult::Draw));
    }

    #[test]
    fn test_game_over_after_leaving_is_ignored() {
        let (mut coordinator, recorded) = create_coordinator(&[25]);
        start_playing(&mut coordinator, 10.0);
        coordinator.leave_match();

        assert!(coordinator.end_round(player_stats(40)).is_none());
        assert!(coordinator.rounds().is_empty());
        assert!(recorded.borrow().outcomes.is_empty());
    }

    #[test]
    fn test_game_over_before_matchmaking_completes_is_ignored() {
        let (mut coordinator, _) = create_coordinator(&[25]);
        coordinator.start_match(10.0);

        assert!(coordinator.end_round(player_stats(40)).is_none());
        assert_eq!(coordinator.state(), MatchState::Waiting);
    }

    #[test]
    fn test_duplicate_end_round_is_ignored() {
        let (mut coordinator, _) = create_coordinator(&[25]);
        start_playing(&mut coordinator, 10.0);

        assert!(coordinator.end_round(player_stats(40)).is_some());
        assert!(coordinator.end_round(player_stats(40)).is_none());
        assert_eq!(coordinator.rounds().len(), 1);
    }

    #[test]
    fn test_leave_match_is_idempotent() {
        let (mut coordinator, recorded) = create_coordinator(&[25]);
        start_playing(&mut coordinator, 10.0);

        coordinator.leave_match();
        coordinator.leave_match();

        assert_eq!(coordinator.state(), MatchState::Abandoned);
        let abandons = recorded
            .borrow()
            .states
            .iter()
            .filter(|s| **s == MatchState::Abandoned)
            .count();
        assert_eq!(abandons, 1);
    }

    #[test]
    fn test_leave_without_a_match_is_a_no_op() {
        let (mut coordinator, recorded) = create_coordinator(&[25]);
        coordinator.leave_match();
        assert!(recorded.borrow().states.is_empty());
    }

    #[test]
    fn test_begin_play_requires_matchmaking() {
        let (mut coordinator, recorded) = create_coordinator(&[25]);
        coordinator.begin_play();
        assert!(recorded.borrow().infos.is_empty());
        assert!(!matches!(coordinator.state(), MatchState::Playing));
    }

    #[test]
    fn test_lifecycle_events_are_ordered() {
        let (mut coordinator, recorded) = create_coordinator(&[10, 10]);
        start_playing(&mut coordinator, 15.0);
        coordinator.end_round(player_stats(40));
        coordinator.start_round();
        coordinator.end_round(player_stats(40));

        let recorded = recorded.borrow();
        assert_eq!(
            recorded.states,
            vec![MatchState::Waiting, MatchState::Playing, MatchState::Finished]
        );
        assert_eq!(recorded.infos.len(), 1);
        assert_eq!(recorded.infos[0].stake, 15.0);
        assert_eq!(recorded.rounds_started, vec![1, 2]);
        assert_eq!(recorded.outcomes.len(), 2);
        assert_eq!(recorded.results.len(), 1);
        assert_eq!(recorded.results[0].stake, 15.0);
    }

    #[test]
    fn test_tick_feeds_round_end_through_the_engine() {
        let (mut coordinator, _) = create_coordinator(&[25]);
        start_playing(&mut coordinator, 10.0);

        // Drive the snake into the left wall; the engine's game-over must
        // land in the round bookkeeping.
        coordinator.set_direction(Direction::Left);
        let mut transition = None;
        for _ in 0..30 {
            if let TickFlow::RoundOver(t) = coordinator.tick() {
                transition = Some(t);
                break;
            }
        }

        assert!(matches!(transition, Some(RoundTransition::NextRound)));
        assert_eq!(coordinator.rounds().len(), 1);
        assert_eq!(coordinator.rounds()[0].result, RoundResult::Lose);
        assert_eq!(coordinator.rounds_won(), (0, 1));
    }

    #[test]
    fn test_restarting_clears_previous_match_state() {
        let (mut coordinator, _) = create_coordinator(&[10, 10]);
        start_playing(&mut coordinator, 10.0);
        coordinator.end_round(player_stats(40));
        coordinator.start_round();
        coordinator.end_round(player_stats(40));
        assert_eq!(coordinator.state(), MatchState::Finished);

        start_playing(&mut coordinator, 20.0);
        assert_eq!(coordinator.state(), MatchState::Playing);
        assert_eq!(coordinator.current_round(), 1);
        assert_eq!(coordinator.rounds_won(), (0, 0));
        assert!(coordinator.rounds().is_empty());
    }
}
