use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, sleep};

use crate::events::{EngineEvents, MatchEvents};
use crate::games::snake::{Autopilot, Direction};

use super::coordinator::{MatchCoordinator, RoundTransition, TickFlow};
use super::opponent::OpponentSimulator;
use super::types::MatchResult;

#[derive(Clone, Copy, Debug)]
pub enum PlayerCommand {
    Turn(Direction),
    TogglePause,
    Leave,
}

/// Drives one match to completion on the current task: matchmaking delay,
/// then rounds of ticks at the engine's interval with breaks in between.
/// Returns None when the player leaves before the match is decided.
///
/// All suspension here is cooperative; after every delay the coordinator's
/// state is re-checked, so a leave makes pending continuations no-ops.
pub async fn run_match<E, O, M>(
    coordinator: &mut MatchCoordinator<E, O, M>,
    commands: &mut mpsc::UnboundedReceiver<PlayerCommand>,
    stake: f64,
    autopilot_enabled: bool,
) -> Option<MatchResult>
where
    E: EngineEvents,
    O: OpponentSimulator,
    M: MatchEvents,
{
    let matchmaking_delay = coordinator.settings().matchmaking_delay;
    let round_break = coordinator.settings().round_break;

    coordinator.start_match(stake);

    if !wait_while_live(coordinator, commands, matchmaking_delay).await {
        return None;
    }
    coordinator.begin_play();

    let mut ticker = interval(coordinator.engine().tick_interval());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if autopilot_enabled
                    && let Some(direction) = Autopilot::next_direction(coordinator.engine())
                {
                    coordinator.set_direction(direction);
                }

                match coordinator.tick() {
                    TickFlow::Continue => {}
                    TickFlow::RoundOver(RoundTransition::NextRound) => {
                        if !wait_while_live(coordinator, commands, round_break).await {
                            return None;
                        }
                        coordinator.start_round();
                        ticker.reset();
                    }
                    TickFlow::RoundOver(RoundTransition::MatchOver(result)) => {
                        return Some(result);
                    }
                }
            }
            Some(command) = commands.recv() => {
                match command {
                    PlayerCommand::Turn(direction) => coordinator.set_direction(direction),
                    PlayerCommand::TogglePause => coordinator.toggle_pause(),
                    PlayerCommand::Leave => {
                        coordinator.leave_match();
                        return None;
                    }
                }
            }
        }
    }
}

/// Sleeps through a scheduled pause while still serving player commands.
/// Returns false once the match is no longer live.
async fn wait_while_live<E, O, M>(
    coordinator: &mut MatchCoordinator<E, O, M>,
    commands: &mut mpsc::UnboundedReceiver<PlayerCommand>,
    delay: Duration,
) -> bool
where
    E: EngineEvents,
    O: OpponentSimulator,
    M: MatchEvents,
{
    let sleeper = sleep(delay);
    tokio::pin!(sleeper);

    loop {
        tokio::select! {
            _ = &mut sleeper => break,
            Some(command) = commands.recv() => {
                match command {
                    PlayerCommand::Turn(direction) => coordinator.set_direction(direction),
                    PlayerCommand::TogglePause => coordinator.toggle_pause(),
                    PlayerCommand::Leave => {
                        coordinator.leave_match();
                        return false;
                    }
                }
            }
        }
    }

    coordinator.is_active()
}
