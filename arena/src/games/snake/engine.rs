use std::time::{Duration, Instant};

use crate::events::EngineEvents;
use crate::games::session_rng::SessionRng;
use crate::log;

use super::settings::EngineSettings;
use super::snake::Snake;
use super::types::{Direction, EndReason, Point, RoundStats};

pub const SCORE_PER_FOOD: u32 = 10;

const FOOD_SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Running,
    Paused,
    Ended,
}

#[derive(Clone, Copy, Debug)]
pub enum TickResult {
    Continue,
    GameOver(RoundStats),
}

/// One round of snake on a fixed square grid. Purely synchronous: the session
/// loop owns all timing and calls `tick` once per interval.
pub struct GameEngine<E: EngineEvents> {
    tile_count: i32,
    tick_interval: Duration,
    snake: Snake,
    food: Point,
    direction: Option<Direction>,
    pending_direction: Option<Direction>,
    phase: EnginePhase,
    score: u32,
    started_at: Option<Instant>,
    survival_secs: u64,
    end_reason: Option<EndReason>,
    events: E,
}

impl<E: EngineEvents> GameEngine<E> {
    pub fn new(settings: &EngineSettings, events: E) -> Self {
        let tile_count = settings.tile_count();
        let start = Self::start_cell(tile_count);
        Self {
            tile_count,
            tick_interval: settings.tick_interval,
            snake: Snake::new(start),
            food: Point::new(0, 0),
            direction: None,
            pending_direction: None,
            phase: EnginePhase::Idle,
            score: 0,
            started_at: None,
            survival_secs: 0,
            end_reason: None,
            events,
        }
    }

    fn start_cell(tile_count: i32) -> Point {
        Point::new(tile_count / 2, tile_count / 2)
    }

    /// Begins a fresh round: single-segment snake at the start cell, no
    /// direction until the first input, score zeroed, food respawned.
    pub fn reset(&mut self, rng: &mut SessionRng) {
        self.snake = Snake::new(Self::start_cell(self.tile_count));
        self.direction = None;
        self.pending_direction = None;
        self.score = 0;
        self.survival_secs = 0;
        self.end_reason = None;
        self.started_at = Some(Instant::now());
        self.phase = EnginePhase::Running;
        self.spawn_food(rng);
        self.events.score_change(self.score);
    }

    /// Direction changes are latched and applied at the next tick. Ignored
    /// while not running, and a reversal of the active direction is a no-op.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != EnginePhase::Running {
            return;
        }
        if let Some(current) = self.direction
            && direction.is_opposite(&current)
        {
            return;
        }
        self.pending_direction = Some(direction);
    }

    pub fn tick(&mut self, rng: &mut SessionRng) -> TickResult {
        if self.phase != EnginePhase::Running {
            return TickResult::Continue;
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = Some(direction);
        }

        let Some(direction) = self.direction else {
            // No input yet: the snake holds its cell, only the clock runs.
            self.update_survival_time();
            return TickResult::Continue;
        };

        let (dx, dy) = direction.delta();
        let next = self.snake.head().offset(dx, dy);

        if next.x < 0 || next.x >= self.tile_count || next.y < 0 || next.y >= self.tile_count {
            return self.end_round(EndReason::WallCollision);
        }
        // The tail has not moved yet this tick, so moving onto it is lethal.
        if self.snake.contains(&next) {
            return self.end_round(EndReason::SelfCollision);
        }

        self.snake.push_head(next);

        if next == self.food {
            self.score += SCORE_PER_FOOD;
            self.events.score_change(self.score);
            self.spawn_food(rng);
        } else {
            self.snake.pop_tail();
        }

        self.update_survival_time();
        TickResult::Continue
    }

    pub fn pause(&mut self) {
        if self.phase == EnginePhase::Running {
            self.phase = EnginePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == EnginePhase::Paused {
            self.phase = EnginePhase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            EnginePhase::Running => self.phase = EnginePhase::Paused,
            EnginePhase::Paused => self.phase = EnginePhase::Running,
            _ => {}
        }
    }

    /// Abandonment path: clears the round without emitting game_over.
    pub fn stop(&mut self) {
        if matches!(self.phase, EnginePhase::Running | EnginePhase::Paused) {
            self.phase = EnginePhase::Idle;
        }
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == EnginePhase::Running
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn survival_secs(&self) -> u64 {
        self.survival_secs
    }

    pub fn tile_count(&self) -> i32 {
        self.tile_count
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn stats(&self) -> RoundStats {
        RoundStats {
            score: self.score,
            survival_secs: self.survival_secs,
            snake_length: self.snake.len(),
        }
    }

    fn end_round(&mut self, reason: EndReason) -> TickResult {
        self.phase = EnginePhase::Ended;
        self.end_reason = Some(reason);
        if let Some(started_at) = self.started_at {
            self.survival_secs = started_at.elapsed().as_secs();
        }
        let stats = self.stats();
        log!(
            "Round over ({:?}): score {}, survived {}s, length {}",
            reason,
            stats.score,
            stats.survival_secs,
            stats.snake_length
        );
        self.events.game_over(&stats);
        TickResult::GameOver(stats)
    }

    fn update_survival_time(&mut self) {
        if let Some(started_at) = self.started_at {
            self.survival_secs = started_at.elapsed().as_secs();
            self.events.time_update(self.survival_secs);
        }
    }

    fn spawn_food(&mut self, rng: &mut SessionRng) {
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = Point::new(
                rng.random_range(0..self.tile_count),
                rng.random_range(0..self.tile_count),
            );
            if !self.snake.contains(&pos) {
                self.food = pos;
                return;
            }
        }

        // Dense endgame: scan for the first free cell instead of rolling on.
        for y in 0..self.tile_count {
            for x in 0..self.tile_count {
                let pos = Point::new(x, y);
                if !self.snake.contains(&pos) {
                    self.food = pos;
                    return;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, pos: Point) {
        self.food = pos;
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, segments: &[Point]) {
        let tail = *segments.last().expect("Body must not be empty");
        let mut snake = Snake::new(tail);
        for segment in segments.iter().rev().skip(1) {
            snake.push_head(*segment);
        }
        self.snake = snake;
    }
}
