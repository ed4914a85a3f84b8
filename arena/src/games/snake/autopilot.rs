use crate::events::EngineEvents;

use super::engine::GameEngine;
use super::types::{Direction, Point};

/// Greedy food-seeking pilot for headless runs: of the safe moves, take the
/// one closest to the food. No lookahead, so it eventually boxes itself in.
pub struct Autopilot;

impl Autopilot {
    pub fn next_direction<E: EngineEvents>(engine: &GameEngine<E>) -> Option<Direction> {
        if !engine.is_running() {
            return None;
        }

        let head = engine.snake().head();
        let food = engine.food();

        let mut best_direction = None;
        let mut best_distance = i32::MAX;

        for direction in Self::candidate_directions(engine.direction()) {
            let Some(next) = Self::step_within_bounds(head, direction, engine.tile_count()) else {
                continue;
            };
            if engine.snake().contains(&next) {
                continue;
            }
            let distance = Self::manhattan_distance(next, food);
            if distance < best_distance {
                best_distance = distance;
                best_direction = Some(direction);
            }
        }

        // Boxed in: hold course and accept the collision.
        best_direction.or(engine.direction())
    }

    fn candidate_directions(current: Option<Direction>) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| match current {
                Some(active) => !d.is_opposite(&active),
                None => true,
            })
            .collect()
    }

    fn step_within_bounds(from: Point, direction: Direction, tile_count: i32) -> Option<Point> {
        let (dx, dy) = direction.delta();
        let next = from.offset(dx, dy);
        if next.x < 0 || next.x >= tile_count || next.y < 0 || next.y >= tile_count {
            return None;
        }
        Some(next)
    }

    fn manhattan_distance(a: Point, b: Point) -> i32 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }
}
