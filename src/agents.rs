//! Agents: automatic players.
//!
//! A small trait `PlayerAgent` picks a [`Move`] for a state snapshot, and
//! [`take_turn`]/[`play_out`] apply those moves through a [`PuzzleEngine`].
//! The TUI uses them for its auto-move key; tests use them to run many full
//! games.

use crate::engine::PuzzleEngine;
use crate::rules::{self, MoveError};
use crate::state::{GameState, Outcome, Status};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// One player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Move {
    Place(usize),
    Trash,
}

pub trait PlayerAgent {
    /// Pick a move for the current number, or `None` if there is nothing to decide.
    fn choose(&mut self, state: &GameState) -> Option<Move>;

    fn name(&self) -> &'static str;
}

/// Puts each number in the legal box closest to where its value would sit
/// if the numbers were spread evenly along the row.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadBot;

impl SpreadBot {
    fn target(state: &GameState, number: u16) -> f64 {
        let cfg = state.config();
        let span = f64::from(cfg.max_number().max(1));
        let slots = cfg.box_count() as f64;
        (f64::from(number) - 0.5) / span * slots - 0.5
    }
}

impl PlayerAgent for SpreadBot {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let number = state.current_number()?;
        let target = Self::target(state, number);
        let best = rules::placeable_boxes(state, number).into_iter().min_by(|&a, &b| {
            let da = (a as f64 - target).abs();
            let db = (b as f64 - target).abs();
            da.total_cmp(&db)
        });
        Some(best.map(Move::Place).unwrap_or(Move::Trash))
    }

    fn name(&self) -> &'static str {
        "spread"
    }
}

/// Picks uniformly among the legal boxes. Useful for exploring states.
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: ChaCha8Rng,
}

impl RandomBot {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl PlayerAgent for RandomBot {
    fn choose(&mut self, state: &GameState) -> Option<Move> {
        let number = state.current_number()?;
        let options = rules::placeable_boxes(state, number);
        if options.is_empty() {
            return Some(Move::Trash);
        }
        let idx = self.rng.random_range(0..options.len());
        Some(Move::Place(options[idx]))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Let `agent` make one move and return it. `Ok(None)` when the game is not
/// waiting for a decision.
pub fn take_turn(
    engine: &mut dyn PuzzleEngine,
    agent: &mut dyn PlayerAgent,
) -> Result<Option<Move>, MoveError> {
    if engine.state().status() != Status::InProgress {
        return Ok(None);
    }
    let Some(mv) = agent.choose(engine.state()) else {
        return Ok(None);
    };
    debug!(agent = agent.name(), ?mv, "agent move");
    match mv {
        Move::Place(i) => engine.attempt_place(i)?,
        Move::Trash => engine.attempt_trash()?,
    }
    Ok(Some(mv))
}

/// Play until the game ends or `max_moves` moves have been made.
pub fn play_out(
    engine: &mut dyn PuzzleEngine,
    agent: &mut dyn PlayerAgent,
    max_moves: usize,
) -> Result<Option<Outcome>, MoveError> {
    for _ in 0..max_moves {
        if take_turn(engine, agent)?.is_none() {
            break;
        }
    }
    Ok(engine.state().status().outcome())
}
