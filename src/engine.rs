// Narrow API boundary for front ends. UIs and autoplayers drive a game
// through this trait without reaching into the session or its draw source.

use crate::config::GameConfig;
use crate::pool::DrawSource;
use crate::rules::{self, MoveError};
use crate::session::Session;
use crate::state::GameState;

pub trait PuzzleEngine {
    // Session lifecycle
    fn start_session(&mut self, box_count: usize, max_number: u16) -> GameConfig;
    fn restart(&mut self);

    // Player actions
    fn attempt_place(&mut self, index: usize) -> Result<(), MoveError>;
    fn attempt_trash(&mut self) -> Result<(), MoveError>;

    // Queries
    fn state(&self) -> &GameState;
    fn can_place_current(&self, index: usize) -> bool;
    fn placeable_boxes(&self) -> Vec<usize>;
    fn is_stuck(&self) -> bool;
}

impl<S: DrawSource> PuzzleEngine for Session<S> {
    fn start_session(&mut self, box_count: usize, max_number: u16) -> GameConfig {
        self.start_with(box_count, max_number)
    }
    fn restart(&mut self) {
        Session::restart(self);
    }

    fn attempt_place(&mut self, index: usize) -> Result<(), MoveError> {
        self.place(index)
    }
    fn attempt_trash(&mut self) -> Result<(), MoveError> {
        self.trash()
    }

    fn state(&self) -> &GameState {
        Session::state(self)
    }
    fn can_place_current(&self, index: usize) -> bool {
        let state = Session::state(self);
        state.current_number().is_some_and(|n| rules::can_place(state, n, index))
    }
    fn placeable_boxes(&self) -> Vec<usize> {
        let state = Session::state(self);
        state.current_number().map(|n| rules::placeable_boxes(state, n)).unwrap_or_default()
    }
    fn is_stuck(&self) -> bool {
        rules::is_stuck(Session::state(self))
    }
}
