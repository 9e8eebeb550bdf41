use crate::boxes::Boxes;
use crate::config::GameConfig;
use crate::pool::Pool;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Status {
    NotStarted,
    InProgress,
    /// All boxes filled and nothing trashed.
    WonPerfect,
    /// All boxes filled, trash non-empty.
    WonWithTrash,
    /// Pool ran out with boxes still empty.
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::WonPerfect | Status::WonWithTrash | Status::Lost)
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::WonPerfect => Some(Outcome::Perfect),
            Status::WonWithTrash => Some(Outcome::WithTrash),
            Status::Lost => Some(Outcome::Lost),
            Status::NotStarted | Status::InProgress => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not started",
            Status::InProgress => "In progress",
            Status::WonPerfect => "Perfect game",
            Status::WonWithTrash => "Won",
            Status::Lost => "Lost",
        }
    }
}

/// Terminal classification handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Perfect,
    WithTrash,
    Lost,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantError {
    #[error("row has {got} boxes, config says {expected}")]
    WrongBoxCount { expected: usize, got: usize },
    #[error("boxes not increasing at {0}")]
    NotIncreasing(usize),
    #[error("{0} is outside the number range")]
    OutOfRange(u16),
    #[error("{0} appears more than once")]
    Duplicate(u16),
    #[error("used set does not match placed and trashed numbers")]
    UsedSetMismatch,
    #[error("current number {0} is not drawable")]
    CurrentNotDrawable(u16),
}

/// Authoritative record of one game.
///
/// Only [`crate::session::Session`] mutates it; everything else reads
/// through the accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) boxes: Boxes,
    pub(crate) used: BTreeSet<u16>,
    pub(crate) trash: Vec<u16>,
    pub(crate) current: Option<u16>,
    pub(crate) status: Status,
}

impl GameState {
    /// Fresh, not yet started state for `config`.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            boxes: Boxes::empty(config.box_count()),
            used: BTreeSet::new(),
            trash: Vec::new(),
            current: None,
            status: Status::NotStarted,
        }
    }

    /// Assemble a state from explicit parts, e.g. to evaluate a position.
    /// Every filled box and trash entry is added to the used set; status is
    /// `InProgress`.
    pub fn from_parts(
        config: GameConfig,
        boxes: Boxes,
        trash: Vec<u16>,
        current: Option<u16>,
    ) -> Self {
        let mut used: BTreeSet<u16> = boxes.values().collect();
        used.extend(trash.iter().copied());
        Self { config, boxes, used, trash, current, status: Status::InProgress }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn boxes(&self) -> &Boxes {
        &self.boxes
    }

    pub fn used_numbers(&self) -> &BTreeSet<u16> {
        &self.used
    }

    pub fn trash(&self) -> &[u16] {
        &self.trash
    }

    pub fn current_number(&self) -> Option<u16> {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pool(&self) -> Pool {
        Pool::remaining(self.config.max_number(), &self.used)
    }

    /// Check every invariant of a well-formed state and report the first
    /// broken one.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.boxes.len() != self.config.box_count() {
            return Err(InvariantError::WrongBoxCount {
                expected: self.config.box_count(),
                got: self.boxes.len(),
            });
        }
        if let Some(idx) = self.boxes.first_order_violation() {
            return Err(InvariantError::NotIncreasing(idx));
        }
        let max = self.config.max_number();
        let mut seen = BTreeSet::new();
        for n in self.boxes.values().chain(self.trash.iter().copied()) {
            if !(1..=max).contains(&n) {
                return Err(InvariantError::OutOfRange(n));
            }
            if !seen.insert(n) {
                return Err(InvariantError::Duplicate(n));
            }
        }
        if seen != self.used {
            return Err(InvariantError::UsedSetMismatch);
        }
        if let Some(n) = self.current {
            if !(1..=max).contains(&n) || self.used.contains(&n) {
                return Err(InvariantError::CurrentNotDrawable(n));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty_and_valid() {
        let s = GameState::new(GameConfig::default());
        assert_eq!(s.status(), Status::NotStarted);
        assert_eq!(s.boxes().len(), 5);
        assert!(s.used_numbers().is_empty());
        assert_eq!(s.pool().len(), 20);
        assert_eq!(s.check_invariants(), Ok(()));
    }

    #[test]
    fn from_parts_collects_used_numbers() {
        let cfg = GameConfig::clamped(5, 10);
        let boxes = Boxes::try_from_slots(vec![Some(1), None, Some(4), None, None]).unwrap();
        let s = GameState::from_parts(cfg, boxes, vec![9], Some(6));
        assert_eq!(s.used_numbers().iter().copied().collect::<Vec<_>>(), vec![1, 4, 9]);
        assert_eq!(s.check_invariants(), Ok(()));
    }

    #[test]
    fn invariants_catch_bad_current_number() {
        let cfg = GameConfig::clamped(5, 10);
        let boxes = Boxes::try_from_slots(vec![Some(3), None, None, None, None]).unwrap();
        let s = GameState::from_parts(cfg, boxes, Vec::new(), Some(3));
        assert_eq!(s.check_invariants(), Err(InvariantError::CurrentNotDrawable(3)));
    }

    #[test]
    fn invariants_catch_duplicates_and_stray_numbers() {
        let cfg = GameConfig::clamped(5, 10);
        let boxes = Boxes::try_from_slots(vec![Some(2), None, Some(7), None, None]).unwrap();
        let s = GameState::from_parts(cfg, boxes.clone(), vec![7], None);
        assert_eq!(s.check_invariants(), Err(InvariantError::Duplicate(7)));

        let s = GameState::from_parts(cfg, boxes.clone(), vec![11], None);
        assert_eq!(s.check_invariants(), Err(InvariantError::OutOfRange(11)));

        let mut s = GameState::from_parts(cfg, boxes, Vec::new(), None);
        s.used.insert(5);
        assert_eq!(s.check_invariants(), Err(InvariantError::UsedSetMismatch));

        let s = GameState::from_parts(GameConfig::clamped(6, 10), s.boxes.clone(), Vec::new(), None);
        assert_eq!(
            s.check_invariants(),
            Err(InvariantError::WrongBoxCount { expected: 6, got: 5 })
        );
    }

    #[test]
    fn terminal_statuses_map_to_outcomes() {
        assert_eq!(Status::WonPerfect.outcome(), Some(Outcome::Perfect));
        assert_eq!(Status::WonWithTrash.outcome(), Some(Outcome::WithTrash));
        assert_eq!(Status::Lost.outcome(), Some(Outcome::Lost));
        assert!(!Status::InProgress.is_terminal());
    }
}
