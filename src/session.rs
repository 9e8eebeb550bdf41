use crate::config::GameConfig;
use crate::pool::{DrawSource, RngSource};
use crate::rules::{self, MoveError};
use crate::state::{GameState, Outcome, Status};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Notifications for the presentation layer, emitted on every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionEvent {
    NumberDrawn(Option<u16>),
    BoxesChanged(Vec<(usize, Option<u16>)>),
    TrashChanged(Vec<u16>),
    SessionEnded(Outcome),
}

/// Owns one [`GameState`] and the draw source feeding it. The only way to
/// change the state is through [`start`](Self::start), [`place`](Self::place),
/// [`trash`](Self::trash) and [`restart`](Self::restart).
///
/// Refused moves return an error and leave the state untouched.
///
/// ```
/// use roskis::config::GameConfig;
/// use roskis::pool::Scripted;
/// use roskis::session::Session;
/// use roskis::state::Status;
///
/// let mut session = Session::with_source(Scripted::new([1, 2, 3, 4, 5]));
/// session.start(GameConfig::clamped(5, 5));
/// for i in 0..5 {
///     session.place(i).unwrap();
/// }
/// assert_eq!(session.state().status(), Status::WonPerfect);
/// ```
#[derive(Debug)]
pub struct Session<S = RngSource<ChaCha8Rng>> {
    state: GameState,
    source: S,
    events: Vec<SessionEvent>,
}

impl Session<RngSource<ChaCha8Rng>> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RngSource::seeded(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_source(RngSource::from_entropy())
    }
}

impl<S: DrawSource> Session<S> {
    /// A session that has not started yet, using the default config.
    pub fn with_source(source: S) -> Self {
        Self { state: GameState::new(GameConfig::default()), source, events: Vec::new() }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn config(&self) -> GameConfig {
        self.state.config
    }

    /// Swap the draw source; takes effect on the next draw.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a new game, discarding whatever was in progress.
    pub fn start(&mut self, config: GameConfig) {
        self.state = GameState::new(config);
        self.state.status = Status::InProgress;
        info!(boxes = config.box_count(), max = config.max_number(), "session started");
        self.emit_boxes();
        self.emit_trash();
        self.advance();
    }

    /// Clamp raw settings into a valid config and start with it.
    pub fn start_with(&mut self, box_count: usize, max_number: u16) -> GameConfig {
        let config = GameConfig::clamped(box_count, max_number);
        self.start(config);
        config
    }

    /// Put the current number into box `index`.
    pub fn place(&mut self, index: usize) -> Result<(), MoveError> {
        let number = self.ready_number()?;
        if let Err(err) = rules::check_place(&self.state, number, index) {
            debug!(number, index, %err, "placement refused");
            return Err(err);
        }
        self.state.boxes.set(index, number);
        self.state.used.insert(number);
        self.state.current = None;
        debug!(number, index, boxes = %self.state.boxes, "placed");
        self.emit_boxes();
        self.advance();
        Ok(())
    }

    /// Throw the current number away. Only allowed when no box can take it.
    pub fn trash(&mut self) -> Result<(), MoveError> {
        let number = self.ready_number()?;
        if let Err(err) = rules::check_trash(&self.state) {
            debug!(number, %err, "trash refused");
            return Err(err);
        }
        self.state.trash.push(number);
        self.state.used.insert(number);
        self.state.current = None;
        debug!(number, trash = ?self.state.trash, "trashed");
        self.emit_trash();
        self.advance();
        Ok(())
    }

    /// Abandon the game. The config is kept so the menu can show it again.
    /// Calling this on a session that has not started does nothing.
    pub fn restart(&mut self) {
        if self.state.status == Status::NotStarted {
            return;
        }
        info!("session restarted");
        self.state = GameState::new(self.state.config);
        self.emit_boxes();
        self.emit_trash();
        self.events.push(SessionEvent::NumberDrawn(None));
    }

    fn ready_number(&self) -> Result<u16, MoveError> {
        if self.state.status != Status::InProgress {
            return Err(MoveError::NotInProgress);
        }
        self.state.current.ok_or(MoveError::NoCurrentNumber)
    }

    /// Draw the next number, or finish the game when the row is full or the
    /// pool is empty.
    fn advance(&mut self) {
        if self.state.boxes.is_full() {
            let status = if self.state.trash.is_empty() {
                Status::WonPerfect
            } else {
                Status::WonWithTrash
            };
            self.finish(status);
        } else {
            match rules::draw_next(&self.state, &mut self.source) {
                Some(n) => {
                    self.state.current = Some(n);
                    let remaining = self.state.pool().len().saturating_sub(1);
                    debug!(number = n, remaining, "drew");
                    self.events.push(SessionEvent::NumberDrawn(Some(n)));
                }
                None => self.finish(Status::Lost),
            }
        }
        debug_assert_eq!(self.state.check_invariants(), Ok(()));
    }

    fn finish(&mut self, status: Status) {
        self.state.current = None;
        self.state.status = status;
        self.events.push(SessionEvent::NumberDrawn(None));
        if let Some(outcome) = status.outcome() {
            info!(?outcome, boxes = %self.state.boxes, trash = ?self.state.trash, "session ended");
            self.events.push(SessionEvent::SessionEnded(outcome));
        }
    }

    fn emit_boxes(&mut self) {
        self.events.push(SessionEvent::BoxesChanged(self.state.boxes.snapshot()));
    }

    fn emit_trash(&mut self) {
        self.events.push(SessionEvent::TrashChanged(self.state.trash.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Scripted;

    fn scripted(numbers: &[u16], boxes: usize, max: u16) -> Session<Scripted> {
        let mut s = Session::with_source(Scripted::new(numbers.iter().copied()));
        s.start(GameConfig::clamped(boxes, max));
        s
    }

    #[test]
    fn start_draws_first_number() {
        let mut s = scripted(&[7], 5, 20);
        assert_eq!(s.status(), Status::InProgress);
        assert_eq!(s.state().current_number(), Some(7));
        let events = s.drain_events();
        assert_eq!(events.last(), Some(&SessionEvent::NumberDrawn(Some(7))));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn actions_refused_before_start() {
        let mut s = Session::with_source(Scripted::default());
        assert_eq!(s.place(0), Err(MoveError::NotInProgress));
        assert_eq!(s.trash(), Err(MoveError::NotInProgress));
        assert_eq!(s.status(), Status::NotStarted);
    }

    #[test]
    fn refused_place_leaves_state_unchanged() {
        let mut s = scripted(&[10, 3], 5, 20);
        s.place(2).unwrap();
        let before = s.state().clone();
        // 3 cannot go right of 10.
        assert!(matches!(s.place(3), Err(MoveError::OrderViolation { .. })));
        assert_eq!(s.place(2), Err(MoveError::BoxOccupied(2)));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn trash_refused_while_placeable() {
        let mut s = scripted(&[10], 5, 20);
        let before = s.state().clone();
        assert_eq!(s.trash(), Err(MoveError::TrashWhilePlaceable { number: 10 }));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn stuck_number_goes_to_trash() {
        // 1 2 _ 4 5 filled, then 6 is stuck; 3 finishes the row.
        let mut s = scripted(&[1, 2, 4, 5, 6, 3], 5, 6);
        for i in [0, 1, 3, 4] {
            s.place(i).unwrap();
        }
        assert_eq!(s.state().current_number(), Some(6));
        s.trash().unwrap();
        assert_eq!(s.state().trash(), &[6]);
        assert_eq!(s.state().current_number(), Some(3));
        s.place(2).unwrap();
        assert_eq!(s.status(), Status::WonWithTrash);
        let events = s.drain_events();
        assert_eq!(events.last(), Some(&SessionEvent::SessionEnded(Outcome::WithTrash)));
    }

    #[test]
    fn perfect_game_ends_with_empty_trash() {
        let mut s = scripted(&[3, 1, 5, 2, 4], 5, 5);
        for (n, i) in [(3, 2), (1, 0), (5, 4), (2, 1), (4, 3)] {
            assert_eq!(s.state().current_number(), Some(n));
            s.place(i).unwrap();
        }
        assert_eq!(s.status(), Status::WonPerfect);
        assert_eq!(s.state().current_number(), None);
        assert_eq!(s.place(0), Err(MoveError::NotInProgress));
    }

    /// Offers a number outside the pool once fewer than `below` numbers remain.
    struct Stale {
        below: usize,
        inner: Scripted,
    }

    impl DrawSource for Stale {
        fn pick(&mut self, pool: &[u16]) -> Option<u16> {
            if pool.len() < self.below {
                Some(999)
            } else {
                self.inner.pick(pool)
            }
        }
    }

    #[test]
    fn bad_draw_source_does_not_end_the_game() {
        let mut s = Session::with_source(Stale { below: 20, inner: Scripted::new([4]) });
        s.start(GameConfig::clamped(5, 20));
        s.place(0).unwrap();
        assert_eq!(s.status(), Status::InProgress);
        // 4 is used, so the fallback is the smallest number left.
        assert_eq!(s.state().current_number(), Some(1));
        assert_eq!(s.state().pool().len(), 19);
        s.place(1).unwrap_err();
        assert_eq!(s.state().check_invariants(), Ok(()));
    }

    #[test]
    fn finished_states_pass_the_invariant_check() {
        let mut s = scripted(&[1, 2, 4, 5, 6, 3], 5, 6);
        for i in [0, 1, 3, 4] {
            s.place(i).unwrap();
        }
        s.trash().unwrap();
        s.place(2).unwrap();
        assert_eq!(s.status(), Status::WonWithTrash);
        assert_eq!(s.state().current_number(), None);
        assert_eq!(s.state().check_invariants(), Ok(()));
    }

    #[test]
    fn restart_returns_to_not_started_once() {
        let mut s = scripted(&[4], 5, 20);
        s.place(1).unwrap();
        s.drain_events();
        s.restart();
        assert_eq!(s.status(), Status::NotStarted);
        assert_eq!(s.state(), &GameState::new(GameConfig::clamped(5, 20)));
        assert!(!s.drain_events().is_empty());
        s.restart();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn start_with_clamps_settings() {
        let mut s = Session::seeded(1);
        let cfg = s.start_with(3, 2);
        assert_eq!(cfg, GameConfig::clamped(5, 5));
        assert_eq!(s.config(), cfg);
        assert_eq!(s.state().boxes().len(), 5);
    }
}
