use crate::agents::{self, Move, SpreadBot};
use crate::config::{DEFAULT_BOXES, DEFAULT_MAX_NUMBER};
use crate::engine::PuzzleEngine;
use crate::session::{Session, SessionEvent};
use crate::state::{Outcome, Status};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Board,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuDigit(u8),
    MenuBackspace,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    SelectNext,
    SelectPrev,
    SelectBox(usize),
    Place,
    Trash,
    AutoMove,
    Restart,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub session: Session,
    // Box under the cursor
    pub selected: usize,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_box_count: usize,
    pub cfg_max_number: u16,
    pub cfg_seed: Option<u64>,
    pub outcome: Option<Outcome>,
    pub(super) help_open: bool,
    reveal_at: Option<Instant>,
    trash_flash_at: Option<Instant>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(DEFAULT_BOXES, DEFAULT_MAX_NUMBER, None)
    }
}

impl AppState {
    /// Pause between a placement and showing the next number.
    pub const REVEAL_DELAY: Duration = Duration::from_millis(200);
    const TRASH_FLASH: Duration = Duration::from_millis(600);
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Menu pre-filled with the given settings; nothing is started yet.
    pub fn with_settings(box_count: usize, max_number: u16, seed: Option<u64>) -> Self {
        Self {
            scene: Scene::Menu,
            session: Session::from_entropy(),
            selected: 0,
            menu_index: 0,
            cfg_box_count: box_count,
            cfg_max_number: max_number,
            cfg_seed: seed,
            outcome: None,
            help_open: false,
            reveal_at: None,
            trash_flash_at: None,
            action_error: None,
            action_error_at: None,
        }
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// The number waiting for a decision, hidden during the reveal pause.
    pub fn visible_number(&self) -> Option<u16> {
        if self.reveal_at.is_some() {
            return None;
        }
        self.session.state().current_number()
    }

    pub fn trash_flashing(&self) -> bool {
        self.trash_flash_at.is_some()
    }

    /// Boxes the visible number may go into.
    pub fn placeable_boxes(&self) -> Vec<usize> {
        if self.visible_number().is_none() {
            return Vec::new();
        }
        PuzzleEngine::placeable_boxes(&self.session)
    }

    pub fn game_over(&self) -> bool {
        self.session.status().is_terminal()
    }

    fn can_act(&self) -> bool {
        self.scene == Scene::Board
            && self.session.status() == Status::InProgress
            && self.visible_number().is_some()
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    /// Start a game from the current menu settings.
    pub(crate) fn begin_session(&mut self) {
        self.session = match self.cfg_seed {
            Some(seed) => Session::seeded(seed),
            None => Session::from_entropy(),
        };
        let cfg = self.session.start_session(self.cfg_box_count, self.cfg_max_number);
        self.cfg_box_count = cfg.box_count();
        self.cfg_max_number = cfg.max_number();
        self.outcome = None;
        self.reveal_at = None;
        self.trash_flash_at = None;
        self.clear_action_error();
        self.absorb_events(false);
        self.select_first_placeable();
    }

    fn absorb_events(&mut self, after_move: bool) {
        for event in self.session.drain_events() {
            debug!(?event, "session event");
            match event {
                SessionEvent::NumberDrawn(Some(_)) if after_move => {
                    self.reveal_at = Some(Instant::now() + Self::REVEAL_DELAY);
                }
                SessionEvent::TrashChanged(trash) if !trash.is_empty() => {
                    self.trash_flash_at = Some(Instant::now() + Self::TRASH_FLASH);
                }
                SessionEvent::SessionEnded(outcome) => {
                    self.outcome = Some(outcome);
                    self.reveal_at = None;
                }
                _ => {}
            }
        }
    }

    fn select_first_placeable(&mut self) {
        if let Some(&first) = self.placeable_boxes().first() {
            self.selected = first;
        }
    }

    fn place_selected(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        match self.session.attempt_place(self.selected) {
            Ok(()) => {
                self.clear_action_error();
                self.absorb_events(true);
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn trash_current(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        match self.session.attempt_trash() {
            Ok(()) => {
                self.clear_action_error();
                self.absorb_events(false);
                self.select_first_placeable();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    fn auto_move(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        match agents::take_turn(&mut self.session, &mut SpreadBot) {
            Ok(Some(Move::Place(_))) => {
                self.clear_action_error();
                self.absorb_events(true);
                true
            }
            Ok(Some(_)) => {
                self.clear_action_error();
                self.absorb_events(false);
                self.select_first_placeable();
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    /// Abandon the game and return to the menu.
    pub fn restart(&mut self) {
        self.session.restart();
        self.session.drain_events();
        self.outcome = None;
        self.reveal_at = None;
        self.trash_flash_at = None;
        self.clear_action_error();
        self.open_menu();
    }

    pub fn select_next(&mut self) {
        let n = self.session.state().boxes().len();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    pub fn select_prev(&mut self) {
        let n = self.session.state().boxes().len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }

    pub fn select_box(&mut self, idx: usize) {
        let n = self.session.state().boxes().len();
        if idx < n {
            self.selected = idx;
        }
    }

    /// Advance timers; called by the controller once per tick.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        if self.reveal_at.is_some_and(|at| now >= at) {
            self.reveal_at = None;
            self.select_first_placeable();
        }
        if self.trash_flash_at.is_some_and(|at| now >= at) {
            self.trash_flash_at = None;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }

    /// Skip the reveal pause right away.
    pub fn reveal_now(&mut self) {
        if self.reveal_at.take().is_some() {
            self.select_first_placeable();
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Board {
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuDigit(d) => {
                if self.scene == Scene::Menu {
                    self.menu_digit(d);
                }
                false
            }
            InputAction::MenuBackspace => {
                if self.scene == Scene::Menu {
                    self.menu_backspace();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::SelectNext => {
                if self.scene == Scene::Board {
                    self.select_next();
                }
                false
            }
            InputAction::SelectPrev => {
                if self.scene == Scene::Board {
                    self.select_prev();
                }
                false
            }
            InputAction::SelectBox(idx) => {
                if self.scene == Scene::Board {
                    self.select_box(idx);
                }
                false
            }
            InputAction::Place => self.place_selected(),
            InputAction::Trash => self.trash_current(),
            InputAction::AutoMove => self.auto_move(),
            InputAction::Restart => {
                if self.scene == Scene::Board {
                    self.restart();
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_trash_sets_error_and_keeps_state() {
        let mut app = AppState::with_settings(5, 20, Some(9));
        app.apply_menu();
        let before = app.session.state().clone();
        assert!(!app.handle_input(InputAction::Trash));
        assert!(app.action_error().is_some());
        assert_eq!(app.session.state(), &before);
    }

    #[test]
    fn auto_trash_does_not_pause_the_reveal() {
        let mut trashes = 0;
        for seed in 0..200 {
            let mut app = AppState::with_settings(5, 6, Some(seed));
            app.apply_menu();
            while !app.game_over() {
                app.reveal_now();
                let before = app.session.state().trash().len();
                assert!(app.handle_input(InputAction::AutoMove));
                if app.session.state().trash().len() > before {
                    trashes += 1;
                    assert!(app.trash_flashing());
                    if !app.game_over() {
                        assert!(app.visible_number().is_some(), "seed {seed}");
                        assert_eq!(app.visible_number(), app.session.state().current_number());
                    }
                }
            }
        }
        assert!(trashes > 0);
    }

    #[test]
    fn number_hidden_until_reveal() {
        let mut app = AppState::with_settings(5, 20, Some(3));
        app.apply_menu();
        assert!(app.visible_number().is_some());
        assert!(app.handle_input(InputAction::AutoMove));
        assert_eq!(app.visible_number(), None);
        // Input is ignored while the number is hidden.
        assert!(!app.handle_input(InputAction::AutoMove));
        app.reveal_now();
        assert_eq!(app.visible_number(), app.session.state().current_number());
    }
}
