use crate::config::{GameConfig, MAX_BOXES, MAX_NUMBER_LIMIT, MIN_BOXES};
use crate::state::Status;

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Boxes,
    MaxNumber,
    Seed,
}

const MENU_ITEMS: [MenuItem; 3] = [MenuItem::Boxes, MenuItem::MaxNumber, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Boxes => format!("Boxes: {}", app.cfg_box_count),
            MenuItem::MaxNumber => format!("Max Number: {}", app.cfg_max_number),
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: random".to_string(),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Boxes => {
                if app.cfg_box_count < MAX_BOXES {
                    app.cfg_box_count += 1;
                }
            }
            MenuItem::MaxNumber => {
                if app.cfg_max_number < MAX_NUMBER_LIMIT {
                    app.cfg_max_number += 1;
                }
            }
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(1, |s| s.saturating_add(1)));
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Boxes => {
                if app.cfg_box_count > MIN_BOXES {
                    app.cfg_box_count -= 1;
                }
            }
            MenuItem::MaxNumber => {
                if app.cfg_max_number > 1 {
                    app.cfg_max_number -= 1;
                }
            }
            MenuItem::Seed => {
                app.cfg_seed = match app.cfg_seed {
                    Some(s) if s > 1 => Some(s - 1),
                    _ => None,
                };
            }
        }
    }

    // Digits append to the value like typing into a number field.
    fn digit(self, app: &mut AppState, d: u8) {
        match self {
            MenuItem::Boxes => {}
            MenuItem::MaxNumber => {
                let next = u32::from(app.cfg_max_number) * 10 + u32::from(d);
                app.cfg_max_number = u16::try_from(next.min(9999)).unwrap_or(u16::MAX);
            }
            MenuItem::Seed => {
                let cur = app.cfg_seed.unwrap_or(0);
                app.cfg_seed = Some(cur.saturating_mul(10).saturating_add(u64::from(d)));
            }
        }
    }

    fn backspace(self, app: &mut AppState) {
        match self {
            MenuItem::Boxes => {}
            MenuItem::MaxNumber => app.cfg_max_number /= 10,
            MenuItem::Seed => {
                app.cfg_seed = app.cfg_seed.map(|s| s / 10).filter(|&s| s > 0);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.help_open = false;
        match self.scene {
            Scene::Menu => self.cancel_menu(),
            Scene::Board => self.open_menu(),
        }
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.help_open = false;
        self.menu_index = 0;
        let cfg = self.session.config();
        if self.session.status() != Status::NotStarted {
            self.cfg_box_count = cfg.box_count();
            self.cfg_max_number = cfg.max_number();
        }
        self.scene = Scene::Menu;
    }

    /// Clamp the edited settings and start a new game with them.
    pub fn apply_menu(&mut self) {
        let cfg = GameConfig::clamped(self.cfg_box_count, self.cfg_max_number);
        self.cfg_box_count = cfg.box_count();
        self.cfg_max_number = cfg.max_number();
        self.begin_session();
        self.scene = Scene::Board;
    }

    pub fn cancel_menu(&mut self) {
        if self.session.status() != Status::NotStarted {
            self.scene = Scene::Board;
        }
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
    pub fn menu_digit(&mut self, d: u8) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.digit(self, d.min(9));
    }
    pub fn menu_backspace(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.backspace(self);
    }
}
