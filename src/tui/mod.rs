//! Terminal front end: a settings menu, the board, and help/game-over overlays.

pub mod app;
pub mod controller;
mod ui;
