//! roskis: an increasing-sequence number placement puzzle
//!
//! Numbers are drawn one at a time from `1..=max`. Each must go into one of
//! a fixed row of boxes so the filled boxes stay strictly increasing from
//! left to right. A number that fits nowhere goes to the trash. The game is
//! won once every box is filled, and it is perfect if the trash is empty.
//!
//! Goals:
//! - Pure, deterministic rules (`rules`) over an explicit state (`state`)
//! - One owner of the mutable game (`session::Session`) with a small API
//! - Pluggable randomness (`pool::DrawSource`) so tests can script draws
//!
//! ## Quick start: play a scripted game
//! ```
//! use roskis::config::GameConfig;
//! use roskis::pool::Scripted;
//! use roskis::rules::placeable_boxes;
//! use roskis::session::Session;
//! use roskis::state::Status;
//!
//! let mut session = Session::with_source(Scripted::new([3, 1, 6, 2, 4]));
//! session.start(GameConfig::clamped(5, 6));
//! assert_eq!(session.state().current_number(), Some(3));
//! assert_eq!(placeable_boxes(session.state(), 3), vec![1, 2]);
//!
//! session.place(2).unwrap();
//! assert_eq!(session.status(), Status::InProgress);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin roskis -- --boxes 6 --max 30
//! ```

pub mod agents;
pub mod boxes;
pub mod config;
pub mod engine;
pub mod pool;
pub mod rules;
pub mod session;
pub mod state;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
