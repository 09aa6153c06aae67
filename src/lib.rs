//! Falling-block grid puzzle: board, pieces, rotation table, collision, lock-and-clear
//! and the gravity/key-repeat timing, plus a terminal front-end.
//!
//! The [`game`] module is pure: it takes commands, held keys and frame deltas and hands
//! back a [`Snapshot`]. [`app`] and [`ui`] are the terminal driver around it.

pub mod app;
pub mod config;
pub mod game;
pub mod ui;

pub use config::{
    Args, CELL_W, DEFAULT_BLOCK_SIZE, FALL_INTERVAL_MS, FRAME_RATE, GAME_OVER_BLINK_MS,
    KEY_REPEAT_DELAY_MS, LINE_CLEAR_POINTS, LOCK_POINTS, MIN_COLUMNS, SIDEBAR_W, Settings,
};
pub use game::{Board, Cell, Command, Game, Geometry, HeldKeys, Piece, ShapeType, Snapshot};
