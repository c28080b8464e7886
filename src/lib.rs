//! Grid snake: a deterministic grid-simulation engine plus terminal glue.
//!
//! The [`engine`] module is the core of the crate: it owns the authoritative
//! game state (snake body, food, direction, score, phase) and advances it one
//! discrete step per externally supplied tick. It has no clock, no terminal
//! coupling, and no I/O, so it is fully testable on its own.
//!
//! Everything else is peripheral: [`renderer`] turns an engine snapshot into
//! ratatui drawing commands, [`input`] maps key events to engine inputs, and
//! [`settings`] layers a JSON settings file and CLI flags over the defaults
//! in [`config`].

pub mod config;
pub mod engine;
pub mod food;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
