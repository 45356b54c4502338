#![forbid(unsafe_code)]

//! Interactive long-division stepper for the terminal.
//!
//! `longdiv` wires the step engine from `longdiv-core` and the grid layout
//! from `longdiv-render` into a small Elm-style runtime ([`program`]) drawn
//! with crossterm. The same engine backs the non-interactive `trace` command.

pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod presets;
pub mod program;
pub mod terminal;
pub mod text;
pub mod trace;

pub use cli::{run, run_from_env};
pub use error::{AppError, Result};
