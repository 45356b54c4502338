#![forbid(unsafe_code)]

//! Grid layout for the long-division stepper.
//!
//! # Role
//! `longdiv-render` turns a [`GridState`](longdiv_core::GridState) into a
//! rectangular [`Grid`] of character cells, each tagged with an
//! [`Emphasis`]. It knows nothing about terminals: the application maps
//! emphasis to colors, tests compare the plain text.
//!
//! Layout is a pure function of the snapshot, so drawing step N needs no
//! state from steps before it.

pub mod glyphs;
pub mod grid;
pub mod layout;

pub use glyphs::{GlyphMode, Glyphs};
pub use grid::{Cell, Emphasis, Grid};
pub use layout::{layout, quotient_offset};
