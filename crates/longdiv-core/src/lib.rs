#![forbid(unsafe_code)]

//! Core of the long-division stepper.
//!
//! # Module Dependency Direction
//!
//! `problem` ← `step` ← `generate` ← `navigator`
//!
//! One-way only. `problem` validates raw operand text into a [`Problem`],
//! `generate` turns a problem into an immutable [`StepSequence`], and the
//! [`Navigator`] moves a read cursor across that sequence.
//!
//! # Example
//!
//! ```
//! use longdiv_core::{Navigator, Problem, StepKind};
//!
//! let problem = Problem::new("84", "4").unwrap();
//! let mut nav = Navigator::new();
//! nav.start(problem);
//!
//! let first = nav.step_forward().unwrap();
//! assert_eq!(first.kind, StepKind::Initial);
//!
//! nav.seek_end();
//! assert_eq!(nav.description(), "Division complete! 84 ÷ 4 = 21");
//! ```

pub mod generate;
pub mod navigator;
pub mod problem;
pub mod step;

pub use generate::generate_steps;
pub use navigator::{Navigator, StepCounter};
pub use problem::{Field, Problem, ProblemError};
pub use step::{
    DivisionOutcome, GridState, Highlight, RowReason, Step, StepKind, StepSequence, WorkRow,
    WorkRowKind,
};
