#![forbid(unsafe_code)]

//! Navigation controller: a read cursor over a generated step sequence.
//!
//! # Cursor Model
//!
//! ```text
//!  cursor:   None    0        1               len-1
//!           ┌─────┬────────┬────────┬─ ... ─┬──────────┐
//!           │ready│Initial │ step 1 │       │ Complete │
//!           └─────┴────────┴────────┴─ ... ─┴──────────┘
//!             ▲ reset()                           ▲ seek_end()
//! ```
//!
//! `None` is the "ready, nothing shown yet" position. It is reached only via
//! [`Navigator::reset`], [`Navigator::start`] or [`Navigator::new_problem`];
//! stepping backward stops at index 0.
//!
//! Everything displayed (counter, description, button state, history) is
//! derived from `(steps, cursor)` on demand and never stored separately.

use std::fmt;

use crate::generate::generate_steps;
use crate::problem::Problem;
use crate::step::{Step, StepSequence};

/// Shown when no problem has been started.
pub const NO_PROBLEM_DESCRIPTION: &str = "Enter a dividend and a divisor to begin.";

/// "Step N of M" counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter {
    /// 1-based position of the cursor, 0 before the first step.
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for StepCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.current, self.total)
    }
}

/// Owns the current problem, its steps, and the cursor.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    problem: Option<Problem>,
    steps: StepSequence,
    cursor: Option<usize>,
}

impl Navigator {
    /// A navigator with no problem loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the steps for `problem` and park the cursor before the first one.
    pub fn start(&mut self, problem: Problem) {
        self.steps = generate_steps(&problem);
        #[cfg(feature = "tracing")]
        tracing::info!(%problem, total = self.steps.len(), "problem started");
        self.problem = Some(problem);
        self.cursor = None;
    }

    /// Advance one step. Returns `None` (and does nothing) at the last step.
    pub fn step_forward(&mut self) -> Option<&Step> {
        if !self.can_step_forward() {
            return None;
        }
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        self.move_to(next)
    }

    /// Go back one step. Returns `None` (and does nothing) at index 0 or before.
    pub fn step_backward(&mut self) -> Option<&Step> {
        if !self.can_step_backward() {
            return None;
        }
        let previous = self.cursor.map_or(0, |cursor| cursor - 1);
        self.move_to(previous)
    }

    /// Jump to `index`, clamped to the last step.
    ///
    /// Returns `None` when there are no steps.
    pub fn seek(&mut self, index: usize) -> Option<&Step> {
        let last = self.steps.len().checked_sub(1)?;
        self.move_to(index.min(last))
    }

    /// Jump to the `Complete` step.
    pub fn seek_end(&mut self) -> Option<&Step> {
        self.seek(usize::MAX)
    }

    /// Move the cursor back before the first step, keeping the steps.
    pub fn reset(&mut self) {
        self.cursor = None;
        #[cfg(feature = "tracing")]
        tracing::debug!("cursor reset");
    }

    /// Discard the problem and its steps.
    pub fn new_problem(&mut self) {
        self.problem = None;
        self.steps = StepSequence::empty();
        self.cursor = None;
        #[cfg(feature = "tracing")]
        tracing::debug!("problem cleared");
    }

    fn move_to(&mut self, index: usize) -> Option<&Step> {
        self.cursor = Some(index);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            cursor = index,
            kind = %self.steps[index].kind,
            "cursor moved"
        );
        self.steps.get(index)
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The step at the cursor, if any step is showing.
    #[must_use]
    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.cursor?)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.problem.is_some()
    }

    #[must_use]
    pub fn can_step_forward(&self) -> bool {
        match self.cursor {
            None => !self.steps.is_empty(),
            Some(cursor) => cursor + 1 < self.steps.len(),
        }
    }

    #[must_use]
    pub fn can_step_backward(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    #[must_use]
    pub fn step_counter(&self) -> StepCounter {
        StepCounter {
            current: self.cursor.map_or(0, |cursor| cursor + 1),
            total: self.steps.len(),
        }
    }

    /// The narration for the current position.
    #[must_use]
    pub fn description(&self) -> String {
        if let Some(step) = self.current() {
            return step.description.clone();
        }
        match &self.problem {
            Some(problem) => format!(
                "Ready to divide {} by {}. Press → to begin.",
                problem.dividend(),
                problem.divisor()
            ),
            None => NO_PROBLEM_DESCRIPTION.to_string(),
        }
    }

    /// Descriptions of every step shown so far, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        let shown = self.cursor.map_or(0, |cursor| cursor + 1);
        self.steps[..shown]
            .iter()
            .map(|step| step.description.as_str())
    }
}
