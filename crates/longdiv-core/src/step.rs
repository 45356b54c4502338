#![forbid(unsafe_code)]

//! Step model: one atomic unit of the algorithm's narration.
//!
//! # Invariants
//!
//! 1. A [`StepSequence`] never changes after it is built.
//! 2. Every [`Step`] owns its [`GridState`], including its own copy of the
//!    work rows, so later steps never alter what an earlier step shows.
//! 3. Every [`WorkRow`] spans `start_col..=end_col` inside the dividend.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// What a step does. Preview steps announce an action, execute steps apply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum StepKind {
    Initial,
    PreviewBringDown,
    ExecuteBringDown,
    PreviewDivide,
    ExecuteDivide,
    PreviewMultiply,
    ExecuteMultiply,
    PreviewSubtract,
    ExecuteSubtract,
    PreviewZero,
    ExecuteZero,
    Complete,
}

impl StepKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::PreviewBringDown => "preview_bring_down",
            Self::ExecuteBringDown => "execute_bring_down",
            Self::PreviewDivide => "preview_divide",
            Self::ExecuteDivide => "execute_divide",
            Self::PreviewMultiply => "preview_multiply",
            Self::ExecuteMultiply => "execute_multiply",
            Self::PreviewSubtract => "preview_subtract",
            Self::ExecuteSubtract => "execute_subtract",
            Self::PreviewZero => "preview_zero",
            Self::ExecuteZero => "execute_zero",
            Self::Complete => "complete",
        }
    }

    /// True for steps that announce an action without applying it.
    #[must_use]
    pub const fn is_preview(self) -> bool {
        matches!(
            self,
            Self::PreviewBringDown
                | Self::PreviewDivide
                | Self::PreviewMultiply
                | Self::PreviewSubtract
                | Self::PreviewZero
        )
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum WorkRowKind {
    /// The product being subtracted.
    Product,
    /// The rule drawn under a product.
    Line,
    /// The difference left after subtracting.
    Remainder,
}

/// One line of scratch work beneath the dividend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkRow {
    pub kind: WorkRowKind,
    /// Digits to draw; `None` for [`WorkRowKind::Line`].
    pub value: Option<String>,
    /// First dividend column covered (inclusive).
    pub start_col: usize,
    /// Last dividend column covered (inclusive).
    pub end_col: usize,
}

impl WorkRow {
    /// A row of digits whose last digit sits in column `end_col`.
    #[must_use]
    pub fn right_aligned(kind: WorkRowKind, value: String, end_col: usize) -> Self {
        let start_col = (end_col + 1).saturating_sub(value.len());
        Self {
            kind,
            value: Some(value),
            start_col,
            end_col,
        }
    }

    /// A rule spanning `start_col..=end_col`.
    #[must_use]
    pub const fn line(start_col: usize, end_col: usize) -> Self {
        Self {
            kind: WorkRowKind::Line,
            value: None,
            start_col,
            end_col,
        }
    }

    /// Number of columns the row occupies.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    #[must_use]
    pub const fn contains_col(&self, col: usize) -> bool {
        self.start_col <= col && col <= self.end_col
    }
}

/// Why a work row is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum RowReason {
    ProductWritten,
    SubtractPreview,
    RemainderShown,
}

/// What the renderer should emphasize for a step.
///
/// Each variant carries exactly what its rendering case needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Highlight {
    /// The dividend digit about to be brought down.
    BringDown { column: usize },
    /// The dividend columns the working number spans.
    Working {
        start_col: usize,
        end_col: usize,
        value: u128,
    },
    /// The quotient slot about to receive a non-zero digit.
    DividePreview {
        working: u128,
        divisor: u64,
        quotient_digit: u8,
        quotient_pos: usize,
    },
    /// A quotient digit that was just written.
    QuotientDigit { quotient_pos: usize },
    /// The quotient digit about to be multiplied back.
    MultiplyPreview {
        quotient_digit: u8,
        divisor: u64,
        product: u128,
    },
    /// A specific work row.
    Row { index: usize, reason: RowReason },
    /// The quotient slot about to receive a zero.
    ZeroPreview {
        working: u128,
        divisor: u64,
        quotient_pos: usize,
    },
    /// Terminal marker carrying the final remainder.
    Complete { remainder: u64 },
}

/// Everything needed to draw the grid at one point of the division.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridState {
    pub dividend: String,
    pub divisor: String,
    /// Quotient digits written so far, left to right.
    pub quotient: String,
    pub work_rows: Vec<WorkRow>,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Step {
    pub kind: StepKind,
    /// Fully rendered narration sentence.
    pub description: String,
    pub grid: GridState,
}

/// Final quotient and remainder as stated by the `Complete` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DivisionOutcome {
    pub quotient: u64,
    pub remainder: u64,
}

impl fmt::Display for DivisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quotient)?;
        if self.remainder > 0 {
            write!(f, " R{}", self.remainder)?;
        }
        Ok(())
    }
}

/// Immutable, cheaply clonable ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StepSequence {
    steps: Arc<[Step]>,
}

impl StepSequence {
    /// The empty sequence (no problem loaded).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The final quotient and remainder, read off the `Complete` step.
    ///
    /// An empty quotient string (dividend smaller than divisor) reads as 0.
    #[must_use]
    pub fn outcome(&self) -> Option<DivisionOutcome> {
        let last = self.steps.last()?;
        let Some(Highlight::Complete { remainder }) = last.grid.highlight else {
            return None;
        };
        let quotient = if last.grid.quotient.is_empty() {
            0
        } else {
            last.grid.quotient.parse().ok()?
        };
        Some(DivisionOutcome {
            quotient,
            remainder,
        })
    }

    /// Count steps of a given kind.
    #[must_use]
    pub fn count_kind(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|step| step.kind == kind).count()
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl Deref for StepSequence {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StepSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.steps.iter())
    }
}
