#![forbid(unsafe_code)]

//! Long-division step generator.
//!
//! [`generate_steps`] walks the dividend left to right, narrating each
//! bring-down / divide / multiply / subtract cycle as a preview step followed
//! by an execute step:
//!
//! ```text
//! Initial
//!   ├─ [PreviewBringDown → ExecuteBringDown]   (every digit after the first)
//!   ├─ working >= divisor:
//!   │    PreviewDivide → ExecuteDivide
//!   │    PreviewMultiply → ExecuteMultiply     (+ product row)
//!   │    PreviewSubtract → ExecuteSubtract     (+ line row, + remainder row)
//!   └─ working < divisor, quotient started:
//!        PreviewZero → ExecuteZero
//! Complete
//! ```
//!
//! Work rows are right-aligned to the column of the dividend digit most
//! recently brought down. Their columns depend only on digit-string lengths
//! and the current position, so no layout pass is needed.

use crate::problem::Problem;
use crate::step::{
    GridState, Highlight, RowReason, Step, StepKind, StepSequence, WorkRow, WorkRowKind,
};

/// Generate the full narrated step sequence for `problem`.
///
/// The result always starts with [`StepKind::Initial`] and ends with exactly
/// one [`StepKind::Complete`]. Generation is deterministic: the same problem
/// always yields a structurally identical sequence.
#[must_use]
pub fn generate_steps(problem: &Problem) -> StepSequence {
    let divisor = problem.divisor_value();
    let wide_divisor = u128::from(divisor);
    let mut narrator = Narrator::new(problem);
    narrator.push(StepKind::Initial, "Starting long division".to_string(), None);

    // Before each append `working < divisor <= u64::MAX`, so `working * 10 + 9`
    // always fits in a u128.
    let mut working: u128 = 0;

    for (position, byte) in problem.dividend().bytes().enumerate() {
        let digit = byte - b'0';
        working = working * 10 + u128::from(digit);

        if position > 0 || !narrator.quotient.is_empty() {
            narrator.push(
                StepKind::PreviewBringDown,
                format!("We bring down the digit {digit} to make {working}"),
                Some(Highlight::BringDown { column: position }),
            );
            narrator.push(
                StepKind::ExecuteBringDown,
                format!("Now we have {working} to work with"),
                Some(Highlight::Working {
                    start_col: span_start(working, position),
                    end_col: position,
                    value: working,
                }),
            );
        }

        if working >= wide_divisor {
            // working < 10 * divisor, so the quotient digit is a single digit.
            let quotient_digit = (working / wide_divisor) as u8;
            let product = u128::from(quotient_digit) * wide_divisor;
            let difference = working - product;

            narrator.push(
                StepKind::PreviewDivide,
                format!(
                    "How many times does {divisor} go into {working}? Answer: {quotient_digit}"
                ),
                Some(Highlight::DividePreview {
                    working,
                    divisor,
                    quotient_digit,
                    quotient_pos: narrator.quotient.len(),
                }),
            );

            narrator.quotient.push(char::from(b'0' + quotient_digit));
            narrator.push(
                StepKind::ExecuteDivide,
                format!("Write {quotient_digit} in the quotient"),
                Some(Highlight::QuotientDigit {
                    quotient_pos: narrator.quotient.len() - 1,
                }),
            );

            narrator.push(
                StepKind::PreviewMultiply,
                format!("Multiply: {quotient_digit} × {divisor} = {product}"),
                Some(Highlight::MultiplyPreview {
                    quotient_digit,
                    divisor,
                    product,
                }),
            );

            let product_row =
                WorkRow::right_aligned(WorkRowKind::Product, product.to_string(), position);
            let rule = WorkRow::line(product_row.start_col, product_row.end_col);
            narrator.work_rows.push(product_row);
            let product_index = narrator.work_rows.len() - 1;
            narrator.push(
                StepKind::ExecuteMultiply,
                format!("Write {product} below"),
                Some(Highlight::Row {
                    index: product_index,
                    reason: RowReason::ProductWritten,
                }),
            );

            narrator.push(
                StepKind::PreviewSubtract,
                format!("Subtract: {working} - {product} = {difference}"),
                Some(Highlight::Row {
                    index: product_index,
                    reason: RowReason::SubtractPreview,
                }),
            );

            narrator.work_rows.push(rule);
            narrator.work_rows.push(WorkRow::right_aligned(
                WorkRowKind::Remainder,
                difference.to_string(),
                position,
            ));
            working = difference;
            narrator.push(
                StepKind::ExecuteSubtract,
                format!("The remainder is {working}"),
                Some(Highlight::Row {
                    index: narrator.work_rows.len() - 1,
                    reason: RowReason::RemainderShown,
                }),
            );
        } else if !narrator.quotient.is_empty() {
            narrator.push(
                StepKind::PreviewZero,
                format!("{divisor} doesn't go into {working}, so write 0"),
                Some(Highlight::ZeroPreview {
                    working,
                    divisor,
                    quotient_pos: narrator.quotient.len(),
                }),
            );

            narrator.quotient.push('0');
            narrator.push(
                StepKind::ExecuteZero,
                "Wrote 0 in the quotient".to_string(),
                Some(Highlight::QuotientDigit {
                    quotient_pos: narrator.quotient.len() - 1,
                }),
            );
        }
    }

    // The final working number is the remainder, and remainder < divisor.
    let remainder = working as u64;
    let stated_quotient = if narrator.quotient.is_empty() {
        "0"
    } else {
        narrator.quotient.as_str()
    };
    let mut description = format!(
        "Division complete! {} ÷ {} = {stated_quotient}",
        problem.dividend(),
        problem.divisor()
    );
    if remainder > 0 {
        description.push_str(&format!(" R{remainder}"));
    }
    narrator.push(
        StepKind::Complete,
        description,
        Some(Highlight::Complete { remainder }),
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(
        dividend = problem.dividend(),
        divisor = problem.divisor(),
        steps = narrator.steps.len(),
        "generated long division steps"
    );

    StepSequence::from(narrator.steps)
}

/// First dividend column of a working number whose last digit sits at `position`.
fn span_start(working: u128, position: usize) -> usize {
    let digits = working.checked_ilog10().map_or(1, |log| log as usize + 1);
    (position + 1).saturating_sub(digits)
}

/// Accumulates the running grid and snapshots it into steps.
struct Narrator<'a> {
    dividend: &'a str,
    divisor: &'a str,
    quotient: String,
    work_rows: Vec<WorkRow>,
    steps: Vec<Step>,
}

impl<'a> Narrator<'a> {
    fn new(problem: &'a Problem) -> Self {
        Self {
            dividend: problem.dividend(),
            divisor: problem.divisor(),
            quotient: String::with_capacity(problem.dividend().len()),
            work_rows: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Append a step whose grid is a snapshot of the current state.
    fn push(&mut self, kind: StepKind, description: String, highlight: Option<Highlight>) {
        self.steps.push(Step {
            kind,
            description,
            grid: GridState {
                dividend: self.dividend.to_string(),
                divisor: self.divisor.to_string(),
                quotient: self.quotient.clone(),
                work_rows: self.work_rows.clone(),
                highlight,
            },
        });
    }
}
