#![forbid(unsafe_code)]

//! Snapshot → grid layout.
//!
//! ```text
//!  col:  0 1 2 3 4 5
//!  row 0       2 5        quotient, aligned over the digits that produced it
//!  row 1     ─ ─ ─        rule over the dividend
//!  row 2 5 )   1 2 5      divisor ) dividend
//!  row 3   − 1 0          work rows, one per WorkRow
//!  row 4     ─ ─
//!  row 5       2
//!  ...
//! ```
//!
//! The gutter left of the dividend is `divisor.len() + 2` cells wide, so the
//! minus sign of a product that starts in dividend column 0 lands in the
//! blank cell after the bracket.

use longdiv_core::{GridState, Highlight, RowReason, WorkRowKind};

use crate::glyphs::GlyphMode;
use crate::grid::{Emphasis, Grid};

const QUOTIENT_ROW: usize = 0;
const BAR_ROW: usize = 1;
const DIVIDEND_ROW: usize = 2;
const FIRST_WORK_ROW: usize = 3;

/// Dividend column above which the first quotient digit is written.
///
/// Leading zeros of the quotient are never written, so the first digit sits
/// over the first dividend prefix that is at least the divisor. Returns
/// `dividend.len()` when no prefix is (the quotient stays empty).
#[must_use]
pub fn quotient_offset(dividend: &str, divisor: &str) -> usize {
    let divisor = decimal_value(divisor);
    let mut prefix: u128 = 0;
    for (col, byte) in dividend.bytes().enumerate() {
        prefix = prefix
            .saturating_mul(10)
            .saturating_add(u128::from(byte.saturating_sub(b'0')));
        if prefix >= divisor {
            return col;
        }
    }
    dividend.len()
}

fn decimal_value(digits: &str) -> u128 {
    digits.bytes().fold(0u128, |acc, byte| {
        acc.saturating_mul(10)
            .saturating_add(u128::from(byte.saturating_sub(b'0')))
    })
}

/// Lay out one step's grid.
#[must_use]
pub fn layout(state: &GridState, mode: GlyphMode) -> Grid {
    let glyphs = mode.glyphs();
    let columns = state.dividend.len();
    let gutter = state.divisor.len() + 2;
    let offset = quotient_offset(&state.dividend, &state.divisor);

    let mut grid = Grid::new(gutter + columns, FIRST_WORK_ROW + state.work_rows.len());

    grid.put_str(gutter + offset, QUOTIENT_ROW, &state.quotient);
    for x in gutter..gutter + columns {
        grid.put(x, BAR_ROW, glyphs.rule);
    }
    grid.put_str(0, DIVIDEND_ROW, &state.divisor);
    grid.put(gutter - 2, DIVIDEND_ROW, glyphs.bracket);
    grid.put_str(gutter, DIVIDEND_ROW, &state.dividend);

    for (index, row) in state.work_rows.iter().enumerate() {
        let y = FIRST_WORK_ROW + index;
        let x = gutter + row.start_col;
        match row.kind {
            WorkRowKind::Product => {
                grid.put(x - 1, y, glyphs.minus);
                grid.put_str(x, y, row.value.as_deref().unwrap_or_default());
            }
            WorkRowKind::Line => {
                for x in x..=gutter + row.end_col {
                    grid.put(x, y, glyphs.rule);
                }
            }
            WorkRowKind::Remainder => {
                grid.put_str(x, y, row.value.as_deref().unwrap_or_default());
            }
        }
    }

    let Some(highlight) = &state.highlight else {
        return grid;
    };
    let quotient_x = |pos: usize| gutter + offset + pos;

    match highlight {
        Highlight::BringDown { column } => {
            let x = gutter + column;
            grid.emphasize(DIVIDEND_ROW, x, x, Emphasis::Preview);
        }
        Highlight::Working {
            start_col, end_col, ..
        } => {
            grid.emphasize(
                DIVIDEND_ROW,
                gutter + start_col,
                gutter + end_col,
                Emphasis::Active,
            );
        }
        Highlight::DividePreview { quotient_pos, .. }
        | Highlight::ZeroPreview { quotient_pos, .. } => {
            let x = quotient_x(*quotient_pos);
            grid.put(x, QUOTIENT_ROW, glyphs.pending);
            grid.emphasize(QUOTIENT_ROW, x, x, Emphasis::Preview);
        }
        Highlight::QuotientDigit { quotient_pos } => {
            let x = quotient_x(*quotient_pos);
            grid.emphasize(QUOTIENT_ROW, x, x, Emphasis::Result);
        }
        Highlight::MultiplyPreview { .. } => {
            if let Some(pos) = state.quotient.len().checked_sub(1) {
                let x = quotient_x(pos);
                grid.emphasize(QUOTIENT_ROW, x, x, Emphasis::Active);
            }
        }
        Highlight::Row { index, reason } => {
            if let Some(row) = state.work_rows.get(*index) {
                let emphasis = match reason {
                    RowReason::ProductWritten => Emphasis::Active,
                    RowReason::SubtractPreview => Emphasis::Preview,
                    RowReason::RemainderShown => Emphasis::Result,
                };
                let start = if row.kind == WorkRowKind::Product {
                    gutter + row.start_col - 1
                } else {
                    gutter + row.start_col
                };
                grid.emphasize(FIRST_WORK_ROW + index, start, gutter + row.end_col, emphasis);
            }
        }
        Highlight::Complete { .. } => {
            if state.quotient.is_empty() {
                let x = gutter + columns - 1;
                grid.put(x, QUOTIENT_ROW, '0');
                grid.emphasize(QUOTIENT_ROW, x, x, Emphasis::Result);
            } else {
                let start = quotient_x(0);
                grid.emphasize(
                    QUOTIENT_ROW,
                    start,
                    start + state.quotient.len() - 1,
                    Emphasis::Result,
                );
            }
            if let Some((index, row)) = state
                .work_rows
                .iter()
                .enumerate()
                .rev()
                .find(|(_, row)| row.kind == WorkRowKind::Remainder)
            {
                grid.emphasize(
                    FIRST_WORK_ROW + index,
                    gutter + row.start_col,
                    gutter + row.end_col,
                    Emphasis::Result,
                );
            }
        }
    }

    grid
}
