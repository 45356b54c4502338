//! Plain-text snapshots and emphasis checks for laid-out grids.

use longdiv_core::{Problem, Step, StepKind, StepSequence, generate_steps};
use longdiv_render::{Emphasis, GlyphMode, layout};

fn steps_for(dividend: &str, divisor: &str) -> StepSequence {
    generate_steps(&Problem::new(dividend, divisor).expect("valid problem"))
}

fn find(steps: &StepSequence, kind: StepKind) -> &Step {
    steps
        .iter()
        .find(|s| s.kind == kind)
        .unwrap_or_else(|| panic!("no {kind} step"))
}

fn plain(step: &Step, mode: GlyphMode) -> Vec<String> {
    layout(&step.grid, mode).to_plain_lines()
}

#[test]
fn complete_eighty_four_by_four_ascii() {
    let steps = steps_for("84", "4");
    let last = steps.last().expect("complete step");
    assert_eq!(
        plain(last, GlyphMode::Ascii),
        vec![
            "   21", //
            "   --",
            "4) 84",
            "  -8",
            "   -",
            "   0",
            "   -4",
            "    -",
            "    0",
        ]
    );
}

#[test]
fn complete_one_twenty_five_by_five_unicode() {
    let steps = steps_for("125", "5");
    let last = steps.last().expect("complete step");
    assert_eq!(
        plain(last, GlyphMode::Unicode),
        vec![
            "    25", //
            "   ───",
            "5) 125",
            "  −10",
            "   ──",
            "    2",
            "   −25",
            "    ──",
            "     0",
        ]
    );
}

#[test]
fn quotient_digits_sit_over_their_columns() {
    let steps = steps_for("100", "3");
    let last = steps.last().expect("complete step");
    let lines = plain(last, GlyphMode::Ascii);
    assert_eq!(lines[0], "    33");
    assert_eq!(lines[2], "3) 100");
}

#[test]
fn divide_preview_shows_pending_slot() {
    let steps = steps_for("125", "5");
    let preview = find(&steps, StepKind::PreviewDivide);
    let grid = layout(&preview.grid, GlyphMode::Ascii);
    assert_eq!(grid.row_text(0), "    ?");
    assert_eq!(grid.emphasized(Emphasis::Preview), vec![(4, 0)]);
}

#[test]
fn bring_down_previews_one_dividend_digit() {
    let steps = steps_for("84", "4");
    let preview = find(&steps, StepKind::PreviewBringDown);
    let grid = layout(&preview.grid, GlyphMode::Ascii);
    assert_eq!(grid.emphasized(Emphasis::Preview), vec![(4, 2)]);

    let execute = find(&steps, StepKind::ExecuteBringDown);
    let grid = layout(&execute.grid, GlyphMode::Ascii);
    assert_eq!(grid.emphasized(Emphasis::Active), vec![(4, 2)]);
}

#[test]
fn product_row_emphasis_includes_the_minus_sign() {
    let steps = steps_for("125", "5");
    let written = find(&steps, StepKind::ExecuteMultiply);
    let grid = layout(&written.grid, GlyphMode::Ascii);
    assert_eq!(grid.row_text(3), "  -10");
    assert_eq!(grid.emphasized(Emphasis::Active), vec![(2, 3), (3, 3), (4, 3)]);

    let subtract = find(&steps, StepKind::PreviewSubtract);
    let grid = layout(&subtract.grid, GlyphMode::Ascii);
    assert_eq!(grid.emphasized(Emphasis::Preview), vec![(2, 3), (3, 3), (4, 3)]);
}

#[test]
fn remainder_is_shown_as_a_result() {
    let steps = steps_for("7", "2");
    let shown = find(&steps, StepKind::ExecuteSubtract);
    let grid = layout(&shown.grid, GlyphMode::Ascii);
    assert_eq!(grid.row_text(5), "   1");
    assert_eq!(grid.emphasized(Emphasis::Result), vec![(3, 5)]);
}

#[test]
fn written_quotient_digit_is_a_result() {
    let steps = steps_for("84", "4");
    let written = find(&steps, StepKind::ExecuteDivide);
    let grid = layout(&written.grid, GlyphMode::Ascii);
    assert_eq!(grid.row_text(0), "   2");
    assert_eq!(grid.emphasized(Emphasis::Result), vec![(3, 0)]);

    let multiply = find(&steps, StepKind::PreviewMultiply);
    let grid = layout(&multiply.grid, GlyphMode::Ascii);
    assert_eq!(grid.emphasized(Emphasis::Active), vec![(3, 0)]);
}

#[test]
fn zero_preview_marks_the_next_quotient_slot() {
    let steps = steps_for("408", "4");
    let preview = find(&steps, StepKind::PreviewZero);
    let grid = layout(&preview.grid, GlyphMode::Ascii);
    assert_eq!(grid.row_text(0), "   1?");
    assert_eq!(grid.emphasized(Emphasis::Preview), vec![(4, 0)]);
}

#[test]
fn empty_quotient_completes_as_zero() {
    let steps = steps_for("5", "10");
    let last = steps.last().expect("complete step");
    let grid = layout(&last.grid, GlyphMode::Ascii);
    assert_eq!(grid.to_plain_lines(), vec!["    0", "    -", "10) 5"]);
    assert_eq!(grid.emphasized(Emphasis::Result), vec![(4, 0)]);
}

#[test]
fn completion_highlights_quotient_and_final_remainder() {
    let steps = steps_for("7", "2");
    let last = steps.last().expect("complete step");
    let grid = layout(&last.grid, GlyphMode::Ascii);
    assert_eq!(grid.emphasized(Emphasis::Result), vec![(3, 0), (3, 5)]);
}
