//! Digit-by-digit traces for the reference problems.

use longdiv_core::{DivisionOutcome, Highlight, Problem, StepKind, StepSequence, generate_steps};

fn steps_for(dividend: &str, divisor: &str) -> StepSequence {
    generate_steps(&Problem::new(dividend, divisor).expect("valid problem"))
}

fn outcome(steps: &StepSequence) -> DivisionOutcome {
    steps.outcome().expect("complete step present")
}

/// Quotient digits written, in order, by divide and zero steps.
fn written_digits(steps: &StepSequence) -> String {
    steps
        .iter()
        .filter(|s| matches!(s.kind, StepKind::ExecuteDivide | StepKind::ExecuteZero))
        .filter_map(|s| s.grid.quotient.chars().last())
        .collect()
}

#[test]
fn eighty_four_by_four() {
    let steps = steps_for("84", "4");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 21,
            remainder: 0
        }
    );
    assert_eq!(steps.count_kind(StepKind::PreviewZero), 0);
    assert_eq!(steps.count_kind(StepKind::ExecuteZero), 0);
    assert_eq!(written_digits(&steps), "21");
}

#[test]
fn one_twenty_five_by_five() {
    let steps = steps_for("125", "5");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 25,
            remainder: 0
        }
    );
    // 1 < 5 is skipped silently; 12 and 25 are each a full cycle.
    assert_eq!(steps.count_kind(StepKind::ExecuteDivide), 2);
    assert_eq!(steps.count_kind(StepKind::ExecuteBringDown), 2);
}

#[test]
fn seven_by_two() {
    let steps = steps_for("7", "2");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 3,
            remainder: 1
        }
    );
    assert_eq!(steps.count_kind(StepKind::ExecuteDivide), 1);
    assert_eq!(steps.count_kind(StepKind::PreviewBringDown), 0);
}

#[test]
fn one_hundred_by_three() {
    let steps = steps_for("100", "3");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 33,
            remainder: 1
        }
    );

    let working: Vec<u128> = steps
        .iter()
        .filter_map(|s| match s.grid.highlight {
            Some(Highlight::DividePreview { working, .. }) => Some(working),
            _ => None,
        })
        .collect();
    assert_eq!(working, vec![10, 10]);
    assert_eq!(written_digits(&steps), "33");
    assert_eq!(
        steps.last().map(|s| s.description.as_str()),
        Some("Division complete! 100 ÷ 3 = 33 R1")
    );
}

#[test]
fn five_by_ten() {
    let steps = steps_for("5", "10");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 0,
            remainder: 5
        }
    );
    assert_eq!(steps.count_kind(StepKind::PreviewZero), 0);
    let complete = steps.last().expect("complete step");
    assert!(complete.description.ends_with(" R5"));
    assert_eq!(complete.grid.highlight, Some(Highlight::Complete { remainder: 5 }));
}

#[test]
fn internal_zeros_are_written() {
    let steps = steps_for("1005", "5");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 201,
            remainder: 0
        }
    );
    // 10 -> 2; bring down 0 -> 0 writes a zero; bring down 5 -> 1.
    assert_eq!(steps.count_kind(StepKind::ExecuteZero), 1);
    assert_eq!(written_digits(&steps), "201");
}

#[test]
fn leading_zero_dividend_keeps_its_columns() {
    let steps = steps_for("007", "2");
    assert_eq!(
        outcome(&steps),
        DivisionOutcome {
            quotient: 3,
            remainder: 1
        }
    );
    let product = steps
        .iter()
        .find(|s| s.kind == StepKind::ExecuteMultiply)
        .and_then(|s| s.grid.work_rows.first().cloned())
        .expect("product row");
    assert_eq!((product.start_col, product.end_col), (2, 2));
}
