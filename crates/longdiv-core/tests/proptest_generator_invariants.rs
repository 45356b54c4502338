//! Property-based invariant tests for the step generator and navigator.
//!
//! 1. Outcome satisfies `q * d + r == n` and `r < d`
//! 2. Sequence starts with Initial and ends with exactly one Complete
//! 3. Quotient length never exceeds the dividend and never shrinks
//! 4. Work-row columns stay inside the dividend
//! 5. Generation is deterministic
//! 6. Work-row snapshots only ever grow by appending
//! 7. Navigation round-trip restores cursor and visible step
//! 8. History length always equals the 1-based cursor position

use longdiv_core::{Navigator, Problem, StepKind, WorkRowKind, generate_steps};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_problem() -> impl Strategy<Value = Problem> {
    let canonical = prop_oneof![
        (1u64..=u64::MAX, 1u64..=u64::MAX),
        (1u64..100_000, 1u64..1_000),
    ]
    .prop_map(|(n, d)| (n.to_string(), d.to_string()));
    // Leading zeros are kept as typed and walk the zero-working bring-down path.
    let zero_padded = (1usize..4, 1u64..100_000, 1u64..1_000)
        .prop_map(|(zeros, n, d)| (format!("{}{n}", "0".repeat(zeros)), d.to_string()));
    prop_oneof![3 => canonical, 1 => zero_padded]
        .prop_map(|(n, d)| Problem::new(&n, &d).expect("non-zero operands are valid"))
}

#[derive(Debug, Clone, Copy)]
enum NavOp {
    Forward,
    Backward,
    Reset,
    Seek(usize),
}

fn arb_nav_ops() -> impl Strategy<Value = Vec<NavOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => Just(NavOp::Forward),
            2 => Just(NavOp::Backward),
            1 => Just(NavOp::Reset),
            1 => (0usize..64).prop_map(NavOp::Seek),
        ],
        0..80,
    )
}

fn apply(nav: &mut Navigator, op: NavOp) {
    match op {
        NavOp::Forward => {
            nav.step_forward();
        }
        NavOp::Backward => {
            nav.step_backward();
        }
        NavOp::Reset => nav.reset(),
        NavOp::Seek(index) => {
            nav.seek(index);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Division identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn outcome_satisfies_division_identity(problem in arb_problem()) {
        let steps = generate_steps(&problem);
        let outcome = steps.outcome().expect("complete step present");
        let n = u128::from(problem.dividend_value());
        let d = u128::from(problem.divisor_value());
        prop_assert_eq!(
            u128::from(outcome.quotient) * d + u128::from(outcome.remainder),
            n
        );
        prop_assert!(u128::from(outcome.remainder) < d);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Bookends
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bookended_by_initial_and_single_complete(problem in arb_problem()) {
        let steps = generate_steps(&problem);
        prop_assert_eq!(steps.first().map(|s| s.kind), Some(StepKind::Initial));
        prop_assert_eq!(steps.last().map(|s| s.kind), Some(StepKind::Complete));
        prop_assert_eq!(steps.count_kind(StepKind::Complete), 1);
        prop_assert_eq!(steps.count_kind(StepKind::Initial), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Quotient growth
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn quotient_is_bounded_and_monotonic(problem in arb_problem()) {
        let steps = generate_steps(&problem);
        let dividend_len = problem.dividend().len();
        let mut previous = 0;
        for step in &steps {
            let len = step.grid.quotient.len();
            prop_assert!(len <= dividend_len);
            prop_assert!(len >= previous);
            prop_assert!(
                !step.grid.quotient.starts_with('0'),
                "leading zero in {}",
                step.grid.quotient
            );
            previous = len;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Column bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn work_rows_stay_inside_the_dividend(problem in arb_problem()) {
        let steps = generate_steps(&problem);
        let last_col = problem.dividend().len() - 1;
        for step in &steps {
            for row in &step.grid.work_rows {
                prop_assert!(row.start_col <= row.end_col);
                prop_assert!(row.end_col <= last_col);
                match row.kind {
                    WorkRowKind::Line => prop_assert!(row.value.is_none()),
                    WorkRowKind::Product | WorkRowKind::Remainder => {
                        let value = row.value.as_deref().unwrap_or_default();
                        prop_assert_eq!(value.len(), row.width());
                    }
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn generation_is_deterministic(problem in arb_problem()) {
        let first = generate_steps(&problem);
        let second = generate_steps(&problem);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Snapshot growth
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn work_row_snapshots_extend_their_predecessors(problem in arb_problem()) {
        let steps = generate_steps(&problem);
        for pair in steps.windows(2) {
            let before = &pair[0].grid.work_rows;
            let after = &pair[1].grid.work_rows;
            prop_assert!(after.len() >= before.len());
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Navigation round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn forward_then_backward_restores_position(
        problem in arb_problem(),
        ops in arb_nav_ops(),
    ) {
        let mut nav = Navigator::new();
        nav.start(problem);
        for op in ops {
            apply(&mut nav, op);
        }

        // Round-trip holds from any position that has a next step to
        // return from (not the pre-start position, not the last step).
        if nav.cursor().is_some() && nav.can_step_forward() {
            let cursor = nav.cursor();
            let visible = nav.current().cloned();
            prop_assert!(nav.step_forward().is_some());
            prop_assert!(nav.step_backward().is_some());
            prop_assert_eq!(nav.cursor(), cursor);
            prop_assert_eq!(nav.current().cloned(), visible);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. History mirrors the cursor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn history_length_tracks_cursor(
        problem in arb_problem(),
        ops in arb_nav_ops(),
    ) {
        let mut nav = Navigator::new();
        nav.start(problem);
        for op in ops {
            apply(&mut nav, op);
            let expected = nav.cursor().map_or(0, |c| c + 1);
            prop_assert_eq!(nav.history().len(), expected);
            prop_assert_eq!(nav.step_counter().current, expected);
            prop_assert_eq!(nav.can_step_backward(), nav.cursor().is_some_and(|c| c > 0));
        }
    }
}
