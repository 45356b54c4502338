#![forbid(unsafe_code)]

//! Non-interactive export of a whole step sequence.

use std::io::Write;

use clap::ValueEnum;
use longdiv_core::{DivisionOutcome, Problem, StepSequence, generate_steps};
use longdiv_render::{GlyphMode, layout};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TraceFormat {
    /// One line per step, optionally followed by its grid.
    #[default]
    Text,
    /// The full step sequence as a JSON document.
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    pub format: TraceFormat,
    /// Draw the grid under each step (text format only).
    pub grid: bool,
    pub glyphs: GlyphMode,
}

#[derive(Debug, Serialize)]
struct TraceDocument<'a> {
    dividend: &'a str,
    divisor: &'a str,
    outcome: Option<DivisionOutcome>,
    step_count: usize,
    steps: &'a StepSequence,
}

/// Generate the steps for `problem` and write them to `out`.
pub fn write_trace(out: &mut impl Write, problem: &Problem, options: &TraceOptions) -> Result<()> {
    let steps = generate_steps(problem);
    tracing::info!(%problem, steps = steps.len(), format = ?options.format, "writing trace");

    match options.format {
        TraceFormat::Text => write_text(out, problem, &steps, options),
        TraceFormat::Json => {
            let document = TraceDocument {
                dividend: problem.dividend(),
                divisor: problem.divisor(),
                outcome: steps.outcome(),
                step_count: steps.len(),
                steps: &steps,
            };
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_text(
    out: &mut impl Write,
    problem: &Problem,
    steps: &StepSequence,
    options: &TraceOptions,
) -> Result<()> {
    writeln!(out, "{problem}")?;
    let total = steps.len();
    for (index, step) in steps.iter().enumerate() {
        writeln!(
            out,
            "Step {} of {total} [{}] {}",
            index + 1,
            step.kind,
            step.description
        )?;
        if options.grid {
            for line in layout(&step.grid, options.glyphs).to_plain_lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    if let Some(outcome) = steps.outcome() {
        writeln!(out, "{problem} = {outcome}")?;
    }
    Ok(())
}
