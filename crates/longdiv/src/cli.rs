use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use longdiv_core::Problem;

use crate::app::DivisionApp;
use crate::backend::CrosstermBackend;
use crate::config::{AppConfig, ConfigOverrides};
use crate::error::{AppError, Result};
use crate::logging::{LogTarget, init_logging};
use crate::presets::{Preset, builtin_presets, find_preset};
use crate::program::Program;
use crate::terminal::SessionOptions;
use crate::trace::{TraceFormat, TraceOptions, write_trace};

#[derive(Debug, Parser)]
#[command(
    name = "longdiv",
    about = "Step through long division one narrated move at a time",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Operands for the default `run` command.
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Draw the grid with ASCII characters only.
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Open the history panel at startup.
    #[arg(long, global = true)]
    pub history: bool,

    /// Append log output to this file.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `longdiv_core=trace`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive stepper (default).
    Run(RunArgs),

    /// Print every step of a division without the interactive UI.
    Trace(TraceArgs),

    /// List the built-in example problems.
    Presets,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Number to divide.
    #[arg(value_name = "DIVIDEND", requires = "divisor")]
    pub dividend: Option<String>,

    /// Number to divide by.
    #[arg(value_name = "DIVISOR")]
    pub divisor: Option<String>,

    /// Load a built-in example instead of operands.
    #[arg(long, value_name = "NAME", conflicts_with = "dividend")]
    pub preset: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TraceArgs {
    #[arg(value_name = "DIVIDEND", required_unless_present = "preset", requires = "divisor")]
    pub dividend: Option<String>,

    #[arg(value_name = "DIVISOR")]
    pub divisor: Option<String>,

    #[arg(long, value_name = "NAME", conflicts_with = "dividend")]
    pub preset: Option<String>,

    #[arg(long, value_enum, default_value_t = TraceFormat::Text)]
    pub format: TraceFormat,

    /// Draw the grid under each step.
    #[arg(long)]
    pub grid: bool,
}

impl GlobalArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            ascii: self.ascii,
            history: self.history,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env().with_overrides(&cli.global.overrides());
    match cli.command {
        None => run_interactive(&config, &cli.run),
        Some(Commands::Run(args)) => run_interactive(&config, &args),
        Some(Commands::Trace(args)) => run_trace(&config, &args, &mut io::stdout().lock()),
        Some(Commands::Presets) => print_presets(&mut io::stdout().lock()),
    }
}

/// Resolve operands or a preset name to a problem. `None` means neither was
/// given.
pub fn resolve_problem(
    dividend: Option<&str>,
    divisor: Option<&str>,
    preset: Option<&str>,
) -> Result<Option<Problem>> {
    if let Some(name) = preset {
        return Ok(Some(find_preset(name)?.problem()?));
    }
    match (dividend, divisor) {
        (Some(dividend), Some(divisor)) => Ok(Some(Problem::new(dividend, divisor)?)),
        (None, None) => Ok(None),
        _ => Err(AppError::invalid("both DIVIDEND and DIVISOR are required")),
    }
}

fn run_interactive(config: &AppConfig, args: &RunArgs) -> Result<()> {
    let problem = resolve_problem(
        args.dividend.as_deref(),
        args.divisor.as_deref(),
        args.preset.as_deref(),
    )?;
    init_logging(
        &config.log_filter,
        &LogTarget::interactive(config.log_file.as_deref()),
    )?;

    let mut app = DivisionApp::new(config, builtin_presets());
    if let Some(problem) = problem {
        app = app.with_problem(problem);
    }

    let backend = CrosstermBackend::new(SessionOptions::default())?;
    Program::new(app, backend).run()?;
    Ok(())
}

pub fn run_trace(config: &AppConfig, args: &TraceArgs, out: &mut impl Write) -> Result<()> {
    let problem = resolve_problem(
        args.dividend.as_deref(),
        args.divisor.as_deref(),
        args.preset.as_deref(),
    )?
    .ok_or_else(|| AppError::invalid("trace needs DIVIDEND DIVISOR or --preset"))?;

    init_logging(
        &config.log_filter,
        &LogTarget::batch(config.log_file.as_deref()),
    )?;

    let options = TraceOptions {
        format: args.format,
        grid: args.grid,
        glyphs: config.glyphs,
    };
    write_trace(out, &problem, &options)
}

pub fn print_presets(out: &mut impl Write) -> Result<()> {
    let presets = builtin_presets();
    let width = presets.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for Preset {
        name,
        dividend,
        divisor,
    } in &presets
    {
        writeln!(out, "{name:<width$}  {dividend} ÷ {divisor}")?;
    }
    Ok(())
}
