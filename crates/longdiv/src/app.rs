#![forbid(unsafe_code)]

//! The interactive long-division model.
//!
//! Two screens share one model. The input form collects a dividend and a
//! divisor (digits only, with built-in presets on Up/Down). Once a problem
//! starts, the stepping screen shows the division grid for the current step,
//! its narration, the step counter and an optional history panel.
//!
//! All division state lives in the [`Navigator`]; this model only adds form
//! fields, the preset selection and the history-panel toggle.

use crossterm::event::{Event, KeyEvent};
use longdiv_core::{Field, Navigator, Problem, ProblemError};
use longdiv_render::{Emphasis, GlyphMode, Grid, layout};

use crate::config::AppConfig;
use crate::keymap::{self, Action, Mode};
use crate::presets::Preset;
use crate::program::{Cmd, Color, Frame, Line, Model, Span, Style};
use crate::text::wrap;

/// Longest operand the form accepts. `u64::MAX` has 20 digits.
pub const MAX_INPUT_DIGITS: usize = 20;

const TITLE: &str = "Long Division";
const PLACEHOLDER: &str = "Press → to begin the division process";
const PLACEHOLDER_ASCII: &str = "Press Right to begin the division process";
const INDENT: &str = "  ";

const TITLE_STYLE: Style = Style::new().bold();
const HINT_STYLE: Style = Style::new().fg(Color::DarkGrey);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).bold();
const FOCUS_STYLE: Style = Style::new().reverse();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Key(KeyEvent),
    Paste(String),
    Resize(u16, u16),
    Action(Action),
    Ignored,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            Event::Paste(text) => Self::Paste(text),
            Event::Resize(w, h) => Self::Resize(w, h),
            _ => Self::Ignored,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DivisionApp {
    glyphs: GlyphMode,
    history_open: bool,
    dividend: String,
    divisor: String,
    focus: Field,
    error: Option<ProblemError>,
    presets: Vec<Preset>,
    preset: Option<usize>,
    navigator: Navigator,
}

impl DivisionApp {
    #[must_use]
    pub fn new(config: &AppConfig, presets: Vec<Preset>) -> Self {
        Self {
            glyphs: config.glyphs,
            history_open: config.history_open,
            dividend: String::new(),
            divisor: String::new(),
            focus: Field::Dividend,
            error: None,
            presets,
            preset: None,
            navigator: Navigator::new(),
        }
    }

    /// Skip the form and open `problem` on the stepping screen.
    #[must_use]
    pub fn with_problem(mut self, problem: Problem) -> Self {
        self.dividend = problem.dividend().to_string();
        self.divisor = problem.divisor().to_string();
        self.navigator.start(problem);
        self
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        if self.navigator.problem().is_some() {
            Mode::Stepping
        } else {
            Mode::Input
        }
    }

    #[inline]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[inline]
    pub fn dividend_input(&self) -> &str {
        &self.dividend
    }

    #[inline]
    pub fn divisor_input(&self) -> &str {
        &self.divisor
    }

    #[inline]
    pub fn focus(&self) -> Field {
        self.focus
    }

    #[inline]
    pub fn error(&self) -> Option<&ProblemError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn history_open(&self) -> bool {
        self.history_open
    }

    /// The selected preset, if the form still holds its values.
    pub fn selected_preset(&self) -> Option<&Preset> {
        self.preset.and_then(|index| self.presets.get(index))
    }

    fn apply(&mut self, action: Action) -> Cmd<Msg> {
        match action {
            Action::Quit => return Cmd::batch(vec![Cmd::log("quit"), Cmd::quit()]),
            Action::Digit(c) => self.insert_digits(&c.to_string()),
            Action::DeleteDigit => {
                self.focused_input_mut().pop();
                self.preset = None;
            }
            Action::NextField | Action::PrevField => {
                self.focus = match self.focus {
                    Field::Dividend => Field::Divisor,
                    Field::Divisor => Field::Dividend,
                };
            }
            Action::PrevPreset => return self.cycle_preset(false),
            Action::NextPreset => return self.cycle_preset(true),
            Action::Start => return self.start(),
            Action::Forward => {
                self.navigator.step_forward();
            }
            Action::Backward => {
                self.navigator.step_backward();
            }
            Action::SeekStart => {
                self.navigator.seek(0);
            }
            Action::SeekEnd => {
                self.navigator.seek_end();
            }
            Action::Reset => self.navigator.reset(),
            Action::NewProblem => {
                self.navigator.new_problem();
                self.dividend.clear();
                self.divisor.clear();
                self.focus = Field::Dividend;
                self.preset = None;
                self.error = None;
                return Cmd::log("new problem");
            }
            Action::ToggleHistory => self.history_open = !self.history_open,
        }
        Cmd::none()
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Dividend => &mut self.dividend,
            Field::Divisor => &mut self.divisor,
        }
    }

    /// Append the digits of `text` to the focused field; everything else is
    /// dropped.
    fn insert_digits(&mut self, text: &str) {
        let input = self.focused_input_mut();
        for c in text.chars().filter(char::is_ascii_digit) {
            if input.len() >= MAX_INPUT_DIGITS {
                break;
            }
            input.push(c);
        }
        self.preset = None;
        self.error = None;
    }

    fn cycle_preset(&mut self, forward: bool) -> Cmd<Msg> {
        let count = self.presets.len();
        if count == 0 {
            return Cmd::none();
        }
        let next = match (self.preset, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.preset = Some(next);
        self.error = None;

        let preset = &self.presets[next];
        self.dividend.clone_from(&preset.dividend);
        self.divisor.clone_from(&preset.divisor);
        Cmd::log(format!("loaded preset {}", preset.name))
    }

    fn start(&mut self) -> Cmd<Msg> {
        match Problem::new(&self.dividend, &self.divisor) {
            Ok(problem) => {
                let line = format!("started {problem}");
                self.error = None;
                self.navigator.start(problem);
                Cmd::log(line)
            }
            Err(error) => {
                tracing::debug!(%error, "problem rejected");
                if let Some(field) = error.field() {
                    self.focus = field;
                }
                self.error = Some(error);
                Cmd::none()
            }
        }
    }

    fn view_input(&self, frame: &mut Frame) {
        frame.push_line(Line::raw(format!("{INDENT}Enter a problem:")));
        frame.blank_line();
        frame.push_line(self.field_line("Dividend", &self.dividend, Field::Dividend));
        frame.push_line(self.field_line("Divisor ", &self.divisor, Field::Divisor));

        let example = match self.selected_preset() {
            Some(preset) => format!("{} ({} ÷ {})", preset.name, preset.dividend, preset.divisor),
            None => "none".to_string(),
        };
        frame.push_line(Line::from_spans(vec![
            Span::raw(format!("{INDENT}Example   {example}  ")),
            Span::styled(self.key_label("up/down"), HINT_STYLE),
        ]));
        frame.blank_line();

        let width = usize::from(frame.width()).saturating_sub(INDENT.len());
        match &self.error {
            Some(error) => {
                for line in wrap(&capitalize(&error.to_string()), width) {
                    frame.push_line(Line::styled(format!("{INDENT}{line}"), ERROR_STYLE));
                }
            }
            None => {
                for line in wrap(&self.navigator.description(), width) {
                    frame.push_line(Line::raw(format!("{INDENT}{line}")));
                }
            }
        }
    }

    fn field_line(&self, label: &str, value: &str, field: Field) -> Line {
        let mut line = Line::raw(format!("{INDENT}{label}  "));
        let shown = format!(" {value:<width$} ", width = MAX_INPUT_DIGITS);
        if self.focus == field {
            line.push(Span::styled(shown, FOCUS_STYLE));
        } else {
            line.push(Span::styled(shown, Style::new().dim()));
        }
        line
    }

    fn view_stepping(&self, frame: &mut Frame) {
        let counter = self.navigator.step_counter();
        if let Some(problem) = self.navigator.problem() {
            frame.push_line(Line::from_spans(vec![
                Span::raw(format!("{INDENT}{}    ", self.narration(&problem.to_string()))),
                Span::styled(counter.to_string(), HINT_STYLE),
            ]));
        }
        frame.blank_line();

        match self.navigator.current() {
            Some(step) => {
                let grid = layout(&step.grid, self.glyphs);
                for line in grid_lines(&grid) {
                    frame.push_line(line);
                }
            }
            None => {
                let placeholder = match self.glyphs {
                    GlyphMode::Unicode => PLACEHOLDER,
                    GlyphMode::Ascii => PLACEHOLDER_ASCII,
                };
                frame.push_line(Line::styled(format!("{INDENT}{placeholder}"), HINT_STYLE));
            }
        }
        frame.blank_line();

        let width = usize::from(frame.width()).saturating_sub(INDENT.len());
        for line in wrap(&self.narration(&self.navigator.description()), width) {
            frame.push_line(Line::styled(format!("{INDENT}{line}"), Style::new().bold()));
        }
        frame.blank_line();

        self.view_history(frame);
    }

    /// Narration text with operator symbols spelled out in ASCII mode.
    fn narration(&self, text: &str) -> String {
        match self.glyphs {
            GlyphMode::Unicode => text.to_string(),
            GlyphMode::Ascii => text.replace('→', "Right").replace('÷', "/").replace('×', "x"),
        }
    }

    fn view_history(&self, frame: &mut Frame) {
        let count = self.navigator.history().len();
        if !self.history_open {
            frame.push_line(Line::styled(
                format!("{INDENT}History ({count}) hidden, Tab to show"),
                HINT_STYLE,
            ));
            return;
        }

        frame.push_line(Line::styled(
            format!("{INDENT}History ({count})"),
            Style::new().bold(),
        ));
        // Keep the legend's two rows free; show the newest entries that fit.
        let room = frame.remaining_rows().saturating_sub(2);
        let skip = count.saturating_sub(room);
        for (index, entry) in self.navigator.history().enumerate().skip(skip) {
            let entry = self.narration(entry);
            frame.push_line(Line::raw(format!("{INDENT}{:>3}. {entry}", index + 1)));
        }
    }

    fn view_legend(&self, frame: &mut Frame) {
        let mut line = Line::raw(INDENT);
        let entries: Vec<(String, &str, bool)> = match self.mode() {
            Mode::Input => vec![
                ("0-9".to_string(), "type", true),
                ("Tab".to_string(), "field", true),
                (self.key_label("up/down"), "example", !self.presets.is_empty()),
                ("Enter".to_string(), "start", true),
                ("Esc".to_string(), "quit", true),
            ],
            Mode::Stepping => vec![
                (self.key_label("left"), "back", self.navigator.can_step_backward()),
                (self.key_label("right"), "forward", self.navigator.can_step_forward()),
                ("Home/End".to_string(), "jump", !self.navigator.steps().is_empty()),
                ("r".to_string(), "reset", self.navigator.is_started()),
                ("n".to_string(), "new", true),
                ("Tab".to_string(), "history", true),
                ("q".to_string(), "quit", true),
            ],
        };

        for (index, (key, label, enabled)) in entries.into_iter().enumerate() {
            if index > 0 {
                line.push(Span::raw("  "));
            }
            let key_style = if enabled {
                Style::new().fg(Color::Cyan).bold()
            } else {
                HINT_STYLE
            };
            let label_style = if enabled { Style::new() } else { HINT_STYLE };
            line.push(Span::styled(key, key_style));
            line.push(Span::styled(format!(" {label}"), label_style));
        }

        // Pin the legend to the bottom row.
        while frame.remaining_rows() > 1 {
            frame.blank_line();
        }
        frame.push_line(line);
    }

    fn key_label(&self, key: &str) -> String {
        let unicode = self.glyphs == GlyphMode::Unicode;
        match (key, unicode) {
            ("left", true) => "←".to_string(),
            ("right", true) => "→".to_string(),
            ("up/down", true) => "↑/↓".to_string(),
            ("left", false) => "Left".to_string(),
            ("right", false) => "Right".to_string(),
            ("up/down", false) => "Up/Down".to_string(),
            (other, _) => other.to_string(),
        }
    }
}

impl Model for DivisionApp {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        match self.navigator.problem() {
            Some(problem) => Cmd::log(format!("opened {problem}")),
            None => Cmd::none(),
        }
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Key(key) => match keymap::resolve(&key, self.mode()) {
                Some(action) => Cmd::msg(Msg::Action(action)),
                None => Cmd::none(),
            },
            Msg::Action(action) => self.apply(action),
            Msg::Paste(text) => {
                if self.mode() == Mode::Input {
                    self.insert_digits(&text);
                }
                Cmd::none()
            }
            Msg::Resize(width, height) => {
                tracing::debug!(width, height, "resize");
                Cmd::none()
            }
            Msg::Ignored => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        frame.push_line(Line::styled(format!("{INDENT}{TITLE}"), TITLE_STYLE));
        frame.blank_line();
        match self.mode() {
            Mode::Input => self.view_input(frame),
            Mode::Stepping => self.view_stepping(frame),
        }
        self.view_legend(frame);
    }
}

fn emphasis_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Plain => Style::new(),
        Emphasis::Preview => Style::new().fg(Color::Yellow),
        Emphasis::Active => Style::new().fg(Color::Cyan).bold(),
        Emphasis::Result => Style::new().fg(Color::Green).bold(),
    }
}

/// One styled line per grid row, merging runs of equal emphasis.
fn grid_lines(grid: &Grid) -> Vec<Line> {
    grid.rows()
        .map(|row| {
            let mut line = Line::raw(INDENT);
            let mut run = String::new();
            let mut run_emphasis = Emphasis::Plain;
            for cell in row {
                if cell.emphasis != run_emphasis && !run.is_empty() {
                    let style = emphasis_style(run_emphasis);
                    line.push(Span::styled(std::mem::take(&mut run), style));
                }
                run_emphasis = cell.emphasis;
                run.push(cell.symbol);
            }
            if !run.is_empty() {
                line.push(Span::styled(run, emphasis_style(run_emphasis)));
            }
            line
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
