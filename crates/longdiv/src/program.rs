#![forbid(unsafe_code)]

//! Elm-style runtime: a [`Model`] turns messages into state changes and
//! [`Cmd`]s, and renders itself into a [`Frame`] that a [`Backend`] presents.
//!
//! ```text
//! event ─► Message ─► update() ─► Cmd ─► (Quit | Msg | Log | Batch)
//!                        │
//!                        ▼
//!                     view() ─► Frame ─► Backend::present
//! ```
//!
//! The loop ends on [`Cmd::Quit`] or when the backend's input is exhausted.

use std::io;

use crossterm::event::Event;

use crate::backend::Backend;
use crate::text::{display_width, truncate_to_width};

/// Application state plus its transition and render functions.
pub trait Model: Sized {
    /// Must be convertible from terminal events.
    type Message: From<Event>;

    /// Called once before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by the model.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    Quit,
    /// Run each command in order.
    Batch(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Record a line in the application log.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(line: impl Into<String>) -> Self {
        Self::Log(line.into())
    }

    /// Combine commands, dropping no-ops.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Foreground colors the app uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Yellow,
    Cyan,
    Green,
    Red,
    DarkGrey,
}

/// Text attributes for a [`Span`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bold: false,
            dim: false,
            reverse: false,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    #[inline]
    pub fn is_plain(&self) -> bool {
        *self == Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn raw(text: impl Into<String>) -> Self {
        Self::styled(text, Style::new())
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One row of styled text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(text)],
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(text, style)],
        }
    }

    #[must_use]
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    #[must_use]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| display_width(&s.text)).sum()
    }

    /// Cut the line to `max_width` columns, keeping span styles.
    #[must_use]
    pub fn truncated(&self, max_width: usize) -> Self {
        let mut remaining = max_width;
        let mut spans = Vec::new();
        for span in &self.spans {
            if remaining == 0 {
                break;
            }
            let text = truncate_to_width(&span.text, remaining);
            remaining -= display_width(&text);
            if !text.is_empty() {
                spans.push(Span::styled(text, span.style));
            }
        }
        Self { spans }
    }
}

/// A full screen of lines, built by [`Model::view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    lines: Vec<Line>,
}

impl Frame {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Append a line. Lines past the bottom edge are dropped.
    pub fn push_line(&mut self, line: Line) {
        if self.lines.len() < usize::from(self.height) {
            self.lines.push(line.truncated(usize::from(self.width)));
        }
    }

    pub fn blank_line(&mut self) {
        self.push_line(Line::default());
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Rows still available below the last pushed line.
    #[inline]
    pub fn remaining_rows(&self) -> usize {
        usize::from(self.height).saturating_sub(self.lines.len())
    }

    /// Unstyled text of each line, trailing spaces removed.
    #[must_use]
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.plain().trim_end().to_string())
            .collect()
    }
}

/// Drives a [`Model`] against a [`Backend`].
pub struct Program<M: Model, B: Backend> {
    model: M,
    backend: B,
}

enum Flow {
    Continue,
    Quit,
}

impl<M: Model, B: Backend> Program<M, B> {
    pub fn new(model: M, backend: B) -> Self {
        Self { model, backend }
    }

    /// Run until the model quits or input ends. Returns the final model and
    /// the backend.
    pub fn run(mut self) -> io::Result<(M, B)> {
        let cmd = self.model.init();
        if let Flow::Quit = self.execute(cmd) {
            return Ok((self.model, self.backend));
        }
        self.render()?;

        while let Some(event) = self.backend.next_event()? {
            let msg: M::Message = event.into();
            let cmd = self.model.update(msg);
            if let Flow::Quit = self.execute(cmd) {
                tracing::debug!("program quit requested");
                break;
            }
            self.render()?;
        }

        Ok((self.model, self.backend))
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) -> Flow {
        match cmd {
            Cmd::None => Flow::Continue,
            Cmd::Quit => Flow::Quit,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    if let Flow::Quit = self.execute(cmd) {
                        return Flow::Quit;
                    }
                }
                Flow::Continue
            }
            Cmd::Msg(msg) => {
                let next = self.model.update(msg);
                self.execute(next)
            }
            Cmd::Log(line) => {
                tracing::info!(target: "longdiv::app", "{line}");
                Flow::Continue
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.backend.size()?;
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        self.backend.present(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Quit,
        Other,
    }

    impl From<Event> for CounterMsg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(key) if key.code == KeyCode::Char('+') => Self::Increment,
                Event::Key(key) if key.code == KeyCode::Char('q') => Self::Quit,
                _ => Self::Other,
            }
        }
    }

    #[derive(Default)]
    struct Counter {
        value: i32,
    }

    impl Model for Counter {
        type Message = CounterMsg;

        fn update(&mut self, msg: CounterMsg) -> Cmd<CounterMsg> {
            match msg {
                CounterMsg::Increment => {
                    self.value += 1;
                    Cmd::log(format!("value {}", self.value))
                }
                CounterMsg::Quit => Cmd::quit(),
                CounterMsg::Other => Cmd::none(),
            }
        }

        fn view(&self, frame: &mut Frame) {
            frame.push_line(Line::raw(format!("count: {}", self.value)));
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn program_renders_after_each_update() {
        let backend = HeadlessBackend::new(20, 4).with_events([key('+'), key('+')]);
        let (model, backend) = Program::new(Counter::default(), backend).run().unwrap();
        assert_eq!(model.value, 2);
        assert_eq!(backend.frames().len(), 3);
        assert_eq!(backend.last_frame().unwrap()[0], "count: 2");
    }

    #[test]
    fn quit_stops_before_remaining_events() {
        let backend = HeadlessBackend::new(20, 4).with_events([key('+'), key('q'), key('+')]);
        let (model, backend) = Program::new(Counter::default(), backend).run().unwrap();
        assert_eq!(model.value, 1);
        assert_eq!(backend.pending_events(), 1);
    }

    #[test]
    fn batch_drops_noops() {
        let cmd: Cmd<CounterMsg> = Cmd::batch(vec![Cmd::none(), Cmd::quit(), Cmd::none()]);
        assert!(matches!(cmd, Cmd::Quit));
        let empty: Cmd<CounterMsg> = Cmd::batch(vec![Cmd::none()]);
        assert!(empty.is_none());
    }

    #[test]
    fn frame_clips_to_its_size() {
        let mut frame = Frame::new(5, 2);
        frame.push_line(Line::raw("abcdefgh"));
        frame.push_line(Line::raw("x"));
        frame.push_line(Line::raw("dropped"));
        assert_eq!(frame.to_plain_lines(), vec!["abcde", "x"]);
        assert_eq!(frame.remaining_rows(), 0);
    }

    #[test]
    fn truncation_keeps_span_styles() {
        let bold = Style::new().bold();
        let line = Line::from_spans(vec![Span::raw("ab"), Span::styled("cdef", bold)]);
        let cut = line.truncated(4);
        assert_eq!(cut.plain(), "abcd");
        assert_eq!(cut.spans[1].style, bold);
    }
}
