#![forbid(unsafe_code)]

//! Backend boundary between the runtime and the outside world.
//!
//! [`CrosstermBackend`] reads terminal events and draws frames with crossterm.
//! [`HeadlessBackend`] replays a scripted event queue and records every frame
//! as plain text, for tests.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::event::Event;
use crossterm::style::{self, Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::program::{Color, Frame, Style};
use crate::terminal::{SessionOptions, TerminalSession};

/// Size queries, event input and frame presentation.
pub trait Backend {
    /// Columns and rows available for drawing.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Draw a complete frame.
    fn present(&mut self, frame: &Frame) -> io::Result<()>;

    /// Block for the next event. `None` means input has ended.
    fn next_event(&mut self) -> io::Result<Option<Event>>;
}

/// Native terminal backend. Holds the [`TerminalSession`] for its lifetime.
#[derive(Debug)]
pub struct CrosstermBackend {
    session: TerminalSession,
    out: io::Stdout,
}

impl CrosstermBackend {
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        Ok(Self {
            session: TerminalSession::new(options)?,
            out: io::stdout(),
        })
    }
}

impl Backend for CrosstermBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        self.session.size()
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, terminal::BeginSynchronizedUpdate)?;
        for y in 0..frame.height() {
            queue!(self.out, cursor::MoveTo(0, y))?;
            if let Some(line) = frame.lines().get(usize::from(y)) {
                for span in &line.spans {
                    if span.style.is_plain() {
                        queue!(self.out, Print(&span.text))?;
                    } else {
                        apply_style(&mut self.out, span.style)?;
                        queue!(self.out, Print(&span.text), style::ResetColor)?;
                        queue!(self.out, SetAttribute(Attribute::Reset))?;
                    }
                }
            }
            queue!(self.out, terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }
        queue!(self.out, terminal::EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn next_event(&mut self) -> io::Result<Option<Event>> {
        crossterm::event::read().map(Some)
    }
}

fn apply_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    if let Some(color) = style.fg {
        queue!(out, SetForegroundColor(map_color(color)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn map_color(color: Color) -> style::Color {
    match color {
        Color::Yellow => style::Color::Yellow,
        Color::Cyan => style::Color::Cyan,
        Color::Green => style::Color::Green,
        Color::Red => style::Color::Red,
        Color::DarkGrey => style::Color::DarkGrey,
    }
}

/// In-memory backend: scripted events in, plain-text frames out.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    width: u16,
    height: u16,
    events: VecDeque<Event>,
    frames: Vec<Vec<String>>,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_events(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Every presented frame, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<String>] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames.last().map(Vec::as_slice)
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.frames.push(frame.to_plain_lines());
        Ok(())
    }

    fn next_event(&mut self) -> io::Result<Option<Event>> {
        let event = self.events.pop_front();
        if let Some(Event::Resize(w, h)) = event {
            self.width = w;
            self.height = h;
        }
        Ok(event)
    }
}
