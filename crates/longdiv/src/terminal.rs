#![forbid(unsafe_code)]

//! RAII terminal lifecycle guard.
//!
//! [`TerminalSession`] enters raw mode on construction and restores the
//! terminal when dropped. A process-wide panic hook runs the same cleanup so
//! a panic inside the event loop never leaves the shell in raw mode or on the
//! alternate screen.
//!
//! Cleanup order is the reverse of setup: bracketed paste off, cursor shown,
//! alternate screen left, raw mode disabled last.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, event, execute, terminal};

/// Which optional terminal modes to enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub alternate_screen: bool,
    pub bracketed_paste: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            bracketed_paste: true,
        }
    }
}

/// Owns raw mode and any enabled modes until dropped.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen_enabled: bool,
    bracketed_paste_enabled: bool,
    cursor_hidden: bool,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested modes.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled. Failures after raw mode
    /// is on are cleaned up by `Drop`.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
            bracketed_paste_enabled: false,
            cursor_hidden: false,
        };

        let mut stdout = io::stdout();
        if options.alternate_screen {
            execute!(
                stdout,
                terminal::EnterAlternateScreen,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
            session.alternate_screen_enabled = true;
            tracing::info!("alternate screen enabled");
        }

        if options.bracketed_paste {
            execute!(stdout, event::EnableBracketedPaste)?;
            session.bracketed_paste_enabled = true;
        }

        execute!(stdout, cursor::Hide)?;
        session.cursor_hidden = true;

        Ok(session)
    }

    /// Current terminal size in columns and rows, never smaller than 2x2.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        let (w, h) = terminal::size()?;
        Ok((w.max(2), h.max(2)))
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        if self.bracketed_paste_enabled {
            let _ = execute!(stdout, event::DisableBracketedPaste);
            self.bracketed_paste_enabled = false;
        }

        if self.cursor_hidden {
            let _ = execute!(stdout, cursor::Show);
            self.cursor_hidden = false;
        }

        if self.alternate_screen_enabled {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::info!("alternate screen disabled");
        }

        let _ = terminal::disable_raw_mode();
        tracing::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, event::DisableBracketedPaste);
    let _ = execute!(stdout, cursor::Show);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}
