use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::GridInt;

/// The terminal collaborator: raw-mode keyboard polling and positioned
/// character output over crossterm. Every call reports I/O failures to the
/// caller; the game treats them as fatal.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, cursor::Show)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Reads at most one pending key event without blocking. Returns None
    /// when no input is waiting, which is the common case.
    pub fn poll_input(&mut self) -> crossterm::Result<Option<KeyEvent>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn draw_char(&mut self, x: GridInt, y: GridInt, ch: char) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x as u16, y as u16), style::Print(ch))
    }

    pub fn draw_str(&mut self, x: GridInt, y: GridInt, text: &str) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(x as u16, y as u16), style::Print(text))
    }

    /// Commits everything queued since the last flush as one frame.
    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
