//! Crossterm-backed full-screen terminal surface

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::Result;
use crate::display::DisplaySurface;

/// Full-screen terminal surface
///
/// Enters the alternate screen on creation and restores the terminal on
/// drop. Draw calls are queued; nothing reaches the screen until
/// [`present`](DisplaySurface::present) flushes the queue, which keeps each
/// frame atomic.
pub struct TerminalSurface {
    out: io::Stdout,
    size: (u16, u16),
}

impl TerminalSurface {
    /// Take over the terminal
    ///
    /// # Errors
    ///
    /// Returns error if the terminal cannot enter raw/alternate-screen mode
    pub fn new() -> Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        let size = crossterm::terminal::size()?;

        tracing::debug!(cols = size.0, rows = size.1, "terminal surface ready");
        Ok(Self { out, size })
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

impl DisplaySurface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn measure(&self, text: &str) -> u32 {
        // One cell per character
        u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        queue!(self.out, MoveTo(x, y), Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
