//! Display compositor
//!
//! Builds each frame from scratch (wrapped input, wrapped output, refreshed
//! ambient panel) and renders it in one atomic present. Composition order:
//! clear, input block from the top-left, output block below it, ambient
//! panel top-right last so long conversation text can never push it
//! off-screen.

use crate::Result;
use crate::display::{AmbientInfo, DisplayFrame, DisplaySurface};
use crate::layout;
use crate::weather::WeatherProvider;

/// Left margin for conversation text, in cells
const MARGIN_X: u16 = 2;

/// First conversation row
const TOP_Y: u16 = 1;

/// Rows per physical line
const LINE_HEIGHT: u16 = 1;

/// Gap between the input and output blocks, in rows
const BLOCK_GAP: u16 = 1;

/// Width reserved on the right for the ambient panel, in cells
const PANEL_WIDTH: u16 = 24;

/// Composes and presents display frames
pub struct Compositor<D, W> {
    surface: D,
    weather: W,
}

impl<D: DisplaySurface, W: WeatherProvider> Compositor<D, W> {
    /// Create a compositor that owns the surface exclusively
    pub const fn new(surface: D, weather: W) -> Self {
        Self { surface, weather }
    }

    /// Compose and atomically present a frame from logical text blocks
    ///
    /// # Errors
    ///
    /// Returns error if the surface rejects a draw or present
    pub fn present(&mut self, input: &[&str], output: &[&str]) -> Result<()> {
        let frame = self.compose(input, output);
        self.render(&frame)
    }

    /// Build a fresh frame: wrap both blocks and refresh the ambient panel
    /// (time recomputed, temperature refetched, no caching)
    pub fn compose(&self, input: &[&str], output: &[&str]) -> DisplayFrame {
        let (width, _) = self.surface.size();
        let max_width = u32::from(width.saturating_sub(PANEL_WIDTH + MARGIN_X));

        let surface = &self.surface;
        let measure = |s: &str| surface.measure(s);

        DisplayFrame {
            input_lines: layout::wrap_blocks(input, max_width, measure),
            output_lines: layout::wrap_blocks(output, max_width, measure),
            ambient: AmbientInfo::now(self.weather.current_temperature()),
        }
    }

    /// Render a frame onto the surface
    ///
    /// Lines whose row would fall past the bottom of the surface are
    /// silently dropped.
    fn render(&mut self, frame: &DisplayFrame) -> Result<()> {
        let (width, height) = self.surface.size();

        self.surface.clear()?;

        let mut y = TOP_Y;
        for line in &frame.input_lines {
            if y >= height {
                break;
            }
            self.surface.draw_text(MARGIN_X, y, line)?;
            y = y.saturating_add(LINE_HEIGHT);
        }

        // Output offset is the full input block height plus the gap, even
        // when the input block itself was truncated.
        let input_rows = u16::try_from(frame.input_lines.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(LINE_HEIGHT);
        let mut y = TOP_Y.saturating_add(input_rows).saturating_add(BLOCK_GAP);
        for line in &frame.output_lines {
            if y >= height {
                break;
            }
            self.surface.draw_text(MARGIN_X, y, line)?;
            y = y.saturating_add(LINE_HEIGHT);
        }

        let panel_x = width.saturating_sub(PANEL_WIDTH);
        self.surface.draw_text(panel_x, 0, &frame.ambient.date)?;
        self.surface.draw_text(panel_x, 1, &frame.ambient.time)?;
        self.surface.draw_text(panel_x, 2, &frame.ambient.temperature)?;

        self.surface.present()
    }
}
