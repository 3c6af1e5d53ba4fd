//! Display surface abstraction

use crate::Result;

/// A full-screen drawable region with text measurement and an atomic present
///
/// The compositor owns the surface exclusively and always rewrites it in
/// full before presenting, so no partial frame is ever visible.
pub trait DisplaySurface {
    /// Surface dimensions (columns, rows)
    fn size(&self) -> (u16, u16);

    /// Measure text width in the same unit as [`size`](Self::size) columns
    fn measure(&self, text: &str) -> u32;

    /// Clear the background
    ///
    /// # Errors
    ///
    /// Returns error if the surface rejects the command
    fn clear(&mut self) -> Result<()>;

    /// Draw a line of text at the given cell position
    ///
    /// # Errors
    ///
    /// Returns error if the surface rejects the command
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<()>;

    /// Atomically present everything drawn since the last present
    ///
    /// # Errors
    ///
    /// Returns error if the surface cannot be flushed
    fn present(&mut self) -> Result<()>;
}
