//! Display module
//!
//! Frame data model, the surface abstraction, the compositor, and the
//! terminal-backed surface implementation.

mod compositor;
mod frame;
mod surface;
mod terminal;

pub use compositor::Compositor;
pub use frame::{AmbientInfo, DisplayFrame};
pub use surface::DisplaySurface;
pub use terminal::TerminalSurface;
