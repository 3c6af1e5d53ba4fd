//! Renderable frame snapshot
//!
//! A [`DisplayFrame`] is rebuilt from scratch on every state transition and
//! fully replaces the previous frame; nothing is mutated in place or diffed.

/// Ambient panel data: clock, date, and temperature
#[derive(Debug, Clone)]
pub struct AmbientInfo {
    /// Local date, e.g. "23 Aug 2026"
    pub date: String,

    /// Local time, e.g. "14:05:09"
    pub time: String,

    /// Temperature string or the weather sentinel
    pub temperature: String,
}

impl AmbientInfo {
    /// Build panel data for the current local time
    #[must_use]
    pub fn now(temperature: String) -> Self {
        let now = chrono::Local::now();
        Self {
            date: now.format("%d %b %Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            temperature,
        }
    }
}

/// One renderable snapshot of the display
#[derive(Debug, Clone)]
pub struct DisplayFrame {
    /// Wrapped input (query) lines, top block
    pub input_lines: Vec<String>,

    /// Wrapped output (response) lines, below the input block
    pub output_lines: Vec<String>,

    /// Ambient panel contents
    pub ambient: AmbientInfo,
}
