//! Mirror Kiosk - voice-driven information display
//!
//! Listens for spoken input, forwards it to a remote text-generation
//! service, summarizes the reply, and renders the conversation together with
//! an ambient clock/date/weather panel on a full-screen surface.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              Session State Machine               │
//! │  wait → listen → dispatch → summarize → display  │
//! └──────┬─────────────────┬────────────────┬────────┘
//!        │                 │                │
//! ┌──────▼──────┐   ┌──────▼──────┐  ┌──────▼───────┐
//! │   Speech    │   │ Generation  │  │  Compositor  │
//! │  (capture + │   │  (one POST  │  │ (layout +    │
//! │   STT call) │   │  per call)  │  │  ambient +   │
//! └─────────────┘   └─────────────┘  │  weather)    │
//!                                    └──────────────┘
//! ```
//!
//! Everything is single-threaded and synchronous; remote adapters convert
//! their failures into in-band sentinel strings so the state machine's
//! transition table stays total.

pub mod config;
pub mod display;
pub mod error;
pub mod generate;
pub mod layout;
pub mod session;
pub mod voice;
pub mod weather;

pub use config::{ApiKeys, Config};
pub use display::{AmbientInfo, Compositor, DisplayFrame, DisplaySurface, TerminalSurface};
pub use error::{Error, Result};
pub use generate::{GENERATION_ERROR, GeminiClient, TextGenerator};
pub use session::{ConversationTurn, Session, SessionState};
pub use voice::{CaptureOutcome, RemoteRecognizer, SpeechSource, Utterance};
pub use weather::{OpenWeather, WEATHER_UNAVAILABLE, WeatherProvider};
