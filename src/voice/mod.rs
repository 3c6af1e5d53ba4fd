//! Voice input module
//!
//! Microphone capture plus the speech adapter that turns one listen attempt
//! into an [`Utterance`].

mod capture;
mod stt;

pub use capture::{AudioCapture, SAMPLE_RATE, energy, samples_to_wav};
pub use stt::{CaptureOutcome, RemoteRecognizer, SpeechSource, Utterance};
