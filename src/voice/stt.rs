//! Speech capture and transcription
//!
//! The speech adapter never surfaces an error to the session loop: silence,
//! unrecognized audio, and transport failures all map to an in-band
//! [`CaptureOutcome`] so the listen-retry path is the same for every one of
//! them.

use std::time::{Duration, Instant};

use crate::voice::capture::{self, AudioCapture, ENERGY_THRESHOLD, SAMPLE_RATE};
use crate::{Error, Result};

/// Poll interval for draining the capture buffer
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Trailing silence that ends a phrase
const SILENCE_HOLD: Duration = Duration::from_millis(500);

/// How one listen attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Speech was captured and recognized
    Success,
    /// No speech onset before the listen timeout
    Timeout,
    /// Audio was captured but nothing was recognized
    Unrecognized,
    /// The recognition service was unreachable or returned garbage
    ServiceError,
}

/// Raw recognized text from one listen attempt
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Recognized text; empty for every non-success outcome
    pub text: String,

    /// Capture outcome tag
    pub outcome: CaptureOutcome,
}

impl Utterance {
    /// A successfully recognized utterance
    #[must_use]
    pub const fn success(text: String) -> Self {
        Self {
            text,
            outcome: CaptureOutcome::Success,
        }
    }

    /// No speech onset before the timeout
    #[must_use]
    pub const fn timeout() -> Self {
        Self {
            text: String::new(),
            outcome: CaptureOutcome::Timeout,
        }
    }

    /// Captured audio produced no transcript
    #[must_use]
    pub const fn unrecognized() -> Self {
        Self {
            text: String::new(),
            outcome: CaptureOutcome::Unrecognized,
        }
    }

    /// Recognition service failure, mapped in-band for the retry path
    #[must_use]
    pub const fn service_error() -> Self {
        Self {
            text: String::new(),
            outcome: CaptureOutcome::ServiceError,
        }
    }

    /// Whether this attempt yielded usable text
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.outcome == CaptureOutcome::Success && !self.text.trim().is_empty()
    }
}

/// Source of recognized speech, one blocking attempt at a time
pub trait SpeechSource {
    /// Block up to `timeout` for speech onset and up to `phrase_limit` of
    /// capture after onset, returning the recognition outcome in-band
    fn transcribe(&mut self, timeout: Duration, phrase_limit: Duration) -> Utterance;
}

/// Response from the transcription server
#[derive(serde::Deserialize)]
struct TranscriptResponse {
    text: String,
}

/// Recognizes speech by capturing a phrase and posting it to an HTTP
/// transcription endpoint
pub struct RemoteRecognizer {
    capture: AudioCapture,
    client: reqwest::blocking::Client,
    url: String,
    language: String,
}

impl RemoteRecognizer {
    /// Create a recognizer for the given transcription endpoint and locale
    ///
    /// # Errors
    ///
    /// Returns error if the microphone cannot be opened
    pub fn new(url: String, language: String) -> Result<Self> {
        Ok(Self {
            capture: AudioCapture::new()?,
            client: reqwest::blocking::Client::new(),
            url,
            language,
        })
    }

    /// Capture one phrase: wait for onset, then record until sustained
    /// silence or the phrase limit. `None` means no onset before `timeout`.
    fn capture_phrase(
        &mut self,
        timeout: Duration,
        phrase_limit: Duration,
    ) -> Result<Option<Vec<f32>>> {
        self.capture.clear_buffer();
        self.capture.start()?;
        let phrase = self.capture_loop(timeout, phrase_limit);
        self.capture.stop();
        phrase
    }

    fn capture_loop(&self, timeout: Duration, phrase_limit: Duration) -> Result<Option<Vec<f32>>> {
        let onset_deadline = Instant::now() + timeout;

        let mut samples = loop {
            std::thread::sleep(POLL_INTERVAL);
            let chunk = self.capture.take_buffer();
            if capture::energy(&chunk) > ENERGY_THRESHOLD {
                tracing::trace!(samples = chunk.len(), "speech onset");
                break chunk;
            }
            if Instant::now() >= onset_deadline {
                return Ok(None);
            }
        };

        let phrase_deadline = Instant::now() + phrase_limit;
        let mut silence = Duration::ZERO;

        loop {
            std::thread::sleep(POLL_INTERVAL);
            let chunk = self.capture.take_buffer();
            if capture::energy(&chunk) > ENERGY_THRESHOLD {
                silence = Duration::ZERO;
            } else {
                silence += POLL_INTERVAL;
            }
            samples.extend_from_slice(&chunk);

            if silence >= SILENCE_HOLD || Instant::now() >= phrase_deadline {
                break;
            }
        }

        tracing::debug!(samples = samples.len(), "phrase captured");
        Ok(Some(samples))
    }

    /// Post WAV audio to the transcription endpoint
    fn recognize(&self, samples: &[f32]) -> Result<String> {
        let wav = capture::samples_to_wav(samples, SAMPLE_RATE)?;

        let url = format!(
            "{}?language={}",
            self.url,
            urlencoding::encode(&self.language)
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "audio/wav")
            .body(wav)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Stt(format!("transcription error {status}: {body}")));
        }

        let result: TranscriptResponse = response.json()?;
        Ok(result.text)
    }
}

impl SpeechSource for RemoteRecognizer {
    fn transcribe(&mut self, timeout: Duration, phrase_limit: Duration) -> Utterance {
        let samples = match self.capture_phrase(timeout, phrase_limit) {
            Ok(Some(samples)) => samples,
            Ok(None) => {
                tracing::debug!("listen timed out without speech");
                return Utterance::timeout();
            }
            Err(e) => {
                tracing::warn!(error = %e, "capture failed");
                return Utterance::service_error();
            }
        };

        match self.recognize(&samples) {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(transcript = %text, "speech recognized");
                Utterance::success(text.trim().to_string())
            }
            Ok(_) => {
                tracing::debug!("no speech recognized in captured phrase");
                Utterance::unrecognized()
            }
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed");
                Utterance::service_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_outcomes_carry_empty_text() {
        assert!(Utterance::timeout().text.is_empty());
        assert!(Utterance::unrecognized().text.is_empty());
        assert!(Utterance::service_error().text.is_empty());
    }

    #[test]
    fn recognized_requires_success_and_text() {
        assert!(Utterance::success("hello".to_string()).is_recognized());
        assert!(!Utterance::success("   ".to_string()).is_recognized());
        assert!(!Utterance::timeout().is_recognized());
    }
}
