//! Shared test doubles for the session and compositor tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use mirror_kiosk::{
    DisplaySurface, Result, SpeechSource, TextGenerator, Utterance, WeatherProvider,
};

/// Speech source that replays a scripted sequence of utterances
///
/// Clones share the script and the attempt counter, so a test can keep a
/// handle after moving one clone into the session.
#[derive(Clone)]
pub struct ScriptedSpeech {
    script: Rc<RefCell<VecDeque<Utterance>>>,
    attempts: Rc<RefCell<usize>>,
}

impl ScriptedSpeech {
    #[must_use]
    pub fn new(script: Vec<Utterance>) -> Self {
        Self {
            script: Rc::new(RefCell::new(script.into())),
            attempts: Rc::new(RefCell::new(0)),
        }
    }

    /// Number of transcribe calls made so far
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.borrow()
    }
}

impl SpeechSource for ScriptedSpeech {
    fn transcribe(&mut self, _timeout: Duration, _phrase_limit: Duration) -> Utterance {
        *self.attempts.borrow_mut() += 1;
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(Utterance::timeout)
    }
}

/// Generator that records prompts and replays canned responses
#[derive(Clone)]
pub struct RecordingGenerator {
    prompts: Rc<RefCell<Vec<String>>>,
    responses: Rc<RefCell<VecDeque<String>>>,
}

impl RecordingGenerator {
    #[must_use]
    pub fn with_responses(responses: &[&str]) -> Self {
        Self {
            prompts: Rc::new(RefCell::new(Vec::new())),
            responses: Rc::new(RefCell::new(
                responses.iter().map(ToString::to_string).collect(),
            )),
        }
    }

    /// Prompts received so far, in call order
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    /// Number of generation calls made so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl TextGenerator for RecordingGenerator {
    fn generate(&self, prompt: &str) -> String {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

/// Weather provider that always returns the same temperature string
#[derive(Clone)]
pub struct FixedWeather {
    temperature: String,
}

impl FixedWeather {
    #[must_use]
    pub fn new(temperature: &str) -> Self {
        Self {
            temperature: temperature.to_string(),
        }
    }
}

impl WeatherProvider for FixedWeather {
    fn current_temperature(&self) -> String {
        self.temperature.clone()
    }
}

/// Display surface that records every presented frame
///
/// Measurement is one unit per character. Draws accumulate until `present`,
/// which snapshots them as one frame; `clear` starts the next frame empty.
#[derive(Clone)]
pub struct RecordingSurface {
    size: (u16, u16),
    pending: Rc<RefCell<Vec<(u16, u16, String)>>>,
    frames: Rc<RefCell<Vec<Vec<(u16, u16, String)>>>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: (cols, rows),
            pending: Rc::new(RefCell::new(Vec::new())),
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// All presented frames so far
    #[must_use]
    pub fn frames(&self) -> Vec<Vec<(u16, u16, String)>> {
        self.frames.borrow().clone()
    }

    /// Text of the most recently presented frame, one drawn string per line
    #[must_use]
    pub fn last_frame_text(&self) -> String {
        self.frames
            .borrow()
            .last()
            .map(|frame| {
                frame
                    .iter()
                    .map(|(_, _, text)| text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

impl DisplaySurface for RecordingSurface {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn measure(&self, text: &str) -> u32 {
        u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
    }

    fn clear(&mut self) -> Result<()> {
        self.pending.borrow_mut().clear();
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.pending.borrow_mut().push((x, y, text.to_string()));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let frame = self.pending.borrow().clone();
        self.frames.borrow_mut().push(frame);
        Ok(())
    }
}
