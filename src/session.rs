//! Session state machine
//!
//! Drives one voice-interaction cycle at a time: wait, listen (retrying on
//! silence), dispatch the query, summarize the reply, display, cool down,
//! repeat. The loop is single-threaded and fully synchronous; each remote
//! call blocks the one thread of control. Adapter failures never block a
//! transition: every degraded outcome is a displayable string and the loop
//! continues. The only way out is the spoken exit keyword.

use std::time::Duration;

use crate::Result;
use crate::display::{Compositor, DisplaySurface};
use crate::generate::TextGenerator;
use crate::voice::SpeechSource;
use crate::weather::WeatherProvider;

/// Maximum wait for speech onset per listen attempt
const LISTEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum capture duration per phrase
const PHRASE_LIMIT: Duration = Duration::from_secs(10);

/// Pause before re-listening after a failed attempt
const RETRY_PAUSE: Duration = Duration::from_secs(2);

/// Pause after displaying a result, so the user can read it
const COOLDOWN: Duration = Duration::from_secs(5);

/// Prompt shown while waiting for input
const PROMPT_WAITING: &str = "Waiting for your voice input...";

/// Prompt shown after a failed listen attempt
const PROMPT_RETRY: &str = "Couldn't hear anything. Try again.";

/// Label above the recognized query
const LABEL_QUERY: &str = "You said:";

/// Label above the summarized response
const LABEL_RESPONSE: &str = "Assistant:";

/// State of the session loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Rendering the prompt frame before listening
    AwaitingInput,
    /// Blocking on a listen attempt (self-loops on silence)
    Listening,
    /// Showing the query and issuing the full generation call
    Dispatching,
    /// Issuing the summary generation call
    Summarizing,
    /// Presenting the finished turn
    Displaying,
    /// Letting the user read the result
    CoolingDown,
    /// Terminal state, reached only via the exit keyword
    Exiting,
}

/// One exchange, alive for a single display cycle
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    /// Recognized query text
    pub query: String,

    /// Full generation response
    pub response: String,

    /// Summarized response shown on screen
    pub summary: String,
}

impl ConversationTurn {
    fn new(query: String) -> Self {
        Self {
            query,
            response: String::new(),
            summary: String::new(),
        }
    }
}

/// The session loop: speech in, generation out, frames on screen
pub struct Session<S, G, D, W> {
    speech: S,
    generator: G,
    compositor: Compositor<D, W>,
    exit_keyword: String,
    state: SessionState,
    turn: Option<ConversationTurn>,
}

impl<S, G, D, W> Session<S, G, D, W>
where
    S: SpeechSource,
    G: TextGenerator,
    D: DisplaySurface,
    W: WeatherProvider,
{
    /// Create a session in the `AwaitingInput` state
    pub fn new(speech: S, generator: G, compositor: Compositor<D, W>, exit_keyword: &str) -> Self {
        Self {
            speech,
            generator,
            compositor,
            exit_keyword: exit_keyword.to_lowercase(),
            state: SessionState::AwaitingInput,
            turn: None,
        }
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Run the loop until the exit keyword is spoken
    ///
    /// # Errors
    ///
    /// Returns error only if the display surface fails; remote-call failures
    /// degrade in-band and never stop the loop
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(exit_keyword = %self.exit_keyword, "session loop started");

        while self.state != SessionState::Exiting {
            if let Some(pause) = self.tick()? {
                std::thread::sleep(pause);
            }
        }

        tracing::info!("session loop exited");
        Ok(())
    }

    /// Advance the machine by exactly one transition
    ///
    /// Returns a pause the driver must honor before the next tick, when the
    /// entered state calls for one.
    ///
    /// # Errors
    ///
    /// Returns error if the display surface fails
    pub fn tick(&mut self) -> Result<Option<Duration>> {
        match self.state {
            SessionState::AwaitingInput => {
                self.compositor.present(&[PROMPT_WAITING], &[])?;
                self.state = SessionState::Listening;
                Ok(None)
            }
            SessionState::Listening => self.listen(),
            SessionState::Dispatching => self.dispatch(),
            SessionState::Summarizing => self.summarize(),
            SessionState::Displaying => self.display(),
            SessionState::CoolingDown => {
                // The turn is discarded here; no history survives the cycle.
                self.turn = None;
                self.state = SessionState::AwaitingInput;
                Ok(Some(COOLDOWN))
            }
            SessionState::Exiting => Ok(None),
        }
    }

    fn listen(&mut self) -> Result<Option<Duration>> {
        let utterance = self.speech.transcribe(LISTEN_TIMEOUT, PHRASE_LIMIT);

        if !utterance.is_recognized() {
            tracing::debug!(outcome = ?utterance.outcome, "nothing recognized, retrying");
            self.compositor.present(&[PROMPT_RETRY], &[])?;
            return Ok(Some(RETRY_PAUSE));
        }

        let query = utterance.text;
        if query.to_lowercase().contains(self.exit_keyword.as_str()) {
            tracing::info!(query = %query, "exit keyword spoken");
            self.state = SessionState::Exiting;
            return Ok(None);
        }

        self.turn = Some(ConversationTurn::new(query));
        self.state = SessionState::Dispatching;
        Ok(None)
    }

    fn dispatch(&mut self) -> Result<Option<Duration>> {
        let Some(query) = self.turn.as_ref().map(|t| t.query.clone()) else {
            return self.recover_lost_turn();
        };

        self.compositor.present(&[LABEL_QUERY, &query], &[])?;

        let response = self.generator.generate(&query);
        tracing::debug!(chars = response.len(), "full response received");
        if let Some(turn) = self.turn.as_mut() {
            turn.response = response;
        }

        self.state = SessionState::Summarizing;
        Ok(None)
    }

    fn summarize(&mut self) -> Result<Option<Duration>> {
        let Some(response) = self.turn.as_ref().map(|t| t.response.clone()) else {
            return self.recover_lost_turn();
        };

        // The generation error sentinel is summarized like any other
        // response text, so degradation stays visible on screen.
        let summary = self.generator.generate(&summary_prompt(&response));
        if let Some(turn) = self.turn.as_mut() {
            turn.summary = summary;
        }

        self.state = SessionState::Displaying;
        Ok(None)
    }

    fn display(&mut self) -> Result<Option<Duration>> {
        let Some((query, summary)) = self
            .turn
            .as_ref()
            .map(|t| (t.query.clone(), t.summary.clone()))
        else {
            return self.recover_lost_turn();
        };

        self.compositor
            .present(&[LABEL_QUERY, &query], &[LABEL_RESPONSE, &summary])?;

        self.state = SessionState::CoolingDown;
        Ok(None)
    }

    /// A turn-bearing state without a turn means a bug somewhere upstream;
    /// log it and restart the cycle rather than wedging the kiosk.
    fn recover_lost_turn(&mut self) -> Result<Option<Duration>> {
        tracing::error!(state = ?self.state, "no conversation turn in flight, restarting cycle");
        self.turn = None;
        self.state = SessionState::AwaitingInput;
        Ok(None)
    }
}

/// Instruction template for the second, dependent generation call
fn summary_prompt(text: &str) -> String {
    format!("Summarize the following in 2-3 sentences:\n\n{text}")
}
