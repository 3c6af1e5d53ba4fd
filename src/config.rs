//! Configuration for the mirror kiosk
//!
//! Everything process-wide (credentials, endpoints, location) is gathered
//! once at startup into an immutable [`Config`] and passed explicitly into
//! the components that need it.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default generation endpoint (Gemini 2.0 Flash `generateContent`)
const DEFAULT_GENERATION_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Default weather endpoint (OpenWeatherMap current weather)
const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Default transcription endpoint (local Whisper-compatible server)
const DEFAULT_STT_URL: &str = "http://127.0.0.1:8799/transcribe";

/// Kiosk configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API keys loaded from the credential file
    pub keys: ApiKeys,

    /// Location for weather lookups
    pub location: String,

    /// Spoken keyword that terminates the session loop
    pub exit_keyword: String,

    /// Text-generation endpoint (key appended as a query parameter)
    pub generation_url: String,

    /// Weather endpoint
    pub weather_url: String,

    /// Transcription endpoint
    pub stt_url: String,

    /// Recognition locale passed to the transcription service
    pub stt_language: String,
}

/// API keys for external services
#[derive(Debug, Clone)]
pub struct ApiKeys {
    /// Text-generation service key
    pub generation: String,

    /// Weather service key
    pub weather: String,
}

impl Config {
    /// Load configuration from a credential file plus environment overrides
    ///
    /// The credential file holds two non-empty lines: the generation-service
    /// key and the weather-service key. When `keys_path` is `None`, the file
    /// is searched at `./api_key.txt` and then under the XDG config
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns error if the credential file is missing or malformed. A
    /// missing credential source is fatal: the kiosk refuses to start.
    pub fn load(keys_path: Option<&Path>) -> Result<Self> {
        let path = match keys_path {
            Some(p) => p.to_path_buf(),
            None => Self::find_credential_file()?,
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!(
                "cannot read credential file {}: {e}",
                path.display()
            ))
        })?;
        let keys = Self::parse_credentials(&content)?;

        tracing::info!(path = %path.display(), "loaded credentials");

        let location =
            std::env::var("MIRROR_LOCATION").unwrap_or_else(|_| "Hyderabad".to_string());
        let exit_keyword =
            std::env::var("MIRROR_EXIT_WORD").unwrap_or_else(|_| "exit".to_string());
        let generation_url = std::env::var("MIRROR_GENERATION_URL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_URL.to_string());
        let weather_url = std::env::var("MIRROR_WEATHER_URL")
            .unwrap_or_else(|_| DEFAULT_WEATHER_URL.to_string());
        let stt_url =
            std::env::var("MIRROR_STT_URL").unwrap_or_else(|_| DEFAULT_STT_URL.to_string());
        let stt_language =
            std::env::var("MIRROR_STT_LANGUAGE").unwrap_or_else(|_| "en-IN".to_string());

        Ok(Self {
            keys,
            location,
            exit_keyword,
            generation_url,
            weather_url,
            stt_url,
            stt_language,
        })
    }

    /// Parse the two-line credential file format
    fn parse_credentials(content: &str) -> Result<ApiKeys> {
        let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());

        let generation = lines
            .next()
            .ok_or_else(|| Error::Config("credential file is empty".to_string()))?
            .to_string();
        let weather = lines
            .next()
            .ok_or_else(|| {
                Error::Config("credential file is missing the weather key".to_string())
            })?
            .to_string();

        Ok(ApiKeys { generation, weather })
    }

    /// Locate the credential file in standard locations
    fn find_credential_file() -> Result<PathBuf> {
        let local = PathBuf::from("api_key.txt");
        if local.exists() {
            return Ok(local);
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "mirror", "mirror-kiosk") {
            let xdg = dirs.config_dir().join("api_key.txt");
            if xdg.exists() {
                return Ok(xdg);
            }
        }

        Err(Error::Config(
            "api_key.txt not found (looked in the working directory and the config directory)"
                .to_string(),
        ))
    }
}
