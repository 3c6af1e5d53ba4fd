use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mirror_kiosk::voice::{self, AudioCapture};
use mirror_kiosk::weather::WeatherProvider;
use mirror_kiosk::{
    Compositor, Config, GeminiClient, OpenWeather, RemoteRecognizer, Session, TerminalSurface,
    TextGenerator,
};

/// Mirror - voice-driven information kiosk
#[derive(Parser)]
#[command(name = "mirror", version, about)]
struct Cli {
    /// Path to the credential file (two lines: generation key, weather key)
    #[arg(short, long, env = "MIRROR_KEYS")]
    keys: Option<PathBuf>,

    /// Location for weather lookups
    #[arg(short, long, env = "MIRROR_LOCATION")]
    location: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Fetch the current temperature once and print it
    TestWeather,
    /// Issue one generation call and print the result
    TestGenerate {
        /// Prompt to send
        #[arg(default_value = "Say hello in one short sentence.")]
        prompt: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,mirror_kiosk=info",
        1 => "info,mirror_kiosk=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Command::TestMic { duration }) => test_mic(duration),
        Some(Command::TestWeather) => {
            let config = load_config(cli.keys.as_deref(), cli.location)?;
            test_weather(&config)
        }
        Some(Command::TestGenerate { prompt }) => {
            let config = load_config(cli.keys.as_deref(), cli.location)?;
            test_generate(&config, &prompt)
        }
        None => {
            let config = load_config(cli.keys.as_deref(), cli.location)?;
            run_kiosk(&config)
        }
    }
}

/// Load configuration, applying the CLI location override
fn load_config(keys: Option<&Path>, location: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load(keys)?;
    if let Some(location) = location {
        config.location = location;
    }
    Ok(config)
}

/// Run the kiosk loop until the exit keyword is spoken
fn run_kiosk(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        location = %config.location,
        exit_keyword = %config.exit_keyword,
        "starting mirror kiosk"
    );

    let speech = RemoteRecognizer::new(config.stt_url.clone(), config.stt_language.clone())?;
    let generator = GeminiClient::new(
        config.generation_url.clone(),
        config.keys.generation.clone(),
    );
    let weather = OpenWeather::new(
        config.weather_url.clone(),
        config.keys.weather.clone(),
        config.location.clone(),
    );

    let surface = TerminalSurface::new()?;
    let compositor = Compositor::new(surface, weather);

    let mut session = Session::new(speech, generator, compositor, &config.exit_keyword);
    session.run()?;

    Ok(())
}

/// Capture for a few seconds and report what the microphone heard
fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Recording for {duration} seconds...");

    let mut capture = AudioCapture::new()?;
    capture.start()?;
    std::thread::sleep(Duration::from_secs(duration));
    capture.stop();

    let samples = capture.take_buffer();
    let energy = voice::energy(&samples);

    println!("Captured {} samples, energy {energy:.4}", samples.len());
    if energy < 0.01 {
        println!("Very low energy - check the microphone");
    }

    Ok(())
}

fn test_weather(config: &Config) -> anyhow::Result<()> {
    let weather = OpenWeather::new(
        config.weather_url.clone(),
        config.keys.weather.clone(),
        config.location.clone(),
    );

    println!("{}: {}", config.location, weather.current_temperature());
    Ok(())
}

fn test_generate(config: &Config, prompt: &str) -> anyhow::Result<()> {
    let generator = GeminiClient::new(
        config.generation_url.clone(),
        config.keys.generation.clone(),
    );

    println!("{}", generator.generate(prompt));
    Ok(())
}
