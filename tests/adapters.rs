//! Remote adapter degradation tests
//!
//! Each test serves exactly one canned HTTP response from a loopback
//! listener and asserts that the adapter degrades to its sentinel value
//! instead of raising.

use std::io::{Read, Write};
use std::net::TcpListener;

use mirror_kiosk::weather::{OpenWeather, WEATHER_UNAVAILABLE, WeatherProvider};
use mirror_kiosk::{GENERATION_ERROR, GeminiClient, TextGenerator};

/// Serve one canned HTTP response on a fresh loopback port
///
/// Returns the base URL. The listener thread reads the request headers,
/// writes the response, and exits.
fn serve_once(status: &str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let status = status.to_string();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");

        // Drain the request headers before answering
        let mut buf = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(_) => break,
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}")
}

#[test]
fn test_weather_success_formats_temperature() {
    let url = serve_once("200 OK", r#"{"main":{"temp":28.37,"humidity":61}}"#);
    let weather = OpenWeather::new(url, "key".to_string(), "Hyderabad".to_string());

    assert_eq!(weather.current_temperature(), "28.4°C");
}

#[test]
fn test_weather_non_success_status_degrades() {
    let url = serve_once("401 Unauthorized", r#"{"cod":401,"message":"Invalid API key"}"#);
    let weather = OpenWeather::new(url, "bad-key".to_string(), "Hyderabad".to_string());

    assert_eq!(weather.current_temperature(), WEATHER_UNAVAILABLE);
}

#[test]
fn test_weather_malformed_body_degrades() {
    let url = serve_once("200 OK", "this is not json");
    let weather = OpenWeather::new(url, "key".to_string(), "Hyderabad".to_string());

    assert_eq!(weather.current_temperature(), WEATHER_UNAVAILABLE);
}

#[test]
fn test_weather_unreachable_endpoint_degrades() {
    // Bind then drop, so the port is closed when the adapter connects
    let closed = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        format!("http://{}", listener.local_addr().expect("local addr"))
    };
    let weather = OpenWeather::new(closed, "key".to_string(), "Hyderabad".to_string());

    assert_eq!(weather.current_temperature(), WEATHER_UNAVAILABLE);
}

#[test]
fn test_generation_success_extracts_text() {
    let url = serve_once(
        "200 OK",
        r#"{"candidates":[{"content":{"parts":[{"text":"Paris is the capital of France."}]}}]}"#,
    );
    let generator = GeminiClient::new(url, "key".to_string());

    assert_eq!(
        generator.generate("What is the capital of France?"),
        "Paris is the capital of France."
    );
}

#[test]
fn test_generation_malformed_body_degrades() {
    let url = serve_once("200 OK", r#"{"unexpected":"shape"}"#);
    let generator = GeminiClient::new(url, "key".to_string());

    assert_eq!(generator.generate("hello"), GENERATION_ERROR);
}

#[test]
fn test_generation_empty_candidates_degrades() {
    let url = serve_once("200 OK", r#"{"candidates":[]}"#);
    let generator = GeminiClient::new(url, "key".to_string());

    assert_eq!(generator.generate("hello"), GENERATION_ERROR);
}

#[test]
fn test_generation_non_success_status_degrades() {
    let url = serve_once("500 Internal Server Error", "{}");
    let generator = GeminiClient::new(url, "key".to_string());

    assert_eq!(generator.generate("hello"), GENERATION_ERROR);
}
