//! Application configuration constants.
//!
//! Server settings resolve with priority: config.toml > .env > default.
//! Study and quiz bounds are compile-time constants.

use serde::Deserialize;

// ==================== Server Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    port: Option<u16>,
}

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Load the server port with priority: config.toml > .env > default
pub fn load_server_port() -> u16 {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(port) = config.server.and_then(|s| s.port) {
                tracing::info!("Using port from config.toml: {}", port);
                return port;
            }
        }
    }

    // Priority 2: PORT env var
    if let Ok(raw) = std::env::var("PORT") {
        if let Ok(port) = raw.parse() {
            tracing::info!("Using port from PORT env: {}", port);
            return port;
        }
        tracing::warn!("Ignoring unparsable PORT value: {}", raw);
    }

    DEFAULT_PORT
}

/// Get the full server bind address
pub fn server_bind_addr(port: u16) -> String {
    format!("{}:{}", SERVER_ADDR, port)
}

// ==================== Study Configuration ====================

/// Words per session when the learner has not chosen otherwise
pub const DEFAULT_SESSION_SIZE: usize = 5;

/// Upper bound on a single session
pub const MAX_SESSION_SIZE: usize = 50;

// ==================== Quiz Configuration ====================

/// Questions per quiz when the request does not say
pub const DEFAULT_QUIZ_SIZE: usize = 10;

/// Upper bound on questions per quiz
pub const MAX_QUIZ_SIZE: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_format() {
        assert_eq!(server_bind_addr(3000), "0.0.0.0:3000");
    }

    #[test]
    fn test_session_bounds_sane() {
        assert!(DEFAULT_SESSION_SIZE >= 1);
        assert!(DEFAULT_SESSION_SIZE <= MAX_SESSION_SIZE);
        assert!(DEFAULT_QUIZ_SIZE <= MAX_QUIZ_SIZE);
    }
}
