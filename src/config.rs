//! Application configuration constants.
//!
//! This module centralizes all configurable values so that timing,
//! scoring thresholds, and the learning path are defined in one place.

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
pub const SERVER_PORT: u16 = 3000;

/// Load server port with priority: config.toml > PORT env > default
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
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse() {
            tracing::info!("Using port from PORT env: {}", port);
            return port;
        }
    }

    SERVER_PORT
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, load_server_port())
}

// ==================== Session Configuration ====================

/// Practice session expiration time in hours
pub const SESSION_EXPIRY_HOURS: i64 = 12;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Name of the practice session cookie
pub const SESSION_COOKIE_NAME: &str = "thulir_session";

// ==================== Scoring Configuration ====================

/// Percentage of correct answers needed for three stars
pub const THREE_STAR_PERCENT: usize = 90;

/// Percentage of correct answers needed for two stars
pub const TWO_STAR_PERCENT: usize = 75;

/// Percentage of correct answers needed for one star
pub const ONE_STAR_PERCENT: usize = 50;

// ==================== Exercise Timing ====================

/// Countdown ticks before the Next button arms in the confusions quiz
pub const NEXT_COUNTDOWN_TICKS: u8 = 3;

/// Delay before auto-advancing from the meaning stage after a correct pick
pub const MEANING_ADVANCE_DELAY_MS: u32 = 1200;

/// How long multiple-choice feedback stays visible before advancing
pub const CHOICE_REVEAL_DELAY_MS: u32 = 2000;

/// How long matching feedback stays visible before advancing
pub const MATCH_REVEAL_DELAY_MS: u32 = 3000;

// ==================== Speech Configuration ====================

/// BCP 47 language tag for Tamil speech synthesis
pub const SPEECH_LANG: &str = "ta-IN";

/// Speech rate (slightly slower than normal for young learners)
pub const SPEECH_RATE: f32 = 0.95;

/// Speech pitch
pub const SPEECH_PITCH: f32 = 1.0;

// ==================== Learning Path ====================

/// Lesson information struct
pub struct LessonInfo {
    pub id: u8,
    pub title: &'static str,
}

/// Unit information struct
pub struct UnitInfo {
    pub id: u8,
    pub title: &'static str,
    pub lessons: &'static [LessonInfo],
}

/// All unit definitions for the Practice Zone sidebar
pub const UNITS: [UnitInfo; 1] = [UnitInfo {
    id: 1,
    title: "Similar Sounding Words",
    lessons: &[LessonInfo {
        id: 1,
        title: "Common Confusions",
    }],
}];

/// Get unit info by unit number
pub fn get_unit_info(unit: u8) -> Option<&'static UnitInfo> {
    UNITS.iter().find(|u| u.id == unit)
}
