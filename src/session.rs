//! Simple in-memory session storage for practice sessions.
//!
//! Stores practice state keyed by session ID (from cookie).
//! Sessions auto-expire after a configurable duration of inactivity.

use crate::config;
use crate::practice::{ConfusionQuiz, PracticeSession};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Everything one visitor's practice run needs between requests.
#[derive(Debug, Clone)]
pub struct PracticeState {
    pub session: PracticeSession,
    /// Live confusions quiz, present only while one is on screen
    pub confusions: Option<ConfusionQuiz>,
}

impl PracticeState {
    pub fn new(total: usize) -> Self {
        Self {
            session: PracticeSession::new(total),
            confusions: None,
        }
    }
}

/// Session entry with last access time for expiration
struct SessionEntry {
    state: PracticeState,
    last_access: DateTime<Utc>,
}

/// Global session store
static SESSIONS: LazyLock<Mutex<HashMap<String, SessionEntry>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Get or create practice state for the given session ID.
///
/// A fresh session starts at exercise zero with a zero score.
pub fn get_state(session_id: &str, total_exercises: usize) -> PracticeState {
    let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
        cleanup_expired(&mut sessions);
    }

    if let Some(entry) = sessions.get_mut(session_id) {
        entry.last_access = Utc::now();
        entry.state.clone()
    } else {
        let state = PracticeState::new(total_exercises);
        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                state: state.clone(),
                last_access: Utc::now(),
            },
        );
        state
    }
}

/// Write back practice state after a handler mutated it
pub fn update_state(session_id: &str, state: PracticeState) {
    let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");
    sessions.insert(
        session_id.to_string(),
        SessionEntry {
            state,
            last_access: Utc::now(),
        },
    );
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
    let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
    sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..32)
        .map(|_| {
            let idx = rng.random_range(0..36);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'a' + idx - 10) as char
            }
        })
        .collect()
}
