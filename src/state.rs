//! Application state shared across handlers.

use std::sync::Arc;

use crate::content::VocabularyWord;
use crate::domain::ExerciseRecord;

/// Application state passed to all handlers.
///
/// Content is loaded once at startup and never mutated afterwards, so the
/// handlers share it through cheap Arc clones.
#[derive(Clone)]
pub struct AppState {
    /// Practice exercises in presentation order
    pub exercises: Arc<Vec<ExerciseRecord>>,

    /// Vocabulary word list for the browser
    pub vocabulary: Arc<Vec<VocabularyWord>>,
}

impl AppState {
    pub fn new(exercises: Vec<ExerciseRecord>, vocabulary: Vec<VocabularyWord>) -> Self {
        Self {
            exercises: Arc::new(exercises),
            vocabulary: Arc::new(vocabulary),
        }
    }
}
