//! Exercise record types shared by the loader and the practice handlers.
//!
//! Exercises are data-defined content for the Practice Zone. Each record
//! carries a `type` discriminator string; records with an unknown tag are
//! skipped by the loader rather than failing the whole file.

use serde::{Deserialize, Serialize};

/// One Tamil/English pair for the matching exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub tamil: String,
    pub english: String,
}

/// One word of a confusable pair, with the material quizzed in both stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPair {
    pub word: String,
    /// Inflected form used in the blanked sentence, when it differs from `word`
    #[serde(default)]
    pub word_in_sentence: Option<String>,
    /// English meaning shown in the meaning stage
    pub meaning: String,
    /// Full example sentence (also fed to speech playback)
    pub sentence: String,
    /// Example sentence with the word blanked out
    pub blanked_sentence: String,
    /// Explanation shown after a correct sentence pick
    pub sentence_explanation_correct: String,
    /// Explanation shown after a wrong sentence pick
    pub sentence_explanation_wrong: String,
}

impl WordPair {
    /// The form of the word that fills the blanked sentence.
    pub fn sentence_form(&self) -> &str {
        self.word_in_sentence.as_deref().unwrap_or(&self.word)
    }
}

/// Two words frequently mistaken for each other, quizzed together in two stages.
///
/// Invariant: exactly two words per pair, compared against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionPair {
    pub pair: [WordPair; 2],
}

/// A single practice exercise, discriminated by its `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExerciseRecord {
    #[serde(rename = "flashcard")]
    Flashcard {
        question: String,
        tamil: String,
        answer: String,
        #[serde(default)]
        pronunciation: String,
    },
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        question: String,
        options: Vec<String>,
        /// Index into `options` of the correct answer
        correct: usize,
        #[serde(default)]
        tamil: String,
    },
    #[serde(rename = "drag-drop")]
    DragDrop {
        question: String,
        pairs: Vec<MatchPair>,
    },
    #[serde(rename = "custom-quiz-common-confusions")]
    CommonConfusions { data: Vec<ConfusionPair> },
}

impl ExerciseRecord {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Flashcard { .. } => "flashcard",
            Self::MultipleChoice { .. } => "multiple-choice",
            Self::DragDrop { .. } => "drag-drop",
            Self::CommonConfusions { .. } => "custom-quiz-common-confusions",
        }
    }
}
