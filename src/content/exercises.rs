//! Exercise loading for the Practice Zone.
//!
//! Exercises live in static JSON files under the quizzes directory, each file
//! holding an array of exercise records. Loading is best-effort: a file that
//! cannot be read or parsed is logged and dropped, and the remaining files
//! still contribute, so the practice session degrades to fewer (possibly
//! zero) exercises instead of failing outright.

use std::fs;
use std::path::Path;

use crate::domain::ExerciseRecord;

/// Error loading an exercise file.
#[derive(Debug)]
pub enum ExerciseLoadError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ExerciseLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseLoadError::IoError(e) => write!(f, "IO error: {}", e),
            ExerciseLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ExerciseLoadError {}

/// Load all exercises from the quizzes directory into one flat ordered list.
///
/// Files are visited in filename order so the exercise sequence is stable
/// across restarts. A missing directory yields an empty list.
pub fn load_exercises(quizzes_dir: &Path) -> Vec<ExerciseRecord> {
    if !quizzes_dir.is_dir() {
        tracing::warn!("Quizzes directory {} not found", quizzes_dir.display());
        return Vec::new();
    }

    let entries = match fs::read_dir(quizzes_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", quizzes_dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();

    let mut exercises = Vec::new();
    for path in files {
        match load_exercise_file(&path) {
            Ok(records) => exercises.extend(records),
            Err(e) => {
                tracing::warn!("Failed to load exercises from {}: {}", path.display(), e);
            }
        }
    }

    exercises
}

/// Load exercises from a single JSON file.
///
/// The file must be a JSON array. Individual records are parsed defensively
/// by their `type` discriminator: a record with an unknown or malformed tag
/// is skipped, not fatal to the file.
pub fn load_exercise_file(path: &Path) -> Result<Vec<ExerciseRecord>, ExerciseLoadError> {
    let content =
        fs::read_to_string(path).map_err(|e| ExerciseLoadError::IoError(e.to_string()))?;

    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| ExerciseLoadError::ParseError(format!("{}: {}", path.display(), e)))?;

    let mut records = Vec::new();
    for value in raw {
        match serde_json::from_value::<ExerciseRecord>(value.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                let tag = value
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("<missing>");
                tracing::debug!(
                    "Skipping exercise record with type '{}' in {}: {}",
                    tag,
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_quiz(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory_yields_empty_list() {
        let exercises = load_exercises(Path::new("does/not/exist"));
        assert!(exercises.is_empty());
    }

    #[test]
    fn test_files_concatenate_in_filename_order() {
        let temp = tempfile::tempdir().unwrap();
        write_quiz(
            temp.path(),
            "b_second.json",
            r#"[{"type": "flashcard", "question": "q2", "tamil": "நாய்", "answer": "Dog"}]"#,
        );
        write_quiz(
            temp.path(),
            "a_first.json",
            r#"[{"type": "flashcard", "question": "q1", "tamil": "பூனை", "answer": "Cat"}]"#,
        );

        let exercises = load_exercises(temp.path());
        assert_eq!(exercises.len(), 2);
        match &exercises[0] {
            ExerciseRecord::Flashcard { question, .. } => assert_eq!(question, "q1"),
            other => panic!("Expected flashcard, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_bad_file_is_dropped_others_survive() {
        let temp = tempfile::tempdir().unwrap();
        write_quiz(temp.path(), "broken.json", "not json at all");
        write_quiz(
            temp.path(),
            "good.json",
            r#"[{"type": "drag-drop", "question": "match",
                 "pairs": [{"tamil": "பால்", "english": "Milk"}]}]"#,
        );

        let exercises = load_exercises(temp.path());
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].type_name(), "drag-drop");
    }

    #[test]
    fn test_unknown_type_tag_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        write_quiz(
            temp.path(),
            "mixed.json",
            r#"[
                {"type": "hologram", "question": "future content"},
                {"type": "multiple-choice", "question": "Pick one",
                 "options": ["Red", "Blue"], "correct": 1}
            ]"#,
        );

        let exercises = load_exercises(temp.path());
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].type_name(), "multiple-choice");
    }

    #[test]
    fn test_non_json_files_ignored() {
        let temp = tempfile::tempdir().unwrap();
        write_quiz(temp.path(), "notes.txt", "readme");
        write_quiz(
            temp.path(),
            "quiz.json",
            r#"[{"type": "flashcard", "question": "q", "tamil": "வீடு", "answer": "House"}]"#,
        );

        let exercises = load_exercises(temp.path());
        assert_eq!(exercises.len(), 1);
    }

    #[test]
    fn test_parse_confusions_record() {
        let temp = tempfile::tempdir().unwrap();
        write_quiz(
            temp.path(),
            "confusions.json",
            r#"[{
                "type": "custom-quiz-common-confusions",
                "data": [{
                    "pair": [
                        {"word": "பால்", "meaning": "Milk",
                         "sentence": "நான் பால் குடித்தேன்.",
                         "blankedSentence": "நான் ____ குடித்தேன்.",
                         "sentenceExplanationCorrect": "right",
                         "sentenceExplanationWrong": "wrong"},
                        {"word": "பல்", "meaning": "Tooth",
                         "sentence": "என் பல் வலிக்கிறது.",
                         "blankedSentence": "என் ____ வலிக்கிறது.",
                         "sentenceExplanationCorrect": "right",
                         "sentenceExplanationWrong": "wrong"}
                    ]
                }]
            }]"#,
        );

        let exercises = load_exercises(temp.path());
        assert_eq!(exercises.len(), 1);
        match &exercises[0] {
            ExerciseRecord::CommonConfusions { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].pair[0].word, "பால்");
                assert_eq!(data[0].pair[1].meaning, "Tooth");
            }
            other => panic!("Expected confusions quiz, got {}", other.type_name()),
        }
    }
}
