//! Vocabulary word list for the Vocabulary Explorer.
//!
//! Words come from a static JSON file under the data directory, with a
//! built-in seed list as fallback so a fresh checkout works out of the box.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// A vocabulary word with display metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: u32,
    pub tamil: String,
    pub english: String,
    pub pronunciation: String,
    #[serde(default)]
    pub image: String,
    pub theme: String,
}

/// A theme filter chip with its word count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Load the vocabulary list from the data file, falling back to the
/// built-in seed words when the file is missing or malformed.
pub fn load_vocabulary(path: &Path) -> Vec<VocabularyWord> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}; using seed words", path.display(), e);
                seed_words()
            }
        },
        Err(_) => {
            tracing::info!("No vocabulary file at {}; using seed words", path.display());
            seed_words()
        }
    }
}

/// Build theme chips ("All Words" first, then themes in order of appearance).
pub fn themes(words: &[VocabularyWord]) -> Vec<Theme> {
    let mut chips = vec![Theme {
        id: "all".to_string(),
        name: "All Words".to_string(),
        count: words.len(),
    }];

    for word in words {
        if let Some(chip) = chips.iter_mut().find(|t| t.id == word.theme) {
            chip.count += 1;
        } else {
            chips.push(Theme {
                id: word.theme.clone(),
                name: title_case(&word.theme),
                count: 1,
            });
        }
    }

    chips
}

/// Filter words by theme and search term.
///
/// The search matches against the Tamil text, the English translation, and
/// the romanized pronunciation, case-insensitively. Both sides are
/// NFC-normalized so composed and decomposed Tamil input compare equal.
pub fn filter_words<'a>(
    words: &'a [VocabularyWord],
    theme: &str,
    query: &str,
) -> Vec<&'a VocabularyWord> {
    let needle = normalize(query);

    words
        .iter()
        .filter(|w| theme == "all" || w.theme == theme)
        .filter(|w| {
            needle.is_empty()
                || normalize(&w.tamil).contains(&needle)
                || normalize(&w.english).contains(&needle)
                || normalize(&w.pronunciation).contains(&needle)
        })
        .collect()
}

fn normalize(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Built-in starter vocabulary
fn seed_words() -> Vec<VocabularyWord> {
    let entries = [
        ("அம்மா", "Mother", "Amma", "family"),
        ("அப்பா", "Father", "Appa", "family"),
        ("சிவப்பு", "Red", "Sivappu", "colors"),
        ("நீலம்", "Blue", "Neelam", "colors"),
        ("மஞ்சள்", "Yellow", "Manjal", "colors"),
        ("பூனை", "Cat", "Poonai", "animals"),
        ("நாய்", "Dog", "Naai", "animals"),
        ("பால்", "Milk", "Paal", "food"),
        ("சாதம்", "Rice", "Saatham", "food"),
        ("வீடு", "House", "Veedu", "places"),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(i, (tamil, english, pronunciation, theme))| VocabularyWord {
            id: i as u32 + 1,
            tamil: tamil.to_string(),
            english: english.to_string(),
            pronunciation: pronunciation.to_string(),
            image: String::new(),
            theme: theme.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_words_cover_all_themes() {
        let words = seed_words();
        let chips = themes(&words);

        assert_eq!(chips[0].id, "all");
        assert_eq!(chips[0].count, words.len());

        let colors = chips.iter().find(|t| t.id == "colors").unwrap();
        assert_eq!(colors.name, "Colors");
        assert_eq!(colors.count, 3);
    }

    #[test]
    fn test_filter_by_theme() {
        let words = seed_words();
        let animals = filter_words(&words, "animals", "");
        assert_eq!(animals.len(), 2);
        assert!(animals.iter().all(|w| w.theme == "animals"));
    }

    #[test]
    fn test_search_matches_all_text_fields() {
        let words = seed_words();

        // English, case-insensitive
        assert_eq!(filter_words(&words, "all", "mother").len(), 1);
        // Pronunciation
        assert_eq!(filter_words(&words, "all", "poonai").len(), 1);
        // Tamil text
        assert_eq!(filter_words(&words, "all", "பால்").len(), 1);
        // No match
        assert!(filter_words(&words, "all", "zebra").is_empty());
    }

    #[test]
    fn test_search_combined_with_theme() {
        let words = seed_words();
        // "Paal" is food; searching it under animals finds nothing
        assert!(filter_words(&words, "animals", "paal").is_empty());
        assert_eq!(filter_words(&words, "food", "paal").len(), 1);
    }

    #[test]
    fn test_load_falls_back_to_seed_on_missing_file() {
        let words = load_vocabulary(Path::new("does/not/exist.json"));
        assert_eq!(words.len(), seed_words().len());
    }

    #[test]
    fn test_load_reads_data_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("vocabulary.json");
        fs::write(
            &path,
            r#"[{"id": 1, "tamil": "மரம்", "english": "Tree",
                 "pronunciation": "Maram", "theme": "nature"}]"#,
        )
        .unwrap();

        let words = load_vocabulary(&path);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].english, "Tree");
    }
}
