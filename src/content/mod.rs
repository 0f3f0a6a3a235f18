pub mod exercises;
pub mod vocabulary;

pub use exercises::load_exercises;
pub use vocabulary::{filter_words, load_vocabulary, themes, Theme, VocabularyWord};
