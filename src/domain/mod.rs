pub mod exercise;

pub use exercise::{ConfusionPair, ExerciseRecord, MatchPair, WordPair};
