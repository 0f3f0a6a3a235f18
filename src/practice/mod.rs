pub mod confusions;
pub mod matching;
pub mod progress;
pub mod runner;

pub use confusions::{ConfusionQuiz, Feedback, QuizOption, Stage};
pub use matching::matching_is_correct;
pub use progress::{project_progress, LessonProgress};
pub use runner::PracticeSession;
