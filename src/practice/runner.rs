//! Practice session controller.
//!
//! Tracks where the learner is in the exercise sequence and how many
//! exercises they answered correctly. The session is process-local and
//! lives in the in-memory session store; nothing persists across restarts.

/// State of one run through the exercise sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    /// Number of exercises in the sequence (fixed at session start)
    total: usize,
    current_index: usize,
    score: usize,
    completed: bool,
    /// Lesson progress pushed by a quiz component, clamped to 0..=100
    pushed_progress: Option<u8>,
}

impl PracticeSession {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current_index: 0,
            score: 0,
            completed: false,
            pushed_progress: None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn pushed_progress(&self) -> Option<u8> {
        self.pushed_progress
    }

    /// Record the outcome of the current exercise and advance.
    ///
    /// Increments the score iff `is_correct`. Advances to the next exercise,
    /// or marks the session completed when the current exercise was the last.
    /// Ignored once the session is completed or when it has no exercises.
    pub fn complete_exercise(&mut self, is_correct: bool) {
        if self.completed || self.total == 0 {
            return;
        }
        if is_correct {
            self.score += 1;
        }
        if self.current_index < self.total - 1 {
            self.current_index += 1;
        } else {
            self.completed = true;
        }
    }

    /// Push lesson progress from a quiz component, clamped to 0..=100.
    pub fn push_lesson_progress(&mut self, percent: u32) {
        self.pushed_progress = Some(percent.min(100) as u8);
    }

    /// Restart the session from scratch. Idempotent.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.completed = false;
        self.pushed_progress = None;
    }
}
