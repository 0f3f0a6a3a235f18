//! Lesson progress and star rating projection.
//!
//! A pure function of the session counters, recomputed on every exercise
//! completion. Stars are only awarded at session completion and depend on
//! the score, not on how far the learner got.

use crate::config;

/// Derived lesson progress for the sidebar and completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonProgress {
    /// Percent of the session completed, 0..=100
    pub progress: u8,
    /// Star rating, 0..=3 (always 0 before completion)
    pub stars: u8,
}

/// Project progress and stars from the session counters.
///
/// While the session is in progress, `progress` is the rounded percentage of
/// exercises already completed. At completion, `progress` is exactly 100 and
/// stars come from the score ratio. A zero-exercise session projects to the
/// empty state rather than dividing by zero.
pub fn project_progress(
    current_index: usize,
    total: usize,
    score: usize,
    completed: bool,
) -> LessonProgress {
    if total == 0 {
        return LessonProgress {
            progress: 0,
            stars: 0,
        };
    }

    if completed {
        LessonProgress {
            progress: 100,
            stars: stars_for(score, total),
        }
    } else {
        let progress = ((current_index as f64 / total as f64) * 100.0).round() as u8;
        LessonProgress { progress, stars: 0 }
    }
}

/// Star rating from the score ratio at session completion.
pub fn stars_for(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer comparison avoids float rounding at the threshold boundaries
    if score * 100 >= config::THREE_STAR_PERCENT * total {
        3
    } else if score * 100 >= config::TWO_STAR_PERCENT * total {
        2
    } else if score * 100 >= config::ONE_STAR_PERCENT * total {
        1
    } else {
        0
    }
}
