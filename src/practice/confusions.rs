//! Two-stage quiz state machine for confusable word pairs.
//!
//! Each confusable pair is quizzed in two stages: first the learner picks
//! the English meaning of a target word, then fills its blanked sentence.
//! Question order is a random permutation fixed at construction, and the
//! target word of each stage is chosen uniformly at random per pair, also
//! fixed at construction. Option order is shuffled once per question and
//! cached, so re-renders never reshuffle.
//!
//! Every transition is a guarded operation: a stale or duplicate trigger
//! (a delayed auto-advance, a countdown tick after teardown) is a no-op
//! rather than a state corruption.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config;
use crate::domain::{ConfusionPair, WordPair};

/// One selectable answer option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub text: String,
    pub correct: bool,
}

/// Sub-phase within one confusable-pair question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Meaning,
    Sentence,
}

/// Outcome of the learner's latest pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

/// State machine for one confusions quiz instance.
#[derive(Debug, Clone)]
pub struct ConfusionQuiz {
    pairs: Vec<ConfusionPair>,
    /// Random permutation of pair indices, fixed for the quiz lifetime
    question_order: Vec<usize>,
    /// Which word of each pair is the meaning-stage target (0 or 1)
    meaning_target: Vec<usize>,
    /// Which word of each pair is the sentence-stage target (0 or 1)
    sentence_target: Vec<usize>,
    /// Position within `question_order`
    position: usize,
    stage: Stage,
    feedback: Feedback,
    selected: Option<usize>,
    options_locked: bool,
    next_armed: bool,
    countdown: u8,
    /// Option order cached per pair index, shuffled once on first use
    meaning_options: HashMap<usize, Vec<QuizOption>>,
    sentence_options: HashMap<usize, Vec<QuizOption>>,
    /// Whether the current stage has received its first attempt
    stage_attempted: bool,
    /// True while every stage so far was answered right on the first try
    flawless: bool,
    finished: bool,
}

impl ConfusionQuiz {
    pub fn new(pairs: Vec<ConfusionPair>, rng: &mut impl Rng) -> Self {
        let mut question_order: Vec<usize> = (0..pairs.len()).collect();
        question_order.shuffle(rng);

        let meaning_target = (0..pairs.len()).map(|_| rng.random_range(0..2)).collect();
        let sentence_target = (0..pairs.len()).map(|_| rng.random_range(0..2)).collect();

        let finished = pairs.is_empty();
        Self {
            pairs,
            question_order,
            meaning_target,
            sentence_target,
            position: 0,
            stage: Stage::Meaning,
            feedback: Feedback::None,
            selected: None,
            options_locked: false,
            next_armed: false,
            countdown: config::NEXT_COUNTDOWN_TICKS,
            meaning_options: HashMap::new(),
            sentence_options: HashMap::new(),
            stage_attempted: false,
            flawless: true,
            finished,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Position within the question order (0-based)
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn options_locked(&self) -> bool {
        self.options_locked
    }

    pub fn next_armed(&self) -> bool {
        self.next_armed
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Percentage of questions finished, 0..=100
    pub fn progress_percent(&self) -> u32 {
        if self.pairs.is_empty() || self.finished {
            return 100;
        }
        (self.position * 100 / self.pairs.len()) as u32
    }

    /// Index into `pairs` of the current question
    fn current_pair_index(&self) -> Option<usize> {
        if self.finished {
            None
        } else {
            self.question_order.get(self.position).copied()
        }
    }

    pub fn current_pair(&self) -> Option<&ConfusionPair> {
        self.current_pair_index().map(|i| &self.pairs[i])
    }

    /// Target word of the current meaning stage
    pub fn meaning_word(&self) -> Option<&WordPair> {
        let idx = self.current_pair_index()?;
        Some(&self.pairs[idx].pair[self.meaning_target[idx]])
    }

    /// The confusable partner of the meaning-stage target
    pub fn meaning_other(&self) -> Option<&WordPair> {
        let idx = self.current_pair_index()?;
        Some(&self.pairs[idx].pair[1 - self.meaning_target[idx]])
    }

    /// Target word of the current sentence stage
    pub fn sentence_word(&self) -> Option<&WordPair> {
        let idx = self.current_pair_index()?;
        Some(&self.pairs[idx].pair[self.sentence_target[idx]])
    }

    /// The confusable partner of the sentence-stage target
    pub fn sentence_other(&self) -> Option<&WordPair> {
        let idx = self.current_pair_index()?;
        Some(&self.pairs[idx].pair[1 - self.sentence_target[idx]])
    }

    /// Meaning-stage options, shuffled once per question and cached.
    pub fn meaning_options(&mut self, rng: &mut impl Rng) -> &[QuizOption] {
        let idx = match self.current_pair_index() {
            Some(idx) => idx,
            None => return &[],
        };
        let target = self.meaning_target[idx];
        let pair = &self.pairs[idx].pair;
        self.meaning_options.entry(idx).or_insert_with(|| {
            let mut options = vec![
                QuizOption {
                    text: pair[target].meaning.clone(),
                    correct: true,
                },
                QuizOption {
                    text: pair[1 - target].meaning.clone(),
                    correct: false,
                },
            ];
            options.shuffle(rng);
            options
        })
    }

    /// Sentence-stage options, shuffled once per question and cached.
    pub fn sentence_options(&mut self, rng: &mut impl Rng) -> &[QuizOption] {
        let idx = match self.current_pair_index() {
            Some(idx) => idx,
            None => return &[],
        };
        let target = self.sentence_target[idx];
        let pair = &self.pairs[idx].pair;
        self.sentence_options.entry(idx).or_insert_with(|| {
            let mut options = vec![
                QuizOption {
                    text: pair[target].sentence_form().to_string(),
                    correct: true,
                },
                QuizOption {
                    text: pair[1 - target].sentence_form().to_string(),
                    correct: false,
                },
            ];
            options.shuffle(rng);
            options
        })
    }

    /// Answer the meaning stage with the option at `option_idx`.
    ///
    /// Wrong picks leave the options unlocked so the learner may retry;
    /// only the first attempt counts toward the flawless verdict. A correct
    /// pick locks the options until the stage advance.
    pub fn answer_meaning(&mut self, option_idx: usize) -> Feedback {
        if self.finished || self.stage != Stage::Meaning || self.options_locked {
            return self.feedback;
        }
        let idx = match self.current_pair_index() {
            Some(idx) => idx,
            None => return self.feedback,
        };
        let correct = match self
            .meaning_options
            .get(&idx)
            .and_then(|options| options.get(option_idx))
        {
            Some(option) => option.correct,
            None => return self.feedback,
        };

        self.selected = Some(option_idx);
        if !self.stage_attempted {
            self.stage_attempted = true;
            if !correct {
                self.flawless = false;
            }
        }
        if correct {
            self.feedback = Feedback::Correct;
            self.options_locked = true;
        } else {
            self.feedback = Feedback::Incorrect;
        }
        self.feedback
    }

    /// Move from the meaning stage to the sentence stage.
    ///
    /// Issued by the client after the reveal delay. Guarded so a stale
    /// deferred trigger cannot advance a stage that is not ready.
    pub fn advance_to_sentence(&mut self) {
        if self.finished || self.stage != Stage::Meaning || self.feedback != Feedback::Correct {
            return;
        }
        self.stage = Stage::Sentence;
        self.feedback = Feedback::None;
        self.selected = None;
        self.options_locked = false;
        self.stage_attempted = false;
        self.next_armed = false;
        self.countdown = config::NEXT_COUNTDOWN_TICKS;
    }

    /// Answer the sentence stage with the option at `option_idx`.
    ///
    /// A correct pick locks the options and starts the countdown that arms
    /// the Next action; wrong picks stay retryable.
    pub fn answer_sentence(&mut self, option_idx: usize) -> Feedback {
        if self.finished || self.stage != Stage::Sentence || self.options_locked {
            return self.feedback;
        }
        let idx = match self.current_pair_index() {
            Some(idx) => idx,
            None => return self.feedback,
        };
        let correct = match self
            .sentence_options
            .get(&idx)
            .and_then(|options| options.get(option_idx))
        {
            Some(option) => option.correct,
            None => return self.feedback,
        };

        self.selected = Some(option_idx);
        if !self.stage_attempted {
            self.stage_attempted = true;
            if !correct {
                self.flawless = false;
            }
        }
        if correct {
            self.feedback = Feedback::Correct;
            self.options_locked = true;
            self.countdown = config::NEXT_COUNTDOWN_TICKS;
            self.next_armed = false;
        } else {
            self.feedback = Feedback::Incorrect;
        }
        self.feedback
    }

    /// One countdown tick; arms the Next action when the count hits zero.
    ///
    /// Only meaningful in the answered-correct sentence sub-state; a tick
    /// arriving after teardown or a stage change is ignored.
    pub fn tick(&mut self) {
        if self.finished
            || self.stage != Stage::Sentence
            || self.feedback != Feedback::Correct
            || self.next_armed
        {
            return;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.next_armed = true;
        }
    }

    /// Advance past the current pair. Returns true when the quiz finished.
    pub fn next_question(&mut self) -> bool {
        if self.finished || !self.next_armed {
            return self.finished;
        }
        self.position += 1;
        if self.position >= self.question_order.len() {
            self.finished = true;
        } else {
            self.stage = Stage::Meaning;
            self.feedback = Feedback::None;
            self.selected = None;
            self.options_locked = false;
            self.stage_attempted = false;
            self.next_armed = false;
            self.countdown = config::NEXT_COUNTDOWN_TICKS;
        }
        self.finished
    }

    /// Overall verdict reported to the session runner at quiz completion:
    /// true iff every stage of every pair was answered right first try.
    pub fn verdict(&self) -> bool {
        self.flawless
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn word(word: &str, meaning: &str) -> WordPair {
        WordPair {
            word: word.to_string(),
            word_in_sentence: None,
            meaning: meaning.to_string(),
            sentence: format!("{} sentence", word),
            blanked_sentence: "____ sentence".to_string(),
            sentence_explanation_correct: "correct explanation".to_string(),
            sentence_explanation_wrong: "wrong explanation".to_string(),
        }
    }

    fn pairs(n: usize) -> Vec<ConfusionPair> {
        (0..n)
            .map(|i| ConfusionPair {
                pair: [
                    word(&format!("word-a{}", i), &format!("meaning-a{}", i)),
                    word(&format!("word-b{}", i), &format!("meaning-b{}", i)),
                ],
            })
            .collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Index of the correct option in the current stage's cached options
    fn correct_meaning_idx(quiz: &mut ConfusionQuiz, rng: &mut StdRng) -> usize {
        quiz.meaning_options(rng)
            .iter()
            .position(|o| o.correct)
            .unwrap()
    }

    fn correct_sentence_idx(quiz: &mut ConfusionQuiz, rng: &mut StdRng) -> usize {
        quiz.sentence_options(rng)
            .iter()
            .position(|o| o.correct)
            .unwrap()
    }

    /// Play one pair through both stages, always answering correctly
    fn play_pair_clean(quiz: &mut ConfusionQuiz, rng: &mut StdRng) {
        let idx = correct_meaning_idx(quiz, rng);
        assert_eq!(quiz.answer_meaning(idx), Feedback::Correct);
        quiz.advance_to_sentence();
        assert_eq!(quiz.stage(), Stage::Sentence);

        let idx = correct_sentence_idx(quiz, rng);
        assert_eq!(quiz.answer_sentence(idx), Feedback::Correct);
        for _ in 0..config::NEXT_COUNTDOWN_TICKS {
            assert!(!quiz.next_armed());
            quiz.tick();
        }
        assert!(quiz.next_armed());
        quiz.next_question();
    }

    #[test]
    fn test_k_pairs_make_k_stage_transitions() {
        let mut rng = rng();
        let k = 4;
        let mut quiz = ConfusionQuiz::new(pairs(k), &mut rng);

        let mut transitions = 0;
        while !quiz.is_finished() {
            assert_eq!(quiz.stage(), Stage::Meaning);
            let idx = correct_meaning_idx(&mut quiz, &mut rng);
            quiz.answer_meaning(idx);
            quiz.advance_to_sentence();
            assert_eq!(quiz.stage(), Stage::Sentence);
            transitions += 1;

            let idx = correct_sentence_idx(&mut quiz, &mut rng);
            quiz.answer_sentence(idx);
            for _ in 0..config::NEXT_COUNTDOWN_TICKS {
                quiz.tick();
            }
            quiz.next_question();
        }

        assert_eq!(transitions, k);
    }

    #[test]
    fn test_question_order_is_a_stable_permutation() {
        let mut rng = rng();
        let quiz = ConfusionQuiz::new(pairs(6), &mut rng);

        let mut order = quiz.question_order.clone();
        order.sort();
        assert_eq!(order, (0..6).collect::<Vec<_>>());

        // The order does not change as the quiz runs
        let initial = quiz.question_order.clone();
        let mut quiz = quiz;
        play_pair_clean(&mut quiz, &mut rng);
        play_pair_clean(&mut quiz, &mut rng);
        assert_eq!(quiz.question_order, initial);
    }

    #[test]
    fn test_option_order_cached_across_renders() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(3), &mut rng);

        let first: Vec<QuizOption> = quiz.meaning_options(&mut rng).to_vec();
        // Re-rendering (and even answering wrong) does not reshuffle
        let wrong = first.iter().position(|o| !o.correct).unwrap();
        quiz.answer_meaning(wrong);
        let again: Vec<QuizOption> = quiz.meaning_options(&mut rng).to_vec();
        assert_eq!(first, again);
    }

    #[test]
    fn test_meaning_wrong_pick_is_retryable() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(2), &mut rng);

        let wrong = quiz
            .meaning_options(&mut rng)
            .iter()
            .position(|o| !o.correct)
            .unwrap();
        assert_eq!(quiz.answer_meaning(wrong), Feedback::Incorrect);
        assert!(!quiz.options_locked());

        // Retry with the right answer succeeds and locks
        let right = correct_meaning_idx(&mut quiz, &mut rng);
        assert_eq!(quiz.answer_meaning(right), Feedback::Correct);
        assert!(quiz.options_locked());
    }

    #[test]
    fn test_advance_is_guarded() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(2), &mut rng);

        // Without a correct meaning answer, advance is a no-op
        quiz.advance_to_sentence();
        assert_eq!(quiz.stage(), Stage::Meaning);

        let right = correct_meaning_idx(&mut quiz, &mut rng);
        quiz.answer_meaning(right);
        quiz.advance_to_sentence();
        assert_eq!(quiz.stage(), Stage::Sentence);

        // A duplicate (stale) advance trigger changes nothing
        quiz.advance_to_sentence();
        assert_eq!(quiz.stage(), Stage::Sentence);
        assert_eq!(quiz.feedback(), Feedback::None);
    }

    #[test]
    fn test_countdown_arms_next_after_three_ticks() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(1), &mut rng);

        let right = correct_meaning_idx(&mut quiz, &mut rng);
        quiz.answer_meaning(right);
        quiz.advance_to_sentence();
        let right = correct_sentence_idx(&mut quiz, &mut rng);
        quiz.answer_sentence(right);

        assert_eq!(quiz.countdown(), 3);
        quiz.tick();
        assert_eq!(quiz.countdown(), 2);
        assert!(!quiz.next_armed());
        quiz.tick();
        quiz.tick();
        assert!(quiz.next_armed());

        // Extra ticks after arming are ignored
        quiz.tick();
        assert_eq!(quiz.countdown(), 0);
    }

    #[test]
    fn test_tick_ignored_outside_success_substate() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(1), &mut rng);

        quiz.tick();
        assert_eq!(quiz.countdown(), config::NEXT_COUNTDOWN_TICKS);
        assert!(!quiz.next_armed());
    }

    #[test]
    fn test_next_requires_armed() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(2), &mut rng);

        assert!(!quiz.next_question());
        assert_eq!(quiz.position(), 0);
    }

    #[test]
    fn test_clean_run_is_flawless() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(3), &mut rng);
        while !quiz.is_finished() {
            play_pair_clean(&mut quiz, &mut rng);
        }
        assert!(quiz.verdict());
    }

    #[test]
    fn test_single_wrong_first_attempt_spoils_verdict() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(2), &mut rng);

        let wrong = quiz
            .meaning_options(&mut rng)
            .iter()
            .position(|o| !o.correct)
            .unwrap();
        quiz.answer_meaning(wrong);

        // Recover and finish cleanly; the verdict stays spoiled
        let right = correct_meaning_idx(&mut quiz, &mut rng);
        quiz.answer_meaning(right);
        quiz.advance_to_sentence();
        let right = correct_sentence_idx(&mut quiz, &mut rng);
        quiz.answer_sentence(right);
        for _ in 0..config::NEXT_COUNTDOWN_TICKS {
            quiz.tick();
        }
        quiz.next_question();
        play_pair_clean(&mut quiz, &mut rng);

        assert!(quiz.is_finished());
        assert!(!quiz.verdict());
    }

    #[test]
    fn test_sentence_retry_after_wrong_does_not_lock() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(1), &mut rng);

        let right = correct_meaning_idx(&mut quiz, &mut rng);
        quiz.answer_meaning(right);
        quiz.advance_to_sentence();

        let wrong = quiz
            .sentence_options(&mut rng)
            .iter()
            .position(|o| !o.correct)
            .unwrap();
        assert_eq!(quiz.answer_sentence(wrong), Feedback::Incorrect);
        assert!(!quiz.options_locked());

        let right = correct_sentence_idx(&mut quiz, &mut rng);
        assert_eq!(quiz.answer_sentence(right), Feedback::Correct);
        assert!(quiz.options_locked());
    }

    #[test]
    fn test_empty_quiz_is_finished_immediately() {
        let mut rng = rng();
        let quiz = ConfusionQuiz::new(Vec::new(), &mut rng);
        assert!(quiz.is_finished());
        assert_eq!(quiz.progress_percent(), 100);
    }

    #[test]
    fn test_progress_percent_tracks_position() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(4), &mut rng);
        assert_eq!(quiz.progress_percent(), 0);
        play_pair_clean(&mut quiz, &mut rng);
        assert_eq!(quiz.progress_percent(), 25);
        play_pair_clean(&mut quiz, &mut rng);
        assert_eq!(quiz.progress_percent(), 50);
    }

    #[test]
    fn test_targets_fixed_at_construction() {
        let mut rng = rng();
        let mut quiz = ConfusionQuiz::new(pairs(2), &mut rng);

        let word_before = quiz.meaning_word().unwrap().word.clone();
        // A wrong answer and re-render do not move the target
        let wrong = quiz
            .meaning_options(&mut rng)
            .iter()
            .position(|o| !o.correct)
            .unwrap();
        quiz.answer_meaning(wrong);
        assert_eq!(quiz.meaning_word().unwrap().word, word_before);
    }
}
