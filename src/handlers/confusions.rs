//! Handlers for the two-stage confusable-pair quiz.
//!
//! Every endpoint is a guarded transition on the quiz state machine in the
//! visitor's session: a stale trigger (a delayed auto-advance that lands
//! after a reset, a countdown tick for a question that already moved on)
//! falls through to a plain re-render of the current state.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::config;
use crate::practice::{Feedback, Stage};
use crate::session::{self, PracticeState};
use crate::state::AppState;

use super::ensure_session;
use super::practice::{render_exercise, render_oob};

/// One rendered answer option with its feedback classes resolved
pub struct OptionView {
    pub idx: usize,
    pub text: String,
    /// This option is the learner's current pick
    pub selected: bool,
    /// Highlight as the right answer (only after a correct pick)
    pub reveal_correct: bool,
}

#[derive(Template)]
#[template(path = "practice/confusions_meaning.html")]
pub struct MeaningTemplate {
    pub position: usize,
    pub total: usize,
    pub word: String,
    pub sentence: String,
    pub options: Vec<OptionView>,
    pub answered_correct: bool,
    pub answered_wrong: bool,
    pub locked: bool,
    pub advance_delay_ms: u32,
}

#[derive(Template)]
#[template(path = "practice/confusions_sentence.html")]
pub struct SentenceTemplate {
    pub position: usize,
    pub total: usize,
    pub blanked_sentence: String,
    pub sentence: String,
    pub options: Vec<OptionView>,
    pub answered_correct: bool,
    pub answered_wrong: bool,
    pub locked: bool,
    pub explanation: String,
    pub next_area_html: String,
}

#[derive(Template)]
#[template(path = "practice/next_area.html")]
pub struct NextAreaTemplate {
    pub countdown: u8,
    pub armed: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub option: usize,
}

/// Render the quiz at its current stage.
///
/// Falls back to the surrounding exercise flow when no quiz is active
/// (stale trigger after completion or reset).
pub(crate) fn render_quiz(state: &AppState, practice: &mut PracticeState) -> String {
    let finished = match &practice.confusions {
        Some(quiz) => quiz.is_finished(),
        None => return render_exercise(state, practice),
    };
    if finished {
        // A finished quiz is normally torn down by the next handler; drop
        // it here so the exercise flow can take over
        practice.confusions = None;
        return render_exercise(state, practice);
    }

    let mut rng = rand::rng();
    let Some(quiz) = practice.confusions.as_mut() else {
        return String::new();
    };
    let total = quiz.len();

    let position = quiz.position() + 1;
    let answered_correct = quiz.feedback() == Feedback::Correct;
    let answered_wrong = quiz.feedback() == Feedback::Incorrect;
    let locked = quiz.options_locked();
    let selected = quiz.selected();

    match quiz.stage() {
        Stage::Meaning => {
            let word = quiz.meaning_word().map(|w| w.word.clone()).unwrap_or_default();
            let sentence = quiz
                .meaning_word()
                .map(|w| w.sentence.clone())
                .unwrap_or_default();
            let options = quiz
                .meaning_options(&mut rng)
                .iter()
                .enumerate()
                .map(|(idx, opt)| OptionView {
                    idx,
                    text: opt.text.clone(),
                    selected: selected == Some(idx),
                    reveal_correct: answered_correct && opt.correct,
                })
                .collect();

            MeaningTemplate {
                position,
                total,
                word,
                sentence,
                options,
                answered_correct,
                answered_wrong,
                locked,
                advance_delay_ms: config::MEANING_ADVANCE_DELAY_MS,
            }
            .render()
            .unwrap_or_default()
        }
        Stage::Sentence => {
            let target = quiz.sentence_word();
            let blanked_sentence = target.map(|w| w.blanked_sentence.clone()).unwrap_or_default();
            let sentence = target.map(|w| w.sentence.clone()).unwrap_or_default();
            let explanation = match (answered_correct, answered_wrong, target) {
                (true, _, Some(w)) => w.sentence_explanation_correct.clone(),
                (_, true, Some(w)) => w.sentence_explanation_wrong.clone(),
                _ => String::new(),
            };
            let options = quiz
                .sentence_options(&mut rng)
                .iter()
                .enumerate()
                .map(|(idx, opt)| OptionView {
                    idx,
                    text: opt.text.clone(),
                    selected: selected == Some(idx),
                    reveal_correct: answered_correct && opt.correct,
                })
                .collect();

            let next_area_html = if answered_correct {
                NextAreaTemplate {
                    countdown: quiz.countdown(),
                    armed: quiz.next_armed(),
                }
                .render()
                .unwrap_or_default()
            } else {
                String::new()
            };

            SentenceTemplate {
                position,
                total,
                blanked_sentence,
                sentence,
                options,
                answered_correct,
                answered_wrong,
                locked,
                explanation,
                next_area_html,
            }
            .render()
            .unwrap_or_default()
        }
    }
}

fn quiz_response(state: &AppState, practice: &mut PracticeState) -> Html<String> {
    let body = render_quiz(state, practice);
    let oob = render_oob(state, practice);
    Html(format!("{}{}", body, oob))
}

/// POST /practice/confusions/meaning - Meaning-stage pick
pub async fn answer_meaning(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AnswerForm>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if let Some(quiz) = practice.confusions.as_mut() {
        quiz.answer_meaning(form.option);
    }

    let response = quiz_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}

/// POST /practice/confusions/advance - Deferred move to the sentence stage
pub async fn advance_to_sentence(
    State(state): State<AppState>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if let Some(quiz) = practice.confusions.as_mut() {
        quiz.advance_to_sentence();
    }

    let response = quiz_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}

/// POST /practice/confusions/sentence - Sentence-stage pick
pub async fn answer_sentence(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AnswerForm>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if let Some(quiz) = practice.confusions.as_mut() {
        quiz.answer_sentence(form.option);
    }

    let response = quiz_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}

/// POST /practice/confusions/tick - One second of the Next-button countdown
///
/// Returns only the next-area partial; the countdown element re-requests
/// itself until the button arms, at which point polling stops.
pub async fn tick(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    let html = match practice.confusions.as_mut() {
        Some(quiz) => {
            quiz.tick();
            NextAreaTemplate {
                countdown: quiz.countdown(),
                armed: quiz.next_armed(),
            }
            .render()
            .unwrap_or_default()
        }
        None => String::new(),
    };

    session::update_state(&session_id, practice);
    (jar, Html(html))
}

/// POST /practice/confusions/next - Advance past the current pair
///
/// When the last pair is done, the quiz's verdict feeds the session score
/// and the quiz state is torn down.
pub async fn next_question(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if let Some(quiz) = practice.confusions.as_mut() {
        if quiz.next_question() {
            let verdict = quiz.verdict();
            practice.session.push_lesson_progress(100);
            practice.session.complete_exercise(verdict);
            practice.confusions = None;
        } else {
            let percent = quiz.progress_percent();
            practice.session.push_lesson_progress(percent);
        }
    }

    let response = quiz_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}
