//! Practice Zone handlers: the page shell, exercise dispatch and the
//! submission endpoints for the flashcard, multiple-choice and matching
//! exercises. The confusable-pair quiz has its own handler module.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config;
use crate::domain::{ExerciseRecord, MatchPair};
use crate::filters;
use crate::practice::{matching_is_correct, project_progress};
use crate::session::{self, PracticeState};
use crate::state::AppState;

use super::{confusions, ensure_session};

#[derive(Template)]
#[template(path = "practice.html")]
pub struct PracticePageTemplate {
    pub unit_name: String,
    pub lesson_name: String,
    pub exercise_html: String,
    pub progress_html: String,
    pub lesson_path_html: String,
}

/// One lesson row in the learning-path sidebar
pub struct LessonView {
    pub title: String,
    pub progress: u8,
    pub stars: u8,
}

/// One unit block in the learning-path sidebar
pub struct UnitView {
    pub title: String,
    pub lessons: Vec<LessonView>,
}

#[derive(Template)]
#[template(path = "practice/lesson_path.html")]
pub struct LessonPathTemplate {
    pub units: Vec<UnitView>,
}

#[derive(Template)]
#[template(path = "practice/flashcard.html")]
pub struct FlashcardTemplate {
    pub index: usize,
    pub position: usize,
    pub total: usize,
    pub question: String,
    pub tamil: String,
    pub answer: String,
    pub pronunciation: String,
}

#[derive(Template)]
#[template(path = "practice/choice.html")]
pub struct ChoiceTemplate {
    pub index: usize,
    pub position: usize,
    pub total: usize,
    pub question: String,
    pub tamil: String,
    pub options: Vec<String>,
}

#[derive(Template)]
#[template(path = "practice/choice_result.html")]
pub struct ChoiceResultTemplate {
    pub question: String,
    pub tamil: String,
    pub options: Vec<String>,
    pub selected: usize,
    pub correct: usize,
    pub is_correct: bool,
    pub reveal_delay_ms: u32,
}

#[derive(Template)]
#[template(path = "practice/matching.html")]
pub struct MatchingTemplate {
    pub index: usize,
    pub position: usize,
    pub total: usize,
    pub question: String,
    pub tamil_items: Vec<String>,
    pub english_items: Vec<String>,
}

#[derive(Template)]
#[template(path = "practice/matching_result.html")]
pub struct MatchingResultTemplate {
    pub is_correct: bool,
    pub pairs: Vec<MatchPair>,
    pub reveal_delay_ms: u32,
}

#[derive(Template)]
#[template(path = "practice/complete.html")]
pub struct CompleteTemplate {
    pub score: usize,
    pub total: usize,
    pub stars: u8,
}

#[derive(Template)]
#[template(path = "practice/empty.html")]
pub struct EmptyTemplate {}

#[derive(Template)]
#[template(path = "practice/progress_oob.html")]
pub struct ProgressOobTemplate {
    pub progress: u8,
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct FlashcardForm {
    pub index: usize,
    pub knew: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceForm {
    pub index: usize,
    pub answer: usize,
}

#[derive(Debug, Deserialize)]
pub struct MatchingForm {
    pub index: usize,
    /// JSON object mapping Tamil items to the English item dropped on them
    pub matches: String,
}

/// Render the exercise partial for the session's current position.
///
/// May mutate `practice` when the current exercise is the confusions quiz
/// and its state machine is not built yet.
pub(crate) fn render_exercise(state: &AppState, practice: &mut PracticeState) -> String {
    let total = state.exercises.len();
    if total == 0 {
        return EmptyTemplate {}.render().unwrap_or_default();
    }

    if practice.session.completed() {
        let projected = project_progress(
            practice.session.current_index(),
            total,
            practice.session.score(),
            true,
        );
        let template = CompleteTemplate {
            score: practice.session.score(),
            total,
            stars: projected.stars,
        };
        return template.render().unwrap_or_default();
    }

    let index = practice.session.current_index();
    let position = index + 1;
    match &state.exercises[index] {
        ExerciseRecord::Flashcard {
            question,
            tamil,
            answer,
            pronunciation,
        } => FlashcardTemplate {
            index,
            position,
            total,
            question: question.clone(),
            tamil: tamil.clone(),
            answer: answer.clone(),
            pronunciation: pronunciation.clone(),
        }
        .render()
        .unwrap_or_default(),

        ExerciseRecord::MultipleChoice {
            question,
            options,
            tamil,
            ..
        } => ChoiceTemplate {
            index,
            position,
            total,
            question: question.clone(),
            tamil: tamil.clone(),
            options: options.clone(),
        }
        .render()
        .unwrap_or_default(),

        ExerciseRecord::DragDrop { question, pairs } => {
            let tamil_items = pairs.iter().map(|p| p.tamil.clone()).collect();
            let mut english_items: Vec<String> =
                pairs.iter().map(|p| p.english.clone()).collect();
            english_items.shuffle(&mut rand::rng());
            MatchingTemplate {
                index,
                position,
                total,
                question: question.clone(),
                tamil_items,
                english_items,
            }
            .render()
            .unwrap_or_default()
        }

        ExerciseRecord::CommonConfusions { data } => {
            if practice.confusions.is_none() {
                let quiz =
                    crate::practice::ConfusionQuiz::new(data.clone(), &mut rand::rng());
                // A record with no pairs has nothing to ask; count the slot
                // as done and move on instead of rendering a dead quiz
                if quiz.is_finished() {
                    practice.session.complete_exercise(true);
                    return render_exercise(state, practice);
                }
                practice.confusions = Some(quiz);
            }
            confusions::render_quiz(state, practice)
        }
    }
}

/// Render the out-of-band progress bar swap appended to exercise responses.
pub(crate) fn render_progress_oob(state: &AppState, practice: &PracticeState) -> String {
    let total = state.exercises.len();
    let projected = project_progress(
        practice.session.current_index(),
        total,
        practice.session.score(),
        practice.session.completed(),
    );
    ProgressOobTemplate {
        progress: projected.progress,
        score: practice.session.score(),
        total,
    }
    .render()
    .unwrap_or_default()
}

/// Render the learning-path sidebar from the static unit table.
///
/// Each lesson's bar prefers the progress pushed by a quiz component over
/// the plain session projection, so mid-quiz pushes show up immediately.
pub(crate) fn render_lesson_path(state: &AppState, practice: &PracticeState) -> String {
    let projected = project_progress(
        practice.session.current_index(),
        state.exercises.len(),
        practice.session.score(),
        practice.session.completed(),
    );
    let progress = practice
        .session
        .pushed_progress()
        .unwrap_or(projected.progress);

    let units = config::UNITS
        .iter()
        .map(|unit| UnitView {
            title: unit.title.to_string(),
            lessons: unit
                .lessons
                .iter()
                .map(|lesson| LessonView {
                    title: lesson.title.to_string(),
                    progress,
                    stars: projected.stars,
                })
                .collect(),
        })
        .collect();

    LessonPathTemplate { units }.render().unwrap_or_default()
}

/// All out-of-band swaps appended to every exercise partial response
pub(crate) fn render_oob(state: &AppState, practice: &PracticeState) -> String {
    format!(
        "{}{}",
        render_progress_oob(state, practice),
        render_lesson_path(state, practice)
    )
}

fn exercise_response(state: &AppState, practice: &mut PracticeState) -> Html<String> {
    let exercise = render_exercise(state, practice);
    let oob = render_oob(state, practice);
    Html(format!("{}{}", exercise, oob))
}

/// GET /practice - Practice Zone page shell
pub async fn practice_page(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    let exercise_html = render_exercise(&state, &mut practice);
    let progress_html = render_progress_oob(&state, &practice);
    let lesson_path_html = render_lesson_path(&state, &practice);
    session::update_state(&session_id, practice);

    let (unit_name, lesson_name) = match config::get_unit_info(1) {
        Some(unit) => (
            unit.title.to_string(),
            unit.lessons
                .first()
                .map(|l| l.title.to_string())
                .unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };
    let template = PracticePageTemplate {
        unit_name,
        lesson_name,
        exercise_html,
        progress_html,
        lesson_path_html,
    };
    (jar, Html(template.render().unwrap_or_default()))
}

/// GET /practice/exercise - Current exercise partial
pub async fn current_exercise(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());
    let response = exercise_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}

/// POST /practice/flashcard - Self-graded flashcard outcome
///
/// The learner grades themselves, so the response is already the next
/// exercise. A submission for a stale index is ignored.
pub async fn submit_flashcard(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<FlashcardForm>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if !practice.session.completed() && form.index == practice.session.current_index() {
        practice.session.complete_exercise(form.knew);
    }

    let response = exercise_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}

/// POST /practice/choice - Multiple-choice answer
///
/// Grades immediately and returns a reveal partial that loads the next
/// exercise after a short delay.
pub async fn submit_choice(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChoiceForm>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if practice.session.completed() || form.index != practice.session.current_index() {
        let response = exercise_response(&state, &mut practice);
        session::update_state(&session_id, practice);
        return (jar, response);
    }

    let (question, options, correct, tamil) = match &state.exercises[form.index] {
        ExerciseRecord::MultipleChoice {
            question,
            options,
            correct,
            tamil,
        } => (question.clone(), options.clone(), *correct, tamil.clone()),
        _ => {
            let response = exercise_response(&state, &mut practice);
            session::update_state(&session_id, practice);
            return (jar, response);
        }
    };

    let is_correct = form.answer == correct;
    practice.session.complete_exercise(is_correct);

    let template = ChoiceResultTemplate {
        question,
        tamil,
        options,
        selected: form.answer,
        correct,
        is_correct,
        reveal_delay_ms: config::CHOICE_REVEAL_DELAY_MS,
    };
    let oob = render_oob(&state, &practice);
    session::update_state(&session_id, practice);
    (
        jar,
        Html(format!("{}{}", template.render().unwrap_or_default(), oob)),
    )
}

/// POST /practice/matching - Matching exercise submission
///
/// All-or-nothing: the exercise advances whether or not every match was
/// right, and the reveal shows the correct pairing.
pub async fn submit_matching(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<MatchingForm>,
) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    if practice.session.completed() || form.index != practice.session.current_index() {
        let response = exercise_response(&state, &mut practice);
        session::update_state(&session_id, practice);
        return (jar, response);
    }

    let pairs = match &state.exercises[form.index] {
        ExerciseRecord::DragDrop { pairs, .. } => pairs.clone(),
        _ => {
            let response = exercise_response(&state, &mut practice);
            session::update_state(&session_id, practice);
            return (jar, response);
        }
    };

    let matches: HashMap<String, String> = serde_json::from_str(&form.matches).unwrap_or_default();
    let is_correct = matching_is_correct(&pairs, &matches);
    practice.session.complete_exercise(is_correct);

    let template = MatchingResultTemplate {
        is_correct,
        pairs,
        reveal_delay_ms: config::MATCH_REVEAL_DELAY_MS,
    };
    let oob = render_oob(&state, &practice);
    session::update_state(&session_id, practice);
    (
        jar,
        Html(format!("{}{}", template.render().unwrap_or_default(), oob)),
    )
}

/// POST /practice/reset - Restart the session from the first exercise
pub async fn reset(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session_id) = ensure_session(jar);
    let mut practice = session::get_state(&session_id, state.exercises.len());

    practice.session.reset();
    practice.confusions = None;

    let response = exercise_response(&state, &mut practice);
    session::update_state(&session_id, practice);
    (jar, response)
}
