pub mod confusions;
pub mod practice;
pub mod vocabulary;

use askama::Template;
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tower_http::services::ServeDir;

use crate::config;
use crate::filters;
use crate::session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub word_count: usize,
    pub exercise_count: usize,
}

/// GET / - Landing page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let template = IndexTemplate {
        word_count: state.vocabulary.len(),
        exercise_count: state.exercises.len(),
    };
    Html(template.render().unwrap_or_default())
}

/// Resolve the visitor's session ID from the cookie jar, minting a new
/// cookie when none is present. The returned jar must go into the response.
pub(crate) fn ensure_session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(config::SESSION_COOKIE_NAME) {
        let id = cookie.value().to_string();
        return (jar, id);
    }

    let id = session::generate_session_id();
    let cookie = Cookie::build((config::SESSION_COOKIE_NAME, id.clone()))
        .path("/")
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .max_age(time::Duration::hours(config::SESSION_EXPIRY_HOURS))
        .build();
    (jar.add(cookie), id)
}

/// Build the application router. Shared with the integration tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/vocabulary", get(vocabulary::vocabulary))
        .route("/practice", get(practice::practice_page))
        .route("/practice/exercise", get(practice::current_exercise))
        .route("/practice/flashcard", post(practice::submit_flashcard))
        .route("/practice/choice", post(practice::submit_choice))
        .route("/practice/matching", post(practice::submit_matching))
        .route("/practice/reset", post(practice::reset))
        .route("/practice/confusions/meaning", post(confusions::answer_meaning))
        .route("/practice/confusions/advance", post(confusions::advance_to_sentence))
        .route("/practice/confusions/sentence", post(confusions::answer_sentence))
        .route("/practice/confusions/tick", post(confusions::tick))
        .route("/practice/confusions/next", post(confusions::next_question))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}
