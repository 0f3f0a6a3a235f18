//! Vocabulary Explorer page: theme chips, search, grid and flashcard views.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::content::{self, Theme, VocabularyWord};
use crate::filters;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VocabularyQuery {
    /// Search term matched against Tamil, English and pronunciation
    pub q: Option<String>,
    /// Theme chip id, "all" when absent
    pub theme: Option<String>,
    /// "grid" (default) or "cards" for the flashcard view
    pub view: Option<String>,
    /// Flashcard position within the filtered list (cards view only)
    pub i: Option<usize>,
}

#[derive(Template)]
#[template(path = "vocabulary.html")]
pub struct VocabularyTemplate {
    pub themes: Vec<Theme>,
    pub words: Vec<VocabularyWord>,
    pub query: String,
    pub theme: String,
    pub cards_view: bool,
    /// Flashcard view state: current position and its word
    pub card_index: usize,
    pub card: Option<VocabularyWord>,
    pub prev_index: usize,
    pub next_index: usize,
}

/// GET /vocabulary - Browse the word list
pub async fn vocabulary(
    State(state): State<AppState>,
    Query(params): Query<VocabularyQuery>,
) -> Html<String> {
    let query = params.q.unwrap_or_default();
    let theme = params.theme.unwrap_or_else(|| "all".to_string());
    let cards_view = params.view.as_deref() == Some("cards");

    let filtered: Vec<VocabularyWord> = content::filter_words(&state.vocabulary, &theme, &query)
        .into_iter()
        .cloned()
        .collect();

    // Flashcard view walks the filtered list one word at a time, wrapping
    // at both ends
    let card_index = match filtered.len() {
        0 => 0,
        len => params.i.unwrap_or(0).min(len - 1),
    };
    let card = filtered.get(card_index).cloned();
    let (prev_index, next_index) = match filtered.len() {
        0 => (0, 0),
        len => (
            (card_index + len - 1) % len,
            (card_index + 1) % len,
        ),
    };

    let template = VocabularyTemplate {
        themes: content::themes(&state.vocabulary),
        words: filtered,
        query,
        theme,
        cards_view,
        card_index,
        card,
        prev_index,
        next_index,
    };
    Html(template.render().unwrap_or_default())
}
