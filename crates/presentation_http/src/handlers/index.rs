//! Landing page

use axum::{extract::State, response::Html};
use infrastructure::LandingPage;

use crate::{error::ApiError, handlers::tutor::MAX_MESSAGE_CHARS, state::AppState};

/// Render the level picker and conversation page
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = LandingPage::new(state.config.tutor.default_max_words, MAX_MESSAGE_CHARS);
    state
        .templates
        .render_landing(&page)
        .map(Html)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
