use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{templates::home_page, AppState};

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let bounds = state.climate_db.dataset_bounds();

    Html(home_page(&bounds).into_string())
}
