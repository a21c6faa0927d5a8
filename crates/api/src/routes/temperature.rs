use axum::{
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use crate::{ApiError, AppState, DateRange, ErrorBody, TemperatureStats};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Range start in YYYY-MM-DD format, aggregated through the last recorded date"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature from the start date onward", content_type = "text/html", body = String),
        (status = BAD_REQUEST, description = "Start date is not a valid YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "Start date falls outside the recorded dates", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Html<String>, ApiError> {
    let range = DateRange { start, end: None };
    let stats = state.climate_db.temperature_stats(&range).await?;

    Ok(Html(render_stats(&stats)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Range start in YYYY-MM-DD format"),
        ("end" = String, Path, description = "Range end in YYYY-MM-DD format, inclusive"),
    ),
    responses(
        (status = OK, description = "Minimum, maximum and average temperature between the two dates", content_type = "text/html", body = String),
        (status = BAD_REQUEST, description = "A date is not a valid YYYY-MM-DD date", body = ErrorBody),
        (status = NOT_FOUND, description = "A date falls outside the recorded dates, or no observations exist in the range", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = ErrorBody)
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    let range = DateRange {
        start,
        end: Some(end),
    };
    let stats = state.climate_db.temperature_stats(&range).await?;

    Ok(Html(render_stats(&stats)))
}

fn render_stats(stats: &TemperatureStats) -> String {
    format!(
        "Min temp: {}<br/>Max temp: {}<br/>Avg temp: {}",
        stats.min, stats.max, stats.avg
    )
}
