use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    routes::params::{parse_date, RangeQuery},
    state::AppState,
    types::Analytics,
};

// Both bounds are mandatory here, unlike the item listing.
pub async fn get_analytics(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> AppResult<Json<Analytics>> {
    let Query(q) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (Some(from_raw), Some(to_raw)) = (
        q.from.as_deref().filter(|s| !s.is_empty()),
        q.to.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::BadRequest("Both 'from' and 'to' parameters are required".to_string()));
    };

    let from = parse_date(from_raw, "from")?;
    let to = parse_date(to_raw, "to")?;

    let analytics = state.items.get_analytics(from, to).await?;
    state.metrics.inc_analytics_queries();
    Ok(Json(analytics))
}
