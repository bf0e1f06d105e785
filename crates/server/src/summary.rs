//! Summary API endpoints

use api_types::summary::{CategorySummary, Summary, SummaryGet};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Months, NaiveDate, Utc};

use crate::{
    ServerError,
    convert::{category_view, summary_view},
    server::ServerState,
};

/// First and last day of the month containing `today`.
fn month_of(today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ServerError> {
    let first = today
        .with_day(1)
        .ok_or_else(|| ServerError::Generic("invalid date".to_string()))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| ServerError::Generic("invalid date".to_string()))?;
    Ok((first, last))
}

fn to_query(params: SummaryGet, today: NaiveDate) -> Result<engine::SummaryQuery, ServerError> {
    let (first, last) = month_of(today)?;
    let mut query =
        engine::SummaryQuery::new(params.start.unwrap_or(first), params.end.unwrap_or(last));
    if let Some(account_id) = params.account_id.filter(|id| *id > 0) {
        query = query.account(account_id);
    }
    Ok(query)
}

pub async fn get(
    State(state): State<ServerState>,
    Query(params): Query<SummaryGet>,
) -> Result<Json<Summary>, ServerError> {
    let query = to_query(params, Utc::now().date_naive())?;
    let summary = state.engine.summary(query).await?;
    Ok(Json(summary_view(summary)))
}

pub async fn categories(
    State(state): State<ServerState>,
    Query(params): Query<SummaryGet>,
) -> Result<Json<Vec<CategorySummary>>, ServerError> {
    let query = to_query(params, Utc::now().date_naive())?;
    let categories = state.engine.category_summary(query).await?;
    Ok(Json(categories.into_iter().map(category_view).collect()))
}
