//! Recurring rules API endpoints

use api_types::recurring::{RecurringNew, RecurringRun, RecurringView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    ServerError,
    convert::{frequency_from_api, kind_from_api, recurring_view},
    server::ServerState,
};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RecurringNew>,
) -> Result<(StatusCode, Json<RecurringView>), ServerError> {
    let cmd = engine::RecurringRuleCmd {
        kind: kind_from_api(payload.kind),
        amount_minor: payload.amount,
        account_id: payload.account_id,
        destination_account_id: payload.destination_account_id,
        category: payload.category,
        description: payload.description,
        frequency: frequency_from_api(payload.frequency),
        interval: payload.interval.unwrap_or(1),
        start_date: payload.start_date.with_timezone(&Utc),
    };
    let rule = state.engine.create_recurring_rule(cmd).await?;
    Ok((StatusCode::CREATED, Json(recurring_view(rule))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<RecurringView>>, ServerError> {
    let rules = state.engine.list_recurring_rules().await?;
    Ok(Json(rules.into_iter().map(recurring_view).collect()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_recurring_rule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Run a scheduler tick now, outside the daily trigger.
pub async fn run(State(state): State<ServerState>) -> Result<Json<RecurringRun>, ServerError> {
    let processed = state.engine.run_recurring_tick(Utc::now()).await?;
    Ok(Json(RecurringRun { processed }))
}
