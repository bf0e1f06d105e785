//! Accounts API endpoints

use api_types::account::{AccountNew, AccountView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, convert::account_view, server::ServerState};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let cmd = engine::AccountCmd::new(payload.name, payload.account_type).balance(payload.balance);
    let account = state.engine.create_account(cmd).await?;
    Ok((StatusCode::CREATED, Json(account_view(account))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.accounts().await?;
    Ok(Json(accounts.into_iter().map(account_view).collect()))
}
