//! Transactions API endpoints

use api_types::transaction::{
    TransactionList, TransactionListResponse, TransactionNew, TransactionView, TransferNew,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    ServerError,
    convert::{kind_from_api, transaction_view},
    server::ServerState,
};

fn to_cmd(payload: TransactionNew) -> engine::TransactionCmd {
    engine::TransactionCmd {
        kind: kind_from_api(payload.kind),
        amount_minor: payload.amount,
        account_id: payload.account_id,
        destination_account_id: payload.destination_account_id,
        category: payload.category,
        description: payload.description,
        date: payload.date.with_timezone(&Utc),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state.engine.create_transaction(to_cmd(payload)).await?;
    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn transfer(
    State(state): State<ServerState>,
    Json(payload): Json<TransferNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let cmd = engine::TransferCmd {
        from_account_id: payload.from_account_id,
        to_account_id: payload.to_account_id,
        amount_minor: payload.amount,
        category: payload.category,
        description: payload.description,
        date: payload.date.with_timezone(&Utc),
    };
    let tx = state.engine.create_transfer(cmd).await?;
    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(id).await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionNew>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.update_transaction(id, to_cmd(payload)).await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionList>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let parse = |value: Option<String>| value.and_then(|v| v.trim().parse::<i64>().ok());
    let page = engine::Page::new(parse(query.page), parse(query.limit));
    let page = state.engine.list_transactions(page).await?;
    Ok(Json(TransactionListResponse {
        data: page.data.into_iter().map(transaction_view).collect(),
        page: page.page,
        limit: page.limit,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}
