use axum::{
    Router,
    routing::{delete, get, post},
};

use std::sync::Arc;

use crate::{accounts, recurring, summary, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route(
            "/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::remove),
        )
        .route("/transfers", post(transactions::transfer))
        .route("/summary", get(summary::get))
        .route("/summary/categories", get(summary::categories))
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route("/recurring", get(recurring::list).post(recurring::create))
        .route("/recurring/{id}", delete(recurring::remove))
        .route("/recurring/run", post(recurring::run));

    Router::new().nest("/api", api).with_state(state)
}

pub async fn run_with_listener(
    engine: Arc<Engine>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState { engine };

    axum::serve(listener, router(state)).await
}
