use axum::extract::{Extension, Json, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::Principal;
use crate::types::{request, response};

#[instrument(skip(state, principal))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(budget_id): Path<i32>,
    Json(params): Json<request::TransactionData>,
) -> Result<(StatusCode, Json<response::Transaction>), Error> {
    let transaction = state
        .transaction_controller
        .add(budget_id, &principal, &params)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[instrument(skip(state, principal))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(budget_id): Path<i32>,
) -> Result<Json<Vec<response::Transaction>>, Error> {
    let transactions = state
        .transaction_controller
        .list(budget_id, &principal)
        .await?;

    Ok(Json(transactions))
}

#[instrument(skip(state, principal))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((budget_id, transaction_id)): Path<(i32, i32)>,
    Json(params): Json<request::TransactionData>,
) -> Result<Json<response::Transaction>, Error> {
    let transaction = state
        .transaction_controller
        .update(transaction_id, &principal, &params)
        .await?;

    Ok(Json(transaction))
}

#[instrument(skip(state, principal))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((budget_id, transaction_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Error> {
    state
        .transaction_controller
        .delete(transaction_id, &principal)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
