use axum::extract::{Extension, Json, Path, State};
use axum::http::StatusCode;
use axum_macros::debug_handler;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::Principal;
use crate::types::{request, response};

#[debug_handler]
#[instrument(skip(state, principal))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(params): Json<request::BudgetData>,
) -> Result<(StatusCode, Json<response::Budget>), Error> {
    let budget = state
        .budget_controller
        .create(&principal, &params.name, params.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

#[instrument(skip(state, principal))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<response::Budget>>, Error> {
    let budgets = state.budget_controller.list(&principal).await?;

    Ok(Json(budgets))
}

#[instrument(skip(state, principal))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> Result<Json<response::Budget>, Error> {
    let budget = state.budget_controller.get(id, &principal).await?;

    Ok(Json(budget))
}

#[instrument(skip(state, principal))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
    Json(params): Json<request::BudgetData>,
) -> Result<Json<response::Budget>, Error> {
    let budget = state
        .budget_controller
        .update(id, &principal, &params.name, params.amount)
        .await?;

    Ok(Json(budget))
}

#[instrument(skip(state, principal))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    state.budget_controller.delete(id, &principal).await?;

    Ok(StatusCode::NO_CONTENT)
}
