use axum::extract::{Extension, Json, Path, Query, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::Principal;
use crate::types::{request, response};

#[instrument(skip(state, principal))]
pub(crate) async fn summary(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(budget_id): Path<i32>,
) -> Result<Json<response::BudgetSummary>, Error> {
    let summary = state
        .analytics_controller
        .summary(budget_id, &principal)
        .await?;

    Ok(Json(summary))
}

#[instrument(skip(state, principal))]
pub(crate) async fn by_category(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(budget_id): Path<i32>,
    Query(params): Query<request::KindParams>,
) -> Result<Json<Vec<response::CategorySummary>>, Error> {
    let summaries = state
        .analytics_controller
        .sum_by_category(budget_id, params.kind, &principal)
        .await?;

    Ok(Json(summaries))
}

#[instrument(skip(state, principal))]
pub(crate) async fn by_month(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(budget_id): Path<i32>,
    Query(params): Query<request::KindParams>,
) -> Result<Json<Vec<response::MonthlySummary>>, Error> {
    let summaries = state
        .analytics_controller
        .sum_by_month(budget_id, params.kind, &principal)
        .await?;

    Ok(Json(summaries))
}
