use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};

#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(params): Json<request::RegistrationData>,
) -> Result<impl IntoResponse, Error> {
    state
        .user_controller
        .register(&params.username, &params.email, &params.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(response::Message::new("User registered successfully")),
    ))
}

#[instrument(skip_all)]
pub(crate) async fn sign_in(
    State(state): State<AppState>,
    Json(params): Json<request::LoginData>,
) -> Result<Json<response::Token>, Error> {
    let token = state
        .user_controller
        .login(&params.username, &params.password)
        .await?;

    Ok(Json(response::Token::new(token)))
}
