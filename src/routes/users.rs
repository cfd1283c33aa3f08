use axum::Json;
use axum::extract::Extension;
use tracing::instrument;

use crate::core::error::Error;
use crate::types::response;
use crate::types::user::Principal;

#[instrument(skip_all)]
pub(crate) async fn me(
    Extension(principal): Extension<Principal>,
) -> Result<Json<response::CurrentUser>, Error> {
    Ok(Json(response::CurrentUser {
        username: principal.username,
    }))
}
