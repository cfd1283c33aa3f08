use axum::Json;
use tracing::instrument;

use crate::core::error::Error;

/// Role enforcement happens in the route policy layer; by the time this
/// handler runs the caller holds the ADMIN role.
#[instrument]
pub(crate) async fn only() -> Result<Json<&'static str>, Error> {
    Ok(Json("You are an admin!"))
}
