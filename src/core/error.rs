use axum::BoxError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Malformed token")]
    MalformedToken,
    #[error("Invalid token signature")]
    InvalidTokenSignature,
    #[error("Expired token")]
    ExpiredToken,
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not found or access denied")]
    NotFoundOrDenied,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, message) = match &self {
            Error::Sql(_) | Error::Jwt(_) | Error::Bcrypt(_) | Error::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            // all token verification failures share one response body
            Error::MalformedToken | Error::InvalidTokenSignature | Error::ExpiredToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token")
            }
            Error::NoCredentials => (StatusCode::UNAUTHORIZED, "No credentials provided"),
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::NotFoundOrDenied => (StatusCode::NOT_FOUND, "Not found or access denied"),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            Error::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid username"),
            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email"),
            Error::InvalidPassword(message) => (StatusCode::BAD_REQUEST, message.as_str()),
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

pub(crate) async fn handle_middleware_errors(err: BoxError) -> (StatusCode, &'static str) {
    tracing::error!("Unhandled error: {:?}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn parts_of(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn token_failures_are_indistinguishable() {
        let (malformed_status, malformed_body) =
            parts_of(Error::MalformedToken.into_response()).await;
        let (signature_status, signature_body) =
            parts_of(Error::InvalidTokenSignature.into_response()).await;
        let (expired_status, expired_body) = parts_of(Error::ExpiredToken.into_response()).await;

        assert_eq!(malformed_status, StatusCode::UNAUTHORIZED);
        assert_eq!(signature_status, StatusCode::UNAUTHORIZED);
        assert_eq!(expired_status, StatusCode::UNAUTHORIZED);

        assert_eq!(malformed_body, signature_body);
        assert_eq!(signature_body, expired_body);
    }

    #[tokio::test]
    async fn ownership_failure_maps_to_404() {
        let (status, body) = parts_of(Error::NotFoundOrDenied.into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"message":"Not found or access denied"}"#);
    }

    #[tokio::test]
    async fn missing_role_maps_to_403() {
        let (status, _) = parts_of(Error::Forbidden.into_response()).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn duplicate_user_maps_to_409() {
        let (status, _) = parts_of(Error::UserAlreadyExists.into_response()).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn internal_classes_share_a_generic_500() {
        let (internal_status, internal_body) = parts_of(Error::Internal.into_response()).await;
        let (sql_status, sql_body) =
            parts_of(Error::Sql(sqlx::Error::RowNotFound).into_response()).await;

        assert_eq!(internal_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(sql_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal_body, sql_body);
    }
}
