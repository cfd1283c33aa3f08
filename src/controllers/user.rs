use chrono::Duration;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation};
use regex::Regex;
use sqlx::PgPool;

use crate::core::error::{self, Error};
use crate::types::user::{Claims, Credential};
use crate::utils::auth::{decode_jwt, encode_jwt, validation};

pub(crate) const DEFAULT_ROLE: &str = "USER";

#[derive(Clone)]
pub(crate) struct UserController {
    pool: PgPool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
    username_pattern: Regex,
    email_pattern: Regex,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(
        pool: PgPool,
        jwt_secret: &str,
        token_ttl_secs: i64,
    ) -> Result<Self, error::ConfigError> {
        Ok(Self {
            pool,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: validation(),
            token_ttl: Duration::seconds(token_ttl_secs),
            username_pattern: Regex::new(r"^[a-zA-Z0-9_-]{3,20}$")?,
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
        })
    }

    pub(crate) async fn find_credential(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, Error> {
        match sqlx::query_as::<_, Credential>(
            "SELECT id, username, email, password_hash, roles FROM users WHERE username = $1;",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        {
            Ok(credential) => Ok(Some(credential)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), Error> {
        if !self.username_pattern.is_match(username) {
            return Err(Error::InvalidUsername);
        }

        if !self.email_pattern.is_match(email) {
            return Err(Error::InvalidEmail);
        }

        if password.len() < 8 {
            return Err(Error::InvalidPassword(
                "Password must be at least 8 characters".to_owned(),
            ));
        }

        let password_hash = self.hash(password)?;

        match sqlx::query(
            "INSERT INTO users (username, email, password_hash, roles) VALUES ($1, $2, $3, $4);",
        )
        .bind(username)
        .bind(email)
        .bind(&password_hash)
        .bind(sqlx::types::Json(vec![DEFAULT_ROLE.to_string()]))
        .execute(&self.pool)
        .await
        {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::UserAlreadyExists)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    /// Unknown usernames and wrong passwords fail the same way.
    pub(crate) async fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        let credential = self
            .find_credential(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !bcrypt::verify(password, &credential.password_hash)? {
            return Err(Error::InvalidCredentials);
        }

        self.issue(&credential.username, &credential.roles)
    }

    pub(crate) fn issue(&self, username: &str, roles: &[String]) -> Result<String, Error> {
        encode_jwt(username, roles, &self.encoding_key, self.token_ttl)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode_jwt(token, &self.decoding_key, &self.validation)
    }

    fn hash(&self, value: &str) -> Result<String, Error> {
        bcrypt::hash(value, 12).map_err(Error::Bcrypt)
    }
}
