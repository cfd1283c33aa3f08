use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Method, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{self, DecodingKey, EncodingKey, Header, Validation};

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::user::{Claims, Principal};

pub(crate) const ISSUER: &str = "fiscus";

/// Paths reachable without a token. `/docs` is a prefix so generated API
/// documentation can live anywhere under it.
const PUBLIC_PATHS: &[&str] = &["/", "/favicon.ico", "/login", "/register"];
const PUBLIC_PREFIXES: &[&str] = &["/docs"];

pub(crate) fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }

    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|prefix| prefix_matches(prefix, path))
}

pub(crate) fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub(crate) fn bearer_token(header: &http::HeaderValue) -> Result<&str, Error> {
    let header = header.to_str().map_err(|_| Error::NoCredentials)?;

    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(Error::NoCredentials),
    }
}

/// Expiry is compared against the exact current time; the default decoding
/// leeway would let a token outlive its `exp` by a minute.
pub(crate) fn validation() -> Validation {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation
}

pub(crate) fn encode_jwt(
    username: &str,
    roles: &[String],
    key: &EncodingKey,
    ttl: Duration,
) -> Result<String, Error> {
    let current_time = Utc::now();
    let expiration_time = current_time + ttl;

    let claims = Claims {
        exp: expiration_time.timestamp() as usize,
        iat: current_time.timestamp() as usize,
        sub: username.to_string(),
        roles: roles.to_vec(),
        iss: ISSUER.into(),
    };

    Ok(jsonwebtoken::encode(&Header::default(), &claims, key)?)
}

pub(crate) fn decode_jwt(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<Claims, Error> {
    match jsonwebtoken::decode::<Claims>(token, key, validation) {
        Ok(token_data) => Ok(token_data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(Error::ExpiredToken),
            jsonwebtoken::errors::ErrorKind::InvalidSignature => Err(Error::InvalidTokenSignature),
            _ => Err(Error::MalformedToken),
        },
    }
}

pub(crate) async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    if is_public(request.method(), request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let token = bearer_token(header)?;
    let claims = state.user_controller.verify(token)?;

    // the subject must still resolve to a live credential
    if state
        .user_controller
        .find_credential(&claims.sub)
        .await?
        .is_none()
    {
        return Err(Error::Unauthorized);
    }

    // roles come from the token claims; the stored copy is only read again
    // at the next login
    request.extensions_mut().insert(claims.principal());

    Ok(next.run(request).await)
}

/// The single ownership gate every budget and transaction operation goes
/// through after fetching the recorded owner. A missing resource and a
/// foreign owner produce the same error.
pub(crate) fn authorize_owner(owner: Option<&str>, principal: &Principal) -> Result<(), Error> {
    match owner {
        Some(owner) if owner == principal.username => Ok(()),
        _ => Err(Error::NotFoundOrDenied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const SECRET: &str = "unit-test-secret";

    fn keys() -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(SECRET.as_bytes()),
            DecodingKey::from_secret(SECRET.as_bytes()),
        )
    }

    fn issue(username: &str, roles: &[&str], ttl: Duration) -> String {
        let roles: Vec<String> = roles.iter().map(|role| role.to_string()).collect();

        encode_jwt(username, &roles, &keys().0, ttl).unwrap()
    }

    fn principal(username: &str, roles: &[&str]) -> Principal {
        Principal {
            username: username.to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }

    #[test]
    fn verify_returns_issued_claims() {
        let token = issue("alice", &["USER"], Duration::hours(1));
        let claims = decode_jwt(&token, &keys().1, &validation()).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec!["USER".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue("alice", &["USER"], Duration::hours(1));
        let (rest, signature) = token.rsplit_once('.').unwrap();

        let mut flipped = signature.to_string();
        let replacement = if flipped.ends_with('A') { 'B' } else { 'A' };
        flipped.pop();
        flipped.push(replacement);

        let tampered = format!("{}.{}", rest, flipped);

        assert!(matches!(
            decode_jwt(&tampered, &keys().1, &validation()),
            Err(Error::InvalidTokenSignature)
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = issue("alice", &["USER"], Duration::hours(1));
        let mut segments = token.split('.');
        let header = segments.next().unwrap();
        let payload = segments.next().unwrap();
        let signature = segments.next().unwrap();

        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let upgraded = String::from_utf8(decoded).unwrap().replace("USER", "ADMIN");
        let tampered = format!(
            "{}.{}.{}",
            header,
            URL_SAFE_NO_PAD.encode(upgraded.as_bytes()),
            signature
        );

        assert!(matches!(
            decode_jwt(&tampered, &keys().1, &validation()),
            Err(Error::InvalidTokenSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue("alice", &["USER"], Duration::seconds(-5));

        assert!(matches!(
            decode_jwt(&token, &keys().1, &validation()),
            Err(Error::ExpiredToken)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("alice", &["USER"], Duration::hours(1));
        let other = DecodingKey::from_secret(b"some-other-secret");

        assert!(matches!(
            decode_jwt(&token, &other, &validation()),
            Err(Error::InvalidTokenSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        for token in ["", "garbage", "a.b", "a.b.c.d", "not.a.jwt"] {
            assert!(matches!(
                decode_jwt(token, &keys().1, &validation()),
                Err(Error::MalformedToken)
            ));
        }
    }

    #[test]
    fn bearer_extraction() {
        let value = http::HeaderValue::from_static("Bearer abc123");
        assert_eq!(bearer_token(&value).unwrap(), "abc123");

        for bad in ["", "Bearer", "Bearer ", "Token abc123", "abc123"] {
            let value = http::HeaderValue::from_str(bad).unwrap();
            assert!(matches!(bearer_token(&value), Err(Error::NoCredentials)));
        }
    }

    #[test]
    fn public_paths_bypass_authentication() {
        for path in [
            "/",
            "/favicon.ico",
            "/login",
            "/register",
            "/docs",
            "/docs/openapi.json",
        ] {
            assert!(is_public(&Method::POST, path));
        }

        for path in ["/budgets", "/admin/only", "/docsx", "/me"] {
            assert!(!is_public(&Method::GET, path));
        }

        assert!(is_public(&Method::OPTIONS, "/budgets"));
    }

    #[test]
    fn owner_may_act() {
        assert!(authorize_owner(Some("alice"), &principal("alice", &["USER"])).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        assert!(matches!(
            authorize_owner(Some("bob"), &principal("alice", &["USER"])),
            Err(Error::NotFoundOrDenied)
        ));
    }

    #[test]
    fn missing_resource_is_denied_identically() {
        let missing = authorize_owner(None, &principal("alice", &["USER"])).unwrap_err();
        let foreign = authorize_owner(Some("bob"), &principal("alice", &["USER"])).unwrap_err();

        assert!(matches!(missing, Error::NotFoundOrDenied));
        assert!(matches!(foreign, Error::NotFoundOrDenied));
    }
}
