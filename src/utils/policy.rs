use axum::{body::Body, extract::Request, http::Response, middleware::Next};

use crate::core::error::Error;
use crate::types::user::Principal;
use crate::utils::auth::{is_public, prefix_matches};

pub(crate) const ADMIN_ROLE: &str = "ADMIN";

/// Ordered role requirements by path prefix; first match wins. Paths with no
/// entry require nothing beyond authentication.
const ROUTE_POLICY: &[(&str, Option<&str>)] = &[("/admin", Some(ADMIN_ROLE))];

pub(crate) fn required_role(path: &str) -> Option<&'static str> {
    ROUTE_POLICY
        .iter()
        .find(|(prefix, _)| prefix_matches(prefix, path))
        .and_then(|(_, role)| *role)
}

/// Runs after `authenticate`, so every non-public request carries a
/// Principal by the time it gets here.
pub(crate) async fn authorize_route(request: Request, next: Next) -> Result<Response<Body>, Error> {
    if is_public(request.method(), request.uri().path()) {
        return Ok(next.run(request).await);
    }

    if let Some(role) = required_role(request.uri().path()) {
        let principal = request
            .extensions()
            .get::<Principal>()
            .ok_or(Error::Forbidden)?;

        if !principal.has_role(role) {
            return Err(Error::Forbidden);
        }
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&str]) -> Principal {
        Principal {
            username: "alice".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }

    #[test]
    fn admin_prefix_requires_admin_role() {
        assert_eq!(required_role("/admin"), Some(ADMIN_ROLE));
        assert_eq!(required_role("/admin/only"), Some(ADMIN_ROLE));
    }

    #[test]
    fn other_paths_require_no_role() {
        assert_eq!(required_role("/budgets"), None);
        assert_eq!(required_role("/budgets/1/transactions"), None);
        assert_eq!(required_role("/administrator"), None);
    }

    #[test]
    fn role_membership_decides_access() {
        assert!(principal(&["USER", "ADMIN"]).has_role(ADMIN_ROLE));
        assert!(!principal(&["USER"]).has_role(ADMIN_ROLE));
    }
}
