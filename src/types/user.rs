use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub(crate) type Username = String;

/// Identity attached to a request after its token has been verified.
/// Rebuilt from the token on every request, never persisted.
#[derive(Clone, Debug)]
pub(crate) struct Principal {
    pub(crate) username: Username,
    pub(crate) roles: HashSet<String>,
}

impl Principal {
    pub(crate) fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub(crate) struct Credential {
    pub(crate) id: i32,
    pub(crate) username: Username,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) roles: sqlx::types::Json<Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) exp: usize,
    pub(crate) iat: usize,
    pub(crate) sub: String,
    pub(crate) roles: Vec<String>,
    pub(crate) iss: String,
}

impl Claims {
    pub(crate) fn principal(&self) -> Principal {
        Principal {
            username: self.sub.clone(),
            roles: self.roles.iter().cloned().collect(),
        }
    }
}
