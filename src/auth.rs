//! Caller identity as forwarded by the auth proxy in front of this service.
//!
//! Sign-in happens elsewhere; we only read the resolved user id and role from
//! request headers and check roles at each protected handler.

use std::str::FromStr;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(AppError::Unauthorized(format!("unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub role: Role,
}

/// Admins pass every check; users pass only user-level ones.
pub fn has_role(session: &Session, required: Role) -> bool {
    match (session.role, required) {
        (Role::Admin, _) => true,
        (Role::User, Role::User) => true,
        (Role::User, Role::Admin) => false,
    }
}

impl Session {
    pub fn require(&self, required: Role) -> Result<(), AppError> {
        if has_role(self, required) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "user {} lacks the {:?} role",
                self.uid, required
            )))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uid = header_value(parts, USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("missing session".to_string()))?
            .to_string();
        let role = header_value(parts, USER_ROLE_HEADER)
            .ok_or_else(|| AppError::Unauthorized("missing role".to_string()))?
            .parse::<Role>()?;

        Ok(Session { uid, role })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
