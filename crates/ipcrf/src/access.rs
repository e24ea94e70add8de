//! Role gate for administrator routes.
//!
//! Authentication happens upstream; the authenticating proxy forwards the resolved user through
//! the `x-actor-id` and `x-actor-role` headers and this module only enforces the role.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::UserId;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Teacher,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "teacher" => Some(Self::Teacher),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }
}

/// The authenticated user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

/// Extractor that only succeeds for administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminActor(pub Actor);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessRejection {
    #[error("missing or malformed actor identity")]
    Unauthenticated,
    #[error("role '{0}' may not access administrator routes")]
    Forbidden(&'static str),
}

impl IntoResponse for AccessRejection {
    fn into_response(self) -> Response {
        let status = match self {
            AccessRejection::Unauthenticated => StatusCode::UNAUTHORIZED,
            AccessRejection::Forbidden(_) => StatusCode::FORBIDDEN,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

pub fn actor_from_parts(parts: &Parts) -> Result<Actor, AccessRejection> {
    let id = header(parts, ACTOR_ID_HEADER)
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .ok_or(AccessRejection::Unauthenticated)?;
    let role = header(parts, ACTOR_ROLE_HEADER)
        .and_then(Role::parse)
        .ok_or(AccessRejection::Unauthenticated)?;

    Ok(Actor {
        id: UserId(id),
        role,
    })
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminActor
where
    S: Send + Sync,
{
    type Rejection = AccessRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = actor_from_parts(parts)?;
        if !actor.role.is_admin() {
            return Err(AccessRejection::Forbidden(actor.role.label()));
        }
        Ok(AdminActor(actor))
    }
}
