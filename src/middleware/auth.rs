use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Error;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i32>,
    pub exp: usize,
}

fn bearer_token(req: &Request) -> Result<&str, Error> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(Error::Unauthorized("Not authenticated".to_string()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("Malformed authorization header".to_string()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("Unsupported authorization scheme".to_string()));
    };
    Ok(token)
}

async fn require_role(state: AppState, mut req: Request, next: Next, role: Role) -> Response {
    let claims = match bearer_token(&req).and_then(|token| state.tokens.verify(token)) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, path = %req.uri().path(), "rejected credentials");
            return e.into_response();
        }
    };

    if claims.role != role {
        tracing::warn!(
            user = %claims.sub,
            role = claims.role.as_str(),
            required = role.as_str(),
            "role not permitted"
        );
        return Error::Forbidden(format!("Only {}s can access this resource", role.as_str()))
            .into_response();
    }

    req.extensions_mut().insert(claims);
    next.run(req).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(state, req, next, Role::Admin).await
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_role(state, req, next, Role::Teacher).await
}
