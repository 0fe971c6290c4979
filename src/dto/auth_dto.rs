use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Credentials passed as `?username=&password=` by older clients.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// A JSON body wins over query parameters.
    pub fn from_body_or_query(body: Option<LoginRequest>, query: LoginQuery) -> Result<Self> {
        if let Some(body) = body {
            return Ok(body);
        }
        match (query.username, query.password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(Error::BadRequest(
                "username and password are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
