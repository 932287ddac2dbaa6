use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// Claims carried by a bearer token. `sub` is the doctor id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request by the auth middleware.
///
/// `Anonymous` only ever appears behind an optional gate; a required gate
/// rejects the request before the handler runs.
#[derive(Debug, Clone)]
pub enum CallerContext {
    Doctor { doctor_id: String },
    Anonymous,
}

impl CallerContext {
    pub fn doctor_id(&self) -> Option<&str> {
        match self {
            CallerContext::Doctor { doctor_id } => Some(doctor_id),
            CallerContext::Anonymous => None,
        }
    }
}
