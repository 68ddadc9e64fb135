//! Session-token (JWT) claims and validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use herdbook_domain::user::UserRole;

/// Session-token lifetime in seconds (7 days). Also the cookie Max-Age.
pub const SESSION_TOKEN_EXP: u64 = 604800;

/// Verified identity extracted from a session token.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Errors returned by [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token issuance (login) and validation (access
/// gate).
///
/// | Field  | JWT claim | Meaning                           |
/// |--------|-----------|-----------------------------------|
/// | `sub`  | `sub`     | user ID (UUID string)             |
/// | `name` | custom    | display name, echoed to the UI    |
/// | `role` | custom    | `"farmer"` or `"vet"`             |
/// | `exp`  | `exp`     | expiration, seconds since epoch   |
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Decode and validate a session JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates minor clock skew.
fn decode_jwt(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a session-cookie value, returning the parsed identity.
///
/// The access gate calls this on every protected request to extract the user
/// identity from the JWT cookie.
pub fn validate_session_token(cookie_value: &str, secret: &str) -> Result<SessionInfo, AuthError> {
    let claims = decode_jwt(cookie_value, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        name: claims.name,
        role: claims.role,
        exp: claims.exp,
    })
}
