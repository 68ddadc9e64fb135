//! Session-cookie identity extractor (the access gate).

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use herdbook_domain::user::UserRole;

use crate::cookie::SESSION_COOKIE;
use crate::token::validate_session_token;

/// HMAC secret for session-token validation, made available to the extractor
/// via `FromRef` on the application state.
#[derive(Debug, Clone)]
pub struct TokenSecret(pub String);

/// Caller identity verified from the session cookie.
///
/// Extracting this on a route is what makes the route protected: a missing,
/// invalid, or expired token rejects with a 401 envelope before the handler
/// runs. Handlers receive the identity as an explicit argument; nothing is
/// stashed in request extensions.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
}

/// 401 rejection carrying the `{success, message}` envelope.
#[derive(Debug)]
pub struct Unauthorized {
    message: &'static str,
}

impl Unauthorized {
    fn missing_token() -> Self {
        Self {
            message: "Unauthorized: no session token provided",
        }
    }

    fn invalid_token() -> Self {
        Self {
            message: "Unauthorized: invalid or expired session token",
        }
    }
}

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenSecret: FromRef<S>,
{
    type Rejection = Unauthorized;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let token_value = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned());

        async move {
            let token_value = token_value.ok_or_else(Unauthorized::missing_token)?;
            let info = validate_session_token(&token_value, &secret.0)
                .map_err(|_| Unauthorized::invalid_token())?;
            Ok(Self {
                user_id: info.user_id,
                name: info.name,
                role: info.role,
            })
        }
    }
}
