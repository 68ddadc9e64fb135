use axum::response::IntoResponse;
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use herdbook_auth_types::cookie::set_session_cookie;
use herdbook_core::response::Envelope;
use herdbook_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::user::{LoginInput, LoginUseCase, SignUpInput, SignUpUseCase};

/// Account view returned to clients. The password hash never leaves the
/// storage layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub pincode: String,
    pub farm_name: Option<String>,
    pub location: Option<String>,
    #[serde(serialize_with = "herdbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            phone: user.phone,
            role: user.role,
            pincode: user.pincode,
            farm_name: user.farm_name,
            location: user.location,
            created_at: user.created_at,
        }
    }
}

// ── POST /api/user/signup ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub role: String,
    pub pincode: String,
    pub farm_name: Option<String>,
    pub location: Option<String>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SignUpUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(SignUpInput {
            name: body.name,
            phone: body.phone,
            password: body.password,
            role: body.role,
            pincode: body.pincode,
            farm_name: body.farm_name,
            location: body.location,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            "User registered successfully",
            UserResponse::from(user),
        )),
    ))
}

// ── POST /api/user/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            phone: body.phone,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, out.token);
    Ok((
        StatusCode::OK,
        jar,
        Json(Envelope::ok(
            "Login successful",
            UserResponse::from(out.user),
        )),
    ))
}
