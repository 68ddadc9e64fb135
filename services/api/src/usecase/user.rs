use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use herdbook_auth_types::token::{SESSION_TOKEN_EXP, SessionClaims};
use herdbook_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{
    MIN_NAME_LEN, MIN_PASSWORD_LEN, User, is_valid_phone, is_valid_pincode,
};
use crate::error::{ApiError, FieldError};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a 7-day session token for a logged-in user.
pub fn issue_session_token(user: &User, secret: &str) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        role: user.role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

// ── SignUp ───────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub role: String,
    pub pincode: String,
    pub farm_name: Option<String>,
    pub location: Option<String>,
}

fn validate_signup(input: &SignUpInput) -> Result<UserRole, ApiError> {
    let mut errors = Vec::new();
    if input.name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 3 characters long",
        ));
    }
    if !is_valid_phone(&input.phone) {
        errors.push(FieldError::new(
            "phone",
            "Phone number must be exactly 10 digits",
        ));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }
    let role = UserRole::from_str_opt(&input.role);
    if role.is_none() {
        errors.push(FieldError::new("role", "Role must be either farmer or vet"));
    }
    if !is_valid_pincode(&input.pincode) {
        errors.push(FieldError::new(
            "pincode",
            "Pincode must be exactly 6 digits",
        ));
    }
    match role {
        Some(role) if errors.is_empty() => Ok(role),
        _ => Err(ApiError::Validation(errors)),
    }
}

pub struct SignUpUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SignUpUseCase<R> {
    pub async fn execute(&self, input: SignUpInput) -> Result<User, ApiError> {
        let role = validate_signup(&input)?;

        if self.repo.find_by_phone(&input.phone).await?.is_some() {
            return Err(ApiError::PhoneAlreadyRegistered);
        }

        let password_hash =
            bcrypt::hash(&input.password, bcrypt::DEFAULT_COST).context("hash password")?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name.trim().to_owned(),
            phone: input.phone,
            password_hash,
            role,
            pincode: input.pincode,
            farm_name: input.farm_name,
            location: input.location,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

pub struct LoginOutput {
    pub user: User,
    pub token: String,
    pub token_exp: u64,
}

fn validate_login(input: &LoginInput) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if !is_valid_phone(&input.phone) {
        errors.push(FieldError::new(
            "phone",
            "Phone number must be exactly 10 digits",
        ));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        validate_login(&input)?;

        let user = self
            .repo
            .find_by_phone(&input.phone)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let password_ok =
            bcrypt::verify(&input.password, &user.password_hash).context("verify password")?;
        if !password_ok {
            return Err(ApiError::InvalidPassword);
        }

        let (token, token_exp) = issue_session_token(&user, &self.jwt_secret)?;
        Ok(LoginOutput {
            user,
            token,
            token_exp,
        })
    }
}
