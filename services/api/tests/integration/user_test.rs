use axum_extra::extract::cookie::CookieJar;

use herdbook_api::error::ApiError;
use herdbook_api::usecase::user::{
    LoginInput, LoginUseCase, SignUpInput, SignUpUseCase,
};
use herdbook_auth_types::cookie::{SESSION_COOKIE, set_session_cookie};
use herdbook_auth_types::token::validate_session_token;
use herdbook_domain::user::UserRole;

use crate::helpers::{MockUserRepo, TEST_JWT_SECRET, test_user};

fn signup_input(phone: &str) -> SignUpInput {
    SignUpInput {
        name: "Ramesh Patel".into(),
        phone: phone.into(),
        password: "secret123".into(),
        role: "farmer".into(),
        pincode: "560001".into(),
        farm_name: Some("Green Pastures".into()),
        location: None,
    }
}

// ── Signup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_signup_with_hashed_password() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let usecase = SignUpUseCase { repo };
    let user = usecase.execute(signup_input("9876543210")).await.unwrap();

    assert_eq!(user.role, UserRole::Farmer);
    assert_ne!(user.password_hash, "secret123");
    assert!(bcrypt::verify("secret123", &user.password_hash).unwrap());

    let stored = users.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].phone, "9876543210");
}

#[tokio::test]
async fn should_reject_duplicate_phone_with_conflict() {
    let usecase = SignUpUseCase {
        repo: MockUserRepo::new(vec![test_user(UserRole::Farmer)]),
    };
    let result = usecase.execute(signup_input("9876543210")).await;
    assert!(matches!(result, Err(ApiError::PhoneAlreadyRegistered)));
}

#[tokio::test]
async fn should_reject_invalid_signup_fields() {
    let usecase = SignUpUseCase {
        repo: MockUserRepo::empty(),
    };
    let mut input = signup_input("9876543210");
    input.phone = "12345".into();
    input.pincode = "12".into();

    let result = usecase.execute(input).await;
    match result {
        Err(ApiError::Validation(fields)) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
            assert_eq!(names, vec!["phone", "pincode"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_after_signup_and_issue_session_cookie() {
    let repo = MockUserRepo::empty();

    let signup = SignUpUseCase { repo: repo.share() };
    let created = signup.execute(signup_input("9876543210")).await.unwrap();

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let out = login
        .execute(LoginInput {
            phone: "9876543210".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap();

    assert_eq!(out.user.id, created.id);

    // The token round-trips through validation with the same identity.
    let info = validate_session_token(&out.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, created.id);
    assert_eq!(info.name, "Ramesh Patel");
    assert_eq!(info.role, UserRole::Farmer);

    // And it rides in the httpOnly session cookie.
    let jar = set_session_cookie(CookieJar::new(), out.token.clone());
    let cookie = jar.get(SESSION_COOKIE).unwrap();
    assert_eq!(cookie.value(), out.token);
    assert!(cookie.http_only().unwrap_or(false));
}

#[tokio::test]
async fn should_return_404_for_unknown_phone() {
    let usecase = LoginUseCase {
        repo: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(LoginInput {
            phone: "9876543210".into(),
            password: "secret123".into(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn should_return_401_for_wrong_password() {
    let usecase = LoginUseCase {
        repo: MockUserRepo::new(vec![test_user(UserRole::Farmer)]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = usecase
        .execute(LoginInput {
            phone: "9876543210".into(),
            password: "wrong-password".into(),
        })
        .await;
    assert!(matches!(result, Err(ApiError::InvalidPassword)));
}
