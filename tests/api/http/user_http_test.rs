//! User directory HTTP tests

use super::{build_test_router, get_json, post_json, post_login, TestAppState};
use crate::api::create_test_slaughterhouse;
use axum::http::StatusCode;
use meatsafe_core::api::SuccessResponse;
use meatsafe_core::domain::{User, UserRole};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_admin_creates_inspector_who_can_log_in() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    state
        .slaughterhouse_repo
        .add_slaughterhouse(slaughterhouse.clone())
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<User>>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": " Inspector@MeatSafe.test ",
            "password": "inspect-me-please",
            "role": "inspector",
            "slaughterhouse_id": slaughterhouse.id,
        }),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body.unwrap().data;
    assert_eq!(created.email, "inspector@meatsafe.test");
    assert_eq!(created.role, UserRole::Inspector);
    assert_eq!(created.slaughterhouse_id, Some(slaughterhouse.id));

    let (status, login): (StatusCode, Option<Value>) = post_login(
        &app,
        "username=inspector%40meatsafe.test&password=inspect-me-please",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login.unwrap()["user"]["role"], "inspector");
}

#[tokio::test]
async fn test_create_inspector_without_slaughterhouse_is_422() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": "loose@meatsafe.test",
            "password": "inspect-me-please",
            "role": "inspector",
        }),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.unwrap()["error"], "validation");
}

#[tokio::test]
async fn test_create_user_with_unknown_slaughterhouse_is_404() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": "orphan@meatsafe.test",
            "password": "inspect-me-please",
            "role": "inspector",
            "slaughterhouse_id": uuid::Uuid::new_v4(),
        }),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_duplicate_email_is_409() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": "ADMIN@meatsafe.test",
            "password": "another-admin-pw",
            "role": "admin",
        }),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["error"], "conflict");
}

#[tokio::test]
async fn test_create_user_short_password_is_422() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": "second-admin@meatsafe.test",
            "password": "short",
            "role": "admin",
        }),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_inspector_cannot_manage_users() {
    let state = TestAppState::new();
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    let (_, inspector_token) = state
        .seed_user(
            "inspector@meatsafe.test",
            UserRole::Inspector,
            Some(slaughterhouse.id),
        )
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/users", Some(&inspector_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["error"], "forbidden");

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/users",
        &json!({
            "email": "sneaky@meatsafe.test",
            "password": "inspect-me-please",
            "role": "admin",
        }),
        Some(&inspector_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_filters_by_role() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    for i in 1..=2 {
        state
            .seed_user(
                &format!("inspector{}@meatsafe.test", i),
                UserRole::Inspector,
                Some(slaughterhouse.id),
            )
            .await;
    }
    let app = build_test_router(state);

    let (status, all): (StatusCode, Option<SuccessResponse<Vec<User>>>) =
        get_json(&app, "/api/users", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.unwrap().data.len(), 3);

    let (status, inspectors): (StatusCode, Option<SuccessResponse<Vec<User>>>) =
        get_json(&app, "/api/users?role=inspector", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    let inspectors = inspectors.unwrap().data;
    assert_eq!(inspectors.len(), 2);
    assert!(inspectors.iter().all(|u| u.role == UserRole::Inspector));
}

#[tokio::test]
async fn test_me_returns_inspector_assignment() {
    let state = TestAppState::new();
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    let (user, token) = state
        .seed_user(
            "inspector@meatsafe.test",
            UserRole::Inspector,
            Some(slaughterhouse.id),
        )
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<SuccessResponse<User>>) =
        get_json(&app, "/api/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let me = body.unwrap().data;
    assert_eq!(me.id, user.id);
    assert_eq!(me.slaughterhouse_id, Some(slaughterhouse.id));
}
