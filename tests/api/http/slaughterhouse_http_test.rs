//! Slaughterhouse HTTP tests

use super::{build_test_router, delete_json, get_json, post_json, put_json, TestAppState};
use crate::api::create_test_slaughterhouse;
use axum::http::StatusCode;
use chrono::Utc;
use meatsafe_core::api::{MessageResponse, SuccessResponse};
use meatsafe_core::domain::{
    NewSeizureRecord, SeizedPart, SeizureType, Slaughterhouse, Species, Unit, UserRole,
};
use meatsafe_core::repository::SeizureRepository;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_slaughterhouse_crud() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, created): (StatusCode, Option<SuccessResponse<Slaughterhouse>>) = post_json(
        &app,
        "/api/slaughterhouses",
        &json!({"name": "Abattoir Central", "code": "ATL001", "location": "Casablanca"}),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = created.unwrap().data;
    assert_eq!(created.code, "ATL001");
    assert_eq!(created.location.as_deref(), Some("Casablanca"));

    let path = format!("/api/slaughterhouses/{}", created.id);

    let (status, fetched): (StatusCode, Option<SuccessResponse<Slaughterhouse>>) =
        get_json(&app, &path, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched.unwrap().data.name, "Abattoir Central");

    let (status, updated): (StatusCode, Option<SuccessResponse<Slaughterhouse>>) = put_json(
        &app,
        &path,
        &json!({"name": "Abattoir Nord"}),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = updated.unwrap().data;
    assert_eq!(updated.name, "Abattoir Nord");
    assert_eq!(updated.code, "ATL001");

    let (status, list): (StatusCode, Option<SuccessResponse<Vec<Slaughterhouse>>>) =
        get_json(&app, "/api/slaughterhouses", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.unwrap().data.len(), 1);

    let (status, message): (StatusCode, Option<MessageResponse>) =
        delete_json(&app, &path, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message.unwrap().message, "Slaughterhouse deleted");

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, &path, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_code_is_409() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    state
        .slaughterhouse_repo
        .add_slaughterhouse(create_test_slaughterhouse("Abattoir Central", "ATL001"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/slaughterhouses",
        &json!({"name": "Another", "code": "ATL001"}),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["error"], "conflict");
}

#[tokio::test]
async fn test_update_to_taken_code_is_409() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let first = create_test_slaughterhouse("Abattoir Central", "ATL001");
    let second = create_test_slaughterhouse("Abattoir Nord", "ATL002");
    state.slaughterhouse_repo.add_slaughterhouse(first).await;
    state
        .slaughterhouse_repo
        .add_slaughterhouse(second.clone())
        .await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        &format!("/api/slaughterhouses/{}", second.id),
        &json!({"code": "ATL001"}),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_update_is_422() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    state
        .slaughterhouse_repo
        .add_slaughterhouse(slaughterhouse.clone())
        .await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        &format!("/api/slaughterhouses/{}", slaughterhouse.id),
        &json!({}),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_with_seizures_is_409() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    state
        .slaughterhouse_repo
        .add_slaughterhouse(slaughterhouse.clone())
        .await;
    state
        .seizure_repo
        .create(&NewSeizureRecord {
            seizure_datetime: Utc::now(),
            species: Species::Bovine,
            seized_part: SeizedPart::Liver,
            seizure_type: SeizureType::Partial,
            reason: "parasites".to_string(),
            quantity: 2.0,
            unit: Unit::Kg,
            notes: None,
            photos: vec![],
            slaughterhouse_id: slaughterhouse.id,
            inspector_id: uuid::Uuid::new_v4().into(),
        })
        .await
        .unwrap();
    let app = build_test_router(state);

    let path = format!("/api/slaughterhouses/{}", slaughterhouse.id);
    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, &path, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, &path, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_slaughterhouse_is_404() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = get_json(
        &app,
        &format!("/api/slaughterhouses/{}", uuid::Uuid::new_v4()),
        Some(&admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["error"], "not_found");
}

#[tokio::test]
async fn test_malformed_id_is_400_json() {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/slaughterhouses/not-a-uuid", Some(&admin_token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "bad_request");
}

#[tokio::test]
async fn test_inspector_cannot_manage_slaughterhouses() {
    let state = TestAppState::new();
    let slaughterhouse = create_test_slaughterhouse("Abattoir Central", "ATL001");
    let (_, token) = state
        .seed_user(
            "inspector@meatsafe.test",
            UserRole::Inspector,
            Some(slaughterhouse.id),
        )
        .await;
    state
        .slaughterhouse_repo
        .add_slaughterhouse(slaughterhouse)
        .await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/slaughterhouses", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/slaughterhouses",
        &json!({"name": "Rogue", "code": "RG001"}),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
