//! Seizure ledger HTTP tests

use super::{build_test_router, delete_json, get_json, post_json, TestAppState};
use crate::api::create_test_slaughterhouse;
use axum::http::StatusCode;
use axum::Router;
use meatsafe_core::api::{MessageResponse, SuccessResponse};
use meatsafe_core::domain::{SeizurePage, SeizureRecord, Species, StringUuid, UserRole};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn liver_seizure() -> Value {
    json!({
        "seizure_datetime": "2025-03-10T08:30:00Z",
        "species": "bovine",
        "seized_part": "liver",
        "seizure_type": "partial",
        "reason": "parasites",
        "quantity": 2.0,
        "unit": "kg",
        "photos": ["https://cdn.meatsafe.test/p/1.jpg"],
    })
}

struct Fixture {
    app: Router,
    admin_token: String,
    first_slaughterhouse: StringUuid,
    first_inspector: String,
    second_inspector: String,
}

/// Two slaughterhouses, one inspector at each, plus an admin
async fn two_slaughterhouses() -> Fixture {
    let state = TestAppState::new();
    let admin_token = state.seed_admin().await;

    let first = create_test_slaughterhouse("Abattoir Central", "ATL001");
    let second = create_test_slaughterhouse("Abattoir Nord", "ATL002");
    state
        .slaughterhouse_repo
        .add_slaughterhouse(first.clone())
        .await;
    state
        .slaughterhouse_repo
        .add_slaughterhouse(second.clone())
        .await;

    let (_, first_inspector) = state
        .seed_user("one@meatsafe.test", UserRole::Inspector, Some(first.id))
        .await;
    let (_, second_inspector) = state
        .seed_user("two@meatsafe.test", UserRole::Inspector, Some(second.id))
        .await;

    Fixture {
        app: build_test_router(state),
        admin_token,
        first_slaughterhouse: first.id,
        first_inspector,
        second_inspector,
    }
}

async fn record(app: &Router, token: &str, body: &Value) -> SeizureRecord {
    let (status, created): (StatusCode, Option<SuccessResponse<SeizureRecord>>) =
        post_json(app, "/api/seizures", body, Some(token)).await;
    assert_eq!(status, StatusCode::CREATED);
    created.unwrap().data
}

#[tokio::test]
async fn test_inspector_records_at_own_slaughterhouse() {
    let fx = two_slaughterhouses().await;

    let mut body = liver_seizure();
    // A client-supplied slaughterhouse is ignored
    body["slaughterhouse_id"] = json!(uuid::Uuid::new_v4());
    let created = record(&fx.app, &fx.first_inspector, &body).await;

    assert_eq!(created.slaughterhouse_id, fx.first_slaughterhouse);
    assert_eq!(created.species, Species::Bovine);
    assert_eq!(created.reason, "parasites");
    assert_eq!(created.quantity, 2.0);
    assert_eq!(created.photos, vec!["https://cdn.meatsafe.test/p/1.jpg"]);
}

#[tokio::test]
async fn test_admin_cannot_record_seizures() {
    let fx = two_slaughterhouses().await;

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&fx.app, "/api/seizures", &liver_seizure(), Some(&fx.admin_token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap()["error"], "forbidden");
}

#[tokio::test]
async fn test_create_rejects_invalid_payloads() {
    let fx = two_slaughterhouses().await;

    let mut zero_quantity = liver_seizure();
    zero_quantity["quantity"] = json!(0);
    let mut blank_reason = liver_seizure();
    blank_reason["reason"] = json!("   ");
    let mut missing_species = liver_seizure();
    missing_species.as_object_mut().unwrap().remove("species");
    let mut bad_datetime = liver_seizure();
    bad_datetime["seizure_datetime"] = json!("yesterday");

    for body in [zero_quantity, blank_reason, missing_species, bad_datetime] {
        let (status, response): (StatusCode, Option<Value>) =
            post_json(&fx.app, "/api/seizures", &body, Some(&fx.first_inspector)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body: {}", body);
        assert_eq!(response.unwrap()["error"], "validation");
    }
}

#[tokio::test]
async fn test_unknown_species_is_422_json() {
    let fx = two_slaughterhouses().await;

    let mut body = liver_seizure();
    body["species"] = json!("unicorn");
    let (status, response): (StatusCode, Option<Value>) =
        post_json(&fx.app, "/api/seizures", &body, Some(&fx.first_inspector)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.unwrap()["error"], "validation");
}

#[tokio::test]
async fn test_inspector_list_is_scoped() {
    let fx = two_slaughterhouses().await;
    record(&fx.app, &fx.first_inspector, &liver_seizure()).await;
    record(&fx.app, &fx.first_inspector, &liver_seizure()).await;
    record(&fx.app, &fx.second_inspector, &liver_seizure()).await;

    let (status, page): (StatusCode, Option<SeizurePage>) =
        get_json(&fx.app, "/api/seizures", Some(&fx.first_inspector)).await;
    assert_eq!(status, StatusCode::OK);
    let page = page.unwrap();
    assert_eq!(page.total, 2);
    assert!(page
        .items
        .iter()
        .all(|r| r.slaughterhouse_id == fx.first_slaughterhouse));

    let (status, page): (StatusCode, Option<SeizurePage>) =
        get_json(&fx.app, "/api/seizures", Some(&fx.admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.unwrap().total, 3);
}

#[tokio::test]
async fn test_list_filters_and_paginates_newest_first() {
    let fx = two_slaughterhouses().await;
    for (day, species) in [(1, "bovine"), (2, "ovine"), (3, "bovine"), (4, "bovine")] {
        let mut body = liver_seizure();
        body["seizure_datetime"] = json!(format!("2025-03-0{}T10:00:00Z", day));
        body["species"] = json!(species);
        record(&fx.app, &fx.first_inspector, &body).await;
    }

    let (status, page): (StatusCode, Option<SeizurePage>) = get_json(
        &fx.app,
        "/api/seizures?species=bovine&page=1&page_size=2",
        Some(&fx.admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let page = page.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].seizure_datetime > page.items[1].seizure_datetime);
    assert_eq!(page.items[0].seizure_datetime.to_rfc3339(), "2025-03-04T10:00:00+00:00");

    let (_, page): (StatusCode, Option<SeizurePage>) = get_json(
        &fx.app,
        "/api/seizures?start_date=2025-03-02&end_date=2025-03-03T23:59:59Z",
        Some(&fx.admin_token),
    )
    .await;
    assert_eq!(page.unwrap().total, 2);
}

#[tokio::test]
async fn test_page_size_is_capped() {
    let fx = two_slaughterhouses().await;

    let (status, page): (StatusCode, Option<SeizurePage>) = get_json(
        &fx.app,
        "/api/seizures?page_size=500",
        Some(&fx.admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page.unwrap().page_size, 100);
}

#[tokio::test]
async fn test_inspector_cannot_read_other_slaughterhouse_record() {
    let fx = two_slaughterhouses().await;
    let created = record(&fx.app, &fx.second_inspector, &liver_seizure()).await;
    let path = format!("/api/seizures/{}", created.id);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&fx.app, &path, Some(&fx.first_inspector)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, own): (StatusCode, Option<SuccessResponse<SeizureRecord>>) =
        get_json(&fx.app, &path, Some(&fx.second_inspector)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own.unwrap().data.id, created.id);
}

#[tokio::test]
async fn test_admin_deletes_record() {
    let fx = two_slaughterhouses().await;
    let created = record(&fx.app, &fx.first_inspector, &liver_seizure()).await;
    let path = format!("/api/seizures/{}", created.id);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&fx.app, &path, Some(&fx.first_inspector)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, message): (StatusCode, Option<MessageResponse>) =
        delete_json(&fx.app, &path, Some(&fx.admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message.unwrap().message, "Seizure record deleted");

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&fx.app, &path, Some(&fx.admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&fx.app, &path, Some(&fx.admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let fx = two_slaughterhouses().await;
    record(&fx.app, &fx.first_inspector, &liver_seizure()).await;

    let (status, page): (StatusCode, Option<SeizurePage>) = get_json(
        &fx.app,
        "/api/seizures?page=9223372036854775807&page_size=100",
        Some(&fx.admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let page = page.unwrap();
    assert_eq!(page.total, 1);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_seizure_datetime_after_2038_is_kept() {
    let fx = two_slaughterhouses().await;

    let mut body = liver_seizure();
    body["seizure_datetime"] = json!("2040-01-01T00:00:00Z");
    let created = record(&fx.app, &fx.first_inspector, &body).await;

    assert_eq!(
        created.seizure_datetime.to_rfc3339(),
        "2040-01-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn test_reason_longer_than_column_is_422() {
    let fx = two_slaughterhouses().await;

    let mut body = liver_seizure();
    body["reason"] = json!("x".repeat(256));
    let (status, response): (StatusCode, Option<Value>) =
        post_json(&fx.app, "/api/seizures", &body, Some(&fx.first_inspector)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.unwrap()["error"], "validation");

    body["reason"] = json!("x".repeat(255));
    record(&fx.app, &fx.first_inspector, &body).await;
}

#[tokio::test]
async fn test_reason_filter_is_case_exact() {
    let fx = two_slaughterhouses().await;
    record(&fx.app, &fx.first_inspector, &liver_seizure()).await;
    let mut capitalized = liver_seizure();
    capitalized["reason"] = json!("Parasites");
    record(&fx.app, &fx.first_inspector, &capitalized).await;

    let (status, page): (StatusCode, Option<SeizurePage>) = get_json(
        &fx.app,
        "/api/seizures?reason=Parasites",
        Some(&fx.admin_token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let page = page.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].reason, "Parasites");
}
