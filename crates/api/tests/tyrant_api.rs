//! Public listing and admin entry management over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_tyrant, delete_auth, get, get_auth, post_from,
    post_json_auth, put_json_auth, tyrant_body,
};
use sqlx::PgPool;

fn names(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Public listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_ranks_by_votes_and_hides_drafts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let quiet = create_tyrant(app.clone(), &token, tyrant_body("Quiet Mayor", "local")).await;
    let loud = create_tyrant(app.clone(), &token, tyrant_body("Loud Mayor", "local")).await;
    let mut draft = tyrant_body("Draft Mayor", "local");
    draft["is_published"] = serde_json::json!(false);
    create_tyrant(app.clone(), &token, draft).await;

    for ip in ["203.0.113.1", "203.0.113.2"] {
        let response = post_from(app.clone(), &format!("/api/v1/tyrants/{loud}/votes"), ip).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let quiet_uri = format!("/api/v1/tyrants/{quiet}/votes");
    let response = post_from(app.clone(), &quiet_uri, "203.0.113.3").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/v1/tyrants?category=local").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(names(&json), vec!["Loud Mayor", "Quiet Mayor"]);
    assert_eq!(json["data"][0]["shame_count"], 2);
    assert_eq!(json["data"][1]["shame_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_filters_category(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    create_tyrant(app.clone(), &token, tyrant_body("Senator", "federal")).await;
    create_tyrant(app.clone(), &token, tyrant_body("Deputy", "law_enforcement")).await;

    let json = body_json(get(app.clone(), "/api/v1/tyrants?category=law_enforcement").await).await;
    assert_eq!(names(&json), vec!["Deputy"]);

    let json = body_json(get(app, "/api/v1/tyrants").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_list_rejects_unknown_category(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/tyrants?category=galactic").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_get_hides_drafts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let mut draft = tyrant_body("Secret Sheriff", "law_enforcement");
    draft["is_published"] = serde_json::json!(false);
    let id = create_tyrant(app.clone(), &token, draft).await;

    let response = get(app.clone(), &format!("/api/v1/tyrants/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Admins still see it.
    let response = get_auth(app, &format!("/api/v1/admin/tyrants/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_create_validates_input(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let mut body = tyrant_body("X", "local");
    let response = post_json_auth(app.clone(), "/api/v1/admin/tyrants", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "name too short");

    body["name"] = serde_json::json!("Valid Name");
    body["category"] = serde_json::json!("county");
    let response = post_json_auth(app.clone(), "/api/v1/admin/tyrants", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "unknown category");

    body["category"] = serde_json::json!("state");
    body["evidence_urls"] = serde_json::json!(["ftp://example.org/file"]);
    let response = post_json_auth(app, "/api/v1/admin/tyrants", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "non-http evidence url");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_update_publish_and_delete(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let mut draft = tyrant_body("Governor Grim", "state");
    draft["is_published"] = serde_json::json!(false);
    let id = create_tyrant(app.clone(), &token, draft).await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/tyrants/{id}"),
        serde_json::json!({ "title": "Governor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Governor");
    assert_eq!(json["data"]["name"], "Governor Grim");

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/tyrants/{id}/publish"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_published"], true);
    assert_eq!(
        get(app.clone(), &format!("/api/v1/tyrants/{id}")).await.status(),
        StatusCode::OK
    );

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/tyrants/{id}/unpublish"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["is_published"], false);

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/tyrants/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/admin/tyrants/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_update_missing_tyrant(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/admin/tyrants/424242",
        serde_json::json!({ "title": "Nobody" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_list_includes_drafts(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);

    create_tyrant(app.clone(), &token, tyrant_body("Public One", "federal")).await;
    let mut draft = tyrant_body("Hidden One", "federal");
    draft["is_published"] = serde_json::json!(false);
    create_tyrant(app.clone(), &token, draft).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/admin/tyrants", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let json = body_json(get(app, "/api/v1/tyrants").await).await;
    assert_eq!(names(&json), vec!["Public One"]);
}
