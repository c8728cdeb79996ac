//! HTTP-level tests for the `/api/projects` resource: REST conventions,
//! pagination headers, and seller ownership.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_token, body_json, delete, get, header, patch_json, post_json, put_json, seed_project,
    seed_seller, seller_token, send, user_token,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Conventions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_201_with_alert_headers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", &admin_token(), json!({"name": "Palm Grove"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(header(&response, "x-habitat-alert"), "habitat.project.created");
    let params = header(&response, "x-habitat-params");
    let json = body_json(response).await;
    assert_eq!(json["name"], "Palm Grove");
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["id"].as_i64().unwrap().to_string(), params);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_id_is_rejected_as_idexists(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/projects",
        &admin_token(),
        json!({"id": 9, "name": "Palm Grove"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header(&response, "x-habitat-error"), "error.idexists");
    assert_eq!(common::count_rows(&pool, "projects").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn put_checks_body_id_against_path(pool: PgPool) {
    let id = seed_project(&pool, None, "Original").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projects/{id}"),
        &admin_token(),
        json!({"name": "Renamed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_key"], "idnull");

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projects/{id}"),
        &admin_token(),
        json!({"id": id + 1, "name": "Renamed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_key"], "idinvalid");

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/projects/{id}"),
        &admin_token(),
        json!({"id": id, "name": "Renamed", "status": "INACTIVE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-habitat-alert"), "habitat.project.updated");
    let json = body_json(response).await;
    assert_eq!(json["name"], "Renamed");
    assert_eq!(json["status"], "INACTIVE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn put_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/projects/424242",
        &admin_token(),
        json!({"id": 424242, "name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn patch_only_applies_present_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/projects",
            &admin_token(),
            json!({"name": "Lakeside", "address": "12 Shore Rd"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/projects/{id}"),
        &admin_token(),
        json!({"id": id, "status": "INACTIVE"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Lakeside");
    assert_eq!(json["address"], "12 Shore Rd");
    assert_eq!(json["status"], "INACTIVE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        &admin_token(),
        json!({"name": "Lakeside", "status": "ARCHIVED"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_soft_deletes_then_404s(pool: PgPool) {
    let id = seed_project(&pool, None, "Doomed").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(header(&response, "x-habitat-alert"), "habitat.project.deleted");

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/projects/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The row is kept, only marked.
    let raw: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(raw, 1);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_sets_total_count_and_link_headers(pool: PgPool) {
    for i in 0..5 {
        seed_project(&pool, None, &format!("Project {i}")).await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects?page=1&size=2&sort=name,desc", &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count"), "5");
    let link = header(&response, "link");
    assert!(link.contains("</api/projects?sort=name,desc&page=2&size=2>; rel=\"next\""));
    assert!(link.contains("</api/projects?sort=name,desc&page=0&size=2>; rel=\"prev\""));
    assert!(link.contains("</api/projects?sort=name,desc&page=2&size=2>; rel=\"last\""));

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Project 2", "Project 1"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_rejects_unknown_sort_field(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projects?sort=password,asc", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Authentication and ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = send(app, Method::GET, "/api/projects", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn plain_user_can_read_but_not_write(pool: PgPool) {
    seed_project(&pool, None, "Visible").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/projects", &user_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "x-total-count"), "1");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projects", &user_token(), json!({"name": "Nope"})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seller_becomes_owner_of_created_project(pool: PgPool) {
    let seller_id = seed_seller(&pool, "Asha", "+15550000001").await;
    let other_id = seed_seller(&pool, "Bruno", "+15550000002").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        &seller_token("+15550000001"),
        json!({"name": "Mine", "seller_id": other_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["seller_id"], seller_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seller_only_lists_and_reads_own_projects(pool: PgPool) {
    let asha = seed_seller(&pool, "Asha", "+15550000001").await;
    let bruno = seed_seller(&pool, "Bruno", "+15550000002").await;
    seed_project(&pool, Some(asha), "Asha One").await;
    seed_project(&pool, Some(asha), "Asha Two").await;
    let brunos = seed_project(&pool, Some(bruno), "Bruno One").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/projects", &seller_token("+15550000001")).await;
    assert_eq!(header(&response, "x-total-count"), "2");
    let json = body_json(response).await;
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["seller_id"] == asha));

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/projects/{brunos}"),
        &seller_token("+15550000001"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seller_cannot_modify_foreign_project(pool: PgPool) {
    seed_seller(&pool, "Asha", "+15550000001").await;
    let bruno = seed_seller(&pool, "Bruno", "+15550000002").await;
    let brunos = seed_project(&pool, Some(bruno), "Bruno One").await;
    let token = seller_token("+15550000001");

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projects/{brunos}"),
        &token,
        json!({"id": brunos, "name": "Taken"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projects/{brunos}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/blocks",
        &token,
        json!({"project_id": brunos, "name": "A"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let name: String = sqlx::query_scalar("SELECT name FROM projects WHERE id = $1")
        .bind(brunos)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Bruno One");
    assert_eq!(common::count_rows(&pool, "projects").await, 1);
    assert_eq!(common::count_rows(&pool, "blocks").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unregistered_seller_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projects",
        &seller_token("+15559999999"),
        json!({"name": "Orphan"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
