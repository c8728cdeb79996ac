//! HTTP-level tests for `GET /api/sellers/dashboard`.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, seed_project, seed_seller, seller_token};
use sqlx::PgPool;

const URI: &str = "/api/sellers/dashboard";

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_database_returns_zeros(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, URI, &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_payments"], "0");
    assert_eq!(json["total_dues"], "0");
    assert_eq!(json["total_sellers"], 0);
    assert_eq!(json["active_sellers"], 0);
    assert_eq!(json["total_transactions"], 0);
    assert_eq!(json["page"], 0);
    assert_eq!(json["size"], 20);
    assert_eq!(json["transactions"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reports_totals_and_sorted_transactions(pool: PgPool) {
    let seller = seed_seller(&pool, "Asha", "+15550000001").await;
    let project = seed_project(&pool, Some(seller), "Palm Grove").await;
    for (amount, status) in [("100.00", "PAID"), ("40.50", "PENDING"), ("7.00", "PAID")] {
        sqlx::query(
            "INSERT INTO seller_commissions (seller_id, project_id, amount, status)
             VALUES ($1, $2, $3::NUMERIC, $4)",
        )
        .bind(seller)
        .bind(project)
        .bind(amount)
        .bind(status)
        .execute(&pool)
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{URI}?sort=amount,asc&size=2"), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_payments"], "107.00");
    assert_eq!(json["total_dues"], "40.50");
    assert_eq!(json["total_sellers"], 1);
    assert_eq!(json["active_sellers"], 1);
    assert_eq!(json["total_transactions"], 3);

    let transactions = json["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["amount"], "7.00");
    assert_eq!(transactions[1]["amount"], "40.50");
    assert_eq!(transactions[0]["seller_name"], "Asha");
    assert_eq!(transactions[0]["project_name"], "Palm Grove");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn database_failure_degrades_to_empty_dashboard(pool: PgPool) {
    sqlx::query("DROP TABLE seller_commissions")
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("{URI}?page=2&size=5"), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_transactions"], 0);
    assert_eq!(json["page"], 2);
    assert_eq!(json["size"], 5);
    assert_eq!(json["transactions"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_sort_key_is_a_client_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("{URI}?sort=commission_id,asc"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sellers_cannot_see_the_dashboard(pool: PgPool) {
    seed_seller(&pool, "Asha", "+15550000001").await;

    let app = common::build_test_app(pool);
    let response = get(app, URI, &seller_token("+15550000001")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
