//! Integration tests for entity CRUD and soft-delete behaviour.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Soft-deleted entities are hidden from `find_by_id`, lists, and counts
//! - Soft-delete is idempotent (second call returns `false`)
//! - Merge-patch updates leave absent fields untouched
//! - Partial unique indexes only consider live rows

use habitat_core::pagination::{Direction, PageRequest};
use habitat_db::models::project::{CreateProject, UpdateProject};
use habitat_db::models::seller::CreateSeller;
use habitat_db::models::unit_type::CreateUnitType;
use habitat_db::repositories::{project_repo, ProjectRepo, SellerRepo, UnitTypeRepo};
use sqlx::PgPool;

const ACTOR: &str = "+10000000000";

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        id: None,
        seller_id: None,
        name: name.to_string(),
        address: Some("1 Main St".to_string()),
        status: None,
    }
}

fn first_page() -> PageRequest {
    PageRequest::parse(None, None, None, project_repo::SORT_KEYS, Direction::Asc).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_deleted_project_is_hidden(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Hidden"), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(project.status, "ACTIVE");
    assert_eq!(project.created_by.as_deref(), Some(ACTOR));

    assert!(ProjectRepo::soft_delete(&pool, project.id, ACTOR).await.unwrap());
    assert!(!ProjectRepo::soft_delete(&pool, project.id, ACTOR).await.unwrap());

    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());
    assert_eq!(ProjectRepo::count(&pool, None).await.unwrap(), 0);
    assert!(ProjectRepo::list(&pool, None, &first_page()).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_patch_keeps_absent_fields(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Original"), None, ACTOR)
        .await
        .unwrap();

    let patch = UpdateProject {
        id: Some(project.id),
        seller_id: None,
        name: None,
        address: None,
        status: Some("INACTIVE".to_string()),
    };
    let updated = ProjectRepo::update(&pool, project.id, &patch, "+19999999999")
        .await
        .unwrap()
        .expect("project should exist");

    assert_eq!(updated.name, "Original");
    assert_eq!(updated.address.as_deref(), Some("1 Main St"));
    assert_eq!(updated.status, "INACTIVE");
    assert_eq!(updated.last_modified_by.as_deref(), Some("+19999999999"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_scoped_to_seller(pool: PgPool) {
    let seller = SellerRepo::create(
        &pool,
        &CreateSeller {
            id: None,
            name: "Alice".to_string(),
            phone: "+15550000001".to_string(),
            email: None,
            is_active: None,
        },
        ACTOR,
    )
    .await
    .unwrap();
    assert!(seller.is_active);

    ProjectRepo::create(&pool, &new_project("Mine"), Some(seller.id), ACTOR)
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project("Other"), None, ACTOR)
        .await
        .unwrap();

    let mine = ProjectRepo::list(&pool, Some(seller.id), &first_page())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Mine");
    assert_eq!(ProjectRepo::count(&pool, None).await.unwrap(), 2);

    let found = SellerRepo::find_by_phone(&pool, "+15550000001")
        .await
        .unwrap()
        .expect("seller should be found by phone");
    assert_eq!(found.id, seller.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unique_name_only_applies_to_live_rows(pool: PgPool) {
    let input = CreateUnitType {
        id: None,
        name: "Villa".to_string(),
    };
    let first = UnitTypeRepo::create(&pool, &input, ACTOR).await.unwrap();

    let duplicate = UnitTypeRepo::create(&pool, &input, ACTOR).await;
    let err = duplicate.expect_err("duplicate live name must fail");
    let constraint = err
        .as_database_error()
        .and_then(|e| e.constraint())
        .map(str::to_string);
    assert_eq!(constraint.as_deref(), Some("uq_unit_types_name"));

    assert!(UnitTypeRepo::soft_delete(&pool, first.id, ACTOR).await.unwrap());
    assert!(UnitTypeRepo::create(&pool, &input, ACTOR).await.is_ok());
}
