//! Writer for bulk unit creation.
//!
//! Each planned item runs in its own transaction: the block and unit type are
//! reused or created, the range is checked against existing unit numbers in a
//! single query, and the missing numbers are inserted. A failing item rolls
//! back alone and is reported as [`ItemResult::Failed`]; later items still run.

use std::collections::HashSet;

use habitat_core::bulk_units::{ItemOutcome, ItemResult, PlannedItem};
use habitat_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{BlockRepo, UnitRepo, UnitTypeRepo};

/// Runs validated bulk unit requests against the database.
pub struct BulkUnitRepo;

impl BulkUnitRepo {
    /// Process every item of a validated request in order.
    ///
    /// Never fails as a whole; database errors are captured per item.
    pub async fn create_units(
        pool: &PgPool,
        project_id: DbId,
        items: &[PlannedItem],
        actor: &str,
    ) -> Vec<ItemResult> {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            match Self::create_item(pool, project_id, item, actor).await {
                Ok(outcome) => {
                    tracing::debug!(
                        project_id,
                        block = %item.block,
                        unit_type = %item.unit_type,
                        created = outcome.created.len(),
                        skipped = outcome.skipped.len(),
                        "Bulk unit item committed"
                    );
                    results.push(ItemResult::Completed {
                        item: item.clone(),
                        outcome,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        project_id,
                        position = item.position,
                        block = %item.block,
                        error = %e,
                        "Bulk unit item failed, continuing with next item"
                    );
                    results.push(ItemResult::Failed {
                        item: item.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        results
    }

    /// Write one item inside its own transaction.
    pub async fn create_item(
        pool: &PgPool,
        project_id: DbId,
        item: &PlannedItem,
        actor: &str,
    ) -> Result<ItemOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let block_id = BlockRepo::find_or_create_in(&mut tx, project_id, &item.block, actor).await?;
        let unit_type_id = UnitTypeRepo::find_or_create_in(&mut tx, &item.unit_type, actor).await?;

        let numbers = item.unit_numbers();
        let existing: HashSet<String> = UnitRepo::existing_numbers_in(&mut tx, block_id, &numbers)
            .await?
            .into_iter()
            .collect();

        let mut created = Vec::with_capacity(numbers.len());
        let mut skipped = Vec::new();

        for number in numbers {
            if existing.contains(&number) {
                skipped.push(number);
                continue;
            }
            let inserted =
                UnitRepo::insert_if_absent_in(&mut tx, block_id, unit_type_id, &number, actor)
                    .await?;
            if inserted {
                created.push(number);
            } else {
                // Inserted concurrently by another request.
                skipped.push(number);
            }
        }

        tx.commit().await?;

        Ok(ItemOutcome {
            block_id,
            unit_type_id,
            created,
            skipped,
        })
    }
}
