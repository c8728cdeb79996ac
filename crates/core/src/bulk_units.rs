//! Bulk unit creation: request validation, planning, and result summaries.
//!
//! A bulk request names a project and a list of items, each describing an
//! inclusive numeric range of unit numbers to create inside one block with one
//! unit type. Validation here runs before anything touches the database; the
//! persistence side reports one [`ItemResult`] per item, which
//! [`summarize`] folds into the response body.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Largest number of units a single item may span.
pub const MAX_RANGE_SIZE: i64 = 1000;

/// Longest accepted block or unit type name, after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Most items accepted in one request.
pub const MAX_ITEMS: usize = 100;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /api/bulk-unit-creation/v1/units`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkUnitRequest {
    pub project_id: DbId,
    #[validate(nested)]
    pub items: Vec<BulkUnitItem>,
}

/// One `{block, unit_type, unit_start, unit_end}` entry of a bulk request.
///
/// Names are checked in [`plan_request`] after trimming.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkUnitItem {
    pub block: String,
    pub unit_type: String,
    #[validate(range(min = 0))]
    pub unit_start: i64,
    #[validate(range(min = 0))]
    pub unit_end: i64,
}

/// A validated item with trimmed names, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    /// 1-based position in the original request, used in warnings.
    pub position: usize,
    pub block: String,
    pub unit_type: String,
    pub unit_start: i64,
    pub unit_end: i64,
}

impl PlannedItem {
    /// Unit numbers of the inclusive range, as stored in `units.unit_number`.
    pub fn unit_numbers(&self) -> Vec<String> {
        (self.unit_start..=self.unit_end)
            .map(|n| n.to_string())
            .collect()
    }

    /// Number of units the range spans. Saturates instead of overflowing.
    pub fn range_size(&self) -> i64 {
        self.unit_end
            .saturating_sub(self.unit_start)
            .saturating_add(1)
    }
}

/// Validate a whole request and return its items in request order.
///
/// Any failure rejects the request as a whole: nothing is planned unless every
/// item passes.
pub fn plan_request(request: &BulkUnitRequest) -> Result<Vec<PlannedItem>, CoreError> {
    if request.items.is_empty() || request.items.len() > MAX_ITEMS {
        return Err(CoreError::Validation(format!(
            "between 1 and {MAX_ITEMS} items are required"
        )));
    }
    request.validate()?;

    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(request.items.len());
    let mut planned = Vec::with_capacity(request.items.len());

    for (idx, item) in request.items.iter().enumerate() {
        let position = idx + 1;
        let block = item.block.trim().to_string();
        let unit_type = item.unit_type.trim().to_string();

        if block.is_empty() {
            return Err(CoreError::Validation(format!(
                "Item {position}: block name must not be blank"
            )));
        }
        if unit_type.is_empty() {
            return Err(CoreError::Validation(format!(
                "Item {position}: unit type must not be blank"
            )));
        }
        if block.chars().count() > MAX_NAME_LEN || unit_type.chars().count() > MAX_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Item {position}: names must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if item.unit_start > item.unit_end {
            return Err(CoreError::Validation(format!(
                "Item {position}: unit_start ({}) must not exceed unit_end ({})",
                item.unit_start, item.unit_end
            )));
        }

        // Both bounds are non-negative here, so the difference cannot overflow.
        if item.unit_end - item.unit_start >= MAX_RANGE_SIZE {
            return Err(CoreError::Validation(format!(
                "Item {position}: range {}..={} exceeds the limit of {MAX_RANGE_SIZE} units",
                item.unit_start, item.unit_end
            )));
        }

        let planned_item = PlannedItem {
            position,
            block,
            unit_type,
            unit_start: item.unit_start,
            unit_end: item.unit_end,
        };

        if !seen.insert((planned_item.block.clone(), planned_item.unit_type.clone())) {
            return Err(CoreError::Validation(format!(
                "Item {position}: duplicate block '{}' with unit type '{}'",
                planned_item.block, planned_item.unit_type
            )));
        }

        planned.push(planned_item);
    }

    Ok(planned)
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// What the writer did for one item that committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub block_id: DbId,
    pub unit_type_id: DbId,
    /// Unit numbers inserted by this item.
    pub created: Vec<String>,
    /// Unit numbers that already existed in the block.
    pub skipped: Vec<String>,
}

/// Result of processing one planned item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResult {
    Completed {
        item: PlannedItem,
        outcome: ItemOutcome,
    },
    Failed {
        item: PlannedItem,
        reason: String,
    },
}

/// Per-item line of the response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemReport {
    pub block: String,
    pub unit_type: String,
    pub created: usize,
    pub skipped: Vec<String>,
    pub error: Option<String>,
}

/// Response body of a bulk creation request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BulkUnitSummary {
    pub project_id: DbId,
    pub total_units_created: usize,
    pub blocks_touched: usize,
    pub unit_types_touched: usize,
    pub items: Vec<ItemReport>,
    pub warnings: Vec<String>,
}

/// Warning recorded for a unit number that was already present.
pub fn skipped_unit_warning(unit_number: &str, block: &str) -> String {
    format!("Unit {unit_number} already exists in block '{block}', skipped")
}

/// Warning recorded for an item whose transaction failed.
pub fn failed_item_warning(item: &PlannedItem, reason: &str) -> String {
    format!(
        "Item {} (block '{}', unit type '{}') failed: {reason}",
        item.position, item.block, item.unit_type
    )
}

/// Fold per-item results into the response summary.
///
/// Blocks and unit types are counted once per distinct row id, so two items
/// sharing a block count it once. Failed items contribute a warning and no
/// counts.
pub fn summarize(project_id: DbId, results: &[ItemResult]) -> BulkUnitSummary {
    let mut block_ids = HashSet::new();
    let mut unit_type_ids = HashSet::new();
    let mut total_units_created = 0;
    let mut items = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();

    for result in results {
        match result {
            ItemResult::Completed { item, outcome } => {
                block_ids.insert(outcome.block_id);
                unit_type_ids.insert(outcome.unit_type_id);
                total_units_created += outcome.created.len();
                warnings.extend(
                    outcome
                        .skipped
                        .iter()
                        .map(|n| skipped_unit_warning(n, &item.block)),
                );
                items.push(ItemReport {
                    block: item.block.clone(),
                    unit_type: item.unit_type.clone(),
                    created: outcome.created.len(),
                    skipped: outcome.skipped.clone(),
                    error: None,
                });
            }
            ItemResult::Failed { item, reason } => {
                warnings.push(failed_item_warning(item, reason));
                items.push(ItemReport {
                    block: item.block.clone(),
                    unit_type: item.unit_type.clone(),
                    created: 0,
                    skipped: Vec::new(),
                    error: Some(reason.clone()),
                });
            }
        }
    }

    BulkUnitSummary {
        project_id,
        total_units_created,
        blocks_touched: block_ids.len(),
        unit_types_touched: unit_type_ids.len(),
        items,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn item(block: &str, unit_type: &str, start: i64, end: i64) -> BulkUnitItem {
        BulkUnitItem {
            block: block.to_string(),
            unit_type: unit_type.to_string(),
            unit_start: start,
            unit_end: end,
        }
    }

    fn request(items: Vec<BulkUnitItem>) -> BulkUnitRequest {
        BulkUnitRequest {
            project_id: 1,
            items,
        }
    }

    fn planned(position: usize, block: &str, unit_type: &str, start: i64, end: i64) -> PlannedItem {
        PlannedItem {
            position,
            block: block.to_string(),
            unit_type: unit_type.to_string(),
            unit_start: start,
            unit_end: end,
        }
    }

    // -- plan_request --------------------------------------------------------

    #[test]
    fn valid_request_is_planned_in_order_with_trimmed_names() {
        let plan = plan_request(&request(vec![
            item(" A ", "2BHK", 1, 10),
            item("B", " Shop", 100, 100),
        ]))
        .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0], planned(1, "A", "2BHK", 1, 10));
        assert_eq!(plan[1], planned(2, "B", "Shop", 100, 100));
    }

    #[test]
    fn start_after_end_rejects_whole_request() {
        let result = plan_request(&request(vec![
            item("A", "2BHK", 1, 10),
            item("B", "2BHK", 5, 4),
        ]));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("Item 2"));
    }

    #[test]
    fn duplicate_block_and_unit_type_pair_is_rejected() {
        let result = plan_request(&request(vec![
            item("A", "2BHK", 1, 10),
            item("A ", "2BHK", 20, 30),
        ]));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("duplicate"));
    }

    #[test]
    fn same_block_with_different_unit_types_is_allowed() {
        let plan = plan_request(&request(vec![
            item("A", "2BHK", 1, 10),
            item("A", "3BHK", 11, 20),
        ]))
        .unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn range_limit_is_inclusive() {
        assert!(plan_request(&request(vec![item("A", "2BHK", 1, 1000)])).is_ok());
        assert_matches!(
            plan_request(&request(vec![item("A", "2BHK", 1, 1001)])),
            Err(CoreError::Validation(msg)) if msg.contains("exceeds")
        );
    }

    #[test]
    fn range_ending_at_i64_max_is_rejected_without_overflow() {
        assert_matches!(
            plan_request(&request(vec![item("A", "2BHK", 0, i64::MAX)])),
            Err(CoreError::Validation(msg)) if msg.contains("exceeds")
        );
        assert_matches!(
            plan_request(&request(vec![item("A", "2BHK", i64::MAX - 999, i64::MAX)])),
            Ok(plan) if plan[0].range_size() == MAX_RANGE_SIZE
        );
    }

    #[test]
    fn range_size_saturates() {
        assert_eq!(planned(1, "A", "2BHK", 0, i64::MAX).range_size(), i64::MAX);
    }

    #[test]
    fn empty_items_are_rejected() {
        assert_matches!(
            plan_request(&request(vec![])),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn too_many_items_are_rejected() {
        let items = (0..=MAX_ITEMS as i64)
            .map(|n| item(&format!("B{n}"), "2BHK", n, n))
            .collect();
        assert_matches!(
            plan_request(&request(items)),
            Err(CoreError::Validation(msg)) if msg.contains("items")
        );
    }

    #[test]
    fn padded_name_is_measured_after_trimming() {
        let padded = format!("   {}   ", "x".repeat(MAX_NAME_LEN));
        let plan = plan_request(&request(vec![item(&padded, "2BHK", 1, 1)])).unwrap();
        assert_eq!(plan[0].block.len(), MAX_NAME_LEN);

        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_matches!(
            plan_request(&request(vec![item(&long, "2BHK", 1, 1)])),
            Err(CoreError::Validation(msg)) if msg.contains("at most")
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_matches!(
            plan_request(&request(vec![item("   ", "2BHK", 1, 2)])),
            Err(CoreError::Validation(msg)) if msg.contains("block name")
        );
        assert_matches!(
            plan_request(&request(vec![item("A", "  ", 1, 2)])),
            Err(CoreError::Validation(msg)) if msg.contains("unit type")
        );
    }

    #[test]
    fn negative_start_is_rejected() {
        assert_matches!(
            plan_request(&request(vec![item("A", "2BHK", -1, 2)])),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unit_numbers_cover_inclusive_range() {
        let p = planned(1, "A", "2BHK", 8, 11);
        assert_eq!(p.unit_numbers(), vec!["8", "9", "10", "11"]);
        assert_eq!(p.range_size(), 4);
    }

    // -- summarize -----------------------------------------------------------

    #[test]
    fn summary_counts_distinct_rows_and_collects_warnings() {
        let results = vec![
            ItemResult::Completed {
                item: planned(1, "A", "2BHK", 1, 3),
                outcome: ItemOutcome {
                    block_id: 10,
                    unit_type_id: 20,
                    created: vec!["1".into(), "3".into()],
                    skipped: vec!["2".into()],
                },
            },
            ItemResult::Completed {
                item: planned(2, "A", "Shop", 4, 5),
                outcome: ItemOutcome {
                    block_id: 10,
                    unit_type_id: 21,
                    created: vec!["4".into(), "5".into()],
                    skipped: vec![],
                },
            },
            ItemResult::Failed {
                item: planned(3, "B", "2BHK", 1, 1),
                reason: "connection reset".into(),
            },
        ];

        let summary = summarize(7, &results);

        assert_eq!(summary.project_id, 7);
        assert_eq!(summary.total_units_created, 4);
        assert_eq!(summary.blocks_touched, 1);
        assert_eq!(summary.unit_types_touched, 2);
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.items[2].error.as_deref(), Some("connection reset"));
        assert_eq!(
            summary.warnings,
            vec![
                "Unit 2 already exists in block 'A', skipped".to_string(),
                "Item 3 (block 'B', unit type '2BHK') failed: connection reset".to_string(),
            ]
        );
    }

    #[test]
    fn summary_of_nothing_is_zeroed() {
        let summary = summarize(1, &[]);
        assert_eq!(summary.total_units_created, 0);
        assert_eq!(summary.blocks_touched, 0);
        assert!(summary.warnings.is_empty());
    }
}
