//! Reader for the seller dashboard.
//!
//! Aggregates are read as untyped rows and mapped cell by cell. A cell that
//! does not fit its field is replaced by the field default and logged, so a
//! schema drift in one column degrades the dashboard instead of failing it.

use habitat_core::dashboard::{
    CellValue, CoercionError, DashboardTransaction, SellerDashboard, COMMISSION_STATUS_PAID,
    COMMISSION_STATUS_PENDING,
};
use habitat_core::pagination::PageRequest;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row, TypeInfo, ValueRef};

/// Inner joins on live sellers and projects.
const PRIMARY_FROM: &str = "FROM seller_commissions sc
     JOIN sellers s ON s.id = sc.seller_id AND s.deleted_at IS NULL
     JOIN projects p ON p.id = sc.project_id AND p.deleted_at IS NULL
     WHERE sc.deleted_at IS NULL";

/// Left joins so commissions with a missing seller or project still show up.
const FALLBACK_FROM: &str = "FROM seller_commissions sc
     LEFT JOIN sellers s ON s.id = sc.seller_id
     LEFT JOIN projects p ON p.id = sc.project_id
     WHERE sc.deleted_at IS NULL";

const TRANSACTION_COLUMNS: &str = "sc.id AS commission_id,
            sc.seller_id,
            COALESCE(s.name, '') AS seller_name,
            sc.project_id,
            COALESCE(p.name, '') AS project_name,
            sc.amount,
            sc.units_count,
            sc.fees_amount,
            COALESCE(sc.paid_on, sc.created_at) AS txn_date,
            sc.status";

/// Builds [`SellerDashboard`] values from the commission tables.
pub struct SellerDashboardRepo;

impl SellerDashboardRepo {
    /// Load totals, seller counts, and one page of transactions.
    ///
    /// Database errors propagate; callers decide whether to degrade.
    pub async fn load(pool: &PgPool, page: &PageRequest) -> Result<SellerDashboard, sqlx::Error> {
        let total_payments = Self::sum_by_status(pool, COMMISSION_STATUS_PAID).await?;
        let total_dues = Self::sum_by_status(pool, COMMISSION_STATUS_PENDING).await?;

        let counts = sqlx::query(
            "SELECT COUNT(*) AS total_sellers,
                    COUNT(*) FILTER (WHERE is_active) AS active_sellers
             FROM sellers WHERE deleted_at IS NULL",
        )
        .fetch_one(pool)
        .await?;
        let total_sellers = coerce("total_sellers", cell(&counts, "total_sellers").to_i64());
        let active_sellers = coerce("active_sellers", cell(&counts, "active_sellers").to_i64());

        // The source is chosen on the whole result set so every page of one
        // listing comes from the same query.
        let primary_total = Self::count_transactions(pool, PRIMARY_FROM).await?;
        let (from, total_transactions) = if primary_total == 0 {
            tracing::debug!("Primary dashboard query matches no rows, using fallback");
            (FALLBACK_FROM, Self::count_transactions(pool, FALLBACK_FROM).await?)
        } else {
            (PRIMARY_FROM, primary_total)
        };
        let rows = Self::fetch_transactions(pool, from, page).await?;

        Ok(SellerDashboard {
            total_payments,
            total_dues,
            total_sellers,
            active_sellers,
            total_transactions,
            page: page.page,
            size: page.size,
            transactions: rows.iter().map(map_transaction).collect(),
        })
    }

    async fn sum_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<rust_decimal::Decimal, sqlx::Error> {
        let row = sqlx::query(
            "SELECT SUM(amount) AS total FROM seller_commissions
             WHERE status = $1 AND deleted_at IS NULL",
        )
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(coerce("total", cell(&row, "total").to_decimal()))
    }

    async fn count_transactions(pool: &PgPool, from: &str) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) AS total {from}");
        let row = sqlx::query(&query).fetch_one(pool).await?;
        Ok(coerce("total", cell(&row, "total").to_i64()))
    }

    async fn fetch_transactions(
        pool: &PgPool,
        from: &str,
        page: &PageRequest,
    ) -> Result<Vec<PgRow>, sqlx::Error> {
        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} {from}
             ORDER BY {}, commission_id LIMIT $1 OFFSET $2",
            page.sort.to_sql()
        );
        sqlx::query(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn map_transaction(row: &PgRow) -> DashboardTransaction {
    DashboardTransaction {
        commission_id: coerce("commission_id", cell(row, "commission_id").to_i64()),
        seller_id: coerce("seller_id", cell(row, "seller_id").to_i64()),
        seller_name: coerce("seller_name", cell(row, "seller_name").to_text()),
        project_id: coerce("project_id", cell(row, "project_id").to_i64()),
        project_name: coerce("project_name", cell(row, "project_name").to_text()),
        amount: coerce("amount", cell(row, "amount").to_decimal()),
        units_count: coerce("units_count", cell(row, "units_count").to_i64()),
        fees_amount: coerce("fees_amount", cell(row, "fees_amount").to_decimal()),
        date: coerce("txn_date", cell(row, "txn_date").to_timestamp()),
        status: coerce("status", cell(row, "status").to_text()),
    }
}

/// Substitute the default for a cell that could not be coerced.
fn coerce<T: Default>(column: &str, value: Result<T, CoercionError>) -> T {
    value.unwrap_or_else(|e| {
        tracing::warn!(column, error = %e, "Dashboard cell coercion failed, using default");
        T::default()
    })
}

/// Read the named column of `row` as a [`CellValue`].
fn cell(row: &PgRow, name: &str) -> CellValue {
    match row.try_column(name) {
        Ok(column) => read_cell(row, column.ordinal()),
        Err(_) => CellValue::Unsupported(format!("<missing column {name}>")),
    }
}

fn read_cell(row: &PgRow, idx: usize) -> CellValue {
    match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return CellValue::Null,
        Ok(_) => {}
        Err(e) => return CellValue::Unsupported(e.to_string()),
    }

    let type_name = row.column(idx).type_info().name().to_string();
    let decoded = match type_name.as_str() {
        "INT2" => row.try_get::<i16, _>(idx).map(|v| CellValue::Int(v.into())),
        "INT4" => row.try_get::<i32, _>(idx).map(|v| CellValue::Int(v.into())),
        "INT8" => row.try_get::<i64, _>(idx).map(CellValue::Int),
        "FLOAT4" => row.try_get::<f32, _>(idx).map(|v| CellValue::Float(v.into())),
        "FLOAT8" => row.try_get::<f64, _>(idx).map(CellValue::Float),
        "NUMERIC" => row
            .try_get::<rust_decimal::Decimal, _>(idx)
            .map(CellValue::Decimal),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<String, _>(idx).map(CellValue::Text)
        }
        "BOOL" => row.try_get::<bool, _>(idx).map(CellValue::Bool),
        "TIMESTAMPTZ" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(idx)
            .map(CellValue::Timestamp),
        "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(idx)
            .map(|v| CellValue::Timestamp(v.and_utc())),
        _ => return CellValue::Unsupported(type_name),
    };

    decoded.unwrap_or_else(|e| {
        tracing::warn!(column = idx, sql_type = %type_name, error = %e, "Failed to decode dashboard cell");
        CellValue::Unsupported(type_name)
    })
}
