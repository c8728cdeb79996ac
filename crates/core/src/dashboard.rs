//! Seller dashboard types and cell coercion.
//!
//! Dashboard queries are read as untyped rows. Each column is first captured
//! as a [`CellValue`] and then coerced to the DTO field's type. Coercion never
//! fails the request: callers substitute the field default and log the
//! returned [`CoercionError`].

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Commission status counted towards total payments.
pub const COMMISSION_STATUS_PAID: &str = "PAID";
/// Commission status counted towards total dues.
pub const COMMISSION_STATUS_PENDING: &str = "PENDING";
/// Commission status excluded from both totals.
pub const COMMISSION_STATUS_CANCELLED: &str = "CANCELLED";

/// Sort keys accepted by the transaction list, mapped to SQL expressions.
///
/// The first entry is the default sort column.
pub const TRANSACTION_SORT_KEYS: &[(&str, &str)] = &[
    ("date", "txn_date"),
    ("amount", "amount"),
    ("status", "status"),
    ("sellerName", "seller_name"),
    ("projectName", "project_name"),
    ("unitsCount", "units_count"),
    ("feesAmount", "fees_amount"),
];

// ---------------------------------------------------------------------------
// Cell values
// ---------------------------------------------------------------------------

/// A database cell whose SQL type is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
    /// A column type the reader does not decode; holds the SQL type name.
    Unsupported(String),
}

/// A cell could not be coerced to the requested type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot read {found} as {expected}")]
pub struct CoercionError {
    pub expected: &'static str,
    pub found: String,
}

impl CellValue {
    fn kind(&self) -> String {
        match self {
            Self::Null => "null".into(),
            Self::Int(_) => "integer".into(),
            Self::Float(_) => "float".into(),
            Self::Decimal(_) => "decimal".into(),
            Self::Text(_) => "text".into(),
            Self::Bool(_) => "bool".into(),
            Self::Timestamp(_) => "timestamp".into(),
            Self::Unsupported(name) => format!("unsupported type {name}"),
        }
    }

    fn mismatch(&self, expected: &'static str) -> CoercionError {
        CoercionError {
            expected,
            found: self.kind(),
        }
    }

    /// Read as a 64-bit integer. Null reads as zero.
    pub fn to_i64(&self) -> Result<i64, CoercionError> {
        match self {
            Self::Null => Ok(0),
            Self::Int(v) => Ok(*v),
            Self::Decimal(d) if d.fract().is_zero() => {
                d.to_i64().ok_or_else(|| self.mismatch("integer"))
            }
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            Self::Text(s) => s.trim().parse().map_err(|_| self.mismatch("integer")),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Read as a decimal amount. Null reads as zero.
    pub fn to_decimal(&self) -> Result<Decimal, CoercionError> {
        match self {
            Self::Null => Ok(Decimal::ZERO),
            Self::Decimal(d) => Ok(*d),
            Self::Int(v) => Ok(Decimal::from(*v)),
            Self::Float(f) => Decimal::from_f64(*f).ok_or_else(|| self.mismatch("decimal")),
            Self::Text(s) => s.trim().parse().map_err(|_| self.mismatch("decimal")),
            _ => Err(self.mismatch("decimal")),
        }
    }

    /// Read as text. Null reads as the empty string; numbers are rendered.
    pub fn to_text(&self) -> Result<String, CoercionError> {
        match self {
            Self::Null => Ok(String::new()),
            Self::Text(s) => Ok(s.clone()),
            Self::Int(v) => Ok(v.to_string()),
            Self::Decimal(d) => Ok(d.to_string()),
            _ => Err(self.mismatch("text")),
        }
    }

    /// Read as an optional timestamp. Null reads as `None`.
    pub fn to_timestamp(&self) -> Result<Option<Timestamp>, CoercionError> {
        match self {
            Self::Null => Ok(None),
            Self::Timestamp(t) => Ok(Some(*t)),
            Self::Text(s) => chrono::DateTime::parse_from_rfc3339(s.trim())
                .map(|t| Some(t.with_timezone(&chrono::Utc)))
                .map_err(|_| self.mismatch("timestamp")),
            _ => Err(self.mismatch("timestamp")),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// One commission row of the dashboard transaction list.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardTransaction {
    pub commission_id: DbId,
    pub seller_id: DbId,
    pub seller_name: String,
    pub project_id: DbId,
    pub project_name: String,
    pub amount: Decimal,
    pub units_count: i64,
    pub fees_amount: Decimal,
    pub date: Option<Timestamp>,
    pub status: String,
}

/// Response body of `GET /api/sellers/dashboard`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SellerDashboard {
    pub total_payments: Decimal,
    pub total_dues: Decimal,
    pub total_sellers: i64,
    pub active_sellers: i64,
    pub total_transactions: i64,
    pub page: i64,
    pub size: i64,
    pub transactions: Vec<DashboardTransaction>,
}

impl SellerDashboard {
    /// The all-zero dashboard returned when aggregation cannot complete.
    pub fn empty(page: i64, size: i64) -> Self {
        Self {
            total_payments: Decimal::ZERO,
            total_dues: Decimal::ZERO,
            total_sellers: 0,
            active_sellers: 0,
            total_transactions: 0,
            page,
            size,
            transactions: Vec::new(),
        }
    }
}
