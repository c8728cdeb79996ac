//! Page and sort parsing for list endpoints.
//!
//! Lists take `page` (0-based), `size` and `sort=<field>,<asc|desc>`. Sort
//! fields are resolved against a per-endpoint whitelist of `(api name, SQL
//! column)` pairs so user input never reaches SQL text directly.

use crate::error::CoreError;

/// Page size used when the request does not name one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A resolved `ORDER BY` clause element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Whitelisted SQL column or expression alias.
    pub column: &'static str,
    pub direction: Direction,
}

impl SortOrder {
    /// Render as `"<column> <DIR>"`.
    pub fn to_sql(self) -> String {
        format!("{} {}", self.column, self.direction.as_sql())
    }
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: SortOrder,
}

impl PageRequest {
    /// Validate raw query values against `allowed` sort keys.
    ///
    /// Without a `sort` parameter the first whitelisted key is used with
    /// `default_direction`. An empty whitelist is a programming error and is
    /// reported as [`CoreError::Internal`].
    pub fn parse(
        page: Option<i64>,
        size: Option<i64>,
        sort: Option<&str>,
        allowed: &[(&str, &'static str)],
        default_direction: Direction,
    ) -> Result<Self, CoreError> {
        let page = page.unwrap_or(0);
        if page < 0 {
            return Err(CoreError::Validation("page must not be negative".into()));
        }

        let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(CoreError::Validation(format!(
                "size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if page.checked_mul(size).is_none() {
            return Err(CoreError::Validation("page is out of range".into()));
        }

        let Some(&(_, default_column)) = allowed.first() else {
            return Err(CoreError::Internal("no sortable columns configured".into()));
        };

        let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
            None => SortOrder {
                column: default_column,
                direction: default_direction,
            },
            Some(raw) => parse_sort(raw, allowed)?,
        };

        Ok(Self { page, size, sort })
    }

    /// Row offset of this page.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    /// Index of the last page for `total` rows (0 when there are none).
    pub fn last_page(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total - 1) / self.size
        }
    }
}

fn parse_sort(raw: &str, allowed: &[(&str, &'static str)]) -> Result<SortOrder, CoreError> {
    let mut parts = raw.splitn(2, ',');
    let field = parts.next().unwrap_or_default().trim();
    let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
        None => Direction::Asc,
        Some(d) if d == "asc" => Direction::Asc,
        Some(d) if d == "desc" => Direction::Desc,
        Some(d) => {
            return Err(CoreError::Validation(format!(
                "Unknown sort direction '{d}'. Use 'asc' or 'desc'"
            )))
        }
    };

    let column = allowed
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .ok_or_else(|| {
            let names: Vec<&str> = allowed.iter().map(|(name, _)| *name).collect();
            CoreError::Validation(format!(
                "Unknown sort field '{field}'. Valid fields: {}",
                names.join(", ")
            ))
        })?;

    Ok(SortOrder { column, direction })
}
