//! Shared response helpers for API handlers.
//!
//! - [`Paginated`] renders a list page with `X-Total-Count` and `Link` headers.
//! - [`alert_headers`] builds the `X-habitat-alert` / `X-habitat-params` pair
//!   attached to every successful mutation.

use axum::http::header::LINK;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use habitat_core::pagination::PageRequest;
use serde::Serialize;

/// Application name used as the prefix of alert keys and header names.
pub const APP_NAME: &str = "habitat";

pub const ALERT_HEADER: &str = "x-habitat-alert";
pub const ERROR_HEADER: &str = "x-habitat-error";
pub const PARAMS_HEADER: &str = "x-habitat-params";
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Alert header pair returned alongside mutation responses.
pub type AlertHeaders = [(&'static str, String); 2];

/// Build alert headers such as `habitat.project.created` with the row id.
pub fn alert_headers(entity: &str, action: &str, id: impl std::fmt::Display) -> AlertHeaders {
    [
        (ALERT_HEADER, format!("{APP_NAME}.{entity}.{action}")),
        (PARAMS_HEADER, id.to_string()),
    ]
}

/// One page of a list endpoint.
#[derive(Debug)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: PageRequest,
    /// Request path the `Link` header points back to.
    pub path: String,
    /// Raw query string of the request; filters and sort are carried into
    /// every link while `page` and `size` are replaced.
    pub query: Option<String>,
}

impl<T: Serialize> Paginated<T> {
    /// RFC 5988 `Link` header value with next/prev/last/first relations.
    pub fn link_header(&self) -> String {
        let size = self.page.size;
        let current = self.page.page;
        let last = self.page.last_page(self.total);
        let carried: String = self
            .query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or_default();
                !pair.is_empty() && key != "page" && key != "size"
            })
            .map(|pair| format!("{pair}&"))
            .collect();
        let link = |page: i64, rel: &str| {
            format!("<{}?{carried}page={page}&size={size}>; rel=\"{rel}\"", self.path)
        };

        let mut links = Vec::with_capacity(4);
        if current < last {
            links.push(link(current + 1, "next"));
        }
        if current > 0 {
            links.push(link(current - 1, "prev"));
        }
        links.push(link(last, "last"));
        links.push(link(0, "first"));
        links.join(",")
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let link = self.link_header();
        let mut response = Json(self.items).into_response();
        let headers = response.headers_mut();
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(self.total));
        if let Ok(value) = HeaderValue::from_str(&link) {
            headers.insert(LINK, value);
        }
        response
    }
}
