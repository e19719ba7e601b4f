//! Page/page-size parsing and the arithmetic behind the list envelope.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{ListProductsQuery, Product, ProductPage};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer prefix pattern"));

/// Read the leading decimal integer of `raw`.
///
/// Leading whitespace and a sign are accepted and trailing garbage is
/// ignored: `" 10abc"` is 10, `"abc"` is `None`. Values that do not fit in
/// an `i64` are `None`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    INT_PREFIX
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// A validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate the raw query. Blank values fall back to the defaults.
    pub fn from_query(query: &ListProductsQuery) -> ProductResult<Self> {
        let page = parse_param("page", query.page.as_deref(), DEFAULT_PAGE)?;
        let page_size = parse_param("page_size", query.page_size.as_deref(), DEFAULT_PAGE_SIZE)?;

        // skip must fit a signed 64-bit OFFSET
        let skip = (page - 1).checked_mul(page_size);
        if skip.is_none_or(|skip| skip > i64::MAX as u64) {
            return Err(ProductError::InvalidPagination(
                "page is too large for the given page_size".to_string(),
            ));
        }

        Ok(Self { page, page_size })
    }

    /// Records to skip before this page
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.page_size
    }

    /// Records on this page at most
    pub fn take(&self) -> u64 {
        self.page_size
    }

    /// `ceil(count / page_size)`
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.page_size)
    }

    /// Wrap one page of results into the list envelope
    pub fn into_page(self, count: u64, results: Vec<Product>) -> ProductPage {
        ProductPage {
            count,
            total_pages: self.total_pages(count),
            page_size: self.page_size,
            page: self.page,
            results,
        }
    }
}

fn parse_param(name: &str, raw: Option<&str>, default: u64) -> ProductResult<u64> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(default);
    };

    let value = parse_int_prefix(raw)
        .ok_or_else(|| ProductError::InvalidPagination(format!("{} must be a number", name)))?;

    if value < 1 {
        return Err(ProductError::InvalidPagination(format!(
            "{} must be at least 1",
            name
        )));
    }

    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> ListProductsQuery {
        ListProductsQuery {
            page: page.map(String::from),
            page_size: page_size.map(String::from),
        }
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("10"), Some(10));
        assert_eq!(parse_int_prefix("10abc"), Some(10));
        assert_eq!(parse_int_prefix("  7"), Some(7));
        assert_eq!(parse_int_prefix("+3"), Some(3));
        assert_eq!(parse_int_prefix("-2"), Some(-2));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999999999999"), None);
    }

    #[test]
    fn test_defaults_when_absent_or_blank() {
        assert_eq!(
            PageRequest::from_query(&query(None, None)).unwrap(),
            PageRequest::default()
        );
        assert_eq!(
            PageRequest::from_query(&query(Some(""), Some("  "))).unwrap(),
            PageRequest::default()
        );
    }

    #[test]
    fn test_prefix_values_are_accepted() {
        let request = PageRequest::from_query(&query(Some("2"), Some("10abc"))).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.page_size, 10);
        assert_eq!(request.skip(), 10);
        assert_eq!(request.take(), 10);
    }

    #[test]
    fn test_rejects_non_numeric_and_non_positive() {
        let err = PageRequest::from_query(&query(Some("abc"), None)).unwrap_err();
        assert!(err.to_string().contains("page must be a number"));

        let err = PageRequest::from_query(&query(None, Some("0"))).unwrap_err();
        assert!(err.to_string().contains("page_size must be at least 1"));

        let err = PageRequest::from_query(&query(Some("-1"), None)).unwrap_err();
        assert!(err.to_string().contains("page must be at least 1"));
    }

    #[test]
    fn test_rejects_offset_overflow() {
        let huge = i64::MAX.to_string();
        assert!(PageRequest::from_query(&query(Some(&huge), Some(&huge))).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest {
            page: 1,
            page_size: 10,
        };
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(10), 1);
        assert_eq!(request.total_pages(11), 2);
        assert_eq!(request.total_pages(50), 5);
    }

    #[test]
    fn test_into_page_envelope() {
        let page = PageRequest::default().into_page(0, vec![]);
        assert_eq!(
            page,
            ProductPage {
                count: 0,
                total_pages: 0,
                page_size: 10,
                page: 1,
                results: vec![],
            }
        );
    }
}
