//! Request body checks shared by create and partial update.
//!
//! Both paths run [`validate_fields`]; only the [`Presence`] rule differs.
//! Fields are checked in the order name, category, price. Each field is
//! checked completely before the next one and the first failure is reported.

use regex::Regex;
use std::sync::LazyLock;
use validator::{ValidateLength, ValidateRange};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PriceInput, ProductPayload, UpdateProduct};

/// Longest accepted `name` or `category`, in characters
pub const MAX_TEXT_LEN: u64 = 255;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid float prefix pattern")
});

/// Whether fields have to be supplied, and what a checked payload becomes
pub trait Presence {
    /// A checked field: the value itself, or an optional value
    type Field<T>;
    /// The input assembled from the checked fields
    type Output;

    /// Blank text counts as an absent field
    const BLANK_IS_MISSING: bool;

    fn absent<T>(field: &'static str) -> ProductResult<Self::Field<T>>;

    fn present<T>(value: T) -> Self::Field<T>;

    fn assemble(
        name: Self::Field<String>,
        category: Self::Field<String>,
        price: Self::Field<f64>,
    ) -> Self::Output;
}

/// Create: absent or blank fields are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required;

/// Update: absent fields are skipped, present ones are still checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optional;

impl Presence for Required {
    type Field<T> = T;
    type Output = CreateProduct;

    const BLANK_IS_MISSING: bool = true;

    fn absent<T>(field: &'static str) -> ProductResult<T> {
        Err(ProductError::MissingField(field))
    }

    fn present<T>(value: T) -> T {
        value
    }

    fn assemble(name: String, category: String, price: f64) -> CreateProduct {
        CreateProduct {
            name,
            category,
            price,
        }
    }
}

impl Presence for Optional {
    type Field<T> = Option<T>;
    type Output = UpdateProduct;

    const BLANK_IS_MISSING: bool = false;

    fn absent<T>(_field: &'static str) -> ProductResult<Option<T>> {
        Ok(None)
    }

    fn present<T>(value: T) -> Option<T> {
        Some(value)
    }

    fn assemble(name: Option<String>, category: Option<String>, price: Option<f64>) -> UpdateProduct {
        UpdateProduct {
            name,
            category,
            price,
        }
    }
}

/// Read the leading decimal number of `raw`.
///
/// `"29.99"` is 29.99, `"12abc"` is 12, `".5"` is 0.5 and `"abc"` is
/// `None`. Leading whitespace is skipped.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Check the payload field by field and assemble the input for `P`.
pub fn validate_fields<P: Presence>(payload: ProductPayload) -> ProductResult<P::Output> {
    let name = check_text::<P>("name", payload.name)?;
    let category = check_text::<P>("category", payload.category)?;
    let price = check_price::<P>(payload.price)?;

    Ok(P::assemble(name, category, price))
}

fn check_text<P: Presence>(field: &'static str, value: Option<String>) -> ProductResult<P::Field<String>> {
    let Some(value) = value else {
        return P::absent(field);
    };

    if value.trim().is_empty() {
        if P::BLANK_IS_MISSING {
            return P::absent(field);
        }
        return Err(invalid(field, format!("{field} must not be empty")));
    }

    if !value.validate_length(None, Some(MAX_TEXT_LEN), None) {
        return Err(invalid(
            field,
            format!("{field} must be at most {MAX_TEXT_LEN} characters"),
        ));
    }

    Ok(P::present(value))
}

fn check_price<P: Presence>(value: Option<PriceInput>) -> ProductResult<P::Field<f64>> {
    let price = match value {
        None => return P::absent("price"),
        Some(PriceInput::Text(s)) if P::BLANK_IS_MISSING && s.trim().is_empty() => {
            return P::absent("price");
        }
        Some(PriceInput::Number(n)) => n,
        Some(PriceInput::Text(s)) => {
            parse_float_prefix(&s).ok_or_else(|| invalid("price", "price must be a number".into()))?
        }
    };

    if !price.is_finite() {
        return Err(invalid("price", "price must be a finite number".into()));
    }

    if !price.validate_range(Some(0.0), None, None, None) {
        return Err(invalid("price", "price must not be negative".into()));
    }

    Ok(P::present(price))
}

fn invalid(field: &'static str, reason: String) -> ProductError {
    ProductError::InvalidField { field, reason }
}

impl TryFrom<ProductPayload> for CreateProduct {
    type Error = ProductError;

    fn try_from(payload: ProductPayload) -> ProductResult<Self> {
        validate_fields::<Required>(payload)
    }
}

impl TryFrom<ProductPayload> for UpdateProduct {
    type Error = ProductError;

    fn try_from(payload: ProductPayload) -> ProductResult<Self> {
        validate_fields::<Optional>(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, category: Option<&str>, price: Option<PriceInput>) -> ProductPayload {
        ProductPayload {
            name: name.map(String::from),
            category: category.map(String::from),
            price,
        }
    }

    fn text(s: &str) -> Option<PriceInput> {
        Some(PriceInput::Text(s.to_string()))
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("29.99"), Some(29.99));
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix("  .5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e2x"), Some(100.0));
        assert_eq!(parse_float_prefix("-3"), Some(-3.0));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
    }

    #[test]
    fn test_create_parses_text_price() {
        let input = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text("29.99"))).unwrap();
        assert_eq!(input.price, 29.99);
        assert_eq!(input.name, "Pizza");
    }

    #[test]
    fn test_create_accepts_zero_price() {
        let input = CreateProduct::try_from(payload(
            Some("Sample"),
            Some("Free"),
            Some(PriceInput::Number(0.0)),
        ))
        .unwrap();
        assert_eq!(input.price, 0.0);
    }

    #[test]
    fn test_create_reports_first_missing_field() {
        let err = CreateProduct::try_from(payload(None, None, None)).unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = CreateProduct::try_from(payload(Some("Pizza"), None, text("1"))).unwrap_err();
        assert_eq!(err.to_string(), "category is required");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some(""), text("1"))).unwrap_err();
        assert_eq!(err.to_string(), "category is required");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text(""))).unwrap_err();
        assert_eq!(err.to_string(), "price is required");
    }

    #[test]
    fn test_create_rejects_bad_price() {
        let err = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text("abc"))).unwrap_err();
        assert_eq!(err.to_string(), "price must be a number");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text("-5"))).unwrap_err();
        assert_eq!(err.to_string(), "price must not be negative");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text("1e999"))).unwrap_err();
        assert_eq!(err.to_string(), "price must be a finite number");
    }

    #[test]
    fn test_update_allows_any_subset() {
        let input = UpdateProduct::try_from(payload(None, None, text("12abc"))).unwrap();
        assert_eq!(
            input,
            UpdateProduct {
                price: Some(12.0),
                ..Default::default()
            }
        );

        let input = UpdateProduct::try_from(ProductPayload::default()).unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn test_update_rejects_empty_text() {
        let err = UpdateProduct::try_from(payload(Some(""), None, None)).unwrap_err();
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn test_create_reports_long_name_before_bad_price() {
        let long_name = "a".repeat(300);
        let err = CreateProduct::try_from(payload(Some(&long_name), Some("Food"), text("abc"))).unwrap_err();
        assert_eq!(err.to_string(), "name must be at most 255 characters");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some(""), text("-1"))).unwrap_err();
        assert_eq!(err.to_string(), "category is required");
    }

    #[test]
    fn test_create_treats_whitespace_as_missing() {
        let err = CreateProduct::try_from(payload(Some("   "), Some("  "), text("1"))).unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = CreateProduct::try_from(payload(Some("Pizza"), Some("Food"), text("  "))).unwrap_err();
        assert_eq!(err.to_string(), "price is required");
    }

    #[test]
    fn test_text_length_limit_counts_characters() {
        let max = "é".repeat(255);
        let input = CreateProduct::try_from(payload(Some(&max), Some("Food"), text("1"))).unwrap();
        assert_eq!(input.name, max);

        let err = UpdateProduct::try_from(payload(None, Some(&"x".repeat(256)), None)).unwrap_err();
        assert_eq!(err.to_string(), "category must be at most 255 characters");
    }

    #[test]
    fn test_update_rejects_whitespace_text() {
        let err = UpdateProduct::try_from(payload(None, Some(" \t"), text("abc"))).unwrap_err();
        assert_eq!(err.to_string(), "category must not be empty");
    }

    #[test]
    fn test_update_rejects_unparseable_price() {
        let err = UpdateProduct::try_from(payload(None, None, text("free"))).unwrap_err();
        assert_eq!(err.to_string(), "price must be a number");
    }
}
