use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A catalog product as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, never reused
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Pizza")]
    pub name: String,
    #[schema(example = "Food")]
    pub category: String,
    #[schema(example = 29.99)]
    pub price: f64,
}

/// Validated input for creating a product
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// Validated partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none()
    }
}

impl Product {
    /// Apply the fields present in `update`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
    }
}

/// Request body for create and update, as received
///
/// Fields are checked by [`crate::validation`] before reaching the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(example = "Pizza")]
    pub name: Option<String>,
    #[schema(example = "Food")]
    pub category: Option<String>,
    pub price: Option<PriceInput>,
}

/// A price given either as a JSON number or as text such as `"29.99"`
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// Pagination query for listing products
///
/// Values are taken as text and read by their leading integer, so
/// `page_size=10abc` means 10.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// 1-based page number (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Items per page (default 10)
    #[param(example = "10")]
    pub page_size: Option<String>,
}

/// One page of products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    /// Total number of products in the store
    pub count: u64,
    pub total_pages: u64,
    pub page_size: u64,
    pub page: u64,
    pub results: Vec<Product>,
}
