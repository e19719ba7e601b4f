//! Static demo data
//!
//! Fifty fixed products, unrelated to the database, served from a JSON
//! asset compiled into the binary.

use axum::{Json, Router, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

const SAMPLE_PRODUCTS_JSON: &str = include_str!("../../assets/sample_products.json");

/// One entry of the demo list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SampleProduct {
    #[schema(example = 1)]
    pub id: u32,
    #[schema(example = "Margherita Pizza")]
    pub name: String,
    #[schema(example = "Food")]
    pub category: String,
    #[schema(example = 12.99)]
    pub price: f64,
}

/// Parse the bundled asset
pub fn load() -> serde_json::Result<Vec<SampleProduct>> {
    serde_json::from_str(SAMPLE_PRODUCTS_JSON)
}

/// List the static sample products
#[utoipa::path(
    get,
    path = "/api/sample-products",
    tag = "Samples",
    responses(
        (status = 200, description = "The fixed demo product list", body = Vec<SampleProduct>)
    )
)]
pub(crate) async fn list_sample_products(
    State(samples): State<Arc<Vec<SampleProduct>>>,
) -> Json<Vec<SampleProduct>> {
    Json(samples.as_ref().clone())
}

/// Router for `/sample-products`; fails if the bundled asset is malformed
pub fn router() -> eyre::Result<Router> {
    let samples = Arc::new(load()?);

    Ok(Router::new()
        .route("/sample-products", get(list_sample_products))
        .with_state(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use std::collections::HashSet;
    use tower::ServiceExt;

    #[test]
    fn test_asset_has_fifty_distinct_products() {
        let samples = load().unwrap();
        assert_eq!(samples.len(), 50);

        let ids: HashSet<u32> = samples.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 50);
        assert!(samples.iter().all(|s| s.price >= 0.0 && !s.name.is_empty()));
    }

    #[tokio::test]
    async fn test_endpoint_serves_asset() {
        let response = router()
            .unwrap()
            .oneshot(
                Request::builder()
                    .uri("/sample-products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let served: Vec<SampleProduct> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(served, load().unwrap());
    }
}
