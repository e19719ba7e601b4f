use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ListProductsQuery, Product, ProductPage, ProductPayload, UpdateProduct,
};
use crate::pagination::PageRequest;
use crate::repository::ProductRepository;

/// Service layer for Product business logic
///
/// Validates input, computes pages and decides which store failures the
/// caller gets to see. Store causes are logged here and replaced with a
/// generic error.
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List one page of products along with the total count
    pub async fn list_products(&self, query: ListProductsQuery) -> ProductResult<ProductPage> {
        let request = PageRequest::from_query(&query)?;

        let (results, count) = tokio::try_join!(
            self.repository.find_many(request.skip(), request.take()),
            self.repository.count(),
        )
        .map_err(|e| {
            tracing::error!(
                error = %e,
                page = request.page,
                page_size = request.page_size,
                "Failed to list products"
            );
            ProductError::ListFailed
        })?;

        Ok(request.into_page(count, results))
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_unique(id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, product_id = id, "Failed to fetch product");
                ProductError::LookupFailed
            })?
            .ok_or(ProductError::NotFound(id))
    }

    /// Validate the payload and create a product
    pub async fn create_product(&self, payload: ProductPayload) -> ProductResult<Product> {
        let input = CreateProduct::try_from(payload)?;

        self.repository.create(input).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create product");
            ProductError::CreateFailed
        })
    }

    /// Validate the payload and apply it as a partial update
    pub async fn update_product(&self, id: i32, payload: ProductPayload) -> ProductResult<Product> {
        let input = UpdateProduct::try_from(payload)?;

        self.repository.update(id, input).await.map_err(|e| match e {
            not_found @ ProductError::NotFound(_) => not_found,
            other => {
                tracing::error!(error = %other, product_id = id, "Failed to update product");
                ProductError::UpdateFailed
            }
        })
    }

    /// Delete a product
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        self.repository.delete(id).await.map_err(|e| match e {
            not_found @ ProductError::NotFound(_) => not_found,
            other => {
                tracing::error!(error = %other, product_id = id, "Failed to delete product");
                ProductError::DeleteFailed
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceInput;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;

    fn pizza(id: i32) -> Product {
        Product {
            id,
            name: "Pizza".to_string(),
            category: "Food".to_string(),
            price: 29.99,
        }
    }

    fn query(page: &str, page_size: &str) -> ListProductsQuery {
        ListProductsQuery {
            page: Some(page.to_string()),
            page_size: Some(page_size.to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_products_builds_envelope() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_many()
            .with(eq(10), eq(10))
            .times(1)
            .returning(|_, _| Ok(vec![pizza(11), pizza(12)]));
        mock_repo.expect_count().times(1).returning(|| Ok(12));

        let service = ProductService::new(mock_repo);
        let page = service.list_products(query("2", "10")).await.unwrap();

        assert_eq!(page.count, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_rejects_bad_pagination_without_querying() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let err = service.list_products(query("1", "0")).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidPagination(_)));
    }

    #[tokio::test]
    async fn test_list_products_hides_store_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_many()
            .returning(|_, _| Err(ProductError::Database("timeout".into())));
        mock_repo.expect_count().returning(|| Ok(0));

        let service = ProductService::new(mock_repo);
        let err = service.list_products(ListProductsQuery::default()).await.unwrap_err();
        assert!(matches!(err, ProductError::ListFailed));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_unique()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(3).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_get_product_store_error_is_lookup_failure() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_unique()
            .returning(|_| Err(ProductError::Database("timeout".into())));

        let service = ProductService::new(mock_repo);
        let err = service.get_product(3).await.unwrap_err();
        assert!(matches!(err, ProductError::LookupFailed));
    }

    #[tokio::test]
    async fn test_create_product_validates_before_store() {
        let mock_repo = MockProductRepository::new();
        let service = ProductService::new(mock_repo);

        let payload = ProductPayload {
            name: Some("Pizza".to_string()),
            category: None,
            price: Some(PriceInput::Number(1.0)),
        };
        let err = service.create_product(payload).await.unwrap_err();
        assert_eq!(err.to_string(), "category is required");
    }

    #[tokio::test]
    async fn test_create_product_store_error_is_generic() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(ProductError::Database("duplicate key".into())));

        let service = ProductService::new(mock_repo);
        let payload = ProductPayload {
            name: Some("Pizza".to_string()),
            category: Some("Food".to_string()),
            price: Some(PriceInput::Text("29.99".to_string())),
        };

        let err = service.create_product(payload).await.unwrap_err();
        assert!(matches!(err, ProductError::CreateFailed));
    }

    #[tokio::test]
    async fn test_create_product_passes_parsed_price() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.price == 29.99 && input.name == "Pizza")
            .times(1)
            .returning(|_| Ok(pizza(1)));

        let service = ProductService::new(mock_repo);
        let payload = ProductPayload {
            name: Some("Pizza".to_string()),
            category: Some("Food".to_string()),
            price: Some(PriceInput::Text("29.99".to_string())),
        };

        let product = service.create_product(payload).await.unwrap();
        assert_eq!(product.id, 1);
    }

    #[tokio::test]
    async fn test_update_product_keeps_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .returning(|id, _| Err(ProductError::NotFound(id)));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(8, ProductPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(8)));
    }

    #[tokio::test]
    async fn test_update_product_store_error_is_generic() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .returning(|_, _| Err(ProductError::Database("deadlock".into())));

        let service = ProductService::new(mock_repo);
        let err = service
            .update_product(8, ProductPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::UpdateFailed));
    }

    #[tokio::test]
    async fn test_delete_product_maps_errors() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(1))
            .returning(|id| Err(ProductError::NotFound(id)));
        mock_repo
            .expect_delete()
            .with(eq(2))
            .returning(|_| Err(ProductError::Database("deadlock".into())));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete_product(1).await.unwrap_err(),
            ProductError::NotFound(1)
        ));
        assert!(matches!(
            service.delete_product(2).await.unwrap_err(),
            ProductError::DeleteFailed
        ));
    }
}
