use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Listing is ordered by ascending id. `update` and `delete` report
/// `ProductError::NotFound` when the id does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch up to `take` products after skipping `skip`
    async fn find_many(&self, skip: u64, take: u64) -> ProductResult<Vec<Product>>;

    /// Count all products
    async fn count(&self) -> ProductResult<u64>;

    /// Get a product by ID
    async fn find_unique(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert a product; the store assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Remove a product and return what was removed
    async fn delete(&self, id: i32) -> ProductResult<Product>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i32, Product>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_many(&self, skip: u64, take: u64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(take).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn find_unique(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id,
            name: input.name,
            category: input.category,
            price: input.price,
        };

        self.products.write().await.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        Ok(product.clone())
    }

    async fn delete(&self, id: i32) -> ProductResult<Product> {
        self.products
            .write()
            .await
            .remove(&id)
            .ok_or(ProductError::NotFound(id))
    }
}
