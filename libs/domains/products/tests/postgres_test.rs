//! PostgreSQL repository tests against a real database.
//!
//! Each test starts its own container, so they need Docker:
//!
//! ```sh
//! cargo test -p domain_products --test postgres_test -- --ignored
//! ```

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::assert_price_eq};

fn input(builder: &TestDataBuilder, suffix: &str, seed: usize) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", suffix),
        category: "Integration".to_string(),
        price: builder.price(seed),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_crud_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_crud");

    let created = repo.create(input(&builder, "a", 1)).await.unwrap();
    assert!(created.id >= 1);

    let fetched = repo.find_unique(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, created.name);
    assert_price_eq(fetched.price, created.price);

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                price: Some(0.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.category, "Integration");
    assert_price_eq(updated.price, 0.0);

    let deleted = repo.delete(created.id).await.unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(repo.find_unique(created.id).await.unwrap().is_none());

    let err = repo.delete(created.id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pagination_orders_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_pages");

    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(repo.create(input(&builder, &i.to_string(), i)).await.unwrap().id);
    }

    assert_eq!(repo.count().await.unwrap(), 5);

    let page: Vec<i32> = repo
        .find_many(2, 2)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(page, ids[2..4].to_vec());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_ids_are_not_reused() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_ids");

    let first = repo.create(input(&builder, "first", 0)).await.unwrap();
    repo.delete(first.id).await.unwrap();

    let second = repo.create(input(&builder, "second", 1)).await.unwrap();
    assert!(second.id > first.id);
}
