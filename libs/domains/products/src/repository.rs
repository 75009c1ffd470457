use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PaginationQuery, Product, UpdateProduct};

/// Persistence for products and their image rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product and its images (in order) as one unit
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Page ordered by `(created_at, id)`, images loaded
    async fn list(&self, page: PaginationQuery) -> ProductResult<Vec<Product>>;

    /// Row only: `images` is always empty
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// `upper(title) = upper(term)` or `slug = lower(term)`, images loaded
    async fn find_by_text(&self, term: &str) -> ProductResult<Option<Product>>;

    /// Image URLs of one product, ascending image id
    async fn images_of(&self, id: Uuid) -> ProductResult<Vec<String>>;

    /// Merge scalars and, if `patch.images` is present, replace the image set,
    /// atomically. Returns the re-fetched product.
    async fn update(&self, id: Uuid, patch: UpdateProduct) -> ProductResult<Product>;

    /// `false` when no row matched
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Rows removed
    async fn delete_all(&self) -> ProductResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Enforces the same unique keys as the database and reports violations with
/// the same detail text.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn check_unique(
        products: &HashMap<Uuid, Product>,
        candidate: &Product,
    ) -> ProductResult<()> {
        let others = || products.values().filter(|p| p.id != candidate.id);

        if others().any(|p| p.title == candidate.title) {
            return Err(ProductError::Conflict(format!(
                "Key (title)=({}) already exists.",
                candidate.title
            )));
        }
        if others().any(|p| p.slug == candidate.slug) {
            return Err(ProductError::Conflict(format!(
                "Key (slug)=({}) already exists.",
                candidate.slug
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let images = input.images.clone();
        let mut product = Product::new(input);
        product.images = images;

        Self::check_unique(&products, &product)?;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn list(&self, page: PaginationQuery) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        Ok(result
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned().map(|mut p| {
            p.images.clear();
            p
        }))
    }

    async fn find_by_text(&self, term: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        let upper = term.to_uppercase();
        let lower = term.to_lowercase();

        let mut matches: Vec<&Product> = products
            .values()
            .filter(|p| p.title.to_uppercase() == upper || p.slug == lower)
            .collect();
        matches.sort_by_key(|p| (p.created_at, p.id));

        Ok(matches.first().map(|p| (*p).clone()))
    }

    async fn images_of(&self, id: Uuid) -> ProductResult<Vec<String>> {
        let products = self.products.read().await;
        Ok(products.get(&id).map(|p| p.images.clone()).unwrap_or_default())
    }

    async fn update(&self, id: Uuid, patch: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let mut product = products
            .get(&id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(format!("Product with id: {} not found", id)))?;

        product.apply_update(&patch);
        if let Some(images) = patch.images {
            product.images = images;
        }

        Self::check_unique(&products, &product)?;
        products.insert(id, product.clone());

        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        let removed = products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let count = products.len() as u64;
        products.clear();

        tracing::info!(deleted = count, "Deleted all products");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chair() -> CreateProduct {
        CreateProduct::new("Chair")
            .with_slug("chair")
            .with_images(["a.jpg", "b.jpg"])
    }

    #[tokio::test]
    async fn test_create_keeps_image_order() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(chair()).await.unwrap();

        assert_eq!(created.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(repo.images_of(created.id).await.unwrap(), created.images);
    }

    #[tokio::test]
    async fn test_find_by_id_omits_images() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(chair()).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(found.images.is_empty());
        assert_eq!(found.title, "Chair");
    }

    #[tokio::test]
    async fn test_find_by_text_matches_title_or_slug() {
        let repo = InMemoryProductRepository::new();
        repo.create(CreateProduct::new("Office Chair")).await.unwrap();

        let by_title = repo.find_by_text("OFFICE chair").await.unwrap().unwrap();
        assert_eq!(by_title.slug, "office_chair");

        let by_slug = repo.find_by_text("Office_Chair").await.unwrap().unwrap();
        assert_eq!(by_slug.id, by_title.id);

        assert!(repo.find_by_text("sofa").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_conflict() {
        let repo = InMemoryProductRepository::new();
        repo.create(chair()).await.unwrap();

        let err = repo
            .create(CreateProduct::new("Another Chair").with_slug("chair"))
            .await
            .unwrap_err();
        match err {
            ProductError::Conflict(detail) => {
                assert_eq!(detail, "Key (slug)=(chair) already exists.")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_replaces_images_only_when_present() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(chair()).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(10.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.images, vec!["a.jpg", "b.jpg"]);

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    images: Some(vec!["c.jpg".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.images, vec!["c.jpg"]);
        assert_eq!(updated.price, 10.0);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryProductRepository::new();
        let err = repo
            .update(Uuid::now_v7(), UpdateProduct::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_paginates_in_creation_order() {
        let repo = InMemoryProductRepository::new();
        for title in ["First", "Second", "Third"] {
            repo.create(CreateProduct::new(title)).await.unwrap();
        }

        let page = repo
            .list(PaginationQuery {
                limit: 2,
                offset: 1,
            })
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "Third"]);
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(chair()).await.unwrap();
        repo.create(CreateProduct::new("Table")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.images_of(created.id).await.unwrap().is_empty());

        assert_eq!(repo.delete_all().await.unwrap(), 1);
        assert!(repo.list(PaginationQuery::default()).await.unwrap().is_empty());
    }
}
