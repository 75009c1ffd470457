use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::lookup::{LookupTerm, classify};
use crate::models::{CreateProduct, PaginationQuery, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for product business logic
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

    /// Resolve an id, slug or title to a product.
    ///
    /// Only text matches carry images; use [`find_one_plain`](Self::find_one_plain)
    /// when they are needed for id terms too.
    #[instrument(skip(self))]
    pub async fn resolve(&self, term: &str) -> ProductResult<Product> {
        let found = match classify(term) {
            LookupTerm::ById(id) => self.repository.find_by_id(id).await?,
            LookupTerm::ByText(text) => self.repository.find_by_text(&text).await?,
        };

        found.ok_or_else(|| ProductError::NotFound(format!("Product with {} not found", term)))
    }

    /// [`resolve`](Self::resolve) with images loaded on both branches.
    #[instrument(skip(self))]
    pub async fn find_one_plain(&self, term: &str) -> ProductResult<Product> {
        let mut product = self.resolve(term).await?;

        if matches!(classify(term), LookupTerm::ById(_)) {
            product.images = self.repository.images_of(product.id).await?;
        }

        Ok(product)
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, page: PaginationQuery) -> ProductResult<Vec<Product>> {
        page.validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.list(page).await
    }

    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(&self, id: Uuid, patch: UpdateProduct) -> ProductResult<Product> {
        patch
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, term: &str) -> ProductResult<()> {
        let product = self.resolve(term).await?;

        if !self.repository.delete(product.id).await? {
            return Err(ProductError::NotFound(format!(
                "Product with {} not found",
                term
            )));
        }

        Ok(())
    }

    /// Administrative: removes every product (and, by cascade, every image).
    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) -> ProductResult<u64> {
        self.repository.delete_all().await
    }

    /// Replace the whole catalog with `catalog`. Returns the number inserted.
    #[instrument(skip(self, catalog), fields(count = catalog.len()))]
    pub async fn seed(&self, catalog: Vec<CreateProduct>) -> ProductResult<usize> {
        self.delete_all_products().await?;

        let mut inserted = 0;
        for input in catalog {
            self.create_product(input).await?;
            inserted += 1;
        }

        tracing::info!(inserted, "Seeded product catalog");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn sample(title: &str) -> Product {
        Product::new(CreateProduct::new(title))
    }

    #[tokio::test]
    async fn test_resolve_uuid_term_uses_id_lookup() {
        let mut mock_repo = MockProductRepository::new();
        let product = sample("Chair");
        let id = product.id;

        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo.expect_find_by_text().never();

        let service = ProductService::new(mock_repo);
        let found = service.resolve(&id.to_string()).await.unwrap();
        assert_eq!(found.id, id);
    }

    #[tokio::test]
    async fn test_resolve_text_term_uses_text_lookup() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo.expect_find_by_id().never();
        mock_repo
            .expect_find_by_text()
            .withf(|term| term == "chair")
            .times(1)
            .returning(|_| Ok(Some(sample("Chair"))));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.resolve("chair").await.unwrap().title, "Chair");
    }

    #[tokio::test]
    async fn test_resolve_missing_is_not_found_with_term() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_find_by_text().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);

        let id = Uuid::now_v7().to_string();
        match service.resolve(&id).await.unwrap_err() {
            ProductError::NotFound(msg) => assert_eq!(msg, format!("Product with {} not found", id)),
            other => panic!("expected NotFound, got {:?}", other),
        }

        let err = service.resolve("sofa").await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_one_plain_loads_images_for_id_terms() {
        let mut mock_repo = MockProductRepository::new();
        let product = sample("Chair");
        let id = product.id;

        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo
            .expect_images_of()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(vec!["a.jpg".to_string(), "b.jpg".to_string()]));

        let service = ProductService::new(mock_repo);
        let found = service.find_one_plain(&id.to_string()).await.unwrap();
        assert_eq!(found.images, vec!["a.jpg", "b.jpg"]);
    }

    #[tokio::test]
    async fn test_find_one_plain_text_terms_skip_extra_query() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_text().returning(|_| {
            let mut product = sample("Chair");
            product.images = vec!["c.jpg".to_string()];
            Ok(Some(product))
        });
        mock_repo.expect_images_of().never();

        let service = ProductService::new(mock_repo);
        let found = service.find_one_plain("CHAIR").await.unwrap();
        assert_eq!(found.images, vec!["c.jpg"]);
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(CreateProduct::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_product_passes_patch_through() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();

        mock_repo
            .expect_update()
            .withf(move |got_id, patch| {
                *got_id == id && patch.images.as_deref() == Some(&["c.jpg".to_string()][..])
            })
            .times(1)
            .returning(|id, _| {
                let mut product = sample("Chair");
                product.id = id;
                product.images = vec!["c.jpg".to_string()];
                Ok(product)
            });

        let service = ProductService::new(mock_repo);
        let updated = service
            .update_product(
                id,
                UpdateProduct {
                    images: Some(vec!["c.jpg".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_remove_product_resolves_then_deletes() {
        let mut mock_repo = MockProductRepository::new();
        let product = sample("Chair");
        let id = product.id;

        mock_repo
            .expect_find_by_text()
            .returning(move |_| Ok(Some(product.clone())));
        mock_repo
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        service.remove_product("chair").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_product_not_found_skips_delete() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        let err = service
            .remove_product(&Uuid::now_v7().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seed_clears_then_inserts() {
        let mut mock_repo = MockProductRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(7));
        mock_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|input| Ok(Product::new(input)));

        let service = ProductService::new(mock_repo);
        let inserted = service
            .seed(vec![CreateProduct::new("Chair"), CreateProduct::new("Table")])
            .await
            .unwrap();
        assert_eq!(inserted, 2);
    }
}
