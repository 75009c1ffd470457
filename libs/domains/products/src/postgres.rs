use async_trait::async_trait;
use axum_helpers::ErrorCode;
use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::sqlx::postgres::PgDatabaseError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, RuntimeErr,
    SqlErr, TransactionTrait,
};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    entity::{product_images, products},
    error::{ProductError, ProductResult},
    models::{CreateProduct, PaginationQuery, Product, UpdateProduct},
    repository::ProductRepository,
};

const UNIQUE_VIOLATION: &str = "23505";
const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>;

pub struct PgProductRepository {
    db: DatabaseConnection,
    transaction_timeout: Duration,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            transaction_timeout: DEFAULT_TRANSACTION_TIMEOUT,
        }
    }

    /// Upper bound for each create/update transaction. Exceeding it rolls
    /// back and reports an internal error.
    pub fn with_transaction_timeout(mut self, timeout: Duration) -> Self {
        self.transaction_timeout = timeout;
        self
    }

    /// Runs `work` in a transaction: commit on `Ok`, explicit rollback on
    /// `Err` or timeout. Dropping the future mid-flight drops the
    /// transaction, which rolls back as well.
    ///
    /// Database errors are mapped through `classify`.
    async fn in_transaction<T, F, C>(
        &self,
        operation: &'static str,
        classify: C,
        work: F,
    ) -> ProductResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
        C: Fn(DbErr) -> ProductError + Send + Sync,
    {
        let txn = self.db.begin().await.map_err(&classify)?;
        debug!(operation, "Transaction started");

        let outcome = tokio::time::timeout(self.transaction_timeout, work(&txn)).await;

        match outcome {
            Ok(Ok(value)) => {
                txn.commit().await.map_err(&classify)?;
                debug!(operation, "Transaction committed");
                Ok(value)
            }
            Ok(Err(err)) => {
                rollback(txn, operation).await;
                Err(classify(err))
            }
            Err(_) => {
                rollback(txn, operation).await;
                error!(
                    operation,
                    timeout = ?self.transaction_timeout,
                    error_code = ErrorCode::InternalError.code(),
                    "Transaction timed out"
                );
                Err(ProductError::Internal(format!(
                    "{} transaction exceeded {:?}",
                    operation, self.transaction_timeout
                )))
            }
        }
    }

    async fn find_row(&self, id: Uuid) -> ProductResult<Option<products::Model>> {
        products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "find_by_id"))
    }
}

async fn rollback(txn: DatabaseTransaction, operation: &'static str) {
    match txn.rollback().await {
        Ok(()) => warn!(operation, "Transaction rolled back"),
        Err(e) => error!(operation, error = %e, "Failed to roll back transaction"),
    }
}

async fn insert_images<C: ConnectionTrait>(
    db: &C,
    product_id: Uuid,
    urls: &[String],
) -> Result<(), DbErr> {
    if urls.is_empty() {
        return Ok(());
    }

    product_images::Entity::insert_many(
        urls.iter()
            .map(|url| product_images::ActiveModel::for_product(product_id, url)),
    )
    .exec(db)
    .await?;

    Ok(())
}

fn product_not_found(id: Uuid) -> ProductError {
    ProductError::NotFound(format!("Product with id: {} not found", id))
}

/// A row that disappeared mid-update (no row updated, or the image FK
/// rejecting the insert) is NotFound; the rest goes to [`classify_db_error`].
fn classify_update_error(err: DbErr, id: Uuid) -> ProductError {
    let row_missing = matches!(err, DbErr::RecordNotUpdated)
        || matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)));

    if row_missing {
        warn!(product_id = %id, error = %err, "Product disappeared during update");
        return product_not_found(id);
    }
    classify_db_error(err, "update")
}

/// `23505` becomes [`ProductError::Conflict`] with the constraint detail;
/// anything else is logged and masked as [`ProductError::Internal`].
fn classify_db_error(err: DbErr, operation: &'static str) -> ProductError {
    if let Some(detail) = unique_violation_detail(&err) {
        info!(operation, detail = %detail, "Unique constraint violated");
        return ProductError::Conflict(detail);
    }

    error!(
        operation,
        error = %err,
        error_code = ErrorCode::InternalError.code(),
        "Database error"
    );
    ProductError::Internal(err.to_string())
}

fn unique_violation_detail(err: &DbErr) -> Option<String> {
    if let DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) = err
    {
        if let Some(db_err) = sqlx_err.as_database_error() {
            if db_err.code().as_deref() != Some(UNIQUE_VIOLATION) {
                return None;
            }
            let detail = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.detail())
                .map(str::to_string)
                .unwrap_or_else(|| db_err.message().to_string());
            return Some(detail);
        }
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => None,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let images = input.images.clone();
        let product = Product::new(input);
        let row = products::ActiveModel::from(&product);
        let urls = images.clone();

        let model = self
            .in_transaction("create", |e| classify_db_error(e, "create"), move |txn| {
                Box::pin(async move {
                    let model = row.insert(txn).await?;
                    insert_images(txn, model.id, &urls).await?;
                    Ok(model)
                })
            })
            .await?;

        info!(product_id = %model.id, images = images.len(), "Created product");
        Ok(model.into_product(images))
    }

    async fn list(&self, page: PaginationQuery) -> ProductResult<Vec<Product>> {
        let rows = products::Entity::find()
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "list"))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let image_rows = product_images::Entity::find()
            .filter(product_images::Column::ProductId.is_in(ids))
            .order_by_asc(product_images::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "list"))?;

        let mut by_product: HashMap<Uuid, Vec<String>> = HashMap::new();
        for image in image_rows {
            by_product.entry(image.product_id).or_default().push(image.url);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = by_product.remove(&row.id).unwrap_or_default();
                row.into_product(images)
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self
            .find_row(id)
            .await?
            .map(|row| row.into_product(Vec::new())))
    }

    async fn find_by_text(&self, term: &str) -> ProductResult<Option<Product>> {
        let matches = Condition::any()
            .add(Expr::expr(Func::upper(Expr::col(products::Column::Title))).eq(term.to_uppercase()))
            .add(products::Column::Slug.eq(term.to_lowercase()));

        let row = products::Entity::find()
            .filter(matches)
            .order_by_asc(products::Column::CreatedAt)
            .order_by_asc(products::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "find_by_text"))?;

        match row {
            Some(row) => {
                let images = self.images_of(row.id).await?;
                Ok(Some(row.into_product(images)))
            }
            None => Ok(None),
        }
    }

    async fn images_of(&self, id: Uuid) -> ProductResult<Vec<String>> {
        let rows = product_images::Entity::find()
            .filter(product_images::Column::ProductId.eq(id))
            .order_by_asc(product_images::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "images_of"))?;

        Ok(rows.into_iter().map(|image| image.url).collect())
    }

    async fn update(&self, id: Uuid, patch: UpdateProduct) -> ProductResult<Product> {
        let row = products::ActiveModel::from_patch(id, &patch, Utc::now());
        let replace_images = patch.images.is_some();
        let images = patch.images;

        let updated = self
            .in_transaction(
                "update",
                move |e| classify_update_error(e, id),
                move |txn| {
                    Box::pin(async move {
                        // Held until commit; a concurrent delete waits for us
                        let locked = products::Entity::find_by_id(id)
                            .lock_exclusive()
                            .one(txn)
                            .await?;
                        if locked.is_none() {
                            return Ok(None);
                        }

                        if let Some(urls) = images {
                            product_images::Entity::delete_many()
                                .filter(product_images::Column::ProductId.eq(id))
                                .exec(txn)
                                .await?;
                            insert_images(txn, id, &urls).await?;
                        }
                        row.update(txn).await.map(Some)
                    })
                },
            )
            .await?
            .ok_or_else(|| product_not_found(id))?;

        info!(product_id = %id, replace_images, "Updated product");

        let images = self.images_of(id).await?;
        Ok(updated.into_product(images))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "delete"))?;

        if result.rows_affected > 0 {
            info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let result = products::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| classify_db_error(e, "delete_all"))?;

        info!(deleted = result.rows_affected, "Deleted all products");
        Ok(result.rows_affected)
    }
}
