use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Target audience of a product
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_gender")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "men")]
    Men,
    #[sea_orm(string_value = "women")]
    Women,
    #[sea_orm(string_value = "kid")]
    Kid,
    #[default]
    #[sea_orm(string_value = "unisex")]
    Unisex,
}

/// Product with its images flattened to their URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    /// Unique display title
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    /// Unique URL key
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    /// Image URLs in insertion order
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a new product; images are attached by the repository.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        let slug = input.resolved_slug();

        Self {
            id: Uuid::now_v7(),
            title: input.title,
            price: input.price,
            description: input.description,
            slug,
            stock: input.stock,
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the scalar fields of `patch`. `patch.images` is left to the repository.
    pub fn apply_update(&mut self, patch: &UpdateProduct) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(ref description) = patch.description {
            self.description = Some(description.clone());
        }
        if let Some(ref slug) = patch.slug {
            self.slug = normalize_slug(slug);
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(ref sizes) = patch.sizes {
            self.sizes = sizes.clone();
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(ref tags) = patch.tags {
            self.tags = tags.clone();
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Derived from `title` when omitted
    #[serde(default)]
    #[validate(length(min = 1, message = "slug should not be empty"))]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock: i32,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Vec<String>,
}

impl CreateProduct {
    /// Creates a minimal input; other fields take their defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: 0.0,
            description: None,
            slug: None,
            stock: 0,
            sizes: Vec::new(),
            gender: Gender::default(),
            tags: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// The slug that will be stored: the given slug, or the title, normalized.
    pub fn resolved_slug(&self) -> String {
        normalize_slug(self.slug.as_deref().unwrap_or(&self.title))
    }
}

/// DTO for a partial update
///
/// `images`, when present (even empty), replaces the whole image list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "slug should not be empty"))]
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<Gender>,
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "validate_image_urls"))]
    pub images: Option<Vec<String>>,
}

/// `?limit=&offset=` for the product list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page size (1-100)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: u64,
    /// Rows to skip
    #[serde(default)]
    #[param(default = 0)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Lowercase, spaces become `_`, apostrophes are dropped.
///
/// ```
/// use domain_products::models::normalize_slug;
///
/// assert_eq!(normalize_slug("Men's Chill Crew Neck"), "mens_chill_crew_neck");
/// ```
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_").replace('\'', "")
}

fn validate_image_urls(urls: &[String]) -> Result<(), validator::ValidationError> {
    if urls.iter().any(|url| url.trim().is_empty()) {
        let mut err = validator::ValidationError::new("empty_image_url");
        err.message = Some("each value in images should not be empty".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("Chair"), "chair");
        assert_eq!(normalize_slug("Kid's Tee  Two"), "kids_tee__two");
        assert_eq!(normalize_slug("already_ok"), "already_ok");
    }

    #[test]
    fn test_resolved_slug_prefers_given_slug() {
        let input = CreateProduct::new("Office Chair").with_slug("Desk Chair");
        assert_eq!(input.resolved_slug(), "desk_chair");

        let input = CreateProduct::new("Office Chair");
        assert_eq!(input.resolved_slug(), "office_chair");
    }

    #[test]
    fn test_create_product_defaults_from_json() {
        let input: CreateProduct = serde_json::from_str(r#"{"title":"Chair"}"#).unwrap();
        assert_eq!(input.price, 0.0);
        assert_eq!(input.stock, 0);
        assert_eq!(input.gender, Gender::Unisex);
        assert!(input.images.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_product_validation() {
        let errors = CreateProduct::new("").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let mut input = CreateProduct::new("Chair").with_images(["a.jpg", " "]);
        input.price = -1.0;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("images"));
        assert!(errors.field_errors().contains_key("price"));

        let errors = CreateProduct::new("Chair").with_slug("").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn test_update_product_validation() {
        assert!(UpdateProduct::default().validate().is_ok());

        let patch = UpdateProduct {
            images: Some(vec![]),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = UpdateProduct {
            stock: Some(-3),
            images: Some(vec![String::new()]),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock"));
        assert!(errors.field_errors().contains_key("images"));
    }

    #[test]
    fn test_update_product_distinguishes_missing_and_empty_images() {
        let patch: UpdateProduct = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert!(patch.images.is_none());

        let patch: UpdateProduct = serde_json::from_str(r#"{"images": []}"#).unwrap();
        assert_eq!(patch.images, Some(vec![]));
    }

    #[test]
    fn test_apply_update_keeps_unnamed_fields() {
        let mut input = CreateProduct::new("Chair");
        input.price = 99.0;
        input.tags = vec!["home".to_string()];
        let mut product = Product::new(input);
        let before = product.clone();

        product.apply_update(&UpdateProduct {
            slug: Some("Big Chair".to_string()),
            ..Default::default()
        });

        assert_eq!(product.slug, "big_chair");
        assert_eq!(product.title, before.title);
        assert_eq!(product.price, 99.0);
        assert_eq!(product.tags, before.tags);
        assert!(product.updated_at >= before.updated_at);
    }

    #[test]
    fn test_pagination_defaults_and_bounds() {
        let page: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(page, PaginationQuery::default());
        assert_eq!(page.limit, 10);

        let page = PaginationQuery {
            limit: 101,
            offset: 0,
        };
        assert!(page.validate().is_err());
    }

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(serde_json::to_string(&Gender::Kid).unwrap(), "\"kid\"");
        let parsed: Gender = serde_json::from_str("\"women\"").unwrap();
        assert_eq!(parsed, Gender::Women);
        assert_eq!(Gender::Unisex.to_string(), "unisex");
    }
}
