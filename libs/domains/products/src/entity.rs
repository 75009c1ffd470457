use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{Set, Unchanged};

// ===== Products Entity =====

pub mod products {
    use super::*;
    use crate::models::{Gender, Product, UpdateProduct, normalize_slug};
    use chrono::{DateTime, Utc};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub title: String,
        #[sea_orm(column_type = "Double")]
        pub price: f64,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        #[sea_orm(unique)]
        pub slug: String,
        pub stock: i32,
        #[sea_orm(column_type = "JsonBinary")]
        pub sizes: Json,
        pub gender: Gender,
        #[sea_orm(column_type = "JsonBinary")]
        pub tags: Json,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product_images::Entity")]
        Images,
    }

    impl Related<super::product_images::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Images.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl Model {
        /// Domain view of the row with the given image URLs.
        pub fn into_product(self, images: Vec<String>) -> Product {
            Product {
                id: self.id,
                title: self.title,
                price: self.price,
                description: self.description,
                slug: self.slug,
                stock: self.stock,
                sizes: serde_json::from_value(self.sizes).unwrap_or_default(),
                gender: self.gender,
                tags: serde_json::from_value(self.tags).unwrap_or_default(),
                images,
                created_at: self.created_at.into(),
                updated_at: self.updated_at.into(),
            }
        }
    }

    /// Every column set, so the same model serves insert and full-row update.
    impl From<&Product> for ActiveModel {
        fn from(product: &Product) -> Self {
            ActiveModel {
                id: Set(product.id),
                title: Set(product.title.clone()),
                price: Set(product.price),
                description: Set(product.description.clone()),
                slug: Set(product.slug.clone()),
                stock: Set(product.stock),
                sizes: Set(Json::from(product.sizes.clone())),
                gender: Set(product.gender),
                tags: Set(Json::from(product.tags.clone())),
                created_at: Set(product.created_at.into()),
                updated_at: Set(product.updated_at.into()),
            }
        }
    }

    impl ActiveModel {
        /// Only the columns present in `patch` are set, plus `updated_at`, so
        /// concurrent patches of different fields do not overwrite each other.
        pub fn from_patch(id: Uuid, patch: &UpdateProduct, updated_at: DateTime<Utc>) -> Self {
            let mut row = ActiveModel {
                id: Unchanged(id),
                updated_at: Set(updated_at.into()),
                ..Default::default()
            };

            if let Some(ref title) = patch.title {
                row.title = Set(title.clone());
            }
            if let Some(price) = patch.price {
                row.price = Set(price);
            }
            if let Some(ref description) = patch.description {
                row.description = Set(Some(description.clone()));
            }
            if let Some(ref slug) = patch.slug {
                row.slug = Set(normalize_slug(slug));
            }
            if let Some(stock) = patch.stock {
                row.stock = Set(stock);
            }
            if let Some(ref sizes) = patch.sizes {
                row.sizes = Set(Json::from(sizes.clone()));
            }
            if let Some(gender) = patch.gender {
                row.gender = Set(gender);
            }
            if let Some(ref tags) = patch.tags {
                row.tags = Set(Json::from(tags.clone()));
            }
            row
        }
    }
}

// ===== Product Images Entity =====

pub mod product_images {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "product-images")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(column_type = "Text")]
        pub url: String,
        pub product_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id",
            on_delete = "Cascade"
        )]
        Product,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl ActiveModel {
        pub fn for_product(product_id: Uuid, url: &str) -> Self {
            ActiveModel {
                url: Set(url.to_string()),
                product_id: Set(product_id),
                ..Default::default()
            }
        }
    }
}
