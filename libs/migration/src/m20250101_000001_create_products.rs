use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProductGender::Enum)
                    .values([
                        ProductGender::Men,
                        ProductGender::Women,
                        ProductGender::Kid,
                        ProductGender::Unisex,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string_uniq(Products::Title))
                    .col(string_uniq(Products::Slug))
                    .col(double(Products::Price).default(0.0))
                    .col(text_null(Products::Description))
                    .col(integer(Products::Stock).default(0))
                    .col(json_binary(Products::Sizes).default(Expr::cust("'[]'::jsonb")))
                    .col(
                        ColumnDef::new(Products::Gender)
                            .enumeration(
                                ProductGender::Enum,
                                [
                                    ProductGender::Men,
                                    ProductGender::Women,
                                    ProductGender::Kid,
                                    ProductGender::Unisex,
                                ],
                            )
                            .not_null()
                            .default("unisex"),
                    )
                    .col(json_binary(Products::Tags).default(Expr::cust("'[]'::jsonb")))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // List order is (created_at, id)
        manager
            .create_index(
                Index::create()
                    .name("idx_products_created_at_id")
                    .table(Products::Table)
                    .col(Products::CreatedAt)
                    .col(Products::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProductGender::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Title,
    Slug,
    Price,
    Description,
    Stock,
    Sizes,
    Gender,
    Tags,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductGender {
    #[sea_orm(iden = "product_gender")]
    Enum,
    #[sea_orm(iden = "men")]
    Men,
    #[sea_orm(iden = "women")]
    Women,
    #[sea_orm(iden = "kid")]
    Kid,
    #[sea_orm(iden = "unisex")]
    Unisex,
}
