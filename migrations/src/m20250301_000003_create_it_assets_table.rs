use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItAssets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItAssets::Id).uuid().primary_key().not_null())
                    .col(
                        ColumnDef::new(ItAssets::AssetTag)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ItAssets::AssetType).string().not_null())
                    .col(ColumnDef::new(ItAssets::Brand).string().null())
                    .col(ColumnDef::new(ItAssets::Model).string().null())
                    .col(ColumnDef::new(ItAssets::SerialNumber).string().null())
                    .col(ColumnDef::new(ItAssets::Condition).string().null())
                    .col(
                        ColumnDef::new(ItAssets::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(ItAssets::AssignedTo).string().null())
                    .col(ColumnDef::new(ItAssets::AssignedDate).timestamp().null())
                    .col(ColumnDef::new(ItAssets::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(ItAssets::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_it_assets_status")
                    .table(ItAssets::Table)
                    .col(ItAssets::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItAssets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ItAssets {
    Table,
    Id,
    AssetTag,
    AssetType,
    Brand,
    Model,
    SerialNumber,
    Condition,
    Status,
    AssignedTo,
    AssignedDate,
    CreatedAt,
    UpdatedAt,
}
