use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campuses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Campuses::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Campuses::CampusName).string().not_null())
                    .col(ColumnDef::new(Campuses::CampusCode).string().not_null())
                    .col(ColumnDef::new(Campuses::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Buildings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buildings::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Buildings::CampusId).uuid().not_null())
                    .col(ColumnDef::new(Buildings::BuildingName).string().not_null())
                    .col(ColumnDef::new(Buildings::BuildingCode).string().not_null())
                    .col(ColumnDef::new(Buildings::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Floors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Floors::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Floors::BuildingId).uuid().not_null())
                    .col(ColumnDef::new(Floors::FloorName).string().not_null())
                    .col(ColumnDef::new(Floors::FloorCode).string().not_null())
                    .col(ColumnDef::new(Floors::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Rooms::FloorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Rooms::RoomNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Rooms::CampusName).string().not_null())
                    .col(ColumnDef::new(Rooms::BuildingName).string().not_null())
                    .col(ColumnDef::new(Rooms::FloorName).string().not_null())
                    .col(ColumnDef::new(Rooms::Ownership).string().null())
                    .col(ColumnDef::new(Rooms::Owner).string().null())
                    .col(ColumnDef::new(Rooms::CustomerNote).text().null())
                    .col(ColumnDef::new(Rooms::OtherRemarks).text().null())
                    .col(ColumnDef::new(Rooms::RoomSizeSqm).double().null())
                    .col(ColumnDef::new(Rooms::SeatingCapacity).integer().null())
                    .col(ColumnDef::new(Rooms::RoomHeight).string().null())
                    .col(ColumnDef::new(Rooms::PaintColorCode).string().null())
                    .col(ColumnDef::new(Rooms::RoomCategory).string().null())
                    .col(ColumnDef::new(Rooms::RoomType).string().null())
                    .col(ColumnDef::new(Rooms::ElvIdfBdfRoom).string().null())
                    .col(ColumnDef::new(Rooms::DistanceMeters).double().null())
                    .col(ColumnDef::new(Rooms::Remarks).text().null())
                    .col(
                        ColumnDef::new(Rooms::CurrentStatus)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Rooms::LastUpdated).timestamp().not_null())
                    .col(ColumnDef::new(Rooms::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rooms_floor_id")
                    .table(Rooms::Table)
                    .col(Rooms::FloorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Floors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Buildings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campuses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Campuses {
    Table,
    Id,
    CampusName,
    CampusCode,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Buildings {
    Table,
    Id,
    CampusId,
    BuildingName,
    BuildingCode,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Floors {
    Table,
    Id,
    BuildingId,
    FloorName,
    FloorCode,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Rooms {
    Table,
    Id,
    FloorId,
    RoomNumber,
    CampusName,
    BuildingName,
    FloorName,
    Ownership,
    Owner,
    CustomerNote,
    OtherRemarks,
    RoomSizeSqm,
    SeatingCapacity,
    RoomHeight,
    PaintColorCode,
    RoomCategory,
    RoomType,
    ElvIdfBdfRoom,
    DistanceMeters,
    Remarks,
    CurrentStatus,
    LastUpdated,
    CreatedAt,
}
