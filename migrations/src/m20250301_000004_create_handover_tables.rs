use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AssetHandovers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssetHandovers::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::HandoverNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::EmployeeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::EmployeeEmail)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetHandovers::EmployeeId).string().null())
                    .col(
                        ColumnDef::new(AssetHandovers::Department)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetHandovers::Position).string().null())
                    .col(ColumnDef::new(AssetHandovers::Manager).string().null())
                    .col(ColumnDef::new(AssetHandovers::ManagerEmail).string().null())
                    .col(
                        ColumnDef::new(AssetHandovers::HandoverDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::HandoverType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetHandovers::Purpose).text().null())
                    .col(ColumnDef::new(AssetHandovers::Notes).text().null())
                    .col(
                        ColumnDef::new(AssetHandovers::Status)
                            .string()
                            .not_null()
                            .default("Draft"),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::SubmittedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::SubmittedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(ColumnDef::new(AssetHandovers::ApprovedBy).string().null())
                    .col(ColumnDef::new(AssetHandovers::ApprovedAt).timestamp().null())
                    .col(
                        ColumnDef::new(AssetHandovers::RejectionReason)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssetHandovers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetHandovers::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HandoverAssets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HandoverAssets::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HandoverAssets::HandoverId).uuid().not_null())
                    .col(ColumnDef::new(HandoverAssets::AssetId).uuid().not_null())
                    .col(ColumnDef::new(HandoverAssets::AssetTag).string().not_null())
                    .col(
                        ColumnDef::new(HandoverAssets::AssetType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HandoverAssets::Brand).string().null())
                    .col(ColumnDef::new(HandoverAssets::Model).string().null())
                    .col(ColumnDef::new(HandoverAssets::SerialNumber).string().null())
                    .col(ColumnDef::new(HandoverAssets::Condition).string().null())
                    .col(ColumnDef::new(HandoverAssets::Accessories).text().null())
                    .col(ColumnDef::new(HandoverAssets::Notes).text().null())
                    .col(
                        ColumnDef::new(HandoverAssets::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_handover_assets_handover")
                            .from(HandoverAssets::Table, HandoverAssets::HandoverId)
                            .to(AssetHandovers::Table, AssetHandovers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HandoverApprovals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HandoverApprovals::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::HandoverId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::ApproverEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::ApproverName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::ApproverRole)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::ApprovalLevel)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(HandoverApprovals::Comments).text().null())
                    .col(
                        ColumnDef::new(HandoverApprovals::DecidedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(HandoverApprovals::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_handover_approvals_handover")
                            .from(HandoverApprovals::Table, HandoverApprovals::HandoverId)
                            .to(AssetHandovers::Table, AssetHandovers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_handover_approvals_handover_id")
                    .table(HandoverApprovals::Table)
                    .col(HandoverApprovals::HandoverId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_handover_assets_handover_id")
                    .table(HandoverAssets::Table)
                    .col(HandoverAssets::HandoverId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HandoverApprovals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HandoverAssets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetHandovers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AssetHandovers {
    Table,
    Id,
    HandoverNumber,
    EmployeeName,
    EmployeeEmail,
    EmployeeId,
    Department,
    Position,
    Manager,
    ManagerEmail,
    HandoverDate,
    HandoverType,
    Purpose,
    Notes,
    Status,
    SubmittedBy,
    SubmittedAt,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum HandoverAssets {
    Table,
    Id,
    HandoverId,
    AssetId,
    AssetTag,
    AssetType,
    Brand,
    Model,
    SerialNumber,
    Condition,
    Accessories,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum HandoverApprovals {
    Table,
    Id,
    HandoverId,
    ApproverEmail,
    ApproverName,
    ApproverRole,
    ApprovalLevel,
    Status,
    Comments,
    DecidedAt,
    CreatedAt,
}
