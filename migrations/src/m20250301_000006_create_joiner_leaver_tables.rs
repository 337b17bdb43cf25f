use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JoinerLeaverProcesses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::ProcessType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::EmployeeName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::EmployeeId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::Department)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::Position)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(JoinerLeaverProcesses::Manager).string().null())
                    .col(ColumnDef::new(JoinerLeaverProcesses::StartDate).date().null())
                    .col(ColumnDef::new(JoinerLeaverProcesses::EndDate).date().null())
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::Status)
                            .string()
                            .not_null()
                            .default("Draft"),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::TotalItems)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::CompletedItems)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::ProgressPercentage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(JoinerLeaverProcesses::Notes).text().null())
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverProcesses::UpdatedAt)
                            .timestamp()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JoinerLeaverChecklistItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::ProcessId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::Title)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::Category)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::IsRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::DocumentUrl)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::CompletedAt)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::CompletedBy)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::CompletedByName)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(JoinerLeaverChecklistItems::Notes).text().null())
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JoinerLeaverChecklistItems::UpdatedAt)
                            .timestamp()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_checklist_items_process")
                            .from(
                                JoinerLeaverChecklistItems::Table,
                                JoinerLeaverChecklistItems::ProcessId,
                            )
                            .to(JoinerLeaverProcesses::Table, JoinerLeaverProcesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_checklist_items_process_id")
                    .table(JoinerLeaverChecklistItems::Table)
                    .col(JoinerLeaverChecklistItems::ProcessId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(JoinerLeaverChecklistItems::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(JoinerLeaverProcesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum JoinerLeaverProcesses {
    Table,
    Id,
    ProcessType,
    EmployeeName,
    EmployeeId,
    Department,
    Position,
    Manager,
    StartDate,
    EndDate,
    Status,
    TotalItems,
    CompletedItems,
    ProgressPercentage,
    Notes,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum JoinerLeaverChecklistItems {
    Table,
    Id,
    ProcessId,
    Title,
    Description,
    Category,
    IsRequired,
    DocumentUrl,
    SortOrder,
    Completed,
    CompletedAt,
    CompletedBy,
    CompletedByName,
    Notes,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
