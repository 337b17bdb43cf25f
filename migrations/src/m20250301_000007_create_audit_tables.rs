use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::RelatedEntityType)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RelatedEntityId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::SentViaEmail)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SystemLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemLogs::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemLogs::UserId).uuid().null())
                    .col(ColumnDef::new(SystemLogs::Action).string().not_null())
                    .col(ColumnDef::new(SystemLogs::EntityType).string().not_null())
                    .col(ColumnDef::new(SystemLogs::EntityId).string().not_null())
                    .col(ColumnDef::new(SystemLogs::Details).text().null())
                    .col(ColumnDef::new(SystemLogs::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_system_logs_action")
                    .table(SystemLogs::Table)
                    .col(SystemLogs::Action)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Notifications {
    Table,
    Id,
    RecipientEmail,
    RecipientName,
    Title,
    Message,
    Kind,
    RelatedEntityType,
    RelatedEntityId,
    SentViaEmail,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum SystemLogs {
    Table,
    Id,
    UserId,
    Action,
    EntityType,
    EntityId,
    Details,
    CreatedAt,
}
