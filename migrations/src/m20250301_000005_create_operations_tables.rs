use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveApplications::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveApplications::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveApplications::LeaveType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveApplications::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveApplications::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(LeaveApplications::DaysCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeaveApplications::Reason).text().null())
                    .col(
                        ColumnDef::new(LeaveApplications::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(LeaveApplications::ApprovedBy).uuid().null())
                    .col(
                        ColumnDef::new(LeaveApplications::ApprovalDate)
                            .timestamp()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LeaveApplications::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveApplications::UpdatedAt)
                            .timestamp()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Meetings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Meetings::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Meetings::Title).string().not_null())
                    .col(ColumnDef::new(Meetings::MeetingDate).timestamp().not_null())
                    .col(ColumnDef::new(Meetings::Location).string().null())
                    .col(ColumnDef::new(Meetings::OrganizerId).uuid().not_null())
                    .col(ColumnDef::new(Meetings::MinutesContent).text().null())
                    .col(
                        ColumnDef::new(Meetings::Status)
                            .string()
                            .not_null()
                            .default("Draft"),
                    )
                    .col(ColumnDef::new(Meetings::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Meetings::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeetingAttendees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetingAttendees::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MeetingAttendees::MeetingId).uuid().not_null())
                    .col(
                        ColumnDef::new(MeetingAttendees::UserName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeetingAttendees::AttendanceStatus)
                            .string()
                            .not_null()
                            .default("Invited"),
                    )
                    .col(
                        ColumnDef::new(MeetingAttendees::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_attendees_meeting")
                            .from(MeetingAttendees::Table, MeetingAttendees::MeetingId)
                            .to(Meetings::Table, Meetings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeetingActionItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetingActionItems::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeetingActionItems::MeetingId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MeetingActionItems::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MeetingActionItems::Owner).string().null())
                    .col(ColumnDef::new(MeetingActionItems::DueDate).date().null())
                    .col(
                        ColumnDef::new(MeetingActionItems::Status)
                            .string()
                            .not_null()
                            .default("Open"),
                    )
                    .col(
                        ColumnDef::new(MeetingActionItems::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_action_items_meeting")
                            .from(MeetingActionItems::Table, MeetingActionItems::MeetingId)
                            .to(Meetings::Table, Meetings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TrainingPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrainingPlans::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrainingPlans::TrainingName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrainingPlans::TrainingType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrainingPlans::ScheduleDate).date().null())
                    .col(ColumnDef::new(TrainingPlans::Cost).decimal().null())
                    .col(ColumnDef::new(TrainingPlans::MaxAttendees).integer().null())
                    .col(ColumnDef::new(TrainingPlans::Remarks).text().null())
                    .col(
                        ColumnDef::new(TrainingPlans::Status)
                            .string()
                            .not_null()
                            .default("Planned"),
                    )
                    .col(ColumnDef::new(TrainingPlans::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(TrainingPlans::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrainingPlans::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeamAttendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamAttendance::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeamAttendance::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(TeamAttendance::AttendanceDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeamAttendance::Status)
                            .string()
                            .not_null()
                            .default("Present"),
                    )
                    .col(ColumnDef::new(TeamAttendance::CheckInTime).date_time().null())
                    .col(
                        ColumnDef::new(TeamAttendance::CheckOutTime)
                            .date_time()
                            .null(),
                    )
                    .col(ColumnDef::new(TeamAttendance::Remarks).text().null())
                    .col(
                        ColumnDef::new(TeamAttendance::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_attendance_user_date")
                    .table(TeamAttendance::Table)
                    .col(TeamAttendance::UserId)
                    .col(TeamAttendance::AttendanceDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrainingPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MeetingActionItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MeetingAttendees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Meetings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveApplications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LeaveApplications {
    Table,
    Id,
    EmployeeId,
    LeaveType,
    StartDate,
    EndDate,
    DaysCount,
    Reason,
    Status,
    ApprovedBy,
    ApprovalDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Meetings {
    Table,
    Id,
    Title,
    MeetingDate,
    Location,
    OrganizerId,
    MinutesContent,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum MeetingAttendees {
    Table,
    Id,
    MeetingId,
    UserName,
    AttendanceStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum MeetingActionItems {
    Table,
    Id,
    MeetingId,
    Description,
    Owner,
    DueDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum TrainingPlans {
    Table,
    Id,
    TrainingName,
    TrainingType,
    ScheduleDate,
    Cost,
    MaxAttendees,
    Remarks,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum TeamAttendance {
    Table,
    Id,
    UserId,
    AttendanceDate,
    Status,
    CheckInTime,
    CheckOutTime,
    Remarks,
    CreatedAt,
}
