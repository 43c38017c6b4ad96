use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum OvertimeRequests {
    Table,
    Id,
    EmployeeId,
    WorkDate,
    Minutes,
    Status,
    Reason,
    CreatedBy,
    CreatedAt,
    ReviewedBy,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum ShiftDays {
    Table,
    EmployeeId,
    WorkDate,
    WeekStart,
    StartTime,
    EndTime,
    IsLeave,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    Table,
    Id,
    EmployeeId,
    WorkDate,
    CheckIn,
    CheckOut,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OvertimeRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OvertimeRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OvertimeRequests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(OvertimeRequests::WorkDate).date().not_null())
                    .col(ColumnDef::new(OvertimeRequests::Minutes).integer().not_null())
                    .col(
                        ColumnDef::new(OvertimeRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(OvertimeRequests::Reason).text())
                    .col(ColumnDef::new(OvertimeRequests::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(OvertimeRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OvertimeRequests::ReviewedBy).uuid())
                    .col(ColumnDef::new(OvertimeRequests::ReviewedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_overtime_requests_employee")
                            .from(OvertimeRequests::Table, OvertimeRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_overtime_requests_employee_date")
                    .table(OvertimeRequests::Table)
                    .col(OvertimeRequests::EmployeeId)
                    .col(OvertimeRequests::WorkDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShiftDays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ShiftDays::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(ShiftDays::WorkDate).date().not_null())
                    .col(ColumnDef::new(ShiftDays::WeekStart).date().not_null())
                    .col(ColumnDef::new(ShiftDays::StartTime).time())
                    .col(ColumnDef::new(ShiftDays::EndTime).time())
                    .col(
                        ColumnDef::new(ShiftDays::IsLeave)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ShiftDays::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ShiftDays::EmployeeId)
                            .col(ShiftDays::WorkDate),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_days_employee")
                            .from(ShiftDays::Table, ShiftDays::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(AttendanceRecords::WorkDate).date().not_null())
                    .col(ColumnDef::new(AttendanceRecords::CheckIn).time().not_null())
                    .col(ColumnDef::new(AttendanceRecords::CheckOut).time())
                    .col(ColumnDef::new(AttendanceRecords::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_records_employee")
                            .from(AttendanceRecords::Table, AttendanceRecords::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_employee_date")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::EmployeeId)
                    .col(AttendanceRecords::WorkDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            AttendanceRecords::Table.into_iden(),
            ShiftDays::Table.into_iden(),
            OvertimeRequests::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}
