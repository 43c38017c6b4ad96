use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FullName,
    Phone,
    StoreId,
    Region,
    Position,
    Approved,
    BaseSalaryCents,
    MonthlyWorkDays,
    DailyWorkMinutes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Employees::FullName).string_len(256).not_null())
                    .col(ColumnDef::new(Employees::Phone).string_len(64))
                    .col(ColumnDef::new(Employees::StoreId).string_len(64).not_null())
                    .col(ColumnDef::new(Employees::Region).string_len(64))
                    .col(ColumnDef::new(Employees::Position).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Employees::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Employees::BaseSalaryCents).big_integer())
                    .col(ColumnDef::new(Employees::MonthlyWorkDays).integer())
                    .col(ColumnDef::new(Employees::DailyWorkMinutes).integer())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_store")
                    .table(Employees::Table)
                    .col(Employees::StoreId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).if_exists().to_owned())
            .await
    }
}
