use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    #[sea_orm(indexed)]
    pub store_id: String,
    pub region: Option<String>,
    pub position: String,
    pub approved: bool,
    pub base_salary_cents: Option<i64>,
    pub monthly_work_days: Option<i32>,
    pub daily_work_minutes: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::overtime_requests::Entity")]
    OvertimeRequests,
    #[sea_orm(has_many = "super::shift_days::Entity")]
    ShiftDays,
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
}

impl Related<super::overtime_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OvertimeRequests.def()
    }
}

impl Related<super::shift_days::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShiftDays.def()
    }
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
