use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of staff positions. Stored and transmitted as snake_case strings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    ServisPersoneli,
    Barista,
    Supervisor,
    MudurYardimcisi,
    MagazaMuduru,
    BolgeMuduru,
    Egitmen,
    EgitimMuduru,
    InsanKaynaklari,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::ServisPersoneli,
        Position::Barista,
        Position::Supervisor,
        Position::MudurYardimcisi,
        Position::MagazaMuduru,
        Position::BolgeMuduru,
        Position::Egitmen,
        Position::EgitimMuduru,
        Position::InsanKaynaklari,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::ServisPersoneli => "servis_personeli",
            Position::Barista => "barista",
            Position::Supervisor => "supervisor",
            Position::MudurYardimcisi => "mudur_yardimcisi",
            Position::MagazaMuduru => "magaza_muduru",
            Position::BolgeMuduru => "bolge_muduru",
            Position::Egitmen => "egitmen",
            Position::EgitimMuduru => "egitim_muduru",
            Position::InsanKaynaklari => "insan_kaynaklari",
        }
    }

    /// Exact match against the stored representation. Anything else is not a position.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions gated by position.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    SeeAllStores,
    SeePhoneNumbers,
    ApproveOvertime,
    CreateOvertime,
    CreateAttendance,
    ViewRegionalData,
    ApproveEmployees,
    ApprovePositionChange,
    ManageShifts,
    ManagePayroll,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::SeeAllStores,
        Capability::SeePhoneNumbers,
        Capability::ApproveOvertime,
        Capability::CreateOvertime,
        Capability::CreateAttendance,
        Capability::ViewRegionalData,
        Capability::ApproveEmployees,
        Capability::ApprovePositionChange,
        Capability::ManageShifts,
        Capability::ManagePayroll,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::SeeAllStores => "see_all_stores",
            Capability::SeePhoneNumbers => "see_phone_numbers",
            Capability::ApproveOvertime => "approve_overtime",
            Capability::CreateOvertime => "create_overtime",
            Capability::CreateAttendance => "create_attendance",
            Capability::ViewRegionalData => "view_regional_data",
            Capability::ApproveEmployees => "approve_employees",
            Capability::ApprovePositionChange => "approve_position_change",
            Capability::ManageShifts => "manage_shifts",
            Capability::ManagePayroll => "manage_payroll",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
