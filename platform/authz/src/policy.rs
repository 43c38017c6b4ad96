use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::{Capability, Position};

use crate::Position::*;

/// One row per capability: the positions holding it.
const CANONICAL_TABLE: &[(Capability, &[Position])] = &[
    (
        Capability::SeeAllStores,
        &[BolgeMuduru, Egitmen, EgitimMuduru, InsanKaynaklari],
    ),
    (
        Capability::SeePhoneNumbers,
        &[
            BolgeMuduru,
            Egitmen,
            EgitimMuduru,
            InsanKaynaklari,
            MagazaMuduru,
            MudurYardimcisi,
        ],
    ),
    (
        Capability::ApproveOvertime,
        &[MagazaMuduru, MudurYardimcisi, Supervisor],
    ),
    (
        Capability::CreateOvertime,
        &[
            ServisPersoneli,
            Barista,
            Supervisor,
            MudurYardimcisi,
            MagazaMuduru,
            Egitmen,
            EgitimMuduru,
            InsanKaynaklari,
        ],
    ),
    (
        Capability::CreateAttendance,
        &[
            ServisPersoneli,
            Barista,
            Supervisor,
            MudurYardimcisi,
            MagazaMuduru,
            Egitmen,
            EgitimMuduru,
            InsanKaynaklari,
        ],
    ),
    (
        Capability::ViewRegionalData,
        &[BolgeMuduru, Egitmen, EgitimMuduru],
    ),
    (
        Capability::ApproveEmployees,
        &[
            MagazaMuduru,
            MudurYardimcisi,
            Supervisor,
            EgitimMuduru,
            Egitmen,
            InsanKaynaklari,
        ],
    ),
    (
        Capability::ApprovePositionChange,
        &[Egitmen, EgitimMuduru, InsanKaynaklari],
    ),
    (
        Capability::ManageShifts,
        &[InsanKaynaklari, MagazaMuduru, MudurYardimcisi, Supervisor],
    ),
    (Capability::ManagePayroll, &[InsanKaynaklari]),
];

static GLOBAL: Lazy<PermissionPolicy> = Lazy::new(PermissionPolicy::canonical);

/// Capability sets keyed by position.
#[derive(Clone, Debug)]
pub struct PermissionPolicy {
    grants: HashMap<Position, HashSet<Capability>>,
}

impl PermissionPolicy {
    /// Builds the lookup from the canonical table.
    pub fn canonical() -> Self {
        let mut grants: HashMap<Position, HashSet<Capability>> = Position::ALL
            .into_iter()
            .map(|position| (position, HashSet::new()))
            .collect();
        for (capability, holders) in CANONICAL_TABLE {
            for position in *holders {
                grants.entry(*position).or_default().insert(*capability);
            }
        }
        Self { grants }
    }

    /// Process-wide instance, built on first use.
    pub fn global() -> &'static PermissionPolicy {
        &GLOBAL
    }

    pub fn allows_position(&self, position: Position, capability: Capability) -> bool {
        self.grants
            .get(&position)
            .is_some_and(|set| set.contains(&capability))
    }

    /// Fail-closed check against a raw position string.
    pub fn allows(&self, position: &str, capability: Capability) -> bool {
        Position::parse(position)
            .is_some_and(|position| self.allows_position(position, capability))
    }

    /// Capabilities held by `position`, in declaration order.
    pub fn capabilities(&self, position: Position) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.allows_position(position, *capability))
            .collect()
    }

    pub fn holders(&self, capability: Capability) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|position| self.allows_position(*position, capability))
            .collect()
    }
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}

fn allows(position: &str, capability: Capability) -> bool {
    PermissionPolicy::global().allows(position, capability)
}

pub fn can_see_all_stores(position: &str) -> bool {
    allows(position, Capability::SeeAllStores)
}

pub fn can_see_phone_numbers(position: &str) -> bool {
    allows(position, Capability::SeePhoneNumbers)
}

pub fn can_approve_overtime(position: &str) -> bool {
    allows(position, Capability::ApproveOvertime)
}

pub fn can_create_overtime(position: &str) -> bool {
    allows(position, Capability::CreateOvertime)
}

pub fn can_create_attendance(position: &str) -> bool {
    allows(position, Capability::CreateAttendance)
}

pub fn can_view_regional_data(position: &str) -> bool {
    allows(position, Capability::ViewRegionalData)
}

/// Registration approval.
pub fn can_approve_employees(position: &str) -> bool {
    allows(position, Capability::ApproveEmployees)
}

pub fn can_approve_position_change(position: &str) -> bool {
    allows(position, Capability::ApprovePositionChange)
}

pub fn can_manage_shifts(position: &str) -> bool {
    allows(position, Capability::ManageShifts)
}

pub fn can_manage_payroll(position: &str) -> bool {
    allows(position, Capability::ManagePayroll)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(positions: Vec<Position>) -> Vec<&'static str> {
        let mut out: Vec<_> = positions.into_iter().map(Position::as_str).collect();
        out.sort_unstable();
        out
    }

    fn sorted(mut expected: Vec<&'static str>) -> Vec<&'static str> {
        expected.sort_unstable();
        expected
    }

    #[test]
    fn membership_matches_table() {
        let policy = PermissionPolicy::canonical();
        let cases: Vec<(Capability, Vec<&str>)> = vec![
            (
                Capability::SeeAllStores,
                vec!["bolge_muduru", "egitmen", "egitim_muduru", "insan_kaynaklari"],
            ),
            (
                Capability::SeePhoneNumbers,
                vec![
                    "bolge_muduru",
                    "egitmen",
                    "egitim_muduru",
                    "insan_kaynaklari",
                    "magaza_muduru",
                    "mudur_yardimcisi",
                ],
            ),
            (
                Capability::ApproveOvertime,
                vec!["magaza_muduru", "mudur_yardimcisi", "supervisor"],
            ),
            (
                Capability::ViewRegionalData,
                vec!["bolge_muduru", "egitmen", "egitim_muduru"],
            ),
            (
                Capability::ApproveEmployees,
                vec![
                    "magaza_muduru",
                    "mudur_yardimcisi",
                    "supervisor",
                    "egitim_muduru",
                    "egitmen",
                    "insan_kaynaklari",
                ],
            ),
            (
                Capability::ApprovePositionChange,
                vec!["egitmen", "egitim_muduru", "insan_kaynaklari"],
            ),
            (
                Capability::ManageShifts,
                vec![
                    "insan_kaynaklari",
                    "magaza_muduru",
                    "mudur_yardimcisi",
                    "supervisor",
                ],
            ),
            (Capability::ManagePayroll, vec!["insan_kaynaklari"]),
        ];
        for (capability, expected) in cases {
            assert_eq!(
                names(policy.holders(capability)),
                sorted(expected),
                "{capability}"
            );
        }
    }

    #[test]
    fn regional_managers_cannot_create_overtime_or_attendance() {
        for position in Position::ALL {
            let expected = position != Position::BolgeMuduru;
            assert_eq!(can_create_overtime(position.as_str()), expected);
            assert_eq!(can_create_attendance(position.as_str()), expected);
        }
    }

    #[test]
    fn overtime_approval_examples() {
        assert!(can_approve_overtime("supervisor"));
        assert!(!can_approve_overtime("bolge_muduru"));
        assert!(!can_create_overtime("bolge_muduru"));
        assert!(can_create_overtime("barista"));
    }

    #[test]
    fn unknown_positions_fail_closed() {
        let predicates: [fn(&str) -> bool; 10] = [
            can_see_all_stores,
            can_see_phone_numbers,
            can_approve_overtime,
            can_create_overtime,
            can_create_attendance,
            can_view_regional_data,
            can_approve_employees,
            can_approve_position_change,
            can_manage_shifts,
            can_manage_payroll,
        ];
        for raw in ["", "admin", "SUPERVISOR", "insan_kaynaklari ", "null"] {
            for predicate in predicates {
                assert!(!predicate(raw), "{raw:?} should be denied");
            }
        }
    }

    #[test]
    fn capabilities_follow_declaration_order() {
        let policy = PermissionPolicy::global();
        assert_eq!(
            policy.capabilities(Position::Barista),
            vec![Capability::CreateOvertime, Capability::CreateAttendance]
        );
        assert!(policy.capabilities(Position::BolgeMuduru).iter().all(|c| {
            !matches!(c, Capability::CreateOvertime | Capability::CreateAttendance)
        }));
    }
}
