use async_graphql::SimpleObject;
use platform_authz::{PermissionPolicy, Position};
use products_hr::Employee;
use uuid::Uuid;

#[derive(Clone, Debug, SimpleObject)]
pub struct MePayload {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    pub store_id: String,
    pub region: Option<String>,
    pub approved: bool,
    /// Capability names granted by the position, e.g. `approve_overtime`.
    /// Empty for unknown positions and for unapproved registrations.
    pub capabilities: Vec<String>,
}

impl MePayload {
    pub fn from_employee(employee: Employee, policy: &PermissionPolicy) -> Self {
        let capabilities = Position::parse(&employee.position)
            .filter(|_| employee.approved)
            .map(|position| {
                policy
                    .capabilities(position)
                    .into_iter()
                    .map(|capability| capability.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: employee.id,
            full_name: employee.full_name,
            position: employee.position,
            store_id: employee.store_id,
            region: employee.region,
            approved: employee.approved,
            capabilities,
        }
    }
}
