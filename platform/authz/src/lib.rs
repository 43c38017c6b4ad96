//! Position-based authorization shared by every staff suite surface.
//!
//! The capability table in [`policy`] is the single source of truth. Clients
//! may use the same predicates to hide controls, but the server re-checks every
//! privileged action through [`PolicyEngine::check`].

mod policy;
mod position;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use policy::{
    PermissionPolicy, can_approve_employees, can_approve_overtime, can_approve_position_change,
    can_create_attendance, can_create_overtime, can_manage_payroll, can_manage_shifts,
    can_see_all_stores, can_see_phone_numbers, can_view_regional_data,
};
pub use position::{Capability, Position};

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("action {action} denied for resource {resource}")]
    Denied { action: String, resource: String },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PolicyContext {
    pub subject: String,
    /// Raw position as stored on the subject's record.
    pub position: String,
    pub capability: Capability,
    pub resource: String,
}

impl PolicyContext {
    pub fn new(
        subject: impl Into<String>,
        position: impl Into<String>,
        capability: Capability,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            position: position.into(),
            capability,
            resource: resource.into(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PolicyEngine {
    policy: &'static PermissionPolicy,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self {
            policy: PermissionPolicy::global(),
        }
    }
}

impl PolicyEngine {
    pub fn policy(&self) -> &PermissionPolicy {
        self.policy
    }

    pub fn check(&self, ctx: &PolicyContext) -> Result<(), AuthzError> {
        if self.policy.allows(&ctx.position, ctx.capability) {
            Ok(())
        } else {
            debug!(
                subject = %ctx.subject,
                position = %ctx.position,
                capability = %ctx.capability,
                "authorization denied"
            );
            Err(AuthzError::Denied {
                action: ctx.capability.as_str().to_string(),
                resource: ctx.resource.clone(),
            })
        }
    }
}
