use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::wage::WageSettings;

/// Directory view of a staff member.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub store_id: String,
    pub region: Option<String>,
    /// Raw position string as stored; unknown values grant nothing.
    pub position: String,
    /// Registration approved by a manager.
    pub approved: bool,
    /// Unset until HR saves a salary for the first time.
    pub wage: Option<WageSettings>,
}

impl Employee {
    pub fn works_at(&self, store_id: &str) -> bool {
        self.store_id == store_id
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub full_name: String,
    pub phone: Option<String>,
    pub store_id: String,
    pub region: Option<String>,
    pub position: String,
}
