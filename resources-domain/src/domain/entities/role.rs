use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role mappings of a user: realm roles plus roles per client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    pub realm_mappings: Vec<String>,
    pub client_mappings: HashMap<String, Vec<String>>,
}

impl RoleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a realm role mapping
    pub fn add_realm_role(&mut self, role_name: String) {
        if !self.realm_mappings.contains(&role_name) {
            self.realm_mappings.push(role_name);
        }
    }

    /// Add a client role mapping
    pub fn add_client_role(&mut self, client_id: String, role_name: String) {
        let roles = self.client_mappings.entry(client_id).or_default();
        if !roles.contains(&role_name) {
            roles.push(role_name);
        }
    }
}
