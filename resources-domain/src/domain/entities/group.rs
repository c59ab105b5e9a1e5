use super::common::EntityId;
use serde::{Deserialize, Serialize};

/// Group a user is a member of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Option<EntityId>,
    pub name: String,
    pub path: String,
}

impl Group {
    /// Create a group; a missing path defaults to a top-level path
    pub fn new(name: String, path: Option<String>) -> Self {
        let path = path.unwrap_or_else(|| format!("/{name}"));
        Self {
            id: None,
            name,
            path,
        }
    }
}
