use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const PASSWORD_CREDENTIAL: &str = "password";

/// Credential attached to a user on creation
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub type_: String,
    pub value: Option<String>,
    pub temporary: Option<bool>,
}

impl Credential {
    pub fn password(value: String, temporary: bool) -> Self {
        Self {
            type_: PASSWORD_CREDENTIAL.to_string(),
            value: Some(value),
            temporary: Some(temporary),
        }
    }

    pub fn is_password(&self) -> bool {
        self.type_ == PASSWORD_CREDENTIAL
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary.unwrap_or(false)
    }
}

// Secret values stay out of logs and panics.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("type_", &self.type_)
            .field("value", &self.value.as_ref().map(|_| "***"))
            .field("temporary", &self.temporary)
            .finish()
    }
}
