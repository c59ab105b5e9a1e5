//! Request and response bodies of the users API.

use resources_domain::domain::entities::{NewUser, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/users`. Missing fields deserialize as empty and are
/// reported by validation.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRequest> for NewUser {
    fn from(request: UserRequest) -> Self {
        NewUser::new(
            request.username,
            request.email,
            request.password,
            request.first_name,
            request.last_name,
        )
    }
}

impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            roles: profile.roles,
            groups: profile.groups,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub id: String,
    pub message: String,
}

impl CreatedUserResponse {
    pub fn new(id: String) -> Self {
        Self {
            id,
            message: "User created successfully".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: None,
        }
    }

    pub fn with_fields(error: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            error: error.into(),
            fields: Some(fields),
        }
    }
}
