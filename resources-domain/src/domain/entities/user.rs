use super::{common::*, group::Group, role::RoleMapping};
use crate::domain::errors::{DomainError, DomainResult, FieldViolation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const USERNAME_MAX_LENGTH: usize = 30;
pub const PASSWORD_MIN_LENGTH: usize = 4;

/// Domain entity representing a Keycloak user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<EntityId>,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub enabled: bool,
    pub created_timestamp: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, enabled user with only a username
    pub fn new(username: String) -> Self {
        Self {
            id: None,
            username,
            email: None,
            email_verified: false,
            first_name: None,
            last_name: None,
            enabled: true,
            created_timestamp: None,
        }
    }

    /// Check a username against the length and blank rules
    pub fn validate_username(username: &str) -> Option<FieldViolation> {
        if username.trim().is_empty() {
            return Some(FieldViolation::new("username", "Username should not be blank"));
        }

        let length = username.chars().count();
        if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
            return Some(FieldViolation::new(
                "username",
                format!(
                    "Username should be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters long"
                ),
            ));
        }

        None
    }

    /// Check an email address has the shape `local@domain.tld`
    pub fn validate_email(email: &str) -> Option<FieldViolation> {
        if email.trim().is_empty() {
            return Some(FieldViolation::new("email", "Email should not be blank"));
        }

        if is_valid_email(email) {
            None
        } else {
            Some(FieldViolation::new("email", "Email should be valid"))
        }
    }

    pub fn validate_password(password: &str) -> Option<FieldViolation> {
        if password.trim().is_empty() {
            return Some(FieldViolation::new("password", "Password should not be blank"));
        }

        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Some(FieldViolation::new(
                "password",
                format!("Password should be at least {PASSWORD_MIN_LENGTH} characters long"),
            ));
        }

        None
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };

    !hosts.is_empty()
        && hosts.iter().all(|label| is_valid_host_label(label))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_valid_host_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Request to create a new user with a permanent password
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Validate every field, reporting all violations at once
    pub fn validate(&self) -> DomainResult<()> {
        let mut violations: Vec<FieldViolation> = [
            User::validate_username(&self.username),
            User::validate_email(&self.email),
            User::validate_password(&self.password),
        ]
        .into_iter()
        .flatten()
        .collect();

        if self.first_name.trim().is_empty() {
            violations.push(FieldViolation::new(
                "firstName",
                "First name should not be blank",
            ));
        }

        if self.last_name.trim().is_empty() {
            violations.push(FieldViolation::new(
                "lastName",
                "Last name should not be blank",
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidRequest { violations })
        }
    }

    pub fn to_domain_user(&self) -> DomainResult<User> {
        self.validate()?;

        let mut user = User::new(self.username.clone());
        user.email = Some(self.email.clone());
        user.first_name = Some(self.first_name.clone());
        user.last_name = Some(self.last_name.clone());
        Ok(user)
    }

    pub fn password_credential(&self) -> Credential {
        Credential::password(self.password.clone(), false)
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// A user together with realm role names and group names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

impl UserProfile {
    pub fn from_parts(user: User, role_mapping: RoleMapping, groups: Vec<Group>) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: role_mapping.realm_mappings,
            groups: groups.into_iter().map(|g| g.name).collect(),
        }
    }
}
