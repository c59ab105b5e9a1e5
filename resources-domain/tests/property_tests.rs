use proptest::prelude::*;
use resources_domain::domain::{
    entities::{NewUser, User},
    errors::DomainError,
};

/// Property-based tests for create request validation

mod username_properties {
    use super::*;

    proptest! {
        /// Property: usernames of 2 to 30 visible characters are accepted
        #[test]
        fn bounded_usernames_validate(username in "[a-zA-Z0-9._-]{2,30}") {
            prop_assert!(User::validate_username(&username).is_none());
        }

        /// Property: usernames longer than 30 characters are rejected
        #[test]
        fn long_usernames_fail(username in "[a-zA-Z0-9]{31,64}") {
            let violation = User::validate_username(&username);
            prop_assert!(violation.is_some());
            prop_assert_eq!(violation.unwrap().field, "username");
        }

        /// Property: whitespace-only usernames are blank
        #[test]
        fn blank_usernames_fail(username in "[ \t]{0,10}") {
            let violation = User::validate_username(&username);
            prop_assert_eq!(violation.unwrap().message, "Username should not be blank");
        }
    }
}

mod email_properties {
    use super::*;

    proptest! {
        /// Property: well-formed addresses pass validation
        #[test]
        fn valid_emails_validate(
            local in r"[a-zA-Z0-9._%+-]{1,32}",
            domain in r"[a-zA-Z0-9]([a-zA-Z0-9-]{0,30}[a-zA-Z0-9])?",
            tld in r"[a-zA-Z]{2,6}"
        ) {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(User::validate_email(&email).is_none(), "rejected {}", email);
        }

        /// Property: addresses without an at sign are rejected
        /// Property: a host label starting or ending with a hyphen fails
        #[test]
        fn hyphen_edged_labels_fail(label in r"[a-zA-Z0-9]{1,16}", leading in any::<bool>()) {
            let label = if leading { format!("-{label}") } else { format!("{label}-") };
            let email = format!("user@{}.com", label);
            prop_assert!(User::validate_email(&email).is_some(), "accepted {}", email);
        }

        #[test]
        fn emails_without_at_fail(text in r"[a-zA-Z0-9.]{1,40}") {
            prop_assert!(User::validate_email(&text).is_some());
        }

        /// Property: a numeric top-level domain is rejected
        #[test]
        fn numeric_tld_fails(local in r"[a-z]{1,10}", tld in r"[0-9]{2,4}") {
            let email = format!("{}@example.{}", local, tld);
            prop_assert!(User::validate_email(&email).is_some());
        }
    }
}

mod request_properties {
    use super::*;

    proptest! {
        /// Property: short passwords are reported alongside every other violation
        #[test]
        fn short_password_is_reported(password in "[a-z]{1,3}") {
            let request = NewUser::new("username", "email@gmail.com", password, "firstName", "lastName");
            match request.validate() {
                Err(DomainError::InvalidRequest { violations }) => {
                    prop_assert_eq!(violations.len(), 1);
                    prop_assert_eq!(violations[0].field.as_str(), "password");
                }
                other => return Err(TestCaseError::fail(format!("expected InvalidRequest, got {other:?}"))),
            }
        }

        /// Property: a valid request always maps to an enabled user with the same username
        #[test]
        fn valid_requests_map_to_enabled_users(
            username in "[a-z]{2,30}",
            password in "[a-zA-Z0-9]{4,20}"
        ) {
            let request = NewUser::new(username.clone(), "email@gmail.com", password, "firstName", "lastName");
            let user = request.to_domain_user().unwrap();
            prop_assert_eq!(user.username, username);
            prop_assert!(user.enabled);
        }
    }
}
