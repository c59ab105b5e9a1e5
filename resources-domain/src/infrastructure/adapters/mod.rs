pub mod keycloak_rest;
pub mod keycloak_token_manager;

pub use keycloak_rest::*;
pub use keycloak_token_manager::*;
