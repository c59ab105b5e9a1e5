/*!
# Resources Domain

Domain layer for the user resources service, a thin facade over the Keycloak
admin API built with hexagonal architecture principles.

This crate provides:
- Domain models for the users, role mappings and groups the service exposes
- Port definitions for Keycloak and token introspection
- Application services implementing the create, fetch and authentication use cases
- Infrastructure adapters backed by the `keycloak` crate and `reqwest`

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapters                         │
├─────────────────────────────────────────────────────────────┤
│               HTTP Server (Axum Handlers)                   │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • UserManagementService    • AuthenticationService         │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • KeycloakRepository       • TokenIntrospector             │
│  • AppConfig                                                │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • KeycloakRestAdapter      • KeycloakTokenManager          │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use resources_domain::{
    application::{ports::AppConfig, services::UserManagementService},
    infrastructure::adapters::KeycloakRestAdapter,
};

let config = AppConfig::from_env()?;
let client = config.http.build_client()?;
let repository = KeycloakRestAdapter::connect(&config.keycloak, client).await?;

let user_service = UserManagementService::new(Arc::new(repository), &config.keycloak.realm);
let profile = user_service.get_user_by_id(user_id).await?;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
