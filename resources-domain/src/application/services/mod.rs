pub mod authentication;
pub mod user_management;

pub use authentication::*;
pub use user_management::*;
