pub mod auth;
pub mod errors;

pub use auth::require_admin;
pub use errors::expose_internal_errors;
