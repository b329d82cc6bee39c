pub mod auth;
pub mod notes;
pub mod system;
pub mod tenants;
