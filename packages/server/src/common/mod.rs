// Shared error taxonomy
pub mod auth;
