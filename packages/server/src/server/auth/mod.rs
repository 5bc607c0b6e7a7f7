// Request-scoped identity resolution
pub mod identity;

pub use identity::*;
