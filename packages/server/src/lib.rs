// Clusterdeck - Auth Core
//
// This crate provides the authentication/authorization core for the
// cluster-resource management API: signed session tokens, identity
// resolution on inbound requests, and the bootstrapped policy store that
// gates every resource operation.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
