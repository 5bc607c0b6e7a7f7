//! Policy domain - persisted access-control rules.
//!
//! Owns the policy table's lifecycle: schema migration and the first-boot
//! seed that keeps the login route reachable. Rule matching itself is the
//! policy evaluator's job and lives elsewhere.

pub mod bootstrap;
pub mod rule;

pub use bootstrap::{bootstrap, init_data, is_init_data, migrate_table, table_created};
pub use rule::{login_seed_rule, seed_rules, PolicyRule, LOGIN_ROUTE, POLICY_TABLE};
