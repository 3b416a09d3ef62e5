//! Configuration types
//!
//! Client settings with a default for every field, loadable from TOML by
//! the runtime.

pub mod types;

pub use types::*;
