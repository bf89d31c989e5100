//! Repository layer — entity-scoped database operations.
//!
//! Free functions over `&Connection`, one sub-module per entity.
//! All public functions are re-exported here.

mod account;
mod appointment;
mod provider;
mod record;

pub use account::*;
pub use appointment::*;
pub use provider::*;
pub use record::*;
