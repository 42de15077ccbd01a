//! Row structs and DTOs for the discovery feed tables.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create DTOs where a handler accepts a request body

pub mod premium;
pub mod quota;
pub mod skip;
pub mod watchlist;
