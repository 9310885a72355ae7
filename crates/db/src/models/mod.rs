//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Input DTOs for inserts
//! - An update DTO (all `Option` fields) for sparse updates

pub mod presentation;
pub mod slide;
