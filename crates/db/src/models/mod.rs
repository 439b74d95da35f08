//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO with a `validate` method
//! - Update / query DTOs where the resource supports them

pub mod admin;
pub mod submission;
pub mod tyrant;
pub mod vote;
