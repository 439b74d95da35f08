//! Domain types, constants, and validation rules shared by the TyrantCam
//! database and API crates.
//!
//! Nothing in this crate touches I/O; every function is pure so the rules
//! can be unit tested without a database.

pub mod category;
pub mod error;
pub mod fingerprint;
pub mod pagination;
pub mod roles;
pub mod submission;
pub mod types;
pub mod tyrant;
