//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod admin_repo;
pub mod submission_repo;
pub mod tyrant_repo;
pub mod vote_repo;

pub use admin_repo::AdminRepo;
pub use submission_repo::{ReviewError, SubmissionRepo};
pub use tyrant_repo::TyrantRepo;
pub use vote_repo::{VoteError, VoteRepo};
