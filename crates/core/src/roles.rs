//! Well-known role name constants.
//!
//! Every row in the `admins` table carries the admin role; the constant is
//! embedded in issued tokens and checked by the `RequireAdmin` extractor.

pub const ROLE_ADMIN: &str = "admin";
