pub mod admin_submissions;
pub mod admin_tyrants;
pub mod auth;
pub mod submissions;
pub mod tyrants;
pub mod votes;
