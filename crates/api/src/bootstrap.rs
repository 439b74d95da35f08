//! First-run admin provisioning.

use tyrantcam_core::submission::validate_contact_email;
use tyrantcam_db::models::admin::{AdminResponse, CreateAdmin};
use tyrantcam_db::repositories::AdminRepo;
use tyrantcam_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminSeed;
use crate::error::{AppError, AppResult};

/// Create the seed admin if, and only if, no admin exists yet.
///
/// Returns the created account, or `None` when nothing was done. Existing
/// accounts are never modified, so restarting with a different
/// `ADMIN_PASSWORD` has no effect.
pub async fn ensure_admin(
    pool: &DbPool,
    seed: Option<&AdminSeed>,
) -> AppResult<Option<AdminResponse>> {
    let existing = AdminRepo::count(pool).await?;

    let Some(seed) = seed else {
        if existing == 0 {
            tracing::warn!("No admin accounts exist and ADMIN_EMAIL/ADMIN_PASSWORD are unset");
        }
        return Ok(None);
    };

    if existing > 0 {
        tracing::debug!(existing, "Admin accounts present, skipping bootstrap");
        return Ok(None);
    }

    let email = seed.email.trim();
    validate_contact_email(email)?;
    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, "Bootstrapped initial admin account");

    Ok(Some(admin.into()))
}
