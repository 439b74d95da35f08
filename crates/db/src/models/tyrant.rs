//! Tyrant entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tyrantcam_core::category::Category;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::tyrant;
use tyrantcam_core::types::{DbId, Timestamp};

/// A row from the `tyrants` table.
///
/// `shame_count` is maintained by the vote ledger and always equals the
/// number of live rows in `votes` for this tyrant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tyrant {
    pub id: DbId,
    pub name: String,
    pub title: String,
    pub position: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub evidence_urls: Vec<String>,
    pub shame_count: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tyrant entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTyrant {
    pub name: String,
    pub title: String,
    pub position: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl CreateTyrant {
    /// Check every field rule; returns the parsed category on success.
    pub fn validate(&self) -> Result<Category, CoreError> {
        tyrant::validate_name(&self.name)?;
        tyrant::validate_title("Title", &self.title)?;
        tyrant::validate_title("Position", &self.position)?;
        tyrant::validate_description(&self.description)?;
        if let Some(ref url) = self.image_url {
            tyrant::validate_url(url)?;
        }
        tyrant::validate_evidence_urls(&self.evidence_urls)?;
        self.category.parse()
    }
}

/// DTO for a partial update. Absent fields are left unchanged.
///
/// Publication is toggled through its own endpoints, not through this DTO.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTyrant {
    pub name: Option<String>,
    pub title: Option<String>,
    pub position: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub evidence_urls: Option<Vec<String>>,
}

impl UpdateTyrant {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref name) = self.name {
            tyrant::validate_name(name)?;
        }
        if let Some(ref title) = self.title {
            tyrant::validate_title("Title", title)?;
        }
        if let Some(ref position) = self.position {
            tyrant::validate_title("Position", position)?;
        }
        if let Some(ref category) = self.category {
            category.parse::<Category>()?;
        }
        if let Some(ref description) = self.description {
            tyrant::validate_description(description)?;
        }
        if let Some(ref url) = self.image_url {
            tyrant::validate_url(url)?;
        }
        if let Some(ref urls) = self.evidence_urls {
            tyrant::validate_evidence_urls(urls)?;
        }
        Ok(())
    }
}

/// Query parameters for tyrant listings.
#[derive(Debug, Deserialize)]
pub struct TyrantListParams {
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TyrantListParams {
    /// Parse the optional category filter.
    pub fn category(&self) -> Result<Option<Category>, CoreError> {
        self.category
            .as_deref()
            .map(|c| c.parse::<Category>())
            .transpose()
    }
}
