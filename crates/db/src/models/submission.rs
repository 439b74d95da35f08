//! Submission queue model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tyrantcam_core::category::Category;
use tyrantcam_core::error::CoreError;
use tyrantcam_core::types::{DbId, Timestamp};
use tyrantcam_core::{submission, tyrant};

/// Descriptor for one uploaded evidence file.
///
/// The bytes live in external object storage; only the reference is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFile {
    pub name: String,
    pub url: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
}

impl EvidenceFile {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Evidence file name must not be empty".into(),
            ));
        }
        if matches!(self.size_bytes, Some(n) if n < 0) {
            return Err(CoreError::Validation(format!(
                "Evidence file '{}' has a negative size",
                self.name
            )));
        }
        tyrant::validate_url(&self.url)
    }
}

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub name: String,
    pub title: String,
    pub position: Option<String>,
    pub category: String,
    pub description: String,
    pub evidence_files: Json<Vec<EvidenceFile>>,
    pub reporter_email: Option<String>,
    pub status: String,
    pub moderator_notes: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub promoted_tyrant_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a public report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmission {
    pub name: String,
    pub title: String,
    pub position: Option<String>,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub evidence_files: Vec<EvidenceFile>,
    pub reporter_email: Option<String>,
}

impl CreateSubmission {
    /// Check every field rule; returns the parsed category on success.
    pub fn validate(&self) -> Result<Category, CoreError> {
        tyrant::validate_name(&self.name)?;
        tyrant::validate_title("Title", &self.title)?;
        if let Some(ref position) = self.position {
            tyrant::validate_title("Position", position)?;
        }
        submission::validate_description(&self.description)?;
        submission::validate_evidence_count(self.evidence_files.len())?;
        for file in &self.evidence_files {
            file.validate()?;
        }
        if let Some(ref email) = self.reporter_email {
            submission::validate_contact_email(email)?;
        }
        self.category.parse()
    }
}

/// Body for rejecting a submission.
#[derive(Debug, Default, Deserialize)]
pub struct RejectSubmission {
    pub notes: Option<String>,
}

/// Body for approving a submission.
#[derive(Debug, Default, Deserialize)]
pub struct ApproveSubmission {
    pub notes: Option<String>,
    /// Publish the promoted entry immediately instead of leaving it as a draft.
    #[serde(default)]
    pub publish: bool,
}

/// Query parameters for listing submissions.
#[derive(Debug, Deserialize)]
pub struct SubmissionListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
