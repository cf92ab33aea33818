use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One completed résumé analysis, tied to the stored original document.
///
/// Rows are written exactly once, after the document is durably stored
/// and extraction has run, and are never updated. A row referencing a
/// document that was not stored cannot exist: the insert is the final
/// step of the creation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRecordRow {
    pub id: Uuid,
    /// Extracted keywords, stored sorted.
    pub keywords: Vec<String>,
    /// Object-store key of the original document. Unique per record;
    /// built from a date prefix plus a random UUID, never from the
    /// user-supplied filename.
    pub document_key: String,
    pub content_type: String,
    /// Free-form submitter metadata (e.g. client address). Not used in
    /// matching.
    pub origin: Option<String>,
    pub created_at: DateTime<Utc>,
}
