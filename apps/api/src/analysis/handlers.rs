use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::keywords::KeywordSet;
use crate::analysis::matcher::{compare, MatchResult};
use crate::analysis::records::{create_analysis, get_analysis, CreateAnalysisParams};
use crate::documents::DocumentKind;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    /// Full decoded text, returned so the client can display or edit it.
    pub text: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub keywords: Vec<String>,
    /// Time-limited signed URL for the original document.
    pub document_url: String,
    pub url_expires_in_secs: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub resume_keywords: KeywordSet,
    #[serde(default)]
    pub job_description: String,
}

/// POST /api/v1/resumes
///
/// Multipart upload: required `file` field (`.pdf` or `.docx`), optional
/// `origin` text field recorded as submitter metadata. Decodes, stores
/// the original, extracts keywords, and persists the analysis.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut origin: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::Validation("File field has no filename".to_string()))?
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((filename, bytes));
            }
            Some("origin") => {
                origin = field.text().await.ok().filter(|s| !s.is_empty());
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let kind = DocumentKind::from_filename(&filename)?;

    let (record, text) = create_analysis(
        state.decoder.as_ref(),
        state.store.as_ref(),
        state.repo.as_ref(),
        CreateAnalysisParams {
            bytes,
            kind,
            source_text: None,
            origin,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: record.id,
            text,
            keywords: record.keywords,
            created_at: record.created_at,
        }),
    ))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let ttl = state.config.signed_url_ttl_secs;
    let (record, document_url) =
        get_analysis(state.repo.as_ref(), state.store.as_ref(), id, ttl).await?;

    Ok(Json(AnalysisResponse {
        id: record.id,
        keywords: record.keywords,
        document_url,
        url_expires_in_secs: ttl,
        created_at: record.created_at,
    }))
}

/// POST /api/v1/compare
///
/// Compares a résumé keyword set against a job description. The keyword
/// set is typically the one returned by a prior upload; nonconforming
/// entries are filtered on deserialization.
pub async fn handle_compare(
    Json(req): Json<CompareRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = compare(&req.resume_keywords, &req.job_description)?;
    Ok(Json(result))
}
