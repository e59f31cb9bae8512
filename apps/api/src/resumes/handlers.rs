use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{self, FileType};
use crate::models::resume::{status, ResumeRow};
use crate::revision::{detect, reconstruct, ChangeLedger};
use crate::state::AppState;

/// Upload cap, enforced on top of the router's body limit so the error is
/// ours rather than a generic 413.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PREVIEW_CHARS: usize = 500;

#[derive(Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub original_text_preview: String,
}

/// POST /api/v1/resumes
///
/// Multipart upload (`file` field). Extracts text immediately so a broken
/// file fails the upload instead of the later processing step.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let file_type =
        FileType::from_filename(&filename).map_err(|e| AppError::Validation(e.to_string()))?;

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File size exceeds {} MB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let file_size = data.len() as i64;

    // Extraction is CPU-bound (pdf parsing in particular), keep it off the
    // async workers.
    let original_text =
        tokio::task::spawn_blocking(move || extract::extract_text(&data, file_type))
            .await
            .map_err(|e| AppError::Internal(anyhow!("extraction task panicked: {e}")))??;

    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO resumes (id, filename, file_type, file_size, processing_status, original_text)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(&filename)
    .bind(file_type.as_str())
    .bind(file_size)
    .bind(status::UPLOADED)
    .bind(&original_text)
    .execute(&state.db)
    .await?;

    tracing::info!("Uploaded resume {id} ({filename}, {file_size} bytes)");

    Ok(Json(UploadResponse {
        id,
        filename,
        file_type: file_type.as_str().to_string(),
        original_text_preview: text_preview(&original_text, PREVIEW_CHARS),
    }))
}

#[derive(Serialize)]
pub struct ProcessResponse {
    pub id: Uuid,
    pub original_text: String,
    pub cleaned_text: String,
    pub changes: ChangeLedger,
    pub total_changes: usize,
}

/// POST /api/v1/resumes/:id/process
///
/// Runs the cleaner and detection. Reprocessing replaces the previous
/// detection run's change list (and any accept state with it).
pub async fn handle_process(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessResponse>, AppError> {
    let resume = fetch_resume(&state, id).await?;

    sqlx::query("UPDATE resumes SET processing_status = $1, updated_at = now() WHERE id = $2")
        .bind(status::PROCESSING)
        .bind(id)
        .execute(&state.db)
        .await?;

    let cleaned_text = match state.cleaner.clean(&resume.original_text).await {
        Ok(text) => text,
        Err(e) => {
            // Best-effort status update; the cleaner error is what the
            // caller needs to see.
            let _ = sqlx::query(
                "UPDATE resumes SET processing_status = $1, updated_at = now() WHERE id = $2",
            )
            .bind(status::ERROR)
            .bind(id)
            .execute(&state.db)
            .await;
            return Err(e);
        }
    };

    let changes = ChangeLedger::new(detect(&resume.original_text, &cleaned_text));
    let total_changes = changes.len();

    sqlx::query(
        r#"
        UPDATE resumes
        SET processing_status = $1, cleaned_text = $2, changes = $3, updated_at = now()
        WHERE id = $4
        "#,
    )
    .bind(status::COMPLETED)
    .bind(&cleaned_text)
    .bind(SqlJson(&changes))
    .bind(id)
    .execute(&state.db)
    .await?;

    if changes.is_empty() {
        tracing::info!("Processed resume {id}: cleaner suggested no changes");
    } else {
        tracing::info!("Processed resume {id}: {total_changes} changes detected");
    }

    Ok(Json(ProcessResponse {
        id,
        original_text: resume.original_text,
        cleaned_text,
        changes,
        total_changes,
    }))
}

#[derive(Deserialize)]
pub struct ToggleChangeRequest {
    pub accept: bool,
}

/// PATCH /api/v1/resumes/:id/changes/:change_id
pub async fn handle_toggle_change(
    State(state): State<AppState>,
    Path((id, change_id)): Path<(Uuid, String)>,
    Json(req): Json<ToggleChangeRequest>,
) -> Result<StatusCode, AppError> {
    let resume = fetch_resume(&state, id).await?;

    let mut ledger = resume
        .changes
        .map(|json| json.0)
        .ok_or_else(|| AppError::Validation(format!("Resume {id} has not been processed yet")))?;

    ledger.toggle(&change_id, req.accept)?;

    if let Some(change) = ledger.get(&change_id) {
        tracing::debug!(
            "Resume {id}: change {change_id} ({:?}) {}",
            change.category,
            if req.accept { "accepted" } else { "rejected" }
        );
    }

    sqlx::query("UPDATE resumes SET changes = $1, updated_at = now() WHERE id = $2")
        .bind(SqlJson(&ledger))
        .bind(id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(fetch_resume(&state, id).await?))
}

#[derive(Serialize)]
pub struct FinalTextResponse {
    pub final_text: String,
    pub applied_changes: usize,
}

/// GET /api/v1/resumes/:id/final
///
/// Applies the currently-accepted changes to the original text.
pub async fn handle_final_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalTextResponse>, AppError> {
    let resume = fetch_resume(&state, id).await?;

    let ledger = resume.changes.map(|json| json.0).unwrap_or_default();
    let (final_text, applied_changes) = reconstruct(&resume.original_text, ledger.list())?;

    Ok(Json(FinalTextResponse {
        final_text,
        applied_changes,
    }))
}

async fn fetch_resume(state: &AppState, id: Uuid) -> Result<ResumeRow, AppError> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?;

    resume.ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// First `max_chars` characters of `text`, with an ellipsis when truncated.
fn text_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(text_preview("short resume", 500), "short resume");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let text = "a".repeat(600);
        let preview = text_preview(&text, 500);
        assert_eq!(preview.len(), 503);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_preview_exact_length_not_truncated() {
        let text = "b".repeat(500);
        assert_eq!(text_preview(&text, 500), text);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "é".repeat(600);
        let preview = text_preview(&text, 500);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 503);
    }
}
