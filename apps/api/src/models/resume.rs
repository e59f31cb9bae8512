use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::revision::ChangeLedger;

/// One uploaded resume and everything derived from it.
///
/// `changes` is the change list from the latest detection run, stored as
/// JSONB; reprocessing replaces it wholesale. `processing_status` walks
/// uploaded -> processing -> completed (or error).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: i64,
    pub processing_status: String,
    pub original_text: String,
    pub cleaned_text: Option<String>,
    pub changes: Option<Json<ChangeLedger>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub mod status {
    pub const UPLOADED: &str = "uploaded";
    pub const PROCESSING: &str = "processing";
    pub const COMPLETED: &str = "completed";
    pub const ERROR: &str = "error";
}
