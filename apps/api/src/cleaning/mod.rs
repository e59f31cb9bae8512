//! Resume text cleaning — pluggable, trait-based cleaner behind the
//! processing endpoint.
//!
//! Default: `LlmCleaner` over the shared `LlmClient`. The trait exists so
//! tests (and any future non-LLM backend) can stand in without touching
//! handler code. `AppState` holds an `Arc<dyn TextCleaner>`.

pub mod prompts;

use async_trait::async_trait;

use crate::cleaning::prompts::{CLEAN_RESUME_PROMPT, CLEAN_RESUME_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};

/// Produces an improved version of a resume's plain text: same language,
/// same approximate structure, better grammar and wording.
#[async_trait]
pub trait TextCleaner: Send + Sync {
    async fn clean(&self, text: &str) -> Result<String, AppError>;
}

/// Cleans resume text via Claude.
pub struct LlmCleaner {
    llm: LlmClient,
}

impl LlmCleaner {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextCleaner for LlmCleaner {
    async fn clean(&self, text: &str) -> Result<String, AppError> {
        let prompt = CLEAN_RESUME_PROMPT.replace("{resume_text}", text);
        let response = self
            .llm
            .call(&prompt, CLEAN_RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume cleaning failed: {e}")))?;

        let cleaned = response
            .text()
            .ok_or(LlmError::EmptyContent)
            .map_err(|e| AppError::Llm(e.to_string()))?;

        Ok(cleaned.trim().to_string())
    }
}
