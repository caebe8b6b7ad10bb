//! Resume optimization — rewrites a stored resume using its review suggestions.

use serde_json::Value;
use tracing::info;

use crate::analysis::pipeline::AnalysisSettings;
use crate::analysis::prompt_builder::{fill_template, truncate_resume};
use crate::analysis::prompts::{OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM};
use crate::analysis::taxonomy::{keywords_for, Industry};
use crate::errors::AppError;
use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmError, ModelInvoker, ModelRequest, ResponseFormat};

/// Builds the rewrite prompt. Deterministic; placeholders inside the stored
/// suggestions or the resume are never expanded.
pub fn build_optimize_prompt(
    original_content: &str,
    suggestions: &Value,
    industry: Industry,
    max_resume_chars: usize,
) -> String {
    let suggestions_json =
        serde_json::to_string_pretty(suggestions).unwrap_or_else(|_| "[]".to_string());
    let resume_text = truncate_resume(original_content, max_resume_chars);

    fill_template(
        OPTIMIZE_PROMPT_TEMPLATE,
        &[
            ("{plain_text_instruction}", PLAIN_TEXT_SYSTEM),
            ("{industry}", industry.as_str()),
            ("{keywords}", &keywords_for(industry).join(", ")),
            ("{suggestions}", &suggestions_json),
            ("{resume_text}", &resume_text),
        ],
    )
}

/// Asks the model for an optimized rewrite. Blank output is a service error.
pub async fn optimize(
    invoker: &dyn ModelInvoker,
    settings: &AnalysisSettings,
    original_content: &str,
    suggestions: &Value,
    industry: Industry,
) -> Result<String, AppError> {
    let prompt = build_optimize_prompt(
        original_content,
        suggestions,
        industry,
        settings.max_resume_chars,
    );

    let raw = invoker
        .invoke(&ModelRequest {
            model: &settings.model,
            system: OPTIMIZE_SYSTEM,
            prompt: &prompt,
            temperature: settings.temperature,
            response_format: ResponseFormat::Text,
        })
        .await?;

    let optimized = strip_json_fences(&raw);
    if optimized.is_empty() {
        return Err(AppError::Llm(LlmError::EmptyContent));
    }

    info!(
        "Optimized resume: {} -> {} chars",
        original_content.chars().count(),
        optimized.chars().count()
    );
    Ok(optimized.to_string())
}
