//! Analysis Orchestrator — runs one resume through the pipeline.
//!
//! Flow: Requested → PromptBuilt → Invoked → Validated → Completed.
//!
//! The model call is the only stage that can fail the request. Validation
//! degrades instead of failing, and nothing here retries.

use std::fmt;

use tracing::{debug, error, info};

use crate::analysis::models::{AnalysisRequest, AnalysisResult, SkillGapEntry};
use crate::analysis::prompt_builder::build_prompt;
use crate::analysis::prompts::ANALYSIS_SYSTEM;
use crate::analysis::taxonomy::keywords_for;
use crate::analysis::validator::validate;
use crate::errors::AppError;
use crate::llm_client::{ModelInvoker, ModelRequest, ResponseFormat};

/// Model knobs shared by every pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub model: String,
    pub temperature: f32,
    pub max_resume_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Requested,
    PromptBuilt,
    Invoked,
    Validated,
    Completed,
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStage::Requested => "requested",
            AnalysisStage::PromptBuilt => "prompt_built",
            AnalysisStage::Invoked => "invoked",
            AnalysisStage::Validated => "validated",
            AnalysisStage::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Runs the full analysis pipeline for one request.
pub async fn analyze(
    invoker: &dyn ModelInvoker,
    settings: &AnalysisSettings,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    debug!("Analysis stage: {}", AnalysisStage::Requested);

    let keywords = keywords_for(request.industry);
    let prompt = build_prompt(
        &request.resume_text,
        request.industry,
        keywords,
        settings.max_resume_chars,
    );
    debug!(
        "Analysis stage: {} ({} chars, industry={})",
        AnalysisStage::PromptBuilt,
        prompt.len(),
        request.industry.as_str()
    );

    let raw = invoker
        .invoke(&ModelRequest {
            model: &settings.model,
            system: ANALYSIS_SYSTEM,
            prompt: &prompt,
            temperature: settings.temperature,
            response_format: ResponseFormat::Json,
        })
        .await
        .map_err(|e| {
            error!("Analysis failed at stage {}: {e}", AnalysisStage::Invoked);
            AppError::Llm(e)
        })?;
    debug!("Analysis stage: {} ({} chars returned)", AnalysisStage::Invoked, raw.len());

    let result = validate(&raw);
    debug!(
        "Analysis stage: {} (validity={:?})",
        AnalysisStage::Validated,
        result.validity
    );

    info!(
        "Analysis {}: score={}/100, {} suggestions, {} skill gaps (widest {})",
        AnalysisStage::Completed,
        result.score,
        result.suggestions.len(),
        result.skills_gap.len(),
        widest_skill_gap(&result.skills_gap)
    );
    Ok(result)
}

/// Largest `targetLevel - currentLevel` across the entries, 0 when empty.
pub fn widest_skill_gap(entries: &[SkillGapEntry]) -> u8 {
    entries.iter().map(SkillGapEntry::gap).max().unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::analysis::models::ResponseValidity;
    use crate::analysis::taxonomy::Industry;
    use crate::llm_client::LlmError;

    /// Returns a canned reply and remembers every prompt it saw.
    pub(crate) struct CannedInvoker {
        reply: Result<String, fn() -> LlmError>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl CannedInvoker {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(vec![]),
            }
        }

        pub(crate) fn failing(make: fn() -> LlmError) -> Self {
            Self {
                reply: Err(make),
                prompts: Mutex::new(vec![]),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelInvoker for CannedInvoker {
        async fn invoke(&self, request: &ModelRequest<'_>) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(request.prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    pub(crate) fn settings() -> AnalysisSettings {
        AnalysisSettings {
            model: "test-model".to_string(),
            temperature: 0.3,
            max_resume_chars: 24_000,
        }
    }

    fn request(text: &str) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: text.to_string(),
            industry: Industry::Technology,
        }
    }

    #[tokio::test]
    async fn test_end_to_end_valid_response() {
        let invoker = CannedInvoker::replying(
            r#"{"score": 85, "analysis": {"summary":"Strong"}, "suggestions": ["Add metrics"], "skillsGap": []}"#,
        );
        let result = analyze(&invoker, &settings(), &request("5 years Python, AWS, Docker"))
            .await
            .unwrap();
        assert_eq!(result.score, 85);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.validity, ResponseValidity::Valid);
    }

    #[tokio::test]
    async fn test_prompt_carries_resume_and_technology_keywords() {
        let resume = "5 years Python, AWS, Docker";
        let invoker = CannedInvoker::replying(r#"{"score": 50}"#);
        analyze(&invoker, &settings(), &request(resume)).await.unwrap();

        let prompts = invoker.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains(resume));
        let hint = prompt
            .lines()
            .find(|l| l.starts_with("Focus on these keywords:"))
            .unwrap();
        for keyword in ["Python", "AWS", "Docker"] {
            assert!(hint.contains(keyword));
        }
    }

    #[tokio::test]
    async fn test_garbage_response_degrades_to_fallback() {
        let invoker = CannedInvoker::replying("Sorry, I can't help with that.");
        let result = analyze(&invoker, &settings(), &request("Resume")).await.unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.validity, ResponseValidity::Fallback);
    }

    #[tokio::test]
    async fn test_service_error_fails_request_without_retry() {
        let invoker = CannedInvoker::failing(|| LlmError::Timeout(Duration::from_secs(30)));
        let err = analyze(&invoker, &settings(), &request("Resume"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(ref e) if e.is_timeout()));
        assert_eq!(invoker.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected_before_invoking() {
        let invoker = CannedInvoker::replying(r#"{"score": 50}"#);
        let err = analyze(&invoker, &settings(), &request("  \n "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(invoker.calls(), 0);
    }

    #[tokio::test]
    async fn test_widest_skill_gap() {
        let invoker = CannedInvoker::replying(
            r#"{"score": 60, "skillsGap": [
                {"skill": "Go", "currentLevel": 2, "targetLevel": 7},
                {"skill": "SQL", "currentLevel": 6, "targetLevel": 8}
            ]}"#,
        );
        let result = analyze(&invoker, &settings(), &request("Resume")).await.unwrap();
        assert_eq!(widest_skill_gap(&result.skills_gap), 5);
        assert_eq!(widest_skill_gap(&[]), 0);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(AnalysisStage::PromptBuilt.to_string(), "prompt_built");
        assert_eq!(AnalysisStage::Completed.to_string(), "completed");
    }
}
