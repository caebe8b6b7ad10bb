use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::Industry;

/// Inclusive upper bound of every skill-gap scale (`currentLevel`, `targetLevel`,
/// `importance`, `marketDemand`). The lower bound is 0.
pub const SKILL_SCALE_MAX: u8 = 10;

/// Inclusive upper bound of the ATS score and every analysis sub-score.
pub const SCORE_MAX: u8 = 100;

/// One analysis request. Not persisted itself.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub industry: Industry,
}

/// How much of the model's output survived validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseValidity {
    /// The response parsed and carried a numeric score.
    #[default]
    Valid,
    /// The response parsed but `score` was missing or non-numeric, so it reads 0.
    ScoreCoerced,
    /// The response could not be parsed; everything is the fallback result.
    Fallback,
}

/// The caller-facing result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// ATS score, 0 – 100.
    pub score: u8,
    pub analysis: ResumeAnalysis,
    pub suggestions: Vec<Suggestion>,
    pub skills_gap: Vec<SkillGapEntry>,
    pub validity: ResponseValidity,
}

/// Structured feedback. Sub-scores are on the same 0 – 100 scale as `score`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_match: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatting: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_compatibility: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_alignment: Option<u8>,
    pub section_analysis: Vec<SectionAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalysis {
    pub section: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub missing_elements: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Keywords,
    Quantify,
    Section,
    Formatting,
    EmploymentGap,
    Template,
    #[default]
    Content,
    Structure,
}

impl SuggestionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "keywords" | "keyword" => Some(Self::Keywords),
            "quantify" => Some(Self::Quantify),
            "section" => Some(Self::Section),
            "formatting" => Some(Self::Formatting),
            "employment_gap" => Some(Self::EmploymentGap),
            "template" => Some(Self::Template),
            "content" => Some(Self::Content),
            "structure" => Some(Self::Structure),
            _ => None,
        }
    }
}

/// Priority and impact share the same three-level scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    High,
    #[default]
    Medium,
    Low,
}

impl Level {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Easy,
    #[default]
    Moderate,
    Difficult,
}

impl Effort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "moderate" => Some(Self::Moderate),
            "difficult" | "hard" => Some(Self::Difficult),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub priority: Level,
    pub impact: Level,
    pub effort: Effort,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_example: Option<String>,
}

/// One skill gap. All four levels are on the 0 – `SKILL_SCALE_MAX` scale and
/// `target_level >= current_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapEntry {
    pub skill: String,
    pub current_level: u8,
    pub target_level: u8,
    pub importance: u8,
    pub market_demand: u8,
}

impl SkillGapEntry {
    pub fn gap(&self) -> u8 {
        self.target_level.saturating_sub(self.current_level)
    }
}
