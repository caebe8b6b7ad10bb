//! Response Validator — turns raw model output into a well-typed `AnalysisResult`.
//!
//! `validate` is total: it never panics and never returns an error. Malformed
//! output degrades to the fallback result; partially valid output keeps every
//! field that can be read and coerces the rest.
//!
//! Coercion rules:
//! - unparseable text, or a top-level value that is not an object → fallback
//! - `score` missing or non-numeric → 0 (`ScoreCoerced`)
//! - numeric scores are rounded, then clamped to 0 – 100
//! - `suggestions` / `skillsGap` that are not arrays → empty
//! - a bare string suggestion becomes `{title: s, description: s}` with default levels
//! - a bare string skill becomes `{skill: s}` with every level at 0
//! - skill levels are clamped to 0 – 10 and `targetLevel` is raised to `currentLevel`

use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::models::{
    AnalysisResult, Effort, Level, ResponseValidity, ResumeAnalysis, SectionAnalysis,
    SkillGapEntry, Suggestion, SuggestionType, SCORE_MAX, SKILL_SCALE_MAX,
};
use crate::llm_client::strip_json_fences;

/// Summary used by the fallback result.
pub const FALLBACK_SUMMARY: &str = "AI response was invalid";

/// The deterministic degraded result.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        score: 0,
        analysis: ResumeAnalysis {
            summary: Some(FALLBACK_SUMMARY.to_string()),
            ..ResumeAnalysis::default()
        },
        suggestions: vec![],
        skills_gap: vec![],
        validity: ResponseValidity::Fallback,
    }
}

/// Validates raw model output against the analysis contract.
pub fn validate(raw_text: &str) -> AnalysisResult {
    let parsed = match serde_json::from_str::<Value>(strip_json_fences(raw_text)) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(
                "AI response was JSON but not an object ({}), using fallback",
                json_kind(&other)
            );
            return fallback_result();
        }
        Err(e) => {
            warn!(
                "Failed to parse AI response ({e}): {:?}",
                raw_text.chars().take(200).collect::<String>()
            );
            return fallback_result();
        }
    };

    let (score, validity) = match parsed.get("score").and_then(as_finite_number) {
        Some(raw) => (clamp_to(raw, SCORE_MAX), ResponseValidity::Valid),
        None => {
            warn!("AI response had no numeric score, coercing to 0");
            (0, ResponseValidity::ScoreCoerced)
        }
    };

    AnalysisResult {
        score,
        analysis: parsed.get("analysis").map(read_analysis).unwrap_or_default(),
        suggestions: read_array(&parsed, "suggestions")
            .enumerate()
            .filter_map(|(i, v)| read_suggestion(i, v))
            .collect(),
        skills_gap: read_array(&parsed, "skillsGap")
            .filter_map(read_skill_gap)
            .collect(),
        validity,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Only JSON numbers count. Numeric-looking strings do not.
fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Rounds to the nearest integer and clamps into `0..=max`.
fn clamp_to(raw: f64, max: u8) -> u8 {
    raw.round().clamp(0.0, f64::from(max)) as u8
}

fn read_array<'a>(map: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn read_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn read_strings(map: &Map<String, Value>, key: &str) -> Vec<String> {
    read_array(map, key)
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn read_scaled(map: &Map<String, Value>, key: &str, max: u8) -> Option<u8> {
    map.get(key)
        .and_then(as_finite_number)
        .map(|n| clamp_to(n, max))
}

fn read_analysis(value: &Value) -> ResumeAnalysis {
    let map = match value {
        Value::Object(map) => map,
        Value::String(summary) => {
            return ResumeAnalysis {
                summary: Some(summary.trim().to_string()).filter(|s| !s.is_empty()),
                ..ResumeAnalysis::default()
            }
        }
        _ => return ResumeAnalysis::default(),
    };

    ResumeAnalysis {
        summary: read_str(map, "summary"),
        strengths: read_strings(map, "strengths"),
        improvements: read_strings(map, "improvements"),
        keyword_match: read_scaled(map, "keywordMatch", SCORE_MAX),
        formatting: read_scaled(map, "formatting", SCORE_MAX),
        content: read_scaled(map, "content", SCORE_MAX),
        readability: read_scaled(map, "readability", SCORE_MAX),
        ats_compatibility: read_scaled(map, "atsCompatibility", SCORE_MAX),
        industry_alignment: read_scaled(map, "industryAlignment", SCORE_MAX),
        section_analysis: read_array(map, "sectionAnalysis")
            .filter_map(read_section)
            .collect(),
    }
}

fn read_section(value: &Value) -> Option<SectionAnalysis> {
    let map = value.as_object()?;
    Some(SectionAnalysis {
        section: read_str(map, "section")?,
        score: read_scaled(map, "score", SCORE_MAX),
        feedback: read_str(map, "feedback").unwrap_or_default(),
        suggestions: read_strings(map, "suggestions"),
        missing_elements: read_strings(map, "missingElements"),
    })
}

fn read_suggestion(index: usize, value: &Value) -> Option<Suggestion> {
    let fallback_id = u32::try_from(index + 1).unwrap_or(u32::MAX);

    let map = match value {
        Value::Object(map) => map,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            return Some(Suggestion {
                id: fallback_id,
                kind: SuggestionType::default(),
                title: text.to_string(),
                description: text.to_string(),
                keywords: vec![],
                priority: Level::default(),
                impact: Level::default(),
                effort: Effort::default(),
                before_example: None,
                after_example: None,
            });
        }
        _ => return None,
    };

    let title = read_str(map, "title").or_else(|| read_str(map, "description"))?;
    let description = read_str(map, "description").unwrap_or_else(|| title.clone());
    let id = map
        .get("id")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .unwrap_or(fallback_id);

    Some(Suggestion {
        id,
        kind: read_str(map, "type")
            .and_then(|t| SuggestionType::parse(&t))
            .unwrap_or_default(),
        title,
        description,
        keywords: read_strings(map, "keywords"),
        priority: read_str(map, "priority")
            .and_then(|p| Level::parse(&p))
            .unwrap_or_default(),
        impact: read_str(map, "impact")
            .and_then(|p| Level::parse(&p))
            .unwrap_or_default(),
        effort: read_str(map, "effort")
            .and_then(|e| Effort::parse(&e))
            .unwrap_or_default(),
        before_example: read_str(map, "beforeExample"),
        after_example: read_str(map, "afterExample"),
    })
}

fn read_skill_gap(value: &Value) -> Option<SkillGapEntry> {
    let map = match value {
        Value::Object(map) => map,
        Value::String(skill) => {
            let skill = skill.trim();
            if skill.is_empty() {
                return None;
            }
            return Some(SkillGapEntry {
                skill: skill.to_string(),
                current_level: 0,
                target_level: 0,
                importance: 0,
                market_demand: 0,
            });
        }
        _ => return None,
    };

    let skill = read_str(map, "skill").or_else(|| read_str(map, "name"))?;
    let level = |key: &str| read_scaled(map, key, SKILL_SCALE_MAX).unwrap_or(0);
    let current_level = level("currentLevel");

    Some(SkillGapEntry {
        skill,
        current_level,
        target_level: level("targetLevel").max(current_level),
        importance: level("importance"),
        market_demand: level("marketDemand"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fallback(result: &AnalysisResult) {
        assert_eq!(result.score, 0);
        assert!(result.suggestions.is_empty());
        assert!(result.skills_gap.is_empty());
        assert_eq!(result.analysis.summary.as_deref(), Some(FALLBACK_SUMMARY));
        assert_eq!(result.validity, ResponseValidity::Fallback);
    }

    #[test]
    fn test_malformed_text_yields_fallback() {
        for raw in ["not json", "", "{", "```json\n{\n```", "{\"score\": }", "null", "[1,2]", "42"] {
            assert_fallback(&validate(raw));
        }
    }

    #[test]
    fn test_fallback_serializes_to_contract_shape() {
        let value = serde_json::to_value(fallback_result()).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["analysis"]["summary"], FALLBACK_SUMMARY);
        assert_eq!(value["suggestions"], serde_json::json!([]));
        assert_eq!(value["skillsGap"], serde_json::json!([]));
    }

    #[test]
    fn test_well_formed_response_passes_through() {
        let raw = r#"{"score": 85, "analysis": {"summary":"Strong"}, "suggestions": ["Add metrics"], "skillsGap": []}"#;
        let result = validate(raw);
        assert_eq!(result.score, 85);
        assert_eq!(result.validity, ResponseValidity::Valid);
        assert_eq!(result.analysis.summary.as_deref(), Some("Strong"));
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].title, "Add metrics");
        assert_eq!(result.suggestions[0].id, 1);
        assert!(result.skills_gap.is_empty());
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let raw = "```json\n{\"score\": 61}\n```";
        assert_eq!(validate(raw).score, 61);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(validate(r#"{"score": -5}"#).score, 0);
        assert_eq!(validate(r#"{"score": 150}"#).score, 100);
        assert_eq!(validate(r#"{"score": 1e300}"#).score, 100);
        assert_eq!(validate(r#"{"score": 100}"#).score, 100);
        assert_eq!(validate(r#"{"score": 0}"#).score, 0);
    }

    #[test]
    fn test_fractional_score_is_rounded() {
        assert_eq!(validate(r#"{"score": 72.5}"#).score, 73);
        assert_eq!(validate(r#"{"score": 72.4}"#).score, 72);
    }

    #[test]
    fn test_missing_or_non_numeric_score_is_coerced_to_zero() {
        for raw in [
            r#"{"analysis": "ok"}"#,
            r#"{"score": "NaN"}"#,
            r#"{"score": "85"}"#,
            r#"{"score": null}"#,
            r#"{"score": [85]}"#,
        ] {
            let result = validate(raw);
            assert_eq!(result.score, 0, "{raw}");
            assert_eq!(result.validity, ResponseValidity::ScoreCoerced, "{raw}");
        }
    }

    #[test]
    fn test_nan_maps_to_zero() {
        assert_eq!(as_finite_number(&Value::from(f64::NAN)), None);
        assert_eq!(clamp_to(f64::NAN, SCORE_MAX), 0);
    }

    #[test]
    fn test_partial_credit_keeps_other_fields() {
        let raw = r#"{"score": "high", "suggestions": ["Use action verbs"], "skillsGap": ["Kubernetes"]}"#;
        let result = validate(raw);
        assert_eq!(result.score, 0);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.skills_gap[0].skill, "Kubernetes");
    }

    #[test]
    fn test_non_array_collections_become_empty() {
        let raw = r#"{"score": 50, "suggestions": "add metrics", "skillsGap": {"skill": "Rust"}}"#;
        let result = validate(raw);
        assert_eq!(result.score, 50);
        assert!(result.suggestions.is_empty());
        assert!(result.skills_gap.is_empty());
    }

    #[test]
    fn test_structured_suggestion_is_read_field_by_field() {
        let raw = r#"{
            "score": 70,
            "suggestions": [{
                "id": 7,
                "type": "quantify",
                "title": "Quantify impact",
                "description": "Add numbers to your bullets",
                "keywords": ["metrics", ""],
                "priority": "HIGH",
                "impact": "low",
                "effort": "easy",
                "afterExample": "Cut costs by 20%"
            }]
        }"#;
        let s = &validate(raw).suggestions[0];
        assert_eq!(s.id, 7);
        assert_eq!(s.kind, SuggestionType::Quantify);
        assert_eq!(s.priority, Level::High);
        assert_eq!(s.impact, Level::Low);
        assert_eq!(s.effort, Effort::Easy);
        assert_eq!(s.keywords, vec!["metrics".to_string()]);
        assert_eq!(s.before_example, None);
        assert_eq!(s.after_example.as_deref(), Some("Cut costs by 20%"));
    }

    #[test]
    fn test_unknown_enum_values_take_defaults() {
        let raw = r#"{"score": 70, "suggestions": [{"title": "x", "type": "vibes", "priority": 3, "effort": "eventually"}]}"#;
        let s = &validate(raw).suggestions[0];
        assert_eq!(s.kind, SuggestionType::Content);
        assert_eq!(s.priority, Level::Medium);
        assert_eq!(s.effort, Effort::Moderate);
        assert_eq!(s.description, "x");
    }

    #[test]
    fn test_unreadable_suggestions_are_dropped() {
        let raw = r#"{"score": 70, "suggestions": [42, null, "", {"priority": "high"}, "Keep"]}"#;
        let suggestions = validate(raw).suggestions;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Keep");
        assert_eq!(suggestions[0].id, 5);
    }

    #[test]
    fn test_skill_levels_are_clamped_and_consistent() {
        let raw = r#"{"score": 70, "skillsGap": [
            {"skill": "Docker", "currentLevel": 12, "targetLevel": 4, "importance": -3, "marketDemand": 7.6}
        ]}"#;
        let gap = &validate(raw).skills_gap[0];
        assert_eq!(gap.current_level, 10);
        assert_eq!(gap.target_level, 10);
        assert_eq!(gap.importance, 0);
        assert_eq!(gap.market_demand, 8);
        assert_eq!(gap.gap(), 0);
    }

    #[test]
    fn test_analysis_as_string_becomes_summary() {
        let result = validate(r#"{"score": 40, "analysis": "Needs work"}"#);
        assert_eq!(result.analysis.summary.as_deref(), Some("Needs work"));
        assert!(result.analysis.strengths.is_empty());
    }

    #[test]
    fn test_analysis_sub_scores_and_sections() {
        let raw = r#"{"score": 88, "analysis": {
            "strengths": ["Clear layout"],
            "keywordMatch": 140,
            "readability": 77,
            "sectionAnalysis": [
                {"section": "experience", "score": 90, "feedback": "Good", "missingElements": ["dates"]},
                {"feedback": "orphan"}
            ]
        }}"#;
        let analysis = validate(raw).analysis;
        assert_eq!(analysis.strengths, vec!["Clear layout".to_string()]);
        assert_eq!(analysis.keyword_match, Some(100));
        assert_eq!(analysis.readability, Some(77));
        assert_eq!(analysis.formatting, None);
        assert_eq!(analysis.section_analysis.len(), 1);
        assert_eq!(analysis.section_analysis[0].missing_elements, vec!["dates".to_string()]);
    }

    #[test]
    fn test_adversarial_inputs_never_panic() {
        let inputs = [
            "\u{0}",
            "{\"score\": 1e999}",
            "{\"score\": -1e999}",
            "{\"suggestions\": [[[[[]]]]]}",
            "{\"skillsGap\": [{\"skill\": \"x\", \"currentLevel\": \"9\"}]}",
            "{\"analysis\": {\"sectionAnalysis\": \"none\"}}",
            "```",
            "```json```",
        ];
        for raw in inputs {
            let result = validate(raw);
            assert!(result.score <= SCORE_MAX);
        }
    }
}
