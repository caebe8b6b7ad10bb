//! Prompt Builder — composes the deterministic analysis prompt.

use std::borrow::Cow;

use tracing::warn;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SCHEMA_NAME};
use crate::analysis::taxonomy::Industry;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Default cap on resume length, in Unicode scalar values. 0 disables the cap.
pub const MAX_RESUME_CHARS: usize = 24_000;

/// Caps the resume at `max_chars` characters. Anything cut is replaced by an
/// explicit marker so the model (and a human reading the prompt) can see it.
pub fn truncate_resume(resume_text: &str, max_chars: usize) -> Cow<'_, str> {
    if max_chars == 0 {
        return Cow::Borrowed(resume_text);
    }
    let Some((cut, _)) = resume_text.char_indices().nth(max_chars) else {
        return Cow::Borrowed(resume_text);
    };

    let omitted = resume_text[cut..].chars().count();
    warn!(
        "Resume exceeds {} characters, truncating ({} characters omitted)",
        max_chars, omitted
    );
    Cow::Owned(format!(
        "{}\n[TRUNCATED: {} characters omitted after the first {} characters]",
        &resume_text[..cut],
        omitted,
        max_chars
    ))
}

/// Builds the analysis prompt. Identical inputs always give identical output.
pub fn build_prompt(
    resume_text: &str,
    industry: Industry,
    keywords: &[&str],
    max_resume_chars: usize,
) -> String {
    let resume_text = truncate_resume(resume_text, max_resume_chars);

    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("{json_only_instruction}", JSON_ONLY_SYSTEM),
            ("{schema_name}", ANALYSIS_SCHEMA_NAME),
            ("{industry}", industry.as_str()),
            ("{keywords}", &keywords.join(", ")),
            ("{resume_text}", &resume_text),
        ],
    )
}

/// Substitutes `{placeholder}` slots in one left-to-right pass.
///
/// Substituted values are never scanned again, so braces in resume text or
/// model-authored suggestions come through verbatim. Unknown `{...}` runs
/// (the JSON schema in the templates) are copied as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::keywords_for;

    const RESUME: &str = "5 years Python, AWS, Docker";

    fn tech_prompt(resume: &str) -> String {
        build_prompt(
            resume,
            Industry::Technology,
            keywords_for(Industry::Technology),
            MAX_RESUME_CHARS,
        )
    }

    #[test]
    fn test_prompt_embeds_resume_verbatim_and_keywords() {
        let prompt = tech_prompt(RESUME);
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains("Python"));
        assert!(prompt.contains("AWS"));
        assert!(prompt.contains("Docker"));
        assert!(prompt.contains("Focus on these keywords: JavaScript, Python, React"));
    }

    #[test]
    fn test_prompt_names_schema_and_industry() {
        let prompt = build_prompt(RESUME, Industry::DataScience, &["NLP"], MAX_RESUME_CHARS);
        assert!(prompt.contains("Return ONLY a JSON object matching the ResumeAnalysisReport schema"));
        for field in ["\"score\"", "\"analysis\"", "\"suggestions\"", "\"skillsGap\""] {
            assert!(prompt.contains(field), "schema is missing {field}");
        }
        assert!(prompt.contains("'data_science' industry"));
        assert!(prompt.contains(JSON_ONLY_SYSTEM));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(tech_prompt(RESUME), tech_prompt(RESUME));
    }

    #[test]
    fn test_placeholders_inside_resume_are_left_alone() {
        let resume = "Built a templating engine that expands {industry} and {keywords}";
        let prompt = tech_prompt(resume);
        assert!(prompt.contains(resume));
        assert!(!prompt.contains("{json_only_instruction}"));
    }

    #[test]
    fn test_fill_template_is_single_pass() {
        let filled = fill_template(
            "a={a} b={b} literal={\"x\": 1}",
            &[("{a}", "{b}"), ("{b}", "B")],
        );
        assert_eq!(filled, "a={b} b=B literal={\"x\": 1}");
    }

    #[test]
    fn test_short_resume_is_not_truncated() {
        assert!(matches!(truncate_resume(RESUME, 100), Cow::Borrowed(_)));
        assert!(matches!(truncate_resume(RESUME, RESUME.len()), Cow::Borrowed(_)));
        assert!(!tech_prompt(RESUME).contains("[TRUNCATED"));
    }

    #[test]
    fn test_long_resume_is_truncated_with_marker() {
        let resume = "a".repeat(30);
        let truncated = truncate_resume(&resume, 10);
        assert_eq!(
            truncated,
            format!(
                "{}\n[TRUNCATED: 20 characters omitted after the first 10 characters]",
                "a".repeat(10)
            )
        );
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let resume = "é".repeat(5);
        let truncated = truncate_resume(&resume, 3);
        assert!(truncated.starts_with("ééé\n[TRUNCATED: 2 characters omitted"));
    }

    #[test]
    fn test_zero_cap_disables_truncation() {
        let resume = "x".repeat(50_000);
        assert_eq!(truncate_resume(&resume, 0).len(), 50_000);
    }
}
