// All LLM prompt constants for the analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Name of the response contract the model is told to honour.
pub const ANALYSIS_SCHEMA_NAME: &str = "ResumeAnalysisReport";

/// System prompt for resume analysis.
pub const ANALYSIS_SYSTEM: &str = "You are a professional resume reviewer and applicant \
    tracking system (ATS) expert. You score resumes against industry expectations and \
    give concrete, actionable feedback.";

/// Resume analysis prompt template.
/// Slots: {json_only_instruction}, {schema_name}, {industry}, {keywords}, {resume_text}.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"{json_only_instruction}

Return ONLY a JSON object matching the {schema_name} schema below. No extra text, headers, or markdown.

{schema_name}:
{
  "score": 0,
  "analysis": {
    "summary": "Two or three sentences on overall ATS readiness",
    "strengths": ["..."],
    "improvements": ["..."],
    "keywordMatch": 0,
    "formatting": 0,
    "content": 0,
    "readability": 0,
    "atsCompatibility": 0,
    "industryAlignment": 0,
    "sectionAnalysis": [
      {"section": "experience", "score": 0, "feedback": "...", "suggestions": ["..."], "missingElements": ["..."]}
    ]
  },
  "suggestions": [
    {
      "id": 1,
      "type": "keywords | quantify | section | formatting | employment_gap | template | content | structure",
      "title": "...",
      "description": "...",
      "keywords": ["..."],
      "priority": "high | medium | low",
      "impact": "high | medium | low",
      "effort": "easy | moderate | difficult",
      "beforeExample": "...",
      "afterExample": "..."
    }
  ],
  "skillsGap": [
    {"skill": "...", "currentLevel": 0, "targetLevel": 0, "importance": 0, "marketDemand": 0}
  ]
}

SCALES:
- "score" and every analysis sub-score: integer 0-100
- "currentLevel", "targetLevel", "importance", "marketDemand": integer 0-10

Evaluate the resume below and generate a comprehensive review in the context of the '{industry}' industry.

Focus on these keywords: {keywords}

Resume:
{resume_text}"#;

/// System prompt for resume optimization.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert resume writer. You rewrite resumes so they \
    pass applicant tracking systems while staying truthful to the candidate's experience.";

/// Resume optimization prompt template.
/// Slots: {plain_text_instruction}, {industry}, {keywords}, {suggestions}, {resume_text}.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"{plain_text_instruction}

Rewrite the resume below for the '{industry}' industry. Apply the review suggestions, weave in
relevant keywords only where the candidate's experience supports them, and keep every fact
unchanged. Do NOT invent employers, dates, titles, or metrics.

Relevant keywords: {keywords}

Review suggestions (JSON):
{suggestions}

Resume:
{resume_text}"#;
