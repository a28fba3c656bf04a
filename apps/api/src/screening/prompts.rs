// All LLM prompt constants for the screening module.
// Field lists, types and bounds are NOT repeated here — the extraction
// service appends them from the schema descriptor, so prompt and decoder
// cannot drift apart.

/// System prompt for job description parsing — enforces JSON-only output.
pub const JOB_PARSE_SYSTEM: &str =
    "You are an assistant that extracts key job description information from text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job parsing prompt template. Replace `{jd_text}` before sending.
pub const JOB_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the key job information from the text below. Do not include any extra information.

JOB DESCRIPTION:
{jd_text}"#;

/// System prompt for resume parsing — enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an assistant that extracts candidate resume details. \
    Extract only information that is present in the resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the candidate's details from the following resume text.

RESUME TEXT:
{resume_text}"#;

/// System prompt for candidate scoring.
pub const SCORE_SYSTEM: &str =
    "You are an unbiased hiring manager comparing a job description with a \
    candidate's resume. Provide scores from 0 to 100 for relevance, \
    experience, and skills, an overall score reflecting the candidate's fit, \
    and a brief comment explaining the rationale. \
    You MUST respond with valid JSON only. \
    Do NOT use markdown code fences.";

/// Scoring prompt template. Replace `{job_json}` and `{candidate_json}`.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Compare the job description with the candidate's resume and score the fit.

JOB DESCRIPTION (structured):
{job_json}

CANDIDATE RESUME (structured):
{candidate_json}"#;

/// System prompt for email drafting — free text, no schema.
pub const EMAIL_SYSTEM: &str =
    "You are a professional HR representative. Craft an email response based \
    on the candidate's evaluation. Return only the email body text.";

/// Invitation prompt template. Replace `{job_json}` and `{evaluation_json}`.
pub const INVITE_PROMPT_TEMPLATE: &str = r#"Job Description (structured):
{job_json}

Candidate Evaluation (structured):
{evaluation_json}

Write an invitation email inviting the candidate for a quick call. The email
should be friendly, professional, and include a scheduling request."#;

/// Rejection prompt template. Replace `{job_json}` and `{evaluation_json}`.
pub const REJECT_PROMPT_TEMPLATE: &str = r#"Job Description (structured):
{job_json}

Candidate Evaluation (structured):
{evaluation_json}

Write a polite rejection email. Include constructive feedback and suggestions
for improvement based on the candidate's evaluation."#;
