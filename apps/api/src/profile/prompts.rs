// Profile extraction prompt. `{resume_text}` is replaced with the (truncated) resume.
// The schema keys and their order must match `models::profile::PROFILE_KEYS`.

pub const PROFILE_PARSE_PROMPT: &str = r#"You are a resume parsing engine.

Return ONLY valid JSON.
No markdown.
No explanation.

Schema:
{
  "full_name": "",
  "email": "",
  "phone_number": "",
  "skills": [],
  "education": [],
  "experience": [],
  "projects": [],
  "certifications": [],
  "achievements": [],
  "areas_of_interest": []
}

Rules:
- All keys must exist
- Empty string or array if missing
- Do not guess
- education items are objects: {"institution": "", "degree": "", "duration": ""}
- experience items are objects: {"company": "", "role": "", "duration": "", "description": ""}
- projects items are objects: {"name": "", "description": ""}

Resume:
"""
{resume_text}
"""
"#;
