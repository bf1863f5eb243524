//! Prompt for the resume/JD skill analysis.

const INSTRUCTIONS: &str = r#"Analyze the following resume against the job description.

1. Extract a bullet-point list of skills mentioned in the job description as "jd_skills".
2. Extract a bullet-point list of skills mentioned in the resume as "resume_skills".
3. From the jd_skills, identify the "matched_skills" that are also present (or closely related) in the resume_skills.
4. Identify the "missing_skills" that are in jd_skills but not in resume_skills.
5. Calculate the "score" as the percentage of matched_skills over total jd_skills (rounded to nearest integer).

Provide the output *only* as a JSON object in the following format:
{
    "jd_skills": [list of bullet-point JD skills],
    "matched_skills": [list of bullet-point skills matched from the resume],
    "missing_skills": [list of bullet-point skills from the JD not found in the resume],
    "resume_skills": [list of bullet-point resume skills],
    "score": integer (match percentage)
}

Do not include any explanation, formatting, or text outside the JSON response."#;

/// Builds the single instruction sent to the model. Document text is inserted verbatim.
pub fn build_prompt(resume_text: &str, jd_text: &str) -> String {
    format!(
        "{INSTRUCTIONS}\n\nResume:\n'''\n{resume_text}\n'''\n\nJob Description:\n'''\n{jd_text}\n'''\n"
    )
}
