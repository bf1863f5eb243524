//! Local fuzzy skill matching.
//!
//! Pure-Rust, deterministic, no LLM call. Used to reconcile the model's skill lists
//! when `FUZZY_RECONCILE` is enabled.

use strsim::normalized_levenshtein;

use crate::analysis::models::{
    AnalysisResult, JD_SKILLS, MATCHED_SKILLS, MISSING_SKILLS, RESUME_SKILLS,
};

pub const DEFAULT_THRESHOLD: u8 = 80;

const BULLET_MARKERS: &[char] = &['-', '•', '*', '·', '▪', '‣'];

/// Common short forms, mapped to the spelling used for comparison.
const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("golang", "go"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("ai", "artificial intelligence"),
    ("nlp", "natural language processing"),
    ("aws", "amazon web services"),
    ("gcp", "google cloud platform"),
];

/// Removes bullet markers, lowercases, trims and expands known short forms.
pub fn normalize(skill: &str) -> String {
    let cleaned = skill
        .chars()
        .filter(|c| !BULLET_MARKERS.contains(c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string();

    ALIASES
        .iter()
        .find(|(short, _)| *short == cleaned)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(cleaned)
}

/// Partial similarity on a 0-100 scale.
///
/// The shorter string is scored against every equal-length window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return 0;
    }

    let needle: String = short.iter().collect();
    let best = long
        .windows(short.len())
        .map(|window| normalized_levenshtein(&needle, &window.iter().collect::<String>()))
        .fold(0.0_f64, f64::max);

    (best * 100.0).round() as u8
}

/// True if any reference skill scores at least `threshold` against `skill`.
pub fn fuzzy_match<S: AsRef<str>>(skill: &str, references: &[S], threshold: u8) -> bool {
    let candidate = normalize(skill);
    references
        .iter()
        .any(|r| partial_ratio(&candidate, &normalize(r.as_ref())) >= threshold)
}

/// Recomputes `matched_skills`, `missing_skills` and `score` from the model's
/// `jd_skills` and `resume_skills`. Leaves the result untouched unless both are
/// arrays of strings.
pub fn reconcile(result: &mut AnalysisResult, threshold: u8) {
    let (Some(jd_skills), Some(resume_skills)) =
        (result.skills(JD_SKILLS), result.skills(RESUME_SKILLS))
    else {
        return;
    };

    let total = jd_skills.len();
    let (matched, missing): (Vec<String>, Vec<String>) = jd_skills
        .into_iter()
        .partition(|skill| fuzzy_match(skill, resume_skills.as_slice(), threshold));

    result.set_score(match_score(matched.len(), total));
    result.set_skills(MATCHED_SKILLS, matched);
    result.set_skills(MISSING_SKILLS, missing);
}

/// matched / total as a rounded percentage; 0 when there is nothing to match.
pub fn match_score(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round().min(100.0) as u8
}
