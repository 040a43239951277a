// Text canonicalization used for every name comparison against policy.
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Characters allowed to survive normalization: word characters, whitespace
// and basic punctuation. Everything else is noise from hand-edited names.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.,!?-]").unwrap());

/// Canonicalizes a string for policy comparisons.
///
/// Trims surrounding whitespace, lowercases, decomposes accented characters
/// (NFD) and drops the combining marks, then strips any character outside
/// word characters, whitespace and `.,!?-`. Two names are considered
/// equivalent when their normalized forms are identical, which makes the
/// comparisons insensitive to case, accent and punctuation drift between
/// what Canvas stores and what the policy expects.
///
/// Example:
/// ```
/// use canvas_task_auditor::text::normalize;
/// assert_eq!(normalize("  Foro Académico: Módulo 1 "), "foro academico modulo 1");
/// ```
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    DISALLOWED.replace_all(&stripped, "").into_owned()
}

/// True when both strings normalize to the same canonical form.
pub fn normalized_eq(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// True when the normalized haystack contains the normalized needle.
pub fn normalized_contains(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

/// Extracts course ids from free text.
///
/// Accepts ids separated by spaces, commas or newlines in any combination;
/// blank entries are discarded. No numeric validation happens here, the ids
/// are passed to the API verbatim.
pub fn parse_course_ids(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
