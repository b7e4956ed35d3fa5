/// Match a string against a wildcard pattern.
/// Supports: *prefix, suffix*, *substring*.
pub fn matches_pattern(text: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return text.is_empty();
    }

    let starts_with_wildcard = pattern.starts_with('*');
    let ends_with_wildcard = pattern.ends_with('*');

    match (starts_with_wildcard, ends_with_wildcard) {
        (true, true) if pattern.len() >= 2 => {
            // *substring*
            let substring = &pattern[1..pattern.len() - 1];
            text.contains(substring)
        }
        (true, true) => true,
        (true, false) => {
            // *suffix
            let suffix = &pattern[1..];
            text.ends_with(suffix)
        }
        (false, true) => {
            // prefix*
            let prefix = &pattern[..pattern.len() - 1];
            text.starts_with(prefix)
        }
        (false, false) => {
            // bare patterns match anywhere in the path
            text.contains(pattern)
        }
    }
}

/// True when any of `patterns` matches `text`.
pub fn matches_any(text: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| matches_pattern(text, pattern))
}
