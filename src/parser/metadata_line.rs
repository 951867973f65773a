use std::sync::LazyLock;

use regex::Regex;

static FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s\-\*•]*(?P<key>[^:]+?)\s*:\s*(?P<value>.*)$").expect("valid metadata field regex")
});

// Unfilled template slots such as `[extracted date/time information]`.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\[[^\]]*\]$").expect("valid metadata placeholder regex"));

/// Extracts a `Key: Value` pair from one metadata-section line.
///
/// Returns `None` for lines without a colon, for blank keys or values, and
/// for values that are still a bracketed template placeholder.
pub fn parse_metadata_line(line: &str) -> Option<(String, String)> {
    let captures = FIELD_REGEX.captures(line.trim())?;
    let key = strip_field_decoration(captures.name("key")?.as_str());
    let value = strip_field_decoration(captures.name("value")?.as_str());

    if key.is_empty() || value.is_empty() || is_placeholder(value) {
        return None;
    }

    Some((key.to_string(), value.to_string()))
}

pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(value.trim())
}

fn strip_field_decoration(value: &str) -> &str {
    value.trim_matches(|character: char| character.is_whitespace() || character == '*')
}
