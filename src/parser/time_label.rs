use std::sync::LazyLock;

use regex::Regex;

static CLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("valid clock regex"));

static RANGE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[-–—]\s*").expect("valid range separator regex"));

/// Seconds from the start of a time label, for playback seeking.
///
/// Accepts `M:S` and `H:M:S`, optionally as the first half of a `X - Y`
/// range. Anything else, including values too large to represent, is 0.
pub fn seconds_from_time_label(label: &str) -> u64 {
    let start = start_component(label);
    let parts = start
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>();

    let total = match parts.as_deref() {
        Some([minutes, seconds]) => clock_seconds(0, *minutes, *seconds),
        Some([hours, minutes, seconds]) => clock_seconds(*hours, *minutes, *seconds),
        _ => None,
    };
    total.unwrap_or(0)
}

fn clock_seconds(hours: u64, minutes: u64, seconds: u64) -> Option<u64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// The start half of a time label, without brackets.
pub fn start_component(label: &str) -> &str {
    let trimmed = label.trim().trim_matches(|character| matches!(character, '[' | ']'));
    trimmed
        .split(['-', '–', '—'])
        .next()
        .unwrap_or_default()
        .trim()
}

pub fn is_range(label: &str) -> bool {
    label.contains(['-', '–', '—'])
}

/// Canonical spelling of an extracted time: brackets dropped, range
/// separators written as ` - `. `None` when there is no clock value.
pub(crate) fn normalize_time_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches(|character| matches!(character, '[' | ']'));
    if !CLOCK_REGEX.is_match(trimmed) {
        return None;
    }

    let normalized = RANGE_SEPARATOR_REGEX.replace_all(trimmed.trim(), " - ");
    Some(normalized.trim().to_string())
}
