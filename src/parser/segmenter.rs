use std::sync::LazyLock;

use regex::Regex;

use super::metadata_line::parse_metadata_line;
use super::timestamp_line::{TimestampLine, classify_timestamp_line};
use crate::model::{Category, Event};

/// Header lines longer than this only count when the keyword sits in a
/// `LABEL:` prefix.
const HEADER_MAX_CHARS: usize = 48;

static ORDINAL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").expect("valid ordinal prefix regex"));

static EVENT_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[|\d{1,2}:\d{2})|\(\d+\)\s*:?$").expect("valid event shape regex")
});

// A second summary keyword joined to the first, as in `SUMMARY AND STORYLINE`.
static SEED_CONNECTOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s*#_]*(?:(?:and|&|/|of(?:\s+the)?)\s*)?(?:summary|storyline)\b")
        .expect("valid summary connector regex")
});

// The keyword must appear within the first three words and before any colon.
static HEADER_PATTERNS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    [
        (Section::Metadata, "METADATA"),
        (Section::Timestamps, "TIMESTAMPS"),
        (Section::Summary, "SUMMARY|STORYLINE"),
    ]
    .into_iter()
    .map(|(section, keywords)| {
        let pattern = format!(r"(?i)^(?:[^\s:]+\s+){{0,2}}[^\s:]*?(?:{keywords})");
        (
            section,
            Regex::new(&pattern).expect("valid section header regex"),
        )
    })
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Metadata,
    Timestamps,
    Summary,
}

/// Everything the line machine carries from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterState {
    pub section: Option<Section>,
    pub current_category: Category,
}

impl Default for SegmenterState {
    fn default() -> Self {
        Self {
            section: None,
            current_category: Category::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    SectionHeader {
        section: Section,
        seed: Option<String>,
    },
    MetadataField {
        key: String,
        value: String,
    },
    CategoryHeader {
        category: Category,
        declared_count: Option<usize>,
    },
    Event(Event),
    SummaryFragment(String),
    Skipped,
}

/// Advances the line machine by one line.
///
/// Blank lines and lines outside any section are skipped. Header lines are
/// consumed and never reach a line classifier. Entering a section resets the
/// category context to the catch-all. Inside the summary, a summary-keyword
/// line that carries text is kept whole as body text.
pub fn reduce(state: &SegmenterState, line: &str) -> (SegmenterState, LineOutcome) {
    if line.trim().is_empty() {
        return (state.clone(), LineOutcome::Skipped);
    }

    if let Some((section, seed)) = detect_section_header(line) {
        if section == Section::Summary
            && state.section == Some(Section::Summary)
            && seed.is_some()
        {
            return (
                state.clone(),
                LineOutcome::SummaryFragment(line.to_string()),
            );
        }

        let next = SegmenterState {
            section: Some(section),
            current_category: Category::General,
        };
        return (next, LineOutcome::SectionHeader { section, seed });
    }

    match state.section {
        None => (state.clone(), LineOutcome::Skipped),
        Some(Section::Metadata) => {
            let outcome = parse_metadata_line(line)
                .map(|(key, value)| LineOutcome::MetadataField { key, value })
                .unwrap_or(LineOutcome::Skipped);
            (state.clone(), outcome)
        }
        Some(Section::Timestamps) => {
            match classify_timestamp_line(line, &state.current_category) {
                TimestampLine::CategoryHeader {
                    category,
                    declared_count,
                } => {
                    let next = SegmenterState {
                        section: state.section,
                        current_category: category.clone(),
                    };
                    (
                        next,
                        LineOutcome::CategoryHeader {
                            category,
                            declared_count,
                        },
                    )
                }
                TimestampLine::Event { event, .. } => (state.clone(), LineOutcome::Event(event)),
                TimestampLine::Unrecognized => (state.clone(), LineOutcome::Skipped),
            }
        }
        Some(Section::Summary) => (
            state.clone(),
            LineOutcome::SummaryFragment(line.to_string()),
        ),
    }
}

/// Recognizes a section header line.
///
/// Only short lines, or lines whose keyword sits in a `LABEL:` prefix,
/// qualify; a body sentence that merely mentions a keyword does not. For
/// summary headers, text after the keyword (or after a short `LABEL:`
/// prefix) seeds the summary.
pub fn detect_section_header(line: &str) -> Option<(Section, Option<String>)> {
    let candidate = header_candidate(line);
    if candidate.is_empty() || EVENT_SHAPE_REGEX.is_match(&candidate) {
        return None;
    }

    for (section, pattern) in HEADER_PATTERNS.iter() {
        let Some(found) = pattern.find(&candidate) else {
            continue;
        };

        if *section == Section::Metadata && candidate.to_uppercase().contains("EXTRACTION") {
            continue;
        }

        let rest = &candidate[found.end()..];
        let header_shaped = candidate.chars().count() <= HEADER_MAX_CHARS || rest.contains(':');
        if !header_shaped {
            continue;
        }

        let seed = match section {
            Section::Summary => summary_seed(rest),
            _ => None,
        };
        return Some((*section, seed));
    }

    None
}

fn header_candidate(line: &str) -> String {
    let without_emphasis = line.replace("**", "");
    let trimmed = without_emphasis
        .trim()
        .trim_start_matches(|character: char| {
            character.is_whitespace() || matches!(character, '#' | '*' | '-' | '•' | '>' | '=')
        });
    ORDINAL_PREFIX_REGEX.replace(trimmed, "").trim().to_string()
}

fn summary_seed(rest: &str) -> Option<String> {
    let rest = SEED_CONNECTOR_REGEX.replace(rest, "");
    let body = match rest.split_once(':') {
        Some((label, after)) if label.split_whitespace().count() <= 2 => after,
        _ => &rest[..],
    };
    let seed = body
        .trim_start_matches(|character: char| {
            character.is_whitespace() || matches!(character, ',' | '-' | '–' | '—' | '*' | '#' | '_')
        })
        .trim_end_matches(|character: char| {
            character.is_whitespace() || matches!(character, '*' | '#' | '_')
        });
    (!seed.is_empty()).then(|| seed.to_string())
}
