use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::category::{has_header_keyword, normalize_category, resolve_event_category};
use super::time_label::normalize_time_label;
use crate::model::{Category, DEFAULT_EVENT_DESCRIPTION, Event};

const COUNTED_HEADER_MAX_CHARS: usize = 60;
const PLAIN_HEADER_MAX_CHARS: usize = 80;
const PLAIN_HEADER_MAX_WORDS: usize = 6;

static COUNTED_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.)]\s*)?(?P<name>[^\[\]:()]+?)\s*\((?P<count>\d+)\)$")
        .expect("valid counted category header regex")
});

static PLAIN_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.)]\s*)?(?P<name>[^\[\]:()]+?)$").expect("valid category header regex")
});

static NEGATED_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:no|none)\b").expect("valid negated header regex"));

/// Ordered event-line syntaxes; the richest match wins.
static EVENT_PATTERNS: LazyLock<Vec<(EventSyntax, Regex)>> = LazyLock::new(|| {
    vec![
        (
            EventSyntax::BracketLabelDescription,
            Regex::new(
                r"^\[(?P<time>[^\]]+)\]\s*(?:[-–—:]\s*)?(?P<label>.+?)\s+[-–—]\s+(?P<description>.+)$",
            )
            .expect("valid bracketed label event regex"),
        ),
        (
            EventSyntax::BracketDescription,
            Regex::new(r"^\[(?P<time>[^\]]+)\]\s*(?:[-–—:]\s*)?(?P<description>.*)$")
                .expect("valid bracketed event regex"),
        ),
        (
            EventSyntax::BareTime,
            Regex::new(
                r"^(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s*[-–—]\s*\d{1,2}:\d{2}(?::\d{2})?)?)\s*[-–—:]\s*(?P<description>.+)$",
            )
            .expect("valid bare time event regex"),
        ),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSyntax {
    BracketLabelDescription,
    BracketDescription,
    BareTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampLine {
    CategoryHeader {
        category: Category,
        declared_count: Option<usize>,
    },
    Event {
        event: Event,
        syntax: EventSyntax,
    },
    Unrecognized,
}

/// Classifies one line of the timestamps section.
///
/// Category headers are tried before event lines; `context` is the most
/// recently declared category and only affects events.
pub fn classify_timestamp_line(line: &str, context: &Category) -> TimestampLine {
    let cleaned = clean_line(line);
    if cleaned.is_empty() {
        return TimestampLine::Unrecognized;
    }

    if let Some(header) = parse_category_header(&cleaned) {
        return header;
    }

    for (syntax, pattern) in EVENT_PATTERNS.iter() {
        let Some(captures) = pattern.captures(&cleaned) else {
            continue;
        };
        if let Some(event) = build_event(&captures, context) {
            return TimestampLine::Event {
                event,
                syntax: *syntax,
            };
        }
    }

    TimestampLine::Unrecognized
}

fn parse_category_header(cleaned: &str) -> Option<TimestampLine> {
    let body = cleaned.strip_suffix(':').unwrap_or(cleaned).trim_end();
    if body.contains('[') || body.contains(':') {
        return None;
    }

    if body.chars().count() <= COUNTED_HEADER_MAX_CHARS {
        if let Some(captures) = COUNTED_HEADER_REGEX.captures(body) {
            let name = captures.name("name")?.as_str();
            if is_header_name(name) {
                let declared_count = captures
                    .name("count")
                    .and_then(|value| value.as_str().parse::<usize>().ok());
                return Some(TimestampLine::CategoryHeader {
                    category: normalize_category(name),
                    declared_count,
                });
            }
        }
    }

    if body.chars().count() <= PLAIN_HEADER_MAX_CHARS
        && body.split_whitespace().count() <= PLAIN_HEADER_MAX_WORDS
    {
        let captures = PLAIN_HEADER_REGEX.captures(body)?;
        let name = captures.name("name")?.as_str();
        if is_header_name(name) {
            return Some(TimestampLine::CategoryHeader {
                category: normalize_category(name),
                declared_count: None,
            });
        }
    }

    None
}

fn is_header_name(name: &str) -> bool {
    has_header_keyword(name) && !NEGATED_HEADER_REGEX.is_match(name.trim())
}

fn build_event(captures: &Captures<'_>, context: &Category) -> Option<Event> {
    let time = normalize_time_label(captures.name("time")?.as_str())?;
    let label = captures
        .name("label")
        .map(|value| value.as_str().trim().to_string())
        .unwrap_or_default();
    let description = captures
        .name("description")
        .map(|value| value.as_str().trim().to_string())
        .unwrap_or_default();

    let category = resolve_event_category(context, &label, &description);
    let description = if !description.is_empty() {
        description
    } else if !label.is_empty() {
        label.clone()
    } else {
        DEFAULT_EVENT_DESCRIPTION.to_string()
    };

    Some(Event {
        time,
        label,
        description,
        category,
    })
}

// Markdown emphasis and list bullets carry no meaning here.
fn clean_line(line: &str) -> String {
    line.replace("**", "")
        .replace("__", "")
        .trim_start_matches(|character: char| {
            character.is_whitespace() || matches!(character, '-' | '*' | '•' | '>' | '#')
        })
        .trim_end_matches(|character: char| character.is_whitespace() || character == '*')
        .to_string()
}
