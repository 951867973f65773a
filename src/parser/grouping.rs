use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::category::normalize_category;
use super::time_label::{is_range, seconds_from_time_label, start_component};
use crate::model::{Category, CategoryCount, Event};

const RECORDING_SUFFIX: &str = r"(?:\s+(?:footage|videos?|recordings?|clips?))?";

// "No <category> ... found" style statements, one per specific category.
static NO_FINDING_PATTERNS: LazyLock<Vec<(Category, Regex)>> = LazyLock::new(|| {
    [
        (Category::EmergencyCalls, r"(?:911|emergency)(?:\s+calls?)?"),
        (
            Category::CctvFootage,
            r"(?:cctv|surveillance|security\s+camera)",
        ),
        (Category::Interrogation, r"interrogations?"),
        (Category::Interview, r"interviews?"),
        (Category::BodycamFootage, r"body[\s-]?(?:cam|camera|worn)s?"),
        (Category::DashcamFootage, r"dash[\s-]?(?:cam|camera)s?"),
        (Category::Investigation, r"investigat\w*"),
    ]
    .into_iter()
    .map(|(category, mention)| {
        let pattern = format!(
            r"(?i)\bno\s+(?:{mention}){RECORDING_SUFFIX}\b[^.\n]{{0,40}}?\b(?:found|detected|identified|present|available|recorded|observed|shown)\b"
        );
        (
            category,
            Regex::new(&pattern).expect("valid no-finding regex"),
        )
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventGroup {
    pub category: Category,
    pub events: Vec<Event>,
}

impl EventGroup {
    pub fn count(&self) -> usize {
        self.events.len()
    }
}

/// An event paired with the time shown for it. `display_time` may be a
/// synthesized range; `event.time` is always the extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangedEvent {
    pub event: Event,
    pub display_time: String,
}

/// Buckets events by category and orders the buckets for display.
///
/// Each event's category is normalized again before grouping. Specific
/// categories come first in fixed priority order, unrecognized labels follow
/// alphabetically, and the catch-all is always last. Events keep their
/// extraction order within a bucket.
pub fn group_and_order(events: &[Event]) -> Vec<EventGroup> {
    let mut groups = Vec::<EventGroup>::new();

    for event in events {
        let category = normalize_category(event.category.label());
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(EventGroup {
                category,
                events: vec![event.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| {
        a.category
            .display_rank()
            .cmp(&b.category.display_rank())
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    groups
}

/// Actual per-category totals in display order.
pub fn count_by_category(events: &[Event]) -> Vec<CategoryCount> {
    group_and_order(events)
        .into_iter()
        .map(|group| CategoryCount {
            count: group.count(),
            category: group.category,
        })
        .collect()
}

/// Specific categories with no events that the text explicitly reports as
/// absent, e.g. "No dashcam footage was found".
pub fn expected_empty_categories(raw: &str, groups: &[EventGroup]) -> Vec<Category> {
    NO_FINDING_PATTERNS
        .iter()
        .filter(|(category, _)| !groups.iter().any(|group| group.category == *category))
        .filter(|(_, pattern)| pattern.is_match(raw))
        .map(|(category, _)| category.clone())
        .collect()
}

/// Orders events chronologically and fills in display end-times for point
/// stamps from the next event's start. The last event and existing ranges
/// are shown as extracted.
pub fn complete_time_ranges(events: &[Event]) -> Vec<RangedEvent> {
    let mut ordered = events.to_vec();
    ordered.sort_by_key(|event| seconds_from_time_label(&event.time));

    let next_starts = ordered
        .iter()
        .skip(1)
        .map(|event| Some(start_component(&event.time).to_string()))
        .chain(std::iter::once(None))
        .collect::<Vec<Option<String>>>();

    ordered
        .into_iter()
        .zip(next_starts)
        .map(|(event, next_start)| {
            let display_time = match next_start {
                Some(next) if !is_range(&event.time) && later_than(&next, &event.time) => {
                    format!("{} - {}", start_component(&event.time), next)
                }
                _ => event.time.clone(),
            };
            RangedEvent {
                event,
                display_time,
            }
        })
        .collect()
}

fn later_than(next_start: &str, time: &str) -> bool {
    seconds_from_time_label(next_start) > seconds_from_time_label(time)
}
