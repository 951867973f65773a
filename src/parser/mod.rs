//! Best-effort structure extraction from the model's streamed analysis text.
//!
//! The text is re-parsed from scratch on every call. Nothing here fails: a
//! line that matches no rule contributes nothing, so truncated input simply
//! yields fewer results until the rest of the text arrives.

use tracing::{debug, trace};

use crate::model::{CategoryCount, Metadata, ParsedResult};

mod category;
mod grouping;
mod metadata_line;
mod segmenter;
#[cfg(test)]
mod tests;
mod time_label;
mod timestamp_line;

pub use category::{
    infer_category, inference_rule_name, normalization_rule_name, normalize_category,
    resolve_event_category,
};
pub use grouping::{
    EventGroup, RangedEvent, complete_time_ranges, count_by_category, expected_empty_categories,
    group_and_order,
};
pub use metadata_line::{is_placeholder, parse_metadata_line};
pub use segmenter::{LineOutcome, Section, SegmenterState, detect_section_header, reduce};
pub use time_label::{is_range, seconds_from_time_label, start_component};
pub use timestamp_line::{EventSyntax, TimestampLine, classify_timestamp_line};

/// Parses the full accumulated model output.
pub fn parse(raw: &str) -> ParsedResult {
    let mut state = SegmenterState::default();
    let mut metadata = Metadata::new();
    let mut events = Vec::new();
    let mut summary_lines = Vec::<String>::new();
    let mut declared_counts = Vec::<CategoryCount>::new();
    let mut skipped_lines = 0usize;

    for (index, line) in raw.lines().enumerate() {
        let (next, outcome) = reduce(&state, line);
        state = next;

        match outcome {
            LineOutcome::SectionHeader { section, seed } => {
                trace!(line = index + 1, ?section, "section header");
                if let Some(seed) = seed {
                    summary_lines.push(seed);
                }
            }
            LineOutcome::MetadataField { key, value } => metadata.insert(key, value),
            LineOutcome::CategoryHeader {
                category,
                declared_count,
            } => {
                if let Some(count) = declared_count {
                    match declared_counts
                        .iter_mut()
                        .find(|entry| entry.category == category)
                    {
                        Some(entry) => entry.count = count,
                        None => declared_counts.push(CategoryCount { category, count }),
                    }
                }
            }
            LineOutcome::Event(event) => events.push(event),
            LineOutcome::SummaryFragment(fragment) => summary_lines.push(fragment),
            LineOutcome::Skipped => {
                if !line.trim().is_empty() && state.section.is_some() {
                    trace!(line = index + 1, "unrecognized line");
                    skipped_lines += 1;
                }
            }
        }
    }

    let summary = summary_lines
        .join("\n")
        .trim_matches(|character: char| character.is_whitespace() || character == '*')
        .to_string();
    let category_counts = count_by_category(&events);
    log_declared_count_drift(&declared_counts, &category_counts);

    debug!(
        metadata_fields = metadata.len(),
        events = events.len(),
        summary_chars = summary.chars().count(),
        skipped_lines,
        "parsed analysis text"
    );

    ParsedResult {
        metadata,
        events,
        summary,
        category_counts,
        declared_counts,
    }
}

/// `None` parses as empty text.
pub fn parse_optional(raw: Option<&str>) -> ParsedResult {
    parse(raw.unwrap_or_default())
}

fn log_declared_count_drift(declared: &[CategoryCount], actual: &[CategoryCount]) {
    for entry in declared {
        let observed = actual
            .iter()
            .find(|candidate| candidate.category == entry.category)
            .map(|candidate| candidate.count)
            .unwrap_or(0);
        if observed != entry.count {
            debug!(
                category = %entry.category,
                declared = entry.count,
                observed,
                "declared category count differs from extracted events"
            );
        }
    }
}
