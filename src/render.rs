use std::fmt::Write as _;

use serde::Serialize;

use crate::model::{Category, Metadata, ParsedResult};
use crate::parser::{
    EventGroup, RangedEvent, complete_time_ranges, expected_empty_categories, group_and_order,
    normalize_category, seconds_from_time_label,
};

/// Which parts of a parsed result the renderer shows. Parsing itself never
/// depends on these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_metadata: bool,
    pub show_timestamps: bool,
    pub show_summary: bool,
    /// Empty means every category.
    pub categories: Vec<Category>,
    pub complete_ranges: bool,
    pub show_empty_expected: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_metadata: true,
            show_timestamps: true,
            show_summary: true,
            categories: Vec::new(),
            complete_ranges: false,
            show_empty_expected: false,
        }
    }
}

impl DisplayOptions {
    fn allows(&self, category: &Category) -> bool {
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|wanted| normalize_category(wanted.label()) == *category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEvent {
    pub time: String,
    pub display_time: String,
    pub seconds: u64,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderGroup {
    pub category: Category,
    /// Number of events actually grouped here.
    pub count: usize,
    /// Set for categories the text reports as having no findings.
    pub placeholder: bool,
    pub events: Vec<DisplayEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub metadata: Option<Metadata>,
    pub groups: Vec<RenderGroup>,
    pub summary: Option<String>,
}

pub fn build_render_model(raw: &str, parsed: &ParsedResult, options: &DisplayOptions) -> RenderModel {
    let metadata = (options.show_metadata && !parsed.metadata.is_empty())
        .then(|| parsed.metadata.clone());
    let summary =
        (options.show_summary && !parsed.summary.is_empty()).then(|| parsed.summary.clone());

    let groups = if options.show_timestamps {
        build_groups(raw, parsed, options)
    } else {
        Vec::new()
    };

    RenderModel {
        metadata,
        groups,
        summary,
    }
}

fn build_groups(raw: &str, parsed: &ParsedResult, options: &DisplayOptions) -> Vec<RenderGroup> {
    let grouped = group_and_order(&parsed.events);

    let mut groups = grouped
        .iter()
        .filter(|group| options.allows(&group.category))
        .map(|group| render_group(group, options.complete_ranges))
        .collect::<Vec<RenderGroup>>();

    if options.show_empty_expected {
        for category in expected_empty_categories(raw, &grouped) {
            if options.allows(&category) {
                groups.push(RenderGroup {
                    category,
                    count: 0,
                    placeholder: true,
                    events: Vec::new(),
                });
            }
        }
        groups.sort_by(|a, b| {
            a.category
                .display_rank()
                .cmp(&b.category.display_rank())
                .then_with(|| a.category.label().cmp(b.category.label()))
        });
    }

    groups
}

fn render_group(group: &EventGroup, complete_ranges: bool) -> RenderGroup {
    let ranged = if complete_ranges {
        complete_time_ranges(&group.events)
    } else {
        group
            .events
            .iter()
            .map(|event| RangedEvent {
                event: event.clone(),
                display_time: event.time.clone(),
            })
            .collect()
    };

    let events = ranged
        .into_iter()
        .map(|ranged| DisplayEvent {
            seconds: seconds_from_time_label(&ranged.event.time),
            time: ranged.event.time,
            display_time: ranged.display_time,
            label: ranged.event.label,
            description: ranged.event.description,
        })
        .collect::<Vec<DisplayEvent>>();

    RenderGroup {
        category: group.category.clone(),
        count: events.len(),
        placeholder: false,
        events,
    }
}

/// Plain-text rendering of a render model.
pub fn format_render_model(model: &RenderModel) -> String {
    let mut output = String::new();

    if let Some(metadata) = &model.metadata {
        output.push_str("## Metadata\n\n");
        for (key, value) in metadata.iter() {
            let _ = writeln!(output, "{key}: {value}");
        }
        output.push('\n');
    }

    if !model.groups.is_empty() {
        output.push_str("## Timestamps\n\n");
        for group in &model.groups {
            let _ = writeln!(output, "### {} ({})", group.category, group.count);
            if group.placeholder {
                output.push_str("No events found.\n");
            }
            for event in &group.events {
                if event.label.is_empty() {
                    let _ = writeln!(output, "[{}] {}", event.display_time, event.description);
                } else {
                    let _ = writeln!(
                        output,
                        "[{}] {}: {}",
                        event.display_time, event.label, event.description
                    );
                }
            }
            output.push('\n');
        }
    }

    if let Some(summary) = &model.summary {
        output.push_str("## Summary\n\n");
        output.push_str(summary);
        output.push('\n');
    }

    output
}
