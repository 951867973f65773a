use super::*;
use crate::model::{Category, CategoryCount, DEFAULT_EVENT_DESCRIPTION, Event};

const SCENARIO: &str = "METADATA:
- Date: 2024-01-05
- Address/Location: [extracted location details]
TIMESTAMPS:
1. 911 CALLS (1)
[00:00 - 00:15] - Emergency Call - Caller reports disturbance
SUMMARY AND STORYLINE:
A disturbance was reported and resolved.
";

const MULTI_SECTION: &str = "## METADATA
- **Date**: 2024-03-02
- Time: 22:14
- Officers: Unit 12, Unit 14
## TIMESTAMPS
1. BODYCAM FOOTAGE (2)
[00:12] - Arrival - Officer walks up the driveway
[01:05 - 01:40] - Contact - Officer knocks and speaks with the homeowner
2. INTERVIEW (1)
[03:10] - Neighbor - Neighbor describes hearing glass break
3. GENERAL (1)
[04:00] - Dispatcher confirms units are clear
## SUMMARY
Officers responded to a reported break-in.
The homeowner was unharmed.
";

fn event(time: &str, category: Category) -> Event {
    Event {
        time: time.to_string(),
        label: String::new(),
        description: DEFAULT_EVENT_DESCRIPTION.to_string(),
        category,
    }
}

fn categories(groups: &[EventGroup]) -> Vec<Category> {
    groups.iter().map(|group| group.category.clone()).collect()
}

#[test]
fn parse_extracts_scenario_sections() {
    let parsed = parse(SCENARIO);

    assert_eq!(parsed.metadata.len(), 1);
    assert_eq!(parsed.metadata.get("Date"), Some("2024-01-05"));
    assert_eq!(parsed.metadata.get("Address/Location"), None);
    assert_eq!(
        parsed.events,
        vec![Event {
            time: "00:00 - 00:15".to_string(),
            label: "Emergency Call".to_string(),
            description: "Caller reports disturbance".to_string(),
            category: Category::EmergencyCalls,
        }]
    );
    assert_eq!(parsed.summary, "A disturbance was reported and resolved.");
}

#[test]
fn parse_is_idempotent() {
    assert_eq!(parse(MULTI_SECTION), parse(MULTI_SECTION));
    assert_eq!(parse(SCENARIO), parse(SCENARIO));
}

#[test]
fn parse_handles_empty_and_missing_input() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n   \n").is_empty());
    assert_eq!(parse_optional(None), ParsedResult::default());
    assert_eq!(parse_optional(Some(SCENARIO)), parse(SCENARIO));
}

#[test]
fn parse_never_panics_on_truncated_text() {
    for (offset, _) in MULTI_SECTION.char_indices() {
        let _ = parse(&MULTI_SECTION[..offset]);
    }

    assert!(parse("TIMESTAMPS:\n[00:1").events.is_empty());
    assert!(parse("METADATA:\n- Da").metadata.is_empty());
    assert!(parse("SUMM").is_empty());
}

#[test]
fn events_from_complete_lines_survive_longer_prefixes() {
    let full = parse(MULTI_SECTION);

    for (offset, _) in MULTI_SECTION.match_indices('\n') {
        let prefix = parse(&MULTI_SECTION[..=offset]);
        assert!(
            full.events.starts_with(&prefix.events),
            "prefix ending at byte {offset} produced events missing from the full parse"
        );
    }
}

#[test]
fn parse_multi_section_output() {
    let parsed = parse(MULTI_SECTION);

    assert_eq!(parsed.metadata.get("Date"), Some("2024-03-02"));
    assert_eq!(parsed.metadata.get("Time"), Some("22:14"));
    assert_eq!(parsed.metadata.len(), 3);

    let times = parsed
        .events
        .iter()
        .map(|event| (event.time.as_str(), event.category.clone()))
        .collect::<Vec<(&str, Category)>>();
    assert_eq!(
        times,
        vec![
            ("00:12", Category::BodycamFootage),
            ("01:05 - 01:40", Category::BodycamFootage),
            ("03:10", Category::Interview),
            ("04:00", Category::EmergencyCalls),
        ]
    );
    assert_eq!(
        parsed.summary,
        "Officers responded to a reported break-in.\nThe homeowner was unharmed."
    );
}

#[test]
fn metadata_placeholder_values_are_rejected() {
    let parsed = parse("METADATA:\nDate: [extracted date/time information]\n");
    assert_eq!(parsed.metadata.get("Date"), None);

    assert!(is_placeholder("[EXTRACTED DATE]"));
    assert!(!is_placeholder("[redacted] 12 Main St"));
    assert_eq!(parse_metadata_line("Date: [Extracted Date]"), None);
}

#[test]
fn metadata_lines_strip_decoration_and_split_on_first_colon() {
    assert_eq!(
        parse_metadata_line("* **Location**: 12 Main St"),
        Some(("Location".to_string(), "12 Main St".to_string()))
    );
    assert_eq!(
        parse_metadata_line("- Time: 10:30 PM"),
        Some(("Time".to_string(), "10:30 PM".to_string()))
    );
    assert_eq!(parse_metadata_line("Notes:"), None);
    assert_eq!(parse_metadata_line("No colon here"), None);
}

#[test]
fn repeated_metadata_keys_keep_the_last_value() {
    let parsed = parse("METADATA:\nDate: 2024-01-01\nCase: 12\nDate: 2024-01-02\n");

    let fields = parsed.metadata.iter().collect::<Vec<(&str, &str)>>();
    assert_eq!(fields, vec![("Date", "2024-01-02"), ("Case", "12")]);
}

#[test]
fn metadata_instruction_header_does_not_open_the_section() {
    let parsed = parse("METADATA EXTRACTION: fill the fields below\nDate: 2024-01-05\n");
    assert!(parsed.metadata.is_empty());

    assert_eq!(detect_section_header("METADATA EXTRACTION:"), None);
    assert_eq!(
        detect_section_header("**Video Metadata:**"),
        Some((Section::Metadata, None))
    );
}

#[test]
fn summary_header_seeds_trailing_text() {
    let parsed = parse("SUMMARY AND STORYLINE: The caller was safe.\nOfficers left.\n");
    assert_eq!(parsed.summary, "The caller was safe.\nOfficers left.");

    assert_eq!(
        detect_section_header("STORYLINE: **A quiet night**"),
        Some((Section::Summary, Some("A quiet night".to_string())))
    );
}

#[test]
fn summary_header_without_colon_seeds_trailing_text() {
    let parsed = parse("**Summary** The caller was safe.\nOfficers left.\n");
    assert_eq!(parsed.summary, "The caller was safe.\nOfficers left.");

    assert_eq!(
        detect_section_header("## SUMMARY AND STORYLINE"),
        Some((Section::Summary, None))
    );
    assert_eq!(
        detect_section_header("Summary - Quiet night"),
        Some((Section::Summary, Some("Quiet night".to_string())))
    );
}

#[test]
fn summary_keyword_sentences_stay_in_the_summary() {
    let parsed = parse("SUMMARY:\nThe call came in late.\nIn summary, the officer left.\n");
    assert_eq!(
        parsed.summary,
        "The call came in late.\nIn summary, the officer left."
    );

    let state = SegmenterState {
        section: Some(Section::Summary),
        current_category: Category::General,
    };
    let (next, outcome) = reduce(&state, "## SUMMARY");
    assert_eq!(next, state);
    assert_eq!(
        outcome,
        LineOutcome::SectionHeader {
            section: Section::Summary,
            seed: None,
        }
    );
}

#[test]
fn summary_strips_only_outer_decoration() {
    let parsed = parse("SUMMARY:\n**Overall** the scene was calm.\n**\n");
    assert_eq!(parsed.summary, "Overall** the scene was calm.");
}

#[test]
fn body_sentences_mentioning_keywords_do_not_switch_sections() {
    let text = "TIMESTAMPS:
[00:10] - Review - Officer reads the summary of the call
The officer's summary report lists many details about the scene here
[00:20] - Exit - Officer leaves the house
2. INVESTIGATION SUMMARY (1)
[00:30] - Search - Detectives photograph the hallway
";
    let parsed = parse(text);

    assert_eq!(parsed.events.len(), 3);
    assert!(parsed.summary.is_empty());
    assert_eq!(parsed.events[2].category, Category::Investigation);
}

#[test]
fn windows_line_endings_are_accepted() {
    let parsed = parse("METADATA:\r\n- Date: 2024-01-05\r\nSUMMARY:\r\nDone.\r\n");

    assert_eq!(parsed.metadata.get("Date"), Some("2024-01-05"));
    assert_eq!(parsed.summary, "Done.");
}

#[test]
fn reduce_tracks_section_and_category_context() {
    let (state, outcome) = reduce(&SegmenterState::default(), "TIMESTAMPS:");
    assert_eq!(state.section, Some(Section::Timestamps));
    assert_eq!(
        outcome,
        LineOutcome::SectionHeader {
            section: Section::Timestamps,
            seed: None
        }
    );

    let (state, outcome) = reduce(&state, "2. DASHCAM FOOTAGE (1)");
    assert_eq!(state.current_category, Category::DashcamFootage);
    assert_eq!(
        outcome,
        LineOutcome::CategoryHeader {
            category: Category::DashcamFootage,
            declared_count: Some(1)
        }
    );

    let (unchanged, outcome) = reduce(&state, "   ");
    assert_eq!(unchanged, state);
    assert_eq!(outcome, LineOutcome::Skipped);

    let (_, outcome) = reduce(&SegmenterState::default(), "Date: 2024-01-05");
    assert_eq!(outcome, LineOutcome::Skipped);
}

#[test]
fn declared_header_context_wins_over_text_inference() {
    let text = "TIMESTAMPS:
INTERROGATION
[05:00] - Footage - Officer body cam footage shows the suspect seated
";
    let parsed = parse(text);

    assert_eq!(parsed.events.len(), 1);
    assert_eq!(parsed.events[0].category, Category::Interrogation);
}

#[test]
fn general_context_falls_back_to_text_inference() {
    let line = "[00:10 - 00:20] - 911 Call - Caller reports a break-in";

    match classify_timestamp_line(line, &Category::General) {
        TimestampLine::Event { event, syntax } => {
            assert_eq!(syntax, EventSyntax::BracketLabelDescription);
            assert_eq!(event.time, "00:10 - 00:20");
            assert_eq!(event.label, "911 Call");
            assert_eq!(event.category, Category::EmergencyCalls);
        }
        other => panic!("expected event, got {other:?}"),
    }
}

#[test]
fn category_context_persists_until_the_next_section() {
    let text = "TIMESTAMPS:
INTERVIEW
[00:01] - A - Talks about the weather
[00:02] - B - Discusses the neighborhood
No CCTV footage found
[00:03] - C - Mentions the bus schedule
METADATA:
TIMESTAMPS:
[00:04] - D - Talks about the weather
";
    let parsed = parse(text);

    let assigned = parsed
        .events
        .iter()
        .map(|event| event.category.clone())
        .collect::<Vec<Category>>();
    assert_eq!(
        assigned,
        vec![
            Category::Interview,
            Category::Interview,
            Category::Interview,
            Category::General,
        ]
    );
}

#[test]
fn category_keywords_match_whole_words_only() {
    let text = "TIMESTAMPS:
He recalls the night
[00:01] - A - Officer body cam shows the porch
Generally quiet evening
[00:02] - B - Dispatcher confirms the address
Body Cam Footage
[00:03] - C - Officer opens the door
";
    let parsed = parse(text);

    let assigned = parsed
        .events
        .iter()
        .map(|event| event.category.clone())
        .collect::<Vec<Category>>();
    assert_eq!(
        assigned,
        vec![
            Category::BodycamFootage,
            Category::EmergencyCalls,
            Category::BodycamFootage,
        ]
    );
    assert!(matches!(
        classify_timestamp_line("Emergency Calls", &Category::General),
        TimestampLine::CategoryHeader {
            category: Category::EmergencyCalls,
            declared_count: None,
        }
    ));
}

#[test]
fn legacy_and_bare_event_syntaxes_are_recognized() {
    let text = "TIMESTAMPS:
[00:05] - Door opens
[00:07]
00:09 - 00:12 - Car drives off
[unknown] - Nothing happens
";
    let parsed = parse(text);

    assert_eq!(parsed.events.len(), 3);
    assert_eq!(parsed.events[0].label, "");
    assert_eq!(parsed.events[0].description, "Door opens");
    assert_eq!(parsed.events[1].description, DEFAULT_EVENT_DESCRIPTION);
    assert_eq!(parsed.events[2].time, "00:09 - 00:12");
    assert_eq!(parsed.events[2].description, "Car drives off");
    assert!(
        parsed
            .events
            .iter()
            .all(|event| event.category == Category::General)
    );
}

#[test]
fn event_syntax_precedence_prefers_richest_match() {
    let bracketed = classify_timestamp_line("[00:05] - Door opens", &Category::General);
    assert!(matches!(
        bracketed,
        TimestampLine::Event {
            syntax: EventSyntax::BracketDescription,
            ..
        }
    ));

    let labelled = classify_timestamp_line("- **[00:05]** - Entry - Door opens", &Category::General);
    match labelled {
        TimestampLine::Event { event, syntax } => {
            assert_eq!(syntax, EventSyntax::BracketLabelDescription);
            assert_eq!(event.label, "Entry");
            assert_eq!(event.description, "Door opens");
        }
        other => panic!("expected event, got {other:?}"),
    }

    let bare = classify_timestamp_line("1:02:03 – Car leaves", &Category::General);
    assert!(matches!(
        bare,
        TimestampLine::Event {
            syntax: EventSyntax::BareTime,
            ..
        }
    ));
}

#[test]
fn unknown_header_categories_are_preserved() {
    let text = "TIMESTAMPS:
3. TRAFFIC STOP FOOTAGE (1)
[00:30] - Stop - Car pulls onto the shoulder
";
    let parsed = parse(text);

    assert_eq!(
        parsed.events[0].category,
        Category::Other("TRAFFIC STOP FOOTAGE".to_string())
    );
}

#[test]
fn declared_counts_never_replace_actual_counts() {
    let text = "TIMESTAMPS:
1. CCTV FOOTAGE (5)
[00:01] - Lobby - Person enters
[00:09] - Lobby - Person exits
";
    let parsed = parse(text);

    assert_eq!(
        parsed.category_counts,
        vec![CategoryCount {
            category: Category::CctvFootage,
            count: 2
        }]
    );
    assert_eq!(
        parsed.declared_counts,
        vec![CategoryCount {
            category: Category::CctvFootage,
            count: 5
        }]
    );
    assert_eq!(group_and_order(&parsed.events)[0].count(), 2);
}

#[test]
fn normalization_rules_map_header_spellings() {
    let cases = [
        ("911 Calls", Category::EmergencyCalls),
        ("Emergency call log", Category::EmergencyCalls),
        ("cctv", Category::CctvFootage),
        ("Surveillance Video", Category::CctvFootage),
        ("interrogation room", Category::Interrogation),
        ("Interviews", Category::Interview),
        ("body cam", Category::BodycamFootage),
        ("bodycam", Category::BodycamFootage),
        ("Body-Worn Camera", Category::BodycamFootage),
        ("BODYCAM FOOTAGE", Category::BodycamFootage),
        ("Dash  Cam", Category::DashcamFootage),
        ("**investigation**", Category::Investigation),
        ("general", Category::General),
        ("", Category::General),
    ];

    for (label, expected) in cases {
        assert_eq!(normalize_category(label), expected, "label {label:?}");
    }

    assert_eq!(
        normalize_category("  media   coverage "),
        Category::Other("MEDIA COVERAGE".to_string())
    );
    assert_eq!(normalization_rule_name("Dash Cam"), Some("dashcam"));
    assert_eq!(normalization_rule_name("Media"), None);
}

#[test]
fn inference_rows_classify_representative_text() {
    let cases = [
        ("Caller reports a break-in", "emergency_call"),
        ("Officer body cam shows the approach", "body_camera"),
        ("Dash cam captures the traffic stop", "dash_camera"),
        ("Security camera shows a figure at the door", "surveillance_camera"),
        ("Suspect denies involvement", "interrogation"),
        ("Witness statement taken on the porch", "interview"),
        ("Detectives walk the crime scene", "investigation"),
        ("Detective questioning the suspect about the night", "questioning_police"),
        ("Host questioning a guest about her career", "questioning_neutral"),
        ("Footage recorded by the deputy shows the yard", "recording_worn"),
        ("Video from the car shows the highway", "recording_vehicle"),
        ("Camera above the store entrance", "recording_fixed"),
    ];

    for (text, expected) in cases {
        assert_eq!(inference_rule_name(text), Some(expected), "text {text:?}");
    }

    assert_eq!(infer_category("A quiet afternoon"), None);
    assert_eq!(infer_category(""), None);
}

#[test]
fn inference_checks_specific_cues_first() {
    assert_eq!(
        infer_category("Officer body cam footage shows the 911 caller"),
        Some(Category::EmergencyCalls)
    );
    assert_eq!(
        infer_category("Officer camera footage near the car"),
        Some(Category::BodycamFootage)
    );
    assert_eq!(
        infer_category("Interview where the suspect confesses"),
        Some(Category::Interrogation)
    );
    assert_eq!(
        resolve_event_category(&Category::General, "Lobby", "Nothing notable"),
        Category::General
    );
}

#[test]
fn time_labels_convert_from_the_start_component() {
    assert_eq!(seconds_from_time_label("01:02:03"), 3723);
    assert_eq!(seconds_from_time_label("02:15"), 135);
    assert_eq!(seconds_from_time_label(""), 0);
    assert_eq!(seconds_from_time_label("02:15 - 02:45"), 135);
    assert_eq!(seconds_from_time_label("[00:45]"), 45);
    assert_eq!(seconds_from_time_label("abc"), 0);
    assert_eq!(seconds_from_time_label("12:xx"), 0);
    assert_eq!(seconds_from_time_label("1:2:3:4"), 0);
    assert_eq!(seconds_from_time_label("999999999999999999:00"), 0);
    assert_eq!(seconds_from_time_label("999999999999999999:00:00"), 0);
    assert_eq!(start_component("00:10 – 00:20"), "00:10");
}

#[test]
fn groups_follow_priority_order() {
    let events = vec![
        event("00:01", Category::General),
        event("00:02", Category::Interview),
        event("00:03", Category::EmergencyCalls),
    ];

    assert_eq!(
        categories(&group_and_order(&events)),
        vec![
            Category::EmergencyCalls,
            Category::Interview,
            Category::General
        ]
    );
}

#[test]
fn unknown_groups_sort_alphabetically_before_general() {
    let events = vec![
        event("00:01", Category::Other("ZETA".to_string())),
        event("00:02", Category::General),
        event("00:03", Category::Other("ALPHA".to_string())),
        event("00:04", Category::Investigation),
        event("00:05", Category::Other("body cam".to_string())),
    ];

    let groups = group_and_order(&events);
    assert_eq!(
        categories(&groups),
        vec![
            Category::BodycamFootage,
            Category::Investigation,
            Category::Other("ALPHA".to_string()),
            Category::Other("ZETA".to_string()),
            Category::General,
        ]
    );
}

#[test]
fn grouping_keeps_extraction_order_within_a_category() {
    let events = vec![
        event("00:30", Category::CctvFootage),
        event("00:10", Category::CctvFootage),
    ];

    let groups = group_and_order(&events);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].events[0].time, "00:30");
    assert_eq!(groups[0].events[1].time, "00:10");
}

#[test]
fn time_range_completion_leaves_events_untouched() {
    let events = vec![
        event("00:30", Category::General),
        event("00:10", Category::General),
        event("00:20 - 00:25", Category::General),
    ];

    let ranged = complete_time_ranges(&events);
    let shown = ranged
        .iter()
        .map(|item| item.display_time.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(shown, vec!["00:10 - 00:20", "00:20 - 00:25", "00:30"]);
    assert_eq!(ranged[0].event.time, "00:10");
    assert_eq!(events[0].time, "00:30");

    let same_start = vec![
        event("00:10", Category::General),
        event("00:10", Category::General),
    ];
    assert_eq!(complete_time_ranges(&same_start)[0].display_time, "00:10");
}

#[test]
fn reported_absences_are_detected_per_category() {
    let raw = "No dashcam footage was found.\nNo 911 calls were identified in this video.";
    let groups = group_and_order(&[event("00:01", Category::EmergencyCalls)]);

    assert_eq!(
        expected_empty_categories(raw, &groups),
        vec![Category::DashcamFootage]
    );
    assert!(expected_empty_categories("Dashcam footage was found.", &[]).is_empty());
}
