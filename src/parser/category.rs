use std::sync::LazyLock;

use regex::Regex;

use crate::model::Category;

/// Words that mark a short timestamp-section line as a category header.
static HEADER_KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:911|CCTV|FOOTAGE|INTERROGATIONS?|INTERVIEWS?|BODY[\s-]*CAM(?:ERA)?S?|DASH[\s-]*CAM(?:ERA)?S?|INVESTIGATIONS?|CALLS?|GENERAL)\b",
    )
    .expect("valid category header keyword regex")
});

struct NormalizationRule {
    name: &'static str,
    pattern: Regex,
    category: Category,
}

struct InferenceRule {
    name: &'static str,
    trigger: Regex,
    context: Option<Regex>,
    category: Category,
}

fn normalization_rule(name: &'static str, pattern: &str, category: Category) -> NormalizationRule {
    NormalizationRule {
        name,
        pattern: Regex::new(pattern).expect("valid category normalization regex"),
        category,
    }
}

fn inference_rule(
    name: &'static str,
    trigger: &str,
    context: Option<&str>,
    category: Category,
) -> InferenceRule {
    InferenceRule {
        name,
        trigger: Regex::new(trigger).expect("valid category inference regex"),
        context: context.map(|value| Regex::new(value).expect("valid category context regex")),
        category,
    }
}

// Header labels, evaluated against upper-cased text. First match wins.
static NORMALIZATION_RULES: LazyLock<Vec<NormalizationRule>> = LazyLock::new(|| {
    vec![
        normalization_rule(
            "emergency_call",
            r"\b911\b|EMERGENCY\s*CALL",
            Category::EmergencyCalls,
        ),
        normalization_rule("cctv", r"CCTV|SURVEILLANCE", Category::CctvFootage),
        normalization_rule("interrogation", r"INTERROGATION", Category::Interrogation),
        normalization_rule("interview", r"INTERVIEW", Category::Interview),
        normalization_rule(
            "bodycam",
            r"BODY\s*-?\s*(?:CAM|WORN)",
            Category::BodycamFootage,
        ),
        normalization_rule("dashcam", r"DASH\s*-?\s*CAM", Category::DashcamFootage),
        normalization_rule("investigation", r"INVESTIGATION", Category::Investigation),
        normalization_rule("general", r"^GENERAL\b", Category::General),
    ]
});

// Free-text inference, evaluated against lower-cased text. Specific cues sit
// above the generic ones they would otherwise be shadowed by.
static INFERENCE_RULES: LazyLock<Vec<InferenceRule>> = LazyLock::new(|| {
    const QUESTIONING: &str = r"\bquestion(?:ing|ed|s)?\b";
    const RECORDING: &str = r"\b(?:camera|footage|recording|video)\b";

    vec![
        inference_rule(
            "emergency_call",
            r"\b911\b|\bemergency (?:call|line|services|dispatch)|\bdispatch(?:er|ers|ed)?\b|\bcaller\b|\bcalls? (?:to|for) (?:police|help)\b",
            None,
            Category::EmergencyCalls,
        ),
        inference_rule(
            "body_camera",
            r"\bbody[\s-]?(?:cam|camera|worn)s?\b|\bofficer'?s? (?:camera|cam)\b|\blapel (?:camera|cam)\b",
            None,
            Category::BodycamFootage,
        ),
        inference_rule(
            "dash_camera",
            r"\bdash[\s-]?(?:cam|camera)s?\b|\bdashboard camera\b|\b(?:patrol car|squad car|cruiser|in-car|vehicle) (?:camera|video|footage|recording)\b|\btraffic stop\b|\bpulled over\b",
            None,
            Category::DashcamFootage,
        ),
        inference_rule(
            "surveillance_camera",
            r"\bcctv\b|\bsurveillance\b|\bsecurity (?:camera|cam|footage|video|recording)s?\b|\b(?:store|doorbell) camera\b",
            None,
            Category::CctvFootage,
        ),
        inference_rule(
            "interrogation",
            r"\binterrogat\w*|\bconfess\w*|\bdenial\b|\bdenies\b|\bdenied\b|\bmiranda\b|\bcoerc\w*",
            None,
            Category::Interrogation,
        ),
        inference_rule(
            "interview",
            r"\binterview\w*|\bwitness statement\b|\bmedia\b|\bpress conference\b|\breporter\b|\bjournalist\b|\bq\s*&\s*a\b|\bquestion and answer\b",
            None,
            Category::Interview,
        ),
        inference_rule(
            "investigation",
            r"\binvestigat\w*|\bcrime scene\b|\bforensic\w*",
            None,
            Category::Investigation,
        ),
        inference_rule(
            "questioning_police",
            QUESTIONING,
            Some(r"\b(?:police|officers?|detectives?|suspects?|custody|arrest\w*)\b"),
            Category::Interrogation,
        ),
        inference_rule(
            "questioning_neutral",
            QUESTIONING,
            Some(r"\b(?:witness\w*|media|reporters?|journalists?|professional|employer|candidate|host)\b"),
            Category::Interview,
        ),
        inference_rule(
            "recording_worn",
            RECORDING,
            Some(r"\b(?:officers?|deputy|deputies|trooper|worn|wearing)\b"),
            Category::BodycamFootage,
        ),
        inference_rule(
            "recording_vehicle",
            RECORDING,
            Some(r"\b(?:vehicle|car|traffic|cruiser|highway|windshield)\b"),
            Category::DashcamFootage,
        ),
        inference_rule(
            "recording_fixed",
            RECORDING,
            Some(r"\b(?:surveillance|security|store|shop|building|parking|hallway|entrance)\b"),
            Category::CctvFootage,
        ),
    ]
});

/// Maps a declared header label onto a canonical category.
///
/// Labels that match no known synonym are kept, upper-cased with whitespace
/// collapsed, as `Category::Other`. Empty input is the catch-all.
pub fn normalize_category(label: &str) -> Category {
    let cleaned = condense_label(label);
    if cleaned.is_empty() {
        return Category::General;
    }

    NORMALIZATION_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&cleaned))
        .map(|rule| rule.category.clone())
        .unwrap_or(Category::Other(cleaned))
}

/// Infers a category from event text, or `None` when nothing matches.
pub fn infer_category(text: &str) -> Option<Category> {
    matching_inference_rule(text).map(|rule| rule.category.clone())
}

/// Name of the inference row that classifies `text`, if any.
pub fn inference_rule_name(text: &str) -> Option<&'static str> {
    matching_inference_rule(text).map(|rule| rule.name)
}

/// Name of the normalization row that matches a header label, if any.
pub fn normalization_rule_name(label: &str) -> Option<&'static str> {
    let cleaned = condense_label(label);
    NORMALIZATION_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&cleaned))
        .map(|rule| rule.name)
}

/// Resolves an extracted event's category: declared context wins unless it is
/// the catch-all, then text inference, then the catch-all.
pub fn resolve_event_category(context: &Category, label: &str, description: &str) -> Category {
    if !context.is_general() {
        return context.clone();
    }

    infer_category(&format!("{label} {description}")).unwrap_or(Category::General)
}

pub(crate) fn has_header_keyword(name: &str) -> bool {
    HEADER_KEYWORD_REGEX.is_match(name)
}

fn matching_inference_rule(text: &str) -> Option<&'static InferenceRule> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return None;
    }

    INFERENCE_RULES.iter().find(|rule| {
        rule.trigger.is_match(&lowered)
            && rule
                .context
                .as_ref()
                .map(|context| context.is_match(&lowered))
                .unwrap_or(true)
    })
}

fn condense_label(label: &str) -> String {
    label
        .trim_matches(|character: char| {
            character.is_whitespace() || matches!(character, '*' | '#' | ':' | '_')
        })
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_uppercase()
}
