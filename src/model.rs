use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const DEFAULT_EVENT_DESCRIPTION: &str = "No description provided";

/// Event classification used for grouping and display.
///
/// The seven specific variants form the closed display-priority list;
/// `General` is the catch-all and always sorts last. Labels that do not
/// match a known synonym survive as `Other`, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    EmergencyCalls,
    CctvFootage,
    Interrogation,
    Interview,
    BodycamFootage,
    DashcamFootage,
    Investigation,
    General,
    Other(String),
}

impl Category {
    pub const SPECIFIC: [Category; 7] = [
        Category::EmergencyCalls,
        Category::CctvFootage,
        Category::Interrogation,
        Category::Interview,
        Category::BodycamFootage,
        Category::DashcamFootage,
        Category::Investigation,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::EmergencyCalls => "911 CALLS",
            Self::CctvFootage => "CCTV FOOTAGE",
            Self::Interrogation => "INTERROGATION",
            Self::Interview => "INTERVIEW",
            Self::BodycamFootage => "BODYCAM FOOTAGE",
            Self::DashcamFootage => "DASHCAM FOOTAGE",
            Self::Investigation => "INVESTIGATION",
            Self::General => "GENERAL",
            Self::Other(label) => label,
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Self::General)
    }

    /// Display rank: specific categories by list position, unknown labels
    /// after them, `General` last.
    pub fn display_rank(&self) -> usize {
        match self {
            Self::General => Self::SPECIFIC.len() + 1,
            Self::Other(_) => Self::SPECIFIC.len(),
            known => Self::SPECIFIC
                .iter()
                .position(|candidate| candidate == known)
                .unwrap_or(Self::SPECIFIC.len()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Insertion-ordered key/value fields taken from the metadata section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: Vec<(String, String)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeated keys overwrite the earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// `MM:SS`, `H:MM:SS`, or `START - END`, kept as written.
    pub time: String,
    pub label: String,
    pub description: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    pub metadata: Metadata,
    pub events: Vec<Event>,
    pub summary: String,
    /// Actual event totals per category, in display order.
    pub category_counts: Vec<CategoryCount>,
    /// Counts written in category headers such as `911 CALLS (3)`.
    /// Diagnostic only; never used in place of `category_counts`.
    pub declared_counts: Vec<CategoryCount>,
}

impl ParsedResult {
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.events.is_empty() && self.summary.is_empty()
    }
}
