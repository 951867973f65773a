//! Structured reports from free-text video analysis output.
//!
//! A multimodal model describes submitted footage in a loosely formatted
//! text stream with metadata, categorized timestamps and a narrative summary.
//! This crate turns the accumulated text into a metadata map, categorized
//! events and a cleaned summary, and groups the events for display.

pub mod model;
pub mod parser;
pub mod render;
pub mod session;

pub use model::{Category, CategoryCount, Event, Metadata, ParsedResult};
pub use parser::{EventGroup, group_and_order, parse, parse_optional, seconds_from_time_label};
pub use render::{DisplayOptions, RenderModel, build_render_model, format_render_model};
pub use session::AnalysisSession;
