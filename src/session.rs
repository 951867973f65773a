use tracing::debug;

use crate::model::ParsedResult;
use crate::parser::parse;
use crate::render::{DisplayOptions, RenderModel, build_render_model};

/// Accumulated model output for one analysis, re-parsed in full whenever a
/// chunk arrives.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    raw_text: String,
    latest: ParsedResult,
    reparse_count: usize,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chunk(&mut self, chunk: &str) -> &ParsedResult {
        self.raw_text.push_str(chunk);
        self.reparse();
        &self.latest
    }

    /// Discards the text and every derived result.
    pub fn clear(&mut self) {
        self.raw_text.clear();
        self.latest = ParsedResult::default();
        self.reparse_count = 0;
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn latest(&self) -> &ParsedResult {
        &self.latest
    }

    pub fn reparse_count(&self) -> usize {
        self.reparse_count
    }

    pub fn render(&self, options: &DisplayOptions) -> RenderModel {
        build_render_model(&self.raw_text, &self.latest, options)
    }

    fn reparse(&mut self) {
        self.latest = parse(&self.raw_text);
        self.reparse_count += 1;
        debug!(
            reparse = self.reparse_count,
            text_chars = self.raw_text.len(),
            events = self.latest.events.len(),
            "re-parsed accumulated text"
        );
    }
}

/// Splits text into pieces of at most `size` characters, never inside a
/// character.
pub fn split_into_chunks(text: &str, size: usize) -> Vec<&str> {
    if size == 0 || text.is_empty() {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut count = 0usize;

    for (offset, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);

    chunks
}
