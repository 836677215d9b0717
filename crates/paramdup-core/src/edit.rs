//! Span-based source code editing with format preservation

use mago_span::Span;
use thiserror::Error;

/// Errors that can occur during edit application
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Edit span {start}..{end} does not fall on a character boundary")]
    NotCharBoundary { start: usize, end: usize },
}

/// Represents a single code edit operation
#[derive(Debug, Clone)]
pub struct Edit {
    /// The source span to replace
    pub span: Span,
    /// The replacement text
    pub replacement: String,
    /// Human-readable description of the edit
    pub message: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(span: Span, replacement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            message: message.into(),
        }
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.span.start.offset as usize
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.span.end.offset as usize
    }
}

/// Slice the source text covered by `span`
pub fn span_text(source: &str, span: Span) -> &str {
    &source[span.start.offset as usize..span.end.offset as usize]
}

/// Apply edits to source code, leaving every byte outside the edited spans untouched
///
/// Edits are applied in reverse order (from end to start) to maintain
/// valid offsets throughout the process. Either every edit applies or none does.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Sort edits by start position (descending) for safe replacement
    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    sorted_edits.sort_by(|a, b| b.start_offset().cmp(&a.start_offset()));

    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();

        if start > end || end > source_len {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }

        if !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { start, end });
        }

        if let Some(prev) = prev_start {
            if end > prev {
                return Err(EditError::OverlappingEdits(start));
            }
        }

        prev_start = Some(start);
    }

    let mut result = source.to_string();
    for edit in sorted_edits {
        result.replace_range(edit.start_offset()..edit.end_offset(), &edit.replacement);
    }

    Ok(result)
}
