//! Document: the assembled, ordered token sequence for one input text
//!
//! A document owns its tokens and is never mutated after assembly. All views
//! (sentences, EDUs) are computed from the token coordinates, so they stay
//! consistent with whatever numbering scheme was used to assemble it.

use super::token::Token;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Document {
    tokens: Vec<Token>,
}

/// A contiguous run of tokens that forms one discourse unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduSpan {
    /// The `discourse_unit_index` shared by every token in the span
    pub index: usize,
    /// Document-relative token offsets
    pub range: Range<usize>,
}

impl EduSpan {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Document {
    /// Wrap an already-ordered token sequence.
    ///
    /// Only the assembler builds documents from raw tokens; it guarantees the
    /// ordering and index invariants before calling this.
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at a document-relative (zero-based) offset
    pub fn token(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(offset)
    }

    /// Token slices, one per sentence, in document order
    pub fn sentences(&self) -> Vec<&[Token]> {
        group_by(&self.tokens, |t| t.sentence_index)
            .into_iter()
            .map(|range| &self.tokens[range])
            .collect()
    }

    pub fn sentence_count(&self) -> usize {
        group_by(&self.tokens, |t| t.sentence_index).len()
    }

    pub fn paragraph_count(&self) -> usize {
        group_by(&self.tokens, |t| t.paragraph_index).len()
    }

    /// Discourse units in document order
    pub fn edus(&self) -> Vec<EduSpan> {
        group_by(&self.tokens, |t| t.discourse_unit_index)
            .into_iter()
            .map(|range| EduSpan {
                index: self.tokens[range.start].discourse_unit_index,
                range,
            })
            .collect()
    }

    pub fn edu_count(&self) -> usize {
        group_by(&self.tokens, |t| t.discourse_unit_index).len()
    }

    /// Surface text of one EDU, tokens joined by single spaces
    pub fn edu_text(&self, edu: &EduSpan) -> String {
        join_surface(&self.tokens[edu.range.clone()])
    }

    /// Whole-document surface text, tokens joined by single spaces
    pub fn text(&self) -> String {
        join_surface(&self.tokens)
    }
}

fn join_surface(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.surface_form.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split `tokens` into maximal runs sharing the same key
fn group_by<K: PartialEq>(tokens: &[Token], key: impl Fn(&Token) -> K) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=tokens.len() {
        if i == tokens.len() || key(&tokens[i]) != key(&tokens[start]) {
            if start < i {
                groups.push(start..i);
            }
            start = i;
        }
    }
    groups
}
