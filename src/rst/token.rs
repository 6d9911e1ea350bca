//! Token: one word occurrence in an assembled document
//!
//! A token carries the lexical fields copied from the annotator (surface form,
//! lemma, part of speech) and the structural coordinates that place it inside
//! the document: paragraph, sentence and discourse unit (EDU).
//!
//! Index conventions at this boundary follow the annotator:
//! - `token_index` is 1-based within its sentence
//! - `head_index` (when set) is the 1-based `token_index` of the governor
//!
//! Code past the assembly step should not do arithmetic on these directly. Use
//! [`Token::position`] and [`Token::head_position`], which are zero-based.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_index: usize,
    pub surface_form: String,
    pub lemma: String,
    pub part_of_speech: String,
    pub paragraph_index: usize,
    pub sentence_index: usize,
    pub discourse_unit_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_label: Option<String>,
}

impl Token {
    /// Zero-based offset of this token inside its sentence
    pub fn position(&self) -> usize {
        self.token_index.saturating_sub(1)
    }

    /// Zero-based offset of the governor inside the same sentence, if any
    pub fn head_position(&self) -> Option<usize> {
        self.head_index.map(|h| h.saturating_sub(1))
    }

    /// True when no dependency edge points at this token
    pub fn is_root(&self) -> bool {
        self.head_index.is_none()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.surface_form, self.lemma, self.part_of_speech
        )?;
        if let (Some(head), Some(label)) = (self.head_index, &self.dependency_label) {
            write!(f, " <-{}- {}", label, head)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(token_index: usize, head_index: Option<usize>) -> Token {
        Token {
            token_index,
            surface_form: "cat".into(),
            lemma: "cat".into(),
            part_of_speech: "NN".into(),
            paragraph_index: 1,
            sentence_index: 0,
            discourse_unit_index: 1,
            head_index,
            dependency_label: head_index.map(|_| "nsubj".to_string()),
        }
    }

    #[test]
    fn test_zero_based_views() {
        let token = sample(2, Some(3));
        assert_eq!(token.position(), 1);
        assert_eq!(token.head_position(), Some(2));
        assert!(!token.is_root());
    }

    #[test]
    fn test_root_token() {
        let token = sample(3, None);
        assert!(token.is_root());
        assert_eq!(token.head_position(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample(2, Some(3)).to_string(), "cat/cat/NN <-nsubj- 3");
        assert_eq!(sample(3, None).to_string(), "cat/cat/NN");
    }
}
