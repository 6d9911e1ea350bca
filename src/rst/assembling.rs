//! Document assembly
//!
//! Maps a per-sentence annotation payload onto one flat, ordered token
//! sequence with resolved positional and dependency fields.
//!
//! For every sentence, in payload order:
//! 1. the sentence gets the next sentence ordinal (0, 1, 2, ...)
//! 2. each token record becomes a [`Token`] with the paragraph constant, the
//!    sentence index and the discourse-unit index taken from the
//!    [`NumberingScheme`]
//! 3. each dependency edge sets `head_index`/`dependency_label` on the token
//!    at `dependent - 1` (edges are 1-based)
//!
//! The per-sentence token lists are then concatenated into a [`Document`].
//!
//! Assembly either returns a document that satisfies all ordering and
//! same-sentence invariants, or an error. There is no partial result.

use super::annotation::{AnnotationPayload, SentenceRecord};
use super::document::Document;
use super::token::Token;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Governor value the annotator uses for the virtual root node.
/// Dependents of the virtual root keep `head_index = None`; detect them with
/// [`Token::is_root`](crate::rst::token::Token::is_root), never `head_index == Some(0)`.
pub const VIRTUAL_ROOT: usize = 0;

/// Label given to tokens attached to the virtual root
pub const ROOT_LABEL: &str = "ROOT";

/// Numbering bases for the structural token coordinates.
///
/// Plaintext input carries no paragraph or EDU segmentation, so every token
/// sits in paragraph `paragraph_index` and each sentence is exactly one EDU:
///
/// - `sentence_index = sentence_base + ordinal`
/// - `discourse_unit_index = edu_base + ordinal`
///
/// The default reproduces the conventions the discourse model was trained
/// with: paragraph 1, sentences from 0, EDUs from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NumberingScheme {
    pub paragraph_index: usize,
    pub sentence_base: usize,
    pub edu_base: usize,
}

impl NumberingScheme {
    /// Every coordinate starts at zero
    pub const ZERO_BASED: NumberingScheme = NumberingScheme {
        paragraph_index: 0,
        sentence_base: 0,
        edu_base: 0,
    };

    /// Every coordinate starts at one
    pub const ONE_BASED: NumberingScheme = NumberingScheme {
        paragraph_index: 1,
        sentence_base: 1,
        edu_base: 1,
    };
}

impl Default for NumberingScheme {
    fn default() -> Self {
        Self {
            paragraph_index: 1,
            sentence_base: 0,
            edu_base: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// The payload is missing fields or is structurally inconsistent
    #[error("malformed payload in sentence {sentence}: {reason}")]
    MalformedPayload { sentence: usize, reason: String },

    /// A dependency edge points outside its sentence
    #[error(
        "sentence {sentence}: edge {governor} -> {dependent} ({label}) does not resolve \
         against {token_count} tokens"
    )]
    IndexResolution {
        sentence: usize,
        governor: usize,
        dependent: usize,
        label: String,
        token_count: usize,
    },
}

/// Builds documents from annotation payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct Assembler {
    numbering: NumberingScheme,
}

impl Assembler {
    pub fn new(numbering: NumberingScheme) -> Self {
        Self { numbering }
    }

    pub fn assemble(&self, payload: &AnnotationPayload) -> Result<Document, AssemblyError> {
        let mut doc_tokens = Vec::new();
        for (ordinal, sentence) in payload.sentences.iter().enumerate() {
            let sent_tokens = self.assemble_sentence(ordinal, sentence)?;
            doc_tokens.extend(sent_tokens);
        }
        debug!(
            sentences = payload.sentences.len(),
            tokens = doc_tokens.len(),
            "assembled document"
        );
        Ok(Document::from_tokens(doc_tokens))
    }

    fn assemble_sentence(
        &self,
        ordinal: usize,
        sentence: &SentenceRecord,
    ) -> Result<Vec<Token>, AssemblyError> {
        let records = sentence
            .tokens
            .as_ref()
            .ok_or_else(|| malformed(ordinal, "missing token list"))?;
        let edges = sentence
            .dependencies
            .as_ref()
            .ok_or_else(|| malformed(ordinal, "missing dependency list"))?;

        let mut sent_tokens = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if record.index != position + 1 {
                return Err(malformed(
                    ordinal,
                    &format!(
                        "token at position {} has index {}",
                        position + 1,
                        record.index
                    ),
                ));
            }
            let field = |value: &Option<String>, name: &str| {
                value.clone().ok_or_else(|| {
                    malformed(ordinal, &format!("token {} missing {}", record.index, name))
                })
            };
            sent_tokens.push(Token {
                token_index: record.index,
                surface_form: field(&record.word, "word")?,
                lemma: field(&record.lemma, "lemma")?,
                part_of_speech: field(&record.pos, "pos")?,
                paragraph_index: self.numbering.paragraph_index,
                sentence_index: self.numbering.sentence_base + ordinal,
                discourse_unit_index: self.numbering.edu_base + ordinal,
                head_index: None,
                dependency_label: None,
            });
        }

        let token_count = sent_tokens.len();
        for edge in edges {
            let unresolved = || AssemblyError::IndexResolution {
                sentence: ordinal,
                governor: edge.governor,
                dependent: edge.dependent,
                label: edge.dep.clone(),
                token_count,
            };
            if edge.dependent == 0 || edge.governor > token_count {
                return Err(unresolved());
            }
            let dependent = sent_tokens
                .get_mut(edge.dependent - 1)
                .ok_or_else(unresolved)?;
            dependent.head_index = (edge.governor != VIRTUAL_ROOT).then_some(edge.governor);
            dependent.dependency_label = Some(edge.dep.clone());
        }

        Ok(sent_tokens)
    }
}

/// Assemble with the default numbering scheme
pub fn assemble(payload: &AnnotationPayload) -> Result<Document, AssemblyError> {
    Assembler::default().assemble(payload)
}

fn malformed(sentence: usize, reason: &str) -> AssemblyError {
    AssemblyError::MalformedPayload {
        sentence,
        reason: reason.to_string(),
    }
}
