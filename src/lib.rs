//! # rst-parser
//!
//! Turns plaintext into an RST discourse tree.
//!
//! The text is sent to a syntactic annotator, the per-sentence annotations are
//! assembled into one ordered token sequence (the [`Document`](rst::document::Document)),
//! a discourse parser builds a tree over the document's EDUs, and the tree is
//! printed in bracketed form.
//!
//! The assembly step is where the index conventions meet: annotator token and
//! dependency indices are 1-based within a sentence, sentence indices are
//! 0-based, EDU indices are 1-based. See [`rst::assembling`] for the details
//! and [`rst::token::Token`] for the zero-based views used past that point.

pub mod rst;
