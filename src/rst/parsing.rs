//! Discourse parsing boundary
//!
//! A discourse parser consumes an assembled [`Document`] plus a word-cluster
//! resource and returns a [`DiscourseTree`] over the document's EDUs.
//!
//! The transition system lives in [`shift_reduce`]; the decision model is a
//! trait so trained models can be plugged in. [`RightBranchingModel`] is the
//! deterministic baseline used when no model is configured.

pub mod shift_reduce;
pub mod tree;

pub use shift_reduce::{Action, ActionModel, ParserState, RightBranchingModel, ShiftReduceParser};
pub use tree::{DiscourseTree, Nuclearity};

use crate::rst::clusters::ClusterResource;
use crate::rst::document::Document;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("document has no discourse units")]
    EmptyDocument,
    #[error("illegal parser action: {0}")]
    IllegalAction(String),
}

pub trait DiscourseParser {
    fn parse(&self, doc: &Document, clusters: &ClusterResource)
        -> Result<DiscourseTree, ParseError>;
}
