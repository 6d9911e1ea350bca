//! Shift-reduce driver
//!
//! The driver owns the parser configuration (a stack of subtrees and a queue
//! of pending EDUs) and enforces action legality. Which action to take is
//! delegated to an [`ActionModel`], so a learned model can be plugged in
//! without touching the transition system.

use super::tree::{DiscourseTree, Nuclearity};
use super::{DiscourseParser, ParseError};
use crate::rst::clusters::ClusterResource;
use crate::rst::document::Document;
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the next EDU from the queue onto the stack
    Shift,
    /// Merge the two topmost stack entries under a relation node
    Reduce {
        nuclearity: Nuclearity,
        relation: String,
    },
}

/// Parser configuration visible to the action model
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    stack: Vec<DiscourseTree>,
    queue: VecDeque<usize>,
}

impl ParserState {
    pub fn new(edus: impl IntoIterator<Item = usize>) -> Self {
        Self {
            stack: Vec::new(),
            queue: edus.into_iter().collect(),
        }
    }

    pub fn stack(&self) -> &[DiscourseTree] {
        &self.stack
    }

    pub fn queue(&self) -> &VecDeque<usize> {
        &self.queue
    }

    pub fn can_shift(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn can_reduce(&self) -> bool {
        self.stack.len() >= 2
    }

    pub fn is_final(&self) -> bool {
        self.queue.is_empty() && self.stack.len() == 1
    }

    fn apply(&mut self, action: Action) -> Result<(), ParseError> {
        match action {
            Action::Shift => {
                let edu = self
                    .queue
                    .pop_front()
                    .ok_or_else(|| ParseError::IllegalAction("shift with empty queue".into()))?;
                self.stack.push(DiscourseTree::leaf(edu));
            }
            Action::Reduce {
                nuclearity,
                relation,
            } => {
                if !self.can_reduce() {
                    return Err(ParseError::IllegalAction(format!(
                        "reduce with {} stack entries",
                        self.stack.len()
                    )));
                }
                let right = self.stack.pop();
                let left = self.stack.pop();
                if let (Some(left), Some(right)) = (left, right) {
                    self.stack
                        .push(DiscourseTree::node(nuclearity, relation, vec![left, right]));
                }
            }
        }
        Ok(())
    }

    fn into_tree(mut self) -> Option<DiscourseTree> {
        self.stack.pop()
    }
}

/// Decides the next transition
pub trait ActionModel {
    fn predict(&self, state: &ParserState, doc: &Document, clusters: &ClusterResource) -> Action;
}

/// Baseline model: shift everything, then reduce right to left.
///
/// Every relation is `NS-elaboration`, which yields the right-branching tree
/// commonly used as the lower bound for RST parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RightBranchingModel;

impl ActionModel for RightBranchingModel {
    fn predict(&self, state: &ParserState, _doc: &Document, _clusters: &ClusterResource) -> Action {
        if state.can_shift() {
            Action::Shift
        } else {
            Action::Reduce {
                nuclearity: Nuclearity::NS,
                relation: "elaboration".into(),
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShiftReduceParser<M> {
    model: M,
}

impl<M: ActionModel> ShiftReduceParser<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: ActionModel> DiscourseParser for ShiftReduceParser<M> {
    fn parse(
        &self,
        doc: &Document,
        clusters: &ClusterResource,
    ) -> Result<DiscourseTree, ParseError> {
        let edus: Vec<usize> = doc.edus().iter().map(|edu| edu.index).collect();
        if edus.is_empty() {
            return Err(ParseError::EmptyDocument);
        }
        debug!(edus = edus.len(), "shift-reduce parsing");

        let mut state = ParserState::new(edus);
        while !state.is_final() {
            let action = self.model.predict(&state, doc, clusters);
            trace!(?action, stack = state.stack.len(), queue = state.queue.len(), "transition");
            state.apply(action)?;
        }
        state.into_tree().ok_or(ParseError::EmptyDocument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rst::annotation::{AnnotationPayload, SentenceRecord, TokenRecord};
    use crate::rst::assembling::assemble;

    fn doc_with_sentences(n: usize) -> Document {
        let sentences = (0..n)
            .map(|_| SentenceRecord::new(vec![TokenRecord::new(1, "Yes", "yes", "UH")], vec![]))
            .collect();
        assemble(&AnnotationPayload { sentences }).unwrap()
    }

    #[test]
    fn test_right_branching_three_edus() {
        let parser = ShiftReduceParser::new(RightBranchingModel);
        let tree = parser
            .parse(&doc_with_sentences(3), &ClusterResource::empty())
            .unwrap();
        assert_eq!(
            tree.to_bracketed(),
            "(NS-elaboration (EDU 1) (NS-elaboration (EDU 2) (EDU 3)))"
        );
    }

    #[test]
    fn test_single_edu_is_leaf() {
        let parser = ShiftReduceParser::new(RightBranchingModel);
        let tree = parser
            .parse(&doc_with_sentences(1), &ClusterResource::empty())
            .unwrap();
        assert_eq!(tree, DiscourseTree::leaf(1));
    }

    #[test]
    fn test_empty_document() {
        let parser = ShiftReduceParser::new(RightBranchingModel);
        let err = parser
            .parse(&Document::default(), &ClusterResource::empty())
            .unwrap_err();
        assert_eq!(err, ParseError::EmptyDocument);
    }

    struct AlwaysReduce;

    impl ActionModel for AlwaysReduce {
        fn predict(&self, _: &ParserState, _: &Document, _: &ClusterResource) -> Action {
            Action::Reduce {
                nuclearity: Nuclearity::NN,
                relation: "joint".into(),
            }
        }
    }

    #[test]
    fn test_illegal_action_rejected() {
        let parser = ShiftReduceParser::new(AlwaysReduce);
        let err = parser
            .parse(&doc_with_sentences(2), &ClusterResource::empty())
            .unwrap_err();
        assert!(matches!(err, ParseError::IllegalAction(_)));
    }

    /// Reduces as soon as two subtrees are available
    struct LeftBranching;

    impl ActionModel for LeftBranching {
        fn predict(&self, state: &ParserState, _: &Document, _: &ClusterResource) -> Action {
            if state.can_reduce() {
                Action::Reduce {
                    nuclearity: Nuclearity::NN,
                    relation: "Joint".into(),
                }
            } else {
                Action::Shift
            }
        }
    }

    #[test]
    fn test_custom_model() {
        let parser = ShiftReduceParser::new(LeftBranching);
        let tree = parser
            .parse(&doc_with_sentences(3), &ClusterResource::empty())
            .unwrap();
        assert_eq!(
            tree.to_bracketed(),
            "(NN-joint (NN-joint (EDU 1) (EDU 2)) (EDU 3))"
        );
    }
}
