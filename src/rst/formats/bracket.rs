//! Bracketed trees and their pretty-printer
//!
//! A [`BracketTree`] is the generic `(label child child ...)` structure: each
//! child is either another tree or a bare string leaf. It is the common ground
//! between the discourse parser's output and the text we print.
//!
//! Pretty-printing follows the usual margin rule: a subtree is printed on one
//! line when that line (plus its indentation) stays under the margin;
//! otherwise the label opens the line and each child goes on its own line,
//! indented two more spaces.

use super::lexer::{tokenize, BracketToken};
use super::FormatError;
use crate::rst::parsing::DiscourseTree;
use chumsky::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Tree(BracketTree),
    Leaf(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTree {
    pub label: String,
    pub children: Vec<Child>,
}

impl BracketTree {
    pub fn new(label: impl Into<String>, children: Vec<Child>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Read a single bracketed tree, e.g. `(S (NP x) (VP y))`
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let tokens = tokenize(source).map_err(|offset| {
            FormatError::Syntax(format!("unexpected character at byte {}", offset))
        })?;
        if tokens.is_empty() {
            return Err(FormatError::Syntax("empty input".into()));
        }
        tree_parser()
            .then_ignore(end())
            .parse(tokens)
            .map_err(|errors| {
                let message = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                FormatError::Syntax(message)
            })
    }

    /// Single-line rendering
    pub fn to_flat(&self) -> String {
        let children: Vec<String> = self
            .children
            .iter()
            .map(|child| match child {
                Child::Tree(tree) => tree.to_flat(),
                Child::Leaf(leaf) => leaf.clone(),
            })
            .collect();
        format!("({} {})", self.label, children.join(" "))
    }

    /// Multi-line rendering wrapped at `margin` columns
    pub fn pformat(&self, margin: usize) -> String {
        self.pformat_at(margin, 0)
    }

    fn pformat_at(&self, margin: usize, indent: usize) -> String {
        let flat = self.to_flat();
        if flat.chars().count() + indent < margin {
            return flat;
        }

        let pad = " ".repeat(indent + 2);
        let mut out = format!("({}", self.label);
        for child in &self.children {
            out.push('\n');
            out.push_str(&pad);
            match child {
                Child::Tree(tree) => out.push_str(&tree.pformat_at(margin, indent + 2)),
                Child::Leaf(leaf) => out.push_str(leaf),
            }
        }
        out.push(')');
        out
    }
}

impl From<&DiscourseTree> for BracketTree {
    fn from(tree: &DiscourseTree) -> Self {
        match tree {
            DiscourseTree::Leaf { edu } => {
                BracketTree::new("EDU", vec![Child::Leaf(edu.to_string())])
            }
            DiscourseTree::Node {
                nuclearity,
                relation,
                children,
            } => BracketTree::new(
                format!("{}-{}", nuclearity, relation),
                children
                    .iter()
                    .map(|c| Child::Tree(BracketTree::from(c)))
                    .collect(),
            ),
        }
    }
}

fn tree_parser() -> impl Parser<BracketToken, BracketTree, Error = Simple<BracketToken>> {
    recursive(|tree| {
        let atom = chumsky::select! { BracketToken::Atom(text) => text };
        let child = tree.map(Child::Tree).or(atom.clone().map(Child::Leaf));

        atom.then(child.repeated())
            .delimited_by(just(BracketToken::Open), just(BracketToken::Close))
            .map(|(label, children)| BracketTree { label, children })
    })
}
