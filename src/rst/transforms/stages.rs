//! Pipeline stages
//!
//! | stage            | input              | output             |
//! |------------------|--------------------|--------------------|
//! | `Annotate`       | `String`           | `AnnotationPayload`|
//! | `Assemble`       | `AnnotationPayload`| `Document`         |
//! | `DiscourseParse` | `Document`         | `DiscourseTree`    |
//! | `ToBracketTree`  | `DiscourseTree`    | `BracketTree`      |
//! | `Format`         | `BracketTree`      | `String`           |

use crate::rst::annotation::{AnnotationPayload, Annotator};
use crate::rst::assembling::{Assembler, NumberingScheme};
use crate::rst::clusters::ClusterResource;
use crate::rst::document::Document;
use crate::rst::formats::{BracketTree, FormatRegistry};
use crate::rst::parsing::{DiscourseParser, DiscourseTree};
use crate::rst::transforms::{Runnable, TransformError};
use std::sync::Arc;

pub struct Annotate<A> {
    annotator: A,
}

impl<A: Annotator> Annotate<A> {
    pub fn new(annotator: A) -> Self {
        Self { annotator }
    }
}

impl<A: Annotator> Runnable<String, AnnotationPayload> for Annotate<A> {
    fn run(&self, input: String) -> Result<AnnotationPayload, TransformError> {
        self.annotator
            .annotate(&input)
            .map_err(|e| TransformError::stage("annotate", e))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Assemble {
    assembler: Assembler,
}

impl Assemble {
    pub fn new(numbering: NumberingScheme) -> Self {
        Self {
            assembler: Assembler::new(numbering),
        }
    }
}

impl Runnable<AnnotationPayload, Document> for Assemble {
    fn run(&self, input: AnnotationPayload) -> Result<Document, TransformError> {
        self.assembler
            .assemble(&input)
            .map_err(|e| TransformError::stage("assemble", e))
    }
}

pub struct DiscourseParse<P> {
    parser: P,
    clusters: Arc<ClusterResource>,
}

impl<P: DiscourseParser> DiscourseParse<P> {
    pub fn new(parser: P, clusters: Arc<ClusterResource>) -> Self {
        Self { parser, clusters }
    }
}

impl<P: DiscourseParser> Runnable<Document, DiscourseTree> for DiscourseParse<P> {
    fn run(&self, input: Document) -> Result<DiscourseTree, TransformError> {
        self.parser
            .parse(&input, &self.clusters)
            .map_err(|e| TransformError::stage("parse", e))
    }
}

/// Crosses the parser boundary through the bracketed string form
#[derive(Debug, Clone, Copy, Default)]
pub struct ToBracketTree;

impl Runnable<DiscourseTree, BracketTree> for ToBracketTree {
    fn run(&self, input: DiscourseTree) -> Result<BracketTree, TransformError> {
        BracketTree::parse(&input.to_bracketed()).map_err(|e| TransformError::stage("bracket", e))
    }
}

pub struct Format {
    registry: FormatRegistry,
    format: String,
}

impl Format {
    pub fn new(registry: FormatRegistry, format: impl Into<String>) -> Self {
        Self {
            registry,
            format: format.into(),
        }
    }
}

impl Runnable<BracketTree, String> for Format {
    fn run(&self, input: BracketTree) -> Result<String, TransformError> {
        self.registry
            .serialize(&input, &self.format)
            .map_err(|e| TransformError::stage("format", e))
    }
}
