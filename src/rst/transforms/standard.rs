//! Standard transform definitions
//!
//! Pure stages with default settings are available as statics. Pipelines that
//! need runtime pieces (an annotator, loaded clusters, a configured margin)
//! are built with [`full_pipeline`].

use crate::rst::annotation::{AnnotationPayload, Annotator};
use crate::rst::assembling::NumberingScheme;
use crate::rst::clusters::ClusterResource;
use crate::rst::document::Document;
use crate::rst::formats::FormatRegistry;
use crate::rst::parsing::{DiscourseParser, DiscourseTree};
use crate::rst::transforms::stages::{Annotate, Assemble, DiscourseParse, Format, ToBracketTree};
use crate::rst::transforms::Transform;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub type AssemblyTransform = Transform<AnnotationPayload, Document>;

pub type TreeOutputTransform = Transform<DiscourseTree, String>;

/// Payload to document with the default numbering scheme
pub static ASSEMBLY: Lazy<AssemblyTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Assemble::default()));

/// Discourse tree to margin-wrapped text at the default margin
pub static PRETTY_TREE: Lazy<TreeOutputTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(ToBracketTree)
        .then(Format::new(FormatRegistry::default(), "pretty"))
});

/// Runtime pieces of a text-to-output pipeline
pub struct PipelineParts<A, P> {
    pub annotator: A,
    pub numbering: NumberingScheme,
    pub parser: P,
    pub clusters: Arc<ClusterResource>,
    pub registry: FormatRegistry,
    pub format: String,
}

/// Raw text in, formatted discourse tree out
pub fn full_pipeline<A, P>(parts: PipelineParts<A, P>) -> Transform<String, String>
where
    A: Annotator + Send + Sync + 'static,
    P: DiscourseParser + Send + Sync + 'static,
{
    Transform::from_fn(Ok)
        .then(Annotate::new(parts.annotator))
        .then(Assemble::new(parts.numbering))
        .then(DiscourseParse::new(parts.parser, parts.clusters))
        .then(ToBracketTree)
        .then(Format::new(parts.registry, parts.format))
}
