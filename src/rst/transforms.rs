//! Transform pipeline infrastructure
//!
//! Every step from raw text to printed tree is a stage implementing
//! [`Runnable<I, O>`]. Stages are chained into a [`Transform<I, O>`] with
//! [`Transform::then`]; the compiler checks that each stage's input matches
//! the previous stage's output:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Annotate::new(client))          // String -> AnnotationPayload
//!     .then(Assemble::default())            // AnnotationPayload -> Document
//!     .then(DiscourseParse::new(parser, clusters)) // Document -> DiscourseTree
//!     .then(ToBracketTree)                  // DiscourseTree -> BracketTree
//!     .then(Format::new(registry, "pretty")); // BracketTree -> String
//! ```
//!
//! Stage errors are reported as [`TransformError::StageFailed`] naming the
//! stage, so the binary can say where a run stopped. There is no partial
//! output: the first failing stage ends the run.
//!
//! - [`stages`]: the individual stages
//! - [`standard`]: pre-built transforms for the common paths

pub mod stages;
pub mod standard;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{0}")]
    Error(String),
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
}

impl TransformError {
    pub fn stage(stage: &str, err: impl std::fmt::Display) -> Self {
        TransformError::StageFailed {
            stage: stage.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

/// One processing stage
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
