//! Annotation payloads and the annotator boundary
//!
//! The annotator turns raw text into per-sentence records: tokens with their
//! 1-based index, surface form, lemma and POS tag, plus the dependency edges
//! of the sentence. The shape follows the CoreNLP JSON output, but nothing
//! downstream depends on CoreNLP beyond these field names.
//!
//! Two annotators are provided:
//! - [`CoreNlpClient`]: blocking HTTP call to a CoreNLP-compatible server
//! - [`PayloadReplay`]: the "text" is already a JSON payload (offline runs, tests)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Annotators the assembly step needs from the service
pub const DEFAULT_ANNOTATORS: &str = "tokenize,ssplit,pos,lemma,parse,depparse";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationPayload {
    pub sentences: Vec<SentenceRecord>,
}

/// One sentence as returned by the annotator.
///
/// Both lists are optional at the serde level so that a sentence missing one of
/// them can be reported as malformed by the assembler, with its position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentenceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenRecord>>,
    #[serde(
        default,
        rename = "basicDependencies",
        alias = "dependencies",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependencies: Option<Vec<DependencyRecord>>,
}

/// One token of a sentence.
///
/// The lexical fields depend on which annotators ran, so they are optional
/// here and a token missing one is reported by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
}

/// A governor -> dependent edge; both ends are 1-based token indices,
/// governor 0 is the virtual root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub dep: String,
    pub governor: usize,
    pub dependent: usize,
    #[serde(
        default,
        rename = "governorGloss",
        skip_serializing_if = "Option::is_none"
    )]
    pub governor_gloss: Option<String>,
    #[serde(
        default,
        rename = "dependentGloss",
        skip_serializing_if = "Option::is_none"
    )]
    pub dependent_gloss: Option<String>,
}

impl AnnotationPayload {
    pub fn from_json(json: &str) -> Result<Self, AnnotationError> {
        serde_json::from_str(json).map_err(|e| AnnotationError::Decode(e.to_string()))
    }
}

impl SentenceRecord {
    pub fn new(tokens: Vec<TokenRecord>, dependencies: Vec<DependencyRecord>) -> Self {
        Self {
            tokens: Some(tokens),
            dependencies: Some(dependencies),
        }
    }
}

impl TokenRecord {
    pub fn new(index: usize, word: &str, lemma: &str, pos: &str) -> Self {
        Self {
            index,
            word: Some(word.to_string()),
            lemma: Some(lemma.to_string()),
            pos: Some(pos.to_string()),
        }
    }
}

impl DependencyRecord {
    pub fn new(governor: usize, dependent: usize, dep: &str) -> Self {
        Self {
            dep: dep.to_string(),
            governor,
            dependent,
            governor_gloss: None,
            dependent_gloss: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("annotation service at {url} unavailable: {message}")]
    Unavailable { url: String, message: String },
    #[error("could not decode annotation payload: {0}")]
    Decode(String),
}

/// Anything that turns raw text into an annotation payload
pub trait Annotator {
    fn annotate(&self, text: &str) -> Result<AnnotationPayload, AnnotationError>;
}

/// Blocking client for a CoreNLP server
#[derive(Debug, Clone)]
pub struct CoreNlpClient {
    url: String,
    annotators: String,
    timeout: Duration,
}

impl CoreNlpClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            annotators: DEFAULT_ANNOTATORS.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_annotators(mut self, annotators: impl Into<String>) -> Self {
        self.annotators = annotators.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `properties` query parameter sent with every request
    pub fn properties(&self) -> String {
        serde_json::json!({
            "annotators": self.annotators,
            "outputFormat": "json",
        })
        .to_string()
    }
}

impl Annotator for CoreNlpClient {
    fn annotate(&self, text: &str) -> Result<AnnotationPayload, AnnotationError> {
        info!(url = %self.url, bytes = text.len(), "requesting annotations");
        let response = ureq::post(&self.url)
            .query("properties", &self.properties())
            .timeout(self.timeout)
            .send_string(text)
            .map_err(|e| AnnotationError::Unavailable {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let payload: AnnotationPayload = response
            .into_json()
            .map_err(|e| AnnotationError::Decode(e.to_string()))?;
        debug!(sentences = payload.sentences.len(), "annotations received");
        Ok(payload)
    }
}

/// Treats its input as a JSON annotation payload produced earlier
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadReplay;

impl Annotator for PayloadReplay {
    fn annotate(&self, text: &str) -> Result<AnnotationPayload, AnnotationError> {
        AnnotationPayload::from_json(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORENLP_SAMPLE: &str = r#"{
        "sentences": [{
            "index": 0,
            "basicDependencies": [
                {"dep": "ROOT", "governor": 0, "governorGloss": "ROOT", "dependent": 2, "dependentGloss": "slept"},
                {"dep": "nsubj", "governor": 2, "governorGloss": "slept", "dependent": 1, "dependentGloss": "It"}
            ],
            "tokens": [
                {"index": 1, "word": "It", "originalText": "It", "lemma": "it", "pos": "PRP",
                 "characterOffsetBegin": 0, "characterOffsetEnd": 2},
                {"index": 2, "word": "slept", "originalText": "slept", "lemma": "sleep", "pos": "VBD",
                 "characterOffsetBegin": 3, "characterOffsetEnd": 8}
            ]
        }]
    }"#;

    #[test]
    fn test_decode_corenlp_output() {
        let payload = AnnotationPayload::from_json(CORENLP_SAMPLE).unwrap();
        assert_eq!(payload.sentences.len(), 1);

        let sentence = &payload.sentences[0];
        let tokens = sentence.tokens.as_ref().unwrap();
        assert_eq!(tokens[1], TokenRecord::new(2, "slept", "sleep", "VBD"));

        let deps = sentence.dependencies.as_ref().unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[1].governor, 2);
        assert_eq!(deps[1].dependent, 1);
        assert_eq!(deps[1].dep, "nsubj");
        assert_eq!(deps[0].governor_gloss.as_deref(), Some("ROOT"));
    }

    #[test]
    fn test_dependencies_alias() {
        let json = r#"{"sentences": [{"tokens": [], "dependencies": []}]}"#;
        let payload = AnnotationPayload::from_json(json).unwrap();
        assert_eq!(payload.sentences[0].dependencies, Some(vec![]));
    }

    #[test]
    fn test_missing_lists_stay_none() {
        let json = r#"{"sentences": [{"tokens": []}]}"#;
        let payload = AnnotationPayload::from_json(json).unwrap();
        assert!(payload.sentences[0].dependencies.is_none());
    }

    #[test]
    fn test_missing_token_fields_stay_none() {
        let json = r#"{"sentences": [{"tokens": [{"index": 1, "word": "Hi", "pos": "UH"}]}]}"#;
        let payload = AnnotationPayload::from_json(json).unwrap();
        let token = &payload.sentences[0].tokens.as_ref().unwrap()[0];
        assert_eq!(token.word.as_deref(), Some("Hi"));
        assert!(token.lemma.is_none());
    }

    #[test]
    fn test_missing_sentences_is_decode_error() {
        let err = AnnotationPayload::from_json(r#"{"docId": "x"}"#).unwrap_err();
        assert!(matches!(err, AnnotationError::Decode(_)));
    }

    #[test]
    fn test_replay_annotator() {
        let payload = PayloadReplay.annotate(CORENLP_SAMPLE).unwrap();
        assert_eq!(payload.sentences.len(), 1);
        assert!(PayloadReplay.annotate("not json").is_err());
    }

    #[test]
    fn test_client_properties() {
        let client = CoreNlpClient::new("http://localhost:9000");
        let props: serde_json::Value = serde_json::from_str(&client.properties()).unwrap();
        assert_eq!(props["annotators"], DEFAULT_ANNOTATORS);
        assert_eq!(props["outputFormat"], "json");

        let client = client.with_annotators("tokenize,ssplit");
        assert!(client.properties().contains("tokenize,ssplit"));
        assert_eq!(client.url(), "http://localhost:9000");
    }

    #[test]
    fn test_client_unreachable_server() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server
        let client =
            CoreNlpClient::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
        let err = client.annotate("Hello.").unwrap_err();
        assert!(matches!(err, AnnotationError::Unavailable { .. }));
    }
}
