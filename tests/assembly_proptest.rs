//! Property-based tests for document assembly
//!
//! Payloads are generated with at most one incoming edge per token, governors
//! drawn from the same sentence (0 being the virtual root), so every generated
//! payload is valid unless a test corrupts it on purpose.

use proptest::prelude::*;
use rst_parser::rst::annotation::{
    AnnotationPayload, DependencyRecord, SentenceRecord, TokenRecord,
};
use rst_parser::rst::assembling::{assemble, AssemblyError};

fn label_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["nsubj", "dobj", "det", "amod", "advmod", "punct"])
}

/// A sentence of 1..8 tokens, each with an optional incoming edge
fn sentence_strategy() -> impl Strategy<Value = SentenceRecord> {
    (1usize..8)
        .prop_flat_map(|n| {
            (
                prop::collection::vec("[a-z]{1,6}", n),
                prop::collection::vec(prop::option::of((0..=n, label_strategy())), n),
            )
        })
        .prop_map(|(words, heads)| {
            let tokens = words
                .iter()
                .enumerate()
                .map(|(i, w)| TokenRecord::new(i + 1, w, w, "NN"))
                .collect();
            let edges = heads
                .iter()
                .enumerate()
                .filter_map(|(i, head)| {
                    head.map(|(governor, label)| DependencyRecord::new(governor, i + 1, label))
                })
                .collect();
            SentenceRecord::new(tokens, edges)
        })
}

fn payload_strategy() -> impl Strategy<Value = AnnotationPayload> {
    prop::collection::vec(sentence_strategy(), 0..6)
        .prop_map(|sentences| AnnotationPayload { sentences })
}

fn tokens_of(sentence: &SentenceRecord) -> &[TokenRecord] {
    sentence.tokens.as_deref().unwrap_or(&[])
}

fn edges_of(sentence: &SentenceRecord) -> &[DependencyRecord] {
    sentence.dependencies.as_deref().unwrap_or(&[])
}

proptest! {
    #[test]
    fn ordering_follows_sentence_then_token(payload in payload_strategy()) {
        let doc = assemble(&payload).unwrap();
        let keys: Vec<(usize, usize)> = doc
            .tokens()
            .iter()
            .map(|t| (t.sentence_index, t.token_index))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(&keys, &sorted);

        let mut sentence_ids: Vec<usize> = keys.iter().map(|(s, _)| *s).collect();
        sentence_ids.dedup();
        let expected: Vec<usize> = (0..payload.sentences.len()).collect();
        prop_assert_eq!(sentence_ids, expected);

        let total: usize = payload.sentences.iter().map(|s| tokens_of(s).len()).sum();
        prop_assert_eq!(doc.len(), total);
    }

    #[test]
    fn structural_indices_are_monotone(payload in payload_strategy()) {
        let doc = assemble(&payload).unwrap();
        for pair in doc.tokens().windows(2) {
            prop_assert!(pair[1].discourse_unit_index >= pair[0].discourse_unit_index);
            prop_assert!(pair[1].paragraph_index >= pair[0].paragraph_index);
        }
        for token in doc.tokens() {
            prop_assert_eq!(token.discourse_unit_index, token.sentence_index + 1);
            prop_assert_eq!(token.paragraph_index, 1);
        }
    }

    #[test]
    fn heads_resolve_within_sentence(payload in payload_strategy()) {
        let doc = assemble(&payload).unwrap();
        let sentences = doc.sentences();
        prop_assert_eq!(sentences.len(), payload.sentences.len());

        for (assembled, record) in sentences.iter().zip(&payload.sentences) {
            for edge in edges_of(record) {
                let token = &assembled[edge.dependent - 1];
                let expected_head = if edge.governor == 0 { None } else { Some(edge.governor) };
                prop_assert_eq!(token.head_index, expected_head);
                prop_assert_eq!(token.dependency_label.as_deref(), Some(edge.dep.as_str()));
            }
            for token in assembled.iter() {
                if let Some(head) = token.head_index {
                    prop_assert!(head >= 1 && head <= assembled.len());
                }
            }
        }
    }

    #[test]
    fn tokens_without_edges_are_roots(payload in payload_strategy()) {
        let doc = assemble(&payload).unwrap();
        for (assembled, record) in doc.sentences().iter().zip(&payload.sentences) {
            for token in assembled.iter() {
                let targeted = edges_of(record).iter().any(|e| e.dependent == token.token_index);
                if !targeted {
                    prop_assert!(token.is_root());
                    prop_assert!(token.dependency_label.is_none());
                }
            }
        }
    }

    #[test]
    fn assembly_is_deterministic(payload in payload_strategy()) {
        prop_assert_eq!(assemble(&payload).unwrap(), assemble(&payload).unwrap());
    }

    #[test]
    fn edge_order_does_not_matter(payload in payload_strategy()) {
        let mut reversed = payload.clone();
        for sentence in &mut reversed.sentences {
            if let Some(edges) = sentence.dependencies.as_mut() {
                edges.reverse();
            }
        }
        prop_assert_eq!(assemble(&payload).unwrap(), assemble(&reversed).unwrap());
    }

    #[test]
    fn out_of_range_dependent_is_rejected(
        payload in payload_strategy().prop_filter("needs a sentence", |p| !p.sentences.is_empty()),
        overshoot in 1usize..5,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut corrupted = payload.clone();
        let target = pick.index(corrupted.sentences.len());
        let sentence = &mut corrupted.sentences[target];
        let token_count = tokens_of(sentence).len();
        if let Some(edges) = sentence.dependencies.as_mut() {
            edges.push(DependencyRecord::new(1, token_count + overshoot, "dep"));
        }

        match assemble(&corrupted) {
            Err(AssemblyError::IndexResolution { sentence, dependent, token_count: count, .. }) => {
                prop_assert_eq!(sentence, target);
                prop_assert_eq!(dependent, token_count + overshoot);
                prop_assert_eq!(count, token_count);
            }
            other => prop_assert!(false, "expected IndexResolution, got {:?}", other),
        }
    }
}
