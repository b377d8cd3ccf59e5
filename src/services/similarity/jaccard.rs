use std::collections::HashSet;

use super::{tokenize, SimilarityMatrix, SimilarityMethod, SimilarityModel};

pub fn token_set(document: &str) -> HashSet<String> {
    tokenize(document).collect()
}

/// |A ∩ B| / |A ∪ B|, defined as 0.0 when both sets are empty
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Token-set + Jaccard similarity
///
/// Only vocabulary overlap counts; how often a word appears is ignored.
#[derive(Debug, Clone, Default)]
pub struct TokenSetJaccard;

impl SimilarityModel for TokenSetJaccard {
    fn method(&self) -> SimilarityMethod {
        SimilarityMethod::Jaccard
    }

    fn build(&self, documents: &[String]) -> SimilarityMatrix {
        let sets: Vec<HashSet<String>> = documents.iter().map(|d| token_set(d)).collect();
        SimilarityMatrix::from_pairs(sets.len(), |i, j| jaccard(&sets[i], &sets[j]))
    }
}
