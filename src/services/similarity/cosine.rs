/// Count-vector + cosine similarity
///
/// Mirrors a bag-of-words vectorizer: the vocabulary is the `max_features`
/// most frequent non-stop-word terms across the whole catalog, each document
/// becomes a vector of raw term counts over that vocabulary, and pairs are
/// scored by the cosine of the angle between their vectors.
use std::collections::{BTreeMap, HashMap};

use super::{tokenize, SimilarityMatrix, SimilarityMethod, SimilarityModel};

/// Term → feature index, fixed once fitted
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    features: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature(&self, term: &str) -> Option<usize> {
        self.features.get(term).copied()
    }

    /// Sparse count vector of `document`, sorted by feature index
    pub fn transform(&self, document: &str) -> CountVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();

        for token in tokenize(document) {
            if let Some(feature) = self.feature(&token) {
                *counts.entry(feature).or_default() += 1;
            }
        }

        CountVector {
            entries: counts
                .into_iter()
                .map(|(feature, count)| (feature, f64::from(count)))
                .collect(),
        }
    }
}

/// Non-zero entries of a term-count vector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountVector {
    entries: Vec<(usize, f64)>,
}

impl CountVector {
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, count)| count * count)
            .sum::<f64>()
            .sqrt()
    }

    pub fn dot(&self, other: &CountVector) -> f64 {
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();
        let mut total = 0.0;

        while let (Some((lf, lc)), Some((rf, rc))) = (left.peek(), right.peek()) {
            match lf.cmp(rf) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    total += lc * rc;
                    left.next();
                    right.next();
                }
            }
        }

        total
    }
}

/// Cosine similarity in [0, 1]; zero vectors score 0 against everything
pub fn cosine(a: &CountVector, b: &CountVector) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Picks the most frequent terms across `documents`
    ///
    /// Terms with equal corpus frequency are ordered alphabetically so the
    /// vocabulary cut is deterministic.
    pub fn fit(&self, documents: &[String]) -> Vocabulary {
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for document in documents {
            for token in tokenize(document) {
                *frequencies.entry(token).or_default() += 1;
            }
        }

        let mut terms: Vec<(String, usize)> = frequencies.into_iter().collect();
        terms.sort_by(|(a_term, a_count), (b_term, b_count)| {
            b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
        });
        terms.truncate(self.max_features);

        let mut kept: Vec<String> = terms.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        Vocabulary {
            features: kept
                .into_iter()
                .enumerate()
                .map(|(feature, term)| (term, feature))
                .collect(),
        }
    }
}

impl SimilarityModel for CountVectorizer {
    fn method(&self) -> SimilarityMethod {
        SimilarityMethod::Cosine
    }

    fn build(&self, documents: &[String]) -> SimilarityMatrix {
        let vocabulary = self.fit(documents);
        let vectors: Vec<CountVector> = documents
            .iter()
            .map(|document| vocabulary.transform(document))
            .collect();

        tracing::debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            "Count vectors built"
        );

        SimilarityMatrix::from_pairs(vectors.len(), |i, j| cosine(&vectors[i], &vectors[j]))
    }
}
