/// Pairwise similarity between catalog records
///
/// Two interchangeable models turn the per-movie documents into a
/// [`SimilarityMatrix`]: count vectors scored by cosine, or token sets scored by
/// Jaccard. The matrix is built once at startup and only read afterwards.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod cosine;
pub mod jaccard;
pub mod matrix;
pub mod tokenize;

pub use cosine::CountVectorizer;
pub use jaccard::TokenSetJaccard;
pub use matrix::SimilarityMatrix;
pub use tokenize::tokenize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMethod {
    #[default]
    Cosine,
    Jaccard,
}

impl Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimilarityMethod::Cosine => write!(f, "cosine"),
            SimilarityMethod::Jaccard => write!(f, "jaccard"),
        }
    }
}

/// Builds the similarity matrix for a set of documents
///
/// `documents[i]` must correspond to catalog position `i`.
pub trait SimilarityModel: Send + Sync {
    fn method(&self) -> SimilarityMethod;

    fn build(&self, documents: &[String]) -> SimilarityMatrix;
}

/// Model for the configured method
pub fn model_for(method: SimilarityMethod, max_features: usize) -> Box<dyn SimilarityModel> {
    match method {
        SimilarityMethod::Cosine => Box::new(CountVectorizer::new(max_features)),
        SimilarityMethod::Jaccard => Box::new(TokenSetJaccard),
    }
}
