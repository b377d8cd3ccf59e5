use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{Movie, MovieId};

/// A recommended title paired with its poster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub poster_url: String,
    /// Similarity to the queried title
    pub score: f64,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of `GET /3/movie/{id}` used for posters
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
