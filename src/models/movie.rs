use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// External TMDB identifier as it appears in the catalog snapshot
///
/// Snapshots exported from dataframes carry ids as integers, floats or strings,
/// so the raw value is kept and only coerced when a poster is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MovieId {
    /// Coerces the raw value into a TMDB movie id
    ///
    /// Returns `None` for zero, negative, fractional or non-numeric values.
    pub fn as_tmdb_id(&self) -> Option<u64> {
        match self {
            MovieId::Integer(id) => u64::try_from(*id).ok().filter(|id| *id > 0),
            MovieId::Float(id) => {
                if id.is_finite() && id.fract() == 0.0 && *id >= 1.0 && *id <= u64::MAX as f64 {
                    Some(*id as u64)
                } else {
                    None
                }
            }
            MovieId::Text(id) => id.trim().parse::<u64>().ok().filter(|id| *id > 0),
        }
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Integer(id) => write!(f, "{}", id),
            MovieId::Float(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// A single catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub genres: String,
    pub overview: String,
    pub keywords: String,
    pub cast: String,
    pub crew: String,
    pub movie_id: Option<MovieId>,
}

impl Movie {
    /// Creates a record with only a title; every text field starts empty
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genres: String::new(),
            overview: String::new(),
            keywords: String::new(),
            cast: String::new(),
            crew: String::new(),
            movie_id: None,
        }
    }

    pub fn with_genres(mut self, genres: impl Into<String>) -> Self {
        self.genres = genres.into();
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }

    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = cast.into();
        self
    }

    pub fn with_crew(mut self, crew: impl Into<String>) -> Self {
        self.crew = crew.into();
        self
    }

    pub fn with_movie_id(mut self, movie_id: MovieId) -> Self {
        self.movie_id = Some(movie_id);
        self
    }

    /// Text the similarity model is built from
    pub fn document(&self) -> String {
        [
            self.genres.as_str(),
            self.overview.as_str(),
            self.keywords.as_str(),
            self.cast.as_str(),
            self.crew.as_str(),
        ]
        .join(" ")
    }

    pub fn tmdb_id(&self) -> Option<u64> {
        self.movie_id.as_ref().and_then(MovieId::as_tmdb_id)
    }
}
