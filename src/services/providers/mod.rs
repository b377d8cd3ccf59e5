/// Poster data provider abstraction
///
/// A provider turns a numeric movie id into a poster image URL. The
/// [`PosterResolver`] in front of it owns the fallback policy: whenever there is
/// no usable id or the provider fails, the caller gets the placeholder image.
use std::sync::Arc;

use crate::error::PosterLookupError;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for poster providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetch the poster URL for a movie id
    async fn fetch_poster(&self, movie_id: u64) -> Result<String, PosterLookupError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves posters, substituting a placeholder for every failure
#[derive(Clone)]
pub struct PosterResolver {
    provider: Arc<dyn PosterProvider>,
    placeholder_url: String,
}

impl PosterResolver {
    pub fn new(provider: Arc<dyn PosterProvider>, placeholder_url: impl Into<String>) -> Self {
        Self {
            provider,
            placeholder_url: placeholder_url.into(),
        }
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Poster URL for `movie_id`, or the placeholder
    ///
    /// A missing id returns immediately without touching the provider.
    pub async fn resolve(&self, movie_id: Option<u64>) -> String {
        let Some(movie_id) = movie_id else {
            return self.placeholder_url.clone();
        };

        match self.provider.fetch_poster(movie_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder_url.clone()
            }
        }
    }
}
