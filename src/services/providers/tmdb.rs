/// TMDB poster provider
///
/// API Flow:
/// 1. Details: GET /3/movie/{id}?api_key=...&language=en-US → `poster_path`
/// 2. Poster: `poster_path` appended to the configured image base URL
use crate::{
    error::PosterLookupError,
    models::TmdbMovieDetails,
    services::providers::PosterProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
        })
    }

    fn details_url(&self, movie_id: u64) -> String {
        format!("{}/3/movie/{}", self.api_url, movie_id)
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_url, poster_path.trim_start_matches('/'))
    }

    fn convert_details(&self, details: TmdbMovieDetails) -> Result<String, PosterLookupError> {
        details
            .poster_path
            .filter(|path| !path.trim().is_empty())
            .map(|path| self.poster_url(&path))
            .ok_or(PosterLookupError::MissingPoster)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: u64) -> Result<String, PosterLookupError> {
        let response = self
            .http_client
            .get(self.details_url(movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PosterLookupError::Status(response.status()));
        }

        let details: TmdbMovieDetails = response.json().await?;
        let poster_url = self.convert_details(details)?;

        tracing::debug!(
            movie_id,
            provider = "tmdb",
            "Poster resolved"
        );

        Ok(poster_url)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
