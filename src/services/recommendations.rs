use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::{providers::PosterResolver, recommender::Recommender},
};

/// Recommends titles similar to `title`, each paired with its poster
///
/// Posters are resolved one at a time in rank order. An unknown title yields
/// `AppError::NotFound`; poster failures never surface and show up as the
/// placeholder URL instead.
pub async fn get_recommendations(
    recommender: &Recommender,
    posters: &PosterResolver,
    title: &str,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    let neighbors = match recommender.nearest(title, top_n) {
        Ok(neighbors) => neighbors,
        Err(e @ AppError::NotFound(_)) => {
            tracing::warn!(title = %title, "Selected movie not in catalog");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let mut recommendations = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        let poster_url = posters.resolve(neighbor.movie.tmdb_id()).await;
        recommendations.push(Recommendation {
            name: neighbor.movie.title.clone(),
            poster_url,
            score: neighbor.score,
        });
    }

    tracing::info!(
        title = %title,
        method = %recommender.method(),
        results = recommendations.len(),
        "Recommendations generated"
    );

    Ok(recommendations)
}
