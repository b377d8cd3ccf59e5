use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{
        catalog::Catalog,
        similarity::{SimilarityMatrix, SimilarityMethod, SimilarityModel},
    },
};

/// A ranked neighbor of the queried title
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<'a> {
    pub index: usize,
    pub movie: &'a Movie,
    pub score: f64,
}

/// Nearest-neighbor lookup over a fixed catalog
///
/// Holds the catalog together with the similarity matrix built from it; both
/// are immutable once constructed.
#[derive(Debug)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    matrix: SimilarityMatrix,
    method: SimilarityMethod,
}

impl Recommender {
    /// Runs the build step for `catalog` with the given model
    pub fn build(catalog: Arc<Catalog>, model: &dyn SimilarityModel) -> Self {
        let started = Instant::now();
        let documents = catalog.documents();
        let matrix = model.build(&documents);

        tracing::info!(
            method = %model.method(),
            movies = catalog.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity structure built"
        );

        Self {
            catalog,
            matrix,
            method: model.method(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn method(&self) -> SimilarityMethod {
        self.method
    }

    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    /// Top `top_n` records most similar to `title`
    ///
    /// Ranked by descending score with ties kept in catalog order. Records
    /// carrying the queried title are never returned.
    pub fn nearest(&self, title: &str, top_n: usize) -> AppResult<Vec<Neighbor<'_>>> {
        let index = self
            .catalog
            .position(title)
            .ok_or_else(|| AppError::NotFound(format!("'{}' is not in the catalog", title)))?;

        let mut ranked: Vec<Neighbor<'_>> = self
            .matrix
            .row(index)
            .iter()
            .zip(self.catalog.movies())
            .enumerate()
            .filter(|(_, (_, movie))| movie.title != title)
            .map(|(index, (score, movie))| Neighbor {
                index,
                movie,
                score: *score,
            })
            .collect();

        // sort_by is stable, so equal scores stay in catalog order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(top_n);

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::similarity::{CountVectorizer, TokenSetJaccard};

    fn scenario_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_movies(vec![
            Movie::new("A")
                .with_genres("action")
                .with_overview("hero saves day"),
            Movie::new("B")
                .with_genres("action")
                .with_overview("hero saves world"),
            Movie::new("C")
                .with_genres("romance")
                .with_overview("love story"),
        ]))
    }

    fn models() -> Vec<Box<dyn SimilarityModel>> {
        vec![Box::new(CountVectorizer::new(5000)), Box::new(TokenSetJaccard)]
    }

    fn titles(neighbors: &[Neighbor<'_>]) -> Vec<String> {
        neighbors.iter().map(|n| n.movie.title.clone()).collect()
    }

    #[test]
    fn test_closest_title_under_both_methods() {
        for model in models() {
            let recommender = Recommender::build(scenario_catalog(), model.as_ref());
            let neighbors = recommender.nearest("A", 1).unwrap();
            assert_eq!(titles(&neighbors), vec!["B"], "method {}", model.method());
        }
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let recommender = Recommender::build(scenario_catalog(), &TokenSetJaccard);
        let result = recommender.nearest("Nonexistent", 5);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_lookup_is_exact() {
        let recommender = Recommender::build(scenario_catalog(), &TokenSetJaccard);
        assert!(recommender.nearest("a", 5).is_err());
        assert!(recommender.nearest("A ", 5).is_err());
    }

    #[test]
    fn test_result_length_and_self_exclusion() {
        for model in models() {
            let recommender = Recommender::build(scenario_catalog(), model.as_ref());
            for title in ["A", "B", "C"] {
                for top_n in 0..5 {
                    let neighbors = recommender.nearest(title, top_n).unwrap();
                    assert_eq!(neighbors.len(), top_n.min(2));
                    assert!(neighbors.iter().all(|n| n.movie.title != title));
                }
            }
        }
    }

    #[test]
    fn test_single_record_catalog() {
        let catalog = Arc::new(Catalog::from_movies(vec![
            Movie::new("Solo").with_overview("smuggler")
        ]));
        let recommender = Recommender::build(catalog, &CountVectorizer::new(5000));
        assert!(recommender.nearest("Solo", 5).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Arc::new(Catalog::from_movies(vec![
            Movie::new("Query").with_overview("robot"),
            Movie::new("First").with_overview("unrelated"),
            Movie::new("Match").with_overview("robot"),
            Movie::new("Second").with_overview("different"),
            Movie::new("Third"),
        ]));
        let recommender = Recommender::build(catalog, &TokenSetJaccard);

        let neighbors = recommender.nearest("Query", 4).unwrap();
        assert_eq!(titles(&neighbors), vec!["Match", "First", "Second", "Third"]);
        assert_eq!(neighbors[0].index, 2);
    }

    #[test]
    fn test_repeated_queries_are_deterministic() {
        for model in models() {
            let recommender = Recommender::build(scenario_catalog(), model.as_ref());
            let first = titles(&recommender.nearest("C", 5).unwrap());
            for _ in 0..10 {
                assert_eq!(titles(&recommender.nearest("C", 5).unwrap()), first);
            }
        }
    }

    #[test]
    fn test_similarity_is_symmetric() {
        for model in models() {
            let recommender = Recommender::build(scenario_catalog(), model.as_ref());
            for i in 0..3 {
                for j in 0..3 {
                    assert_eq!(recommender.similarity(i, j), recommender.similarity(j, i));
                }
            }
        }
    }

    #[test]
    fn test_duplicate_titles_never_recommend_themselves() {
        let catalog = Arc::new(Catalog::from_movies(vec![
            Movie::new("Heat").with_overview("heist crew"),
            Movie::new("Thief").with_overview("heist safe"),
            Movie::new("Heat").with_overview("heist crew remake"),
        ]));
        let recommender = Recommender::build(catalog, &TokenSetJaccard);

        let neighbors = recommender.nearest("Heat", 5).unwrap();
        assert_eq!(titles(&neighbors), vec!["Thief"]);
    }
}
