use std::sync::Arc;

use reelmatch::{
    config::Config,
    routes::{create_router, AppState},
    services::{similarity, Catalog, PosterResolver, Recommender, TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Catalog and similarity matrix are built once and never mutated
    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog, shutting down");
            return Err(e.into());
        }
    };

    let model = similarity::model_for(config.similarity_method, config.max_features);
    let recommender = Arc::new(Recommender::build(catalog, model.as_ref()));

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_url.clone(),
        config.poster_timeout(),
    )?;
    let posters = PosterResolver::new(Arc::new(provider), config.placeholder_poster_url.clone());

    let state = AppState::new(recommender, posters, config.default_top_n);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
