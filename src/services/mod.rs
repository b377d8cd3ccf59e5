pub mod catalog;
pub mod providers;
pub mod recommendations;
pub mod recommender;
pub mod similarity;

pub use catalog::Catalog;
pub use providers::{PosterProvider, PosterResolver, TmdbProvider};
pub use recommender::Recommender;
