pub mod catalog;
pub mod ranker;
pub mod recommendations;
pub mod reranker;
pub mod title_search;

pub use catalog::SeriesCatalog;
