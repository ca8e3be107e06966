//! Series catalog abstraction
//!
//! Services talk to the index through this trait so they can be exercised
//! against mocks. `SeriesIndex` is the production implementation.

use crate::{
    error::AppResult,
    models::{Candidate, Series, SeriesAddress},
};

#[cfg_attr(test, mockall::automock)]
pub trait SeriesCatalog: Send + Sync {
    /// Free-text search over titles and descriptions, best match first
    fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<Candidate>>;

    /// Loads the series stored at `address`
    fn fetch(&self, address: SeriesAddress) -> AppResult<Series>;

    /// Candidate set for `seed`: up to `limit` hits of the similarity query,
    /// in relevance order. The seed itself may be among them.
    fn similar_to(&self, seed: &Series, limit: usize) -> AppResult<Vec<Candidate>>;
}
