use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::{
    error::{AppError, AppResult},
    models::SeriesCard,
    services::catalog::SeriesCatalog,
};

fn punctuation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("static regex"))
}

/// Service function for title search
///
/// Blank input is rejected before the index is touched. Punctuation is
/// replaced with spaces so user input never reaches the parser as query
/// syntax, and repeated ids keep their first hit.
pub fn search_series(
    catalog: &dyn SeriesCatalog,
    query: &str,
    limit: usize,
    poster_base_url: &str,
) -> AppResult<Vec<SeriesCard>> {
    if query.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search term must not be empty".to_string(),
        ));
    }

    let cleaned = punctuation().replace_all(query, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    let hits = catalog.search_titles(cleaned, limit)?;

    let mut seen = HashSet::new();
    let cards: Vec<SeriesCard> = hits
        .iter()
        .filter(|hit| seen.insert(hit.series.id.clone()))
        .map(|hit| SeriesCard::from_candidate(hit, poster_base_url))
        .collect();

    tracing::info!(
        query = %cleaned,
        hits = hits.len(),
        results = cards.len(),
        "Title search completed"
    );

    Ok(cards)
}
