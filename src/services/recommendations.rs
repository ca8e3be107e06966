use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;

use crate::{
    config::Config,
    error::AppResult,
    models::{
        Candidate, GenderBreakdown, RankAttribute, RecommendationView, RecommendationsResponse,
        SeriesAddress, SeriesCard, ViewKind,
    },
    services::{
        catalog::SeriesCatalog,
        ranker::{rank, RankBy},
        reranker::reblend,
    },
};

/// Generates "you might also like" recommendations for a selected series
///
/// Performs one retrieval and four ranking passes over the same candidate
/// set, then blends the top of the popularity ranking with the top of the
/// female-creator ranking. Views come back in tab order: similarity,
/// popularity, gender reranked, quality.
pub fn recommend<R: Rng + ?Sized>(
    catalog: &dyn SeriesCatalog,
    config: &Config,
    seed_address: SeriesAddress,
    rng: &mut R,
) -> AppResult<RecommendationsResponse> {
    let start = Instant::now();

    let seed = catalog.fetch(seed_address)?;
    let candidates = catalog.similar_to(&seed, config.similar_limit)?;

    tracing::info!(
        seed = %seed.id,
        address = %seed_address,
        candidates = candidates.len(),
        "Candidate set retrieved"
    );

    let by_similarity = rank(&candidates, seed_address, RankBy::Similarity);
    let by_popularity = rank(
        &candidates,
        seed_address,
        RankBy::Descending(RankAttribute::Popularity),
    );
    let by_quality = rank(
        &candidates,
        seed_address,
        RankBy::Descending(RankAttribute::Quality),
    );
    let by_female_creators = rank(
        &candidates,
        seed_address,
        RankBy::Descending(RankAttribute::FemaleCreators),
    );

    let gender_blend = reblend(
        top(&by_popularity, config.output_limit),
        top(&by_female_creators, config.output_limit),
        config.gender_blend_factor,
        rng,
    );

    let seed_card = SeriesCard::from_candidate(
        &Candidate {
            score: 0.0,
            address: seed_address,
            series: seed,
        },
        &config.poster_base_url,
    );

    let views = vec![
        present(ViewKind::Similarity, &by_similarity, config),
        present(ViewKind::Popularity, &by_popularity, config),
        present(ViewKind::GenderReranked, &gender_blend, config),
        present(ViewKind::Quality, &by_quality, config),
    ];

    tracing::info!(
        seed = %seed_card.id,
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations generated"
    );

    Ok(RecommendationsResponse {
        seed: seed_card,
        views,
    })
}

fn top(ranking: &[Candidate], limit: usize) -> &[Candidate] {
    &ranking[..ranking.len().min(limit)]
}

/// Truncates a ranking to the output size, drops repeated ids and totals
/// the creator genders of what is left
pub fn present(kind: ViewKind, ranking: &[Candidate], config: &Config) -> RecommendationView {
    let mut seen = HashSet::new();
    let items: Vec<SeriesCard> = top(ranking, config.output_limit)
        .iter()
        .filter(|c| seen.insert(c.series.id.as_str()))
        .map(|c| SeriesCard::from_candidate(c, &config.poster_base_url))
        .collect();

    let creators = items
        .iter()
        .fold(GenderBreakdown::default(), |acc, card| acc.combine(card.creators));

    RecommendationView {
        kind,
        label: kind.label().to_string(),
        items,
        creators,
    }
}
