use std::cmp::Ordering;

use crate::models::{Candidate, RankAttribute, SeriesAddress};

/// How a candidate set is turned into a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Keep retrieval (similarity) order; no attribute is consulted
    Similarity,
    /// Sort by the attribute, highest first; series without it are dropped
    Descending(RankAttribute),
}

/// Orders a candidate set, always dropping the entry at `exclude`
///
/// Ties under `Descending` keep retrieval order.
pub fn rank(candidates: &[Candidate], exclude: SeriesAddress, by: RankBy) -> Vec<Candidate> {
    let remaining = candidates.iter().filter(|c| c.address != exclude);

    let ranked: Vec<Candidate> = match by {
        RankBy::Similarity => remaining.cloned().collect(),
        RankBy::Descending(attribute) => {
            let mut scored: Vec<(f64, &Candidate)> = remaining
                .filter_map(|c| match c.series.attribute(attribute) {
                    Some(value) if !value.is_nan() => Some((value, c)),
                    _ => {
                        tracing::debug!(
                            id = %c.series.id,
                            attribute = attribute.field_name(),
                            "Dropping series without rank attribute"
                        );
                        None
                    }
                })
                .collect();

            // sort_by is stable; NaN is gone, so only numerically equal values compare Equal
            scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
            scored.into_iter().map(|(_, c)| c.clone()).collect()
        }
    };

    tracing::debug!(
        by = ?by,
        candidates = candidates.len(),
        ranked = ranked.len(),
        "Ranked candidate set"
    );

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Series;

    fn candidate(doc: u32, id: &str, popularity: Option<f64>) -> Candidate {
        Candidate {
            score: 10.0 - doc as f32,
            address: SeriesAddress::new(0, doc),
            series: Series {
                id: id.to_string(),
                title: id.to_string(),
                tmdb_popularity: popularity,
                ..Series::default()
            },
        }
    }

    fn ids(ranking: &[Candidate]) -> Vec<&str> {
        ranking.iter().map(|c| c.series.id.as_str()).collect()
    }

    #[test]
    fn test_popularity_ranking_drops_missing_values() {
        let seed = SeriesAddress::new(0, 0);
        let candidates = vec![
            candidate(0, "S1", Some(50.0)),
            candidate(1, "A", Some(9.1)),
            candidate(2, "B", Some(9.9)),
            candidate(3, "C", None),
        ];

        let ranking = rank(&candidates, seed, RankBy::Descending(RankAttribute::Popularity));
        assert_eq!(ids(&ranking), vec!["B", "A"]);
    }

    #[test]
    fn test_similarity_ranking_keeps_order_and_missing_values() {
        let seed = SeriesAddress::new(0, 2);
        let candidates = vec![
            candidate(0, "A", None),
            candidate(1, "B", Some(1.0)),
            candidate(2, "S1", Some(3.0)),
            candidate(3, "C", Some(2.0)),
        ];

        let ranking = rank(&candidates, seed, RankBy::Similarity);
        assert_eq!(ids(&ranking), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_seed_never_in_any_ranking() {
        let seed = SeriesAddress::new(0, 1);
        let candidates = vec![
            candidate(0, "A", Some(1.0)),
            candidate(1, "S1", Some(100.0)),
            candidate(2, "B", Some(2.0)),
        ];

        for by in [
            RankBy::Similarity,
            RankBy::Descending(RankAttribute::Popularity),
            RankBy::Descending(RankAttribute::Quality),
            RankBy::Descending(RankAttribute::FemaleCreators),
        ] {
            assert!(rank(&candidates, seed, by).iter().all(|c| c.address != seed));
        }
    }

    #[test]
    fn test_descending_is_non_increasing_and_stable() {
        let seed = SeriesAddress::new(9, 9);
        let candidates = vec![
            candidate(0, "A", Some(2.0)),
            candidate(1, "B", Some(5.0)),
            candidate(2, "C", Some(2.0)),
            candidate(3, "D", Some(7.5)),
            candidate(4, "E", Some(5.0)),
        ];

        let ranking = rank(&candidates, seed, RankBy::Descending(RankAttribute::Popularity));
        assert_eq!(ids(&ranking), vec!["D", "B", "E", "A", "C"]);

        let values: Vec<f64> = ranking
            .iter()
            .map(|c| c.series.tmdb_popularity.unwrap())
            .collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_female_creator_ranking_uses_counts() {
        let seed = SeriesAddress::new(9, 9);
        let mut candidates = vec![
            candidate(0, "A", None),
            candidate(1, "B", None),
            candidate(2, "C", None),
        ];
        candidates[0].series.females = Some(1.0);
        candidates[1].series.females = Some(4.0);

        let ranking = rank(&candidates, seed, RankBy::Descending(RankAttribute::FemaleCreators));
        assert_eq!(ids(&ranking), vec!["B", "A"]);
    }

    #[test]
    fn test_negative_and_fractional_counts_still_rank() {
        let seed = SeriesAddress::new(9, 9);
        let mut candidates = vec![
            candidate(0, "A", None),
            candidate(1, "B", None),
            candidate(2, "C", None),
        ];
        candidates[0].series.females = Some(-1.0);
        candidates[1].series.females = Some(0.5);

        let ranking = rank(&candidates, seed, RankBy::Descending(RankAttribute::FemaleCreators));
        assert_eq!(ids(&ranking), vec!["B", "A"]);
    }

    #[test]
    fn test_signed_zeros_tie_in_retrieval_order() {
        let seed = SeriesAddress::new(9, 9);
        let candidates = vec![
            candidate(0, "neg", Some(-0.0)),
            candidate(1, "pos", Some(0.0)),
            candidate(2, "top", Some(f64::INFINITY)),
        ];

        let ranking = rank(&candidates, seed, RankBy::Descending(RankAttribute::Popularity));
        assert_eq!(ids(&ranking), vec!["top", "neg", "pos"]);
    }

    #[test]
    fn test_empty_candidate_set() {
        let ranking = rank(&[], SeriesAddress::new(0, 0), RankBy::Similarity);
        assert!(ranking.is_empty());
    }
}
