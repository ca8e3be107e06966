use serde::{Deserialize, Serialize};

use super::{Candidate, SeriesAddress};

/// Creator gender totals fed to the pie chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub male: u64,
    pub female: u64,
    pub non_binary: u64,
}

impl GenderBreakdown {
    pub fn total(&self) -> u64 {
        self.male
            .saturating_add(self.female)
            .saturating_add(self.non_binary)
    }

    /// Adds `other` field by field, saturating at `u64::MAX`
    pub fn combine(self, other: GenderBreakdown) -> Self {
        Self {
            male: self.male.saturating_add(other.male),
            female: self.female.saturating_add(other.female),
            non_binary: self.non_binary.saturating_add(other.non_binary),
        }
    }
}

/// Whole creator count for display: missing, negative or NaN is 0, fractions truncate
fn creator_count(stored: Option<f64>) -> u64 {
    match stored {
        Some(count) if count > 0.0 => count as u64,
        _ => 0,
    }
}

/// Everything the presentation layer needs to draw one series card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCard {
    pub address: SeriesAddress,
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub synopsis: String,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    pub creators: GenderBreakdown,
}

impl SeriesCard {
    pub fn from_candidate(candidate: &Candidate, poster_base_url: &str) -> Self {
        let series = &candidate.series;
        let poster_url = series
            .tmdb_poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{}{}", poster_base_url, path));

        Self {
            address: candidate.address,
            id: series.id.clone(),
            title: series.title.clone(),
            url: series.url.clone(),
            poster_url,
            synopsis: series.synopsis().to_string(),
            genres: series.genres.clone(),
            popularity: series.tmdb_popularity,
            vote_average: series.tmdb_vote_average,
            creators: GenderBreakdown {
                male: creator_count(series.males),
                female: creator_count(series.females),
                non_binary: creator_count(series.other),
            },
        }
    }
}

/// The four tabs of the recommendation page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Similarity,
    Popularity,
    GenderReranked,
    Quality,
}

impl ViewKind {
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Similarity => "Ranked by Similarity",
            ViewKind::Popularity => "Ranked by Popularity",
            ViewKind::GenderReranked => "Reranked Gender",
            ViewKind::Quality => "Ranked by Quality",
        }
    }
}

/// One ordering of the recommendations, truncated and deduplicated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationView {
    pub kind: ViewKind,
    pub label: String,
    pub items: Vec<SeriesCard>,
    pub creators: GenderBreakdown,
}

/// Response for a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub seed: SeriesCard,
    /// Views in tab order: similarity, popularity, gender, quality
    pub views: Vec<RecommendationView>,
}

/// Response for a title search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SeriesCard>,
}
