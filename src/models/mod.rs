mod recommendation;
mod series;

pub use recommendation::{
    GenderBreakdown, RecommendationView, RecommendationsResponse, SearchResponse, SeriesCard,
    ViewKind,
};
pub use series::{Candidate, RankAttribute, Series, SeriesAddress};
