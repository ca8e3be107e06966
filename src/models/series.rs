use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use tantivy::DocAddress;

/// Opaque handle of a document within the process-wide searcher
///
/// Rendered as `"<segment>-<doc>"` so clients can pass it back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesAddress {
    pub segment_ord: u32,
    pub doc_id: u32,
}

impl SeriesAddress {
    pub fn new(segment_ord: u32, doc_id: u32) -> Self {
        Self {
            segment_ord,
            doc_id,
        }
    }
}

impl From<DocAddress> for SeriesAddress {
    fn from(address: DocAddress) -> Self {
        Self::new(address.segment_ord, address.doc_id)
    }
}

impl From<SeriesAddress> for DocAddress {
    fn from(address: SeriesAddress) -> Self {
        DocAddress::new(address.segment_ord, address.doc_id)
    }
}

impl Display for SeriesAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.segment_ord, self.doc_id)
    }
}

impl FromStr for SeriesAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (segment, doc) = s
            .split_once('-')
            .ok_or_else(|| format!("malformed series address '{}'", s))?;
        let segment_ord = segment
            .parse()
            .map_err(|_| format!("malformed segment in series address '{}'", s))?;
        let doc_id = doc
            .parse()
            .map_err(|_| format!("malformed document in series address '{}'", s))?;
        Ok(Self::new(segment_ord, doc_id))
    }
}

impl TryFrom<String> for SeriesAddress {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeriesAddress> for String {
    fn from(address: SeriesAddress) -> Self {
        address.to_string()
    }
}

/// A TV series as stored in the index, decoded once at the retrieval boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Local synopsis; empty when the source had none
    pub description: String,
    pub image: Option<String>,
    /// Local genre labels
    pub genres: Vec<String>,
    /// TMDB genre identifiers
    pub tmdb_genre_ids: Vec<i64>,
    pub tmdb_overview: Option<String>,
    pub tmdb_poster_path: Option<String>,
    pub tmdb_popularity: Option<f64>,
    pub tmdb_vote_average: Option<f64>,
    /// Creator counts as stored; cards clamp them to whole non-negative numbers
    pub males: Option<f64>,
    pub females: Option<f64>,
    pub other: Option<f64>,
}

impl Series {
    /// TMDB overview when present, local description otherwise
    pub fn synopsis(&self) -> &str {
        match self.tmdb_overview.as_deref() {
            Some(overview) if !overview.is_empty() => overview,
            _ => &self.description,
        }
    }

    /// Value used to order this series by `attribute`, if it has one
    pub fn attribute(&self, attribute: RankAttribute) -> Option<f64> {
        match attribute {
            RankAttribute::Popularity => self.tmdb_popularity,
            RankAttribute::Quality => self.tmdb_vote_average,
            RankAttribute::FemaleCreators => self.females,
        }
    }
}

/// Numeric attributes a candidate set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankAttribute {
    Popularity,
    Quality,
    FemaleCreators,
}

impl RankAttribute {
    /// Stored index field backing this attribute
    pub fn field_name(self) -> &'static str {
        match self {
            RankAttribute::Popularity => "tmdb_popularity",
            RankAttribute::Quality => "tmdb_vote_average",
            RankAttribute::FemaleCreators => "females",
        }
    }
}

/// One hit of a retrieval: relevance score, address and the decoded series
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub score: f32,
    pub address: SeriesAddress,
    pub series: Series,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_and_parse() {
        let address = SeriesAddress::new(2, 417);
        assert_eq!(address.to_string(), "2-417");
        assert_eq!("2-417".parse::<SeriesAddress>().unwrap(), address);
    }

    #[test]
    fn test_address_parse_rejects_garbage() {
        assert!("".parse::<SeriesAddress>().is_err());
        assert!("17".parse::<SeriesAddress>().is_err());
        assert!("a-1".parse::<SeriesAddress>().is_err());
        assert!("1-".parse::<SeriesAddress>().is_err());
        assert!("1--2".parse::<SeriesAddress>().is_err());
    }

    #[test]
    fn test_address_serde_as_string() {
        let address = SeriesAddress::new(0, 3);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, r#""0-3""#);

        let deserialized: SeriesAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, address);
    }

    #[test]
    fn test_synopsis_falls_back_to_description() {
        let mut series = Series {
            description: "Local text".to_string(),
            tmdb_overview: Some(String::new()),
            ..Series::default()
        };
        assert_eq!(series.synopsis(), "Local text");

        series.tmdb_overview = Some("TMDB text".to_string());
        assert_eq!(series.synopsis(), "TMDB text");
    }

    #[test]
    fn test_attribute_lookup() {
        let series = Series {
            tmdb_popularity: Some(9.1),
            females: Some(2.0),
            ..Series::default()
        };
        assert_eq!(series.attribute(RankAttribute::Popularity), Some(9.1));
        assert_eq!(series.attribute(RankAttribute::Quality), None);
        assert_eq!(series.attribute(RankAttribute::FemaleCreators), Some(2.0));
        assert_eq!(RankAttribute::FemaleCreators.field_name(), "females");
    }
}
