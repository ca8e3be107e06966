//! Read-only access to the pre-built series index.

pub mod document;
pub mod schema;
pub mod similarity;

use std::path::Path;

use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::{DocAddress, Index, IndexWriter, ReloadPolicy, Score, Searcher, TantivyDocument};

use crate::{
    error::{AppError, AppResult},
    models::{Candidate, Series, SeriesAddress},
    services::catalog::SeriesCatalog,
};
use document::{decode_series, encode_series};
use schema::SeriesFields;

/// Handle on the series index and its process-wide searcher
///
/// The searcher is taken once; addresses handed out stay valid for the life
/// of this value because nothing writes to the index through it.
pub struct SeriesIndex {
    index: Index,
    searcher: Searcher,
    fields: SeriesFields,
}

impl SeriesIndex {
    /// Opens an existing index directory
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let index = Index::open_in_dir(path)?;
        let series_index = Self::from_index(index)?;

        tracing::info!(
            path = %path.display(),
            documents = series_index.searcher.num_docs(),
            segments = series_index.searcher.segment_readers().len(),
            "Series index opened"
        );

        Ok(series_index)
    }

    /// Builds a RAM index holding `series`, for tests and demos
    pub fn in_memory(series: &[Series]) -> AppResult<Self> {
        let index = Index::create_in_ram(schema::build_schema());
        let fields = SeriesFields::resolve(&index.schema())?;

        let mut writer: IndexWriter = index.writer_with_num_threads(1, 50_000_000)?;
        for item in series {
            writer.add_document(encode_series(item, &fields))?;
        }
        writer.commit()?;

        Self::from_index(index)
    }

    fn from_index(index: Index) -> AppResult<Self> {
        let fields = SeriesFields::resolve(&index.schema())?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let searcher = reader.searcher();

        Ok(Self {
            index,
            searcher,
            fields,
        })
    }

    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }

    /// Runs `query` and decodes up to `limit` hits, best first
    fn collect(&self, query: &dyn Query, limit: usize) -> AppResult<Vec<Candidate>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hits: Vec<(Score, DocAddress)> =
            self.searcher.search(query, &TopDocs::with_limit(limit))?;

        let mut candidates = Vec::with_capacity(hits.len());
        for (score, address) in hits {
            let doc: TantivyDocument = self.searcher.doc(address)?;
            match decode_series(&doc, &self.fields) {
                Some(series) => candidates.push(Candidate {
                    score,
                    address: address.into(),
                    series,
                }),
                None => tracing::warn!(
                    segment = address.segment_ord,
                    doc = address.doc_id,
                    "Skipping stored document without id or title"
                ),
            }
        }

        Ok(candidates)
    }

    fn is_live(&self, address: SeriesAddress) -> bool {
        self.searcher
            .segment_readers()
            .get(address.segment_ord as usize)
            .map(|segment| {
                address.doc_id < segment.max_doc() && !segment.is_deleted(address.doc_id)
            })
            .unwrap_or(false)
    }
}

impl SeriesCatalog for SeriesIndex {
    fn search_titles(&self, query: &str, limit: usize) -> AppResult<Vec<Candidate>> {
        let parser =
            QueryParser::for_index(&self.index, vec![self.fields.title, self.fields.description]);
        let (parsed, errors) = parser.parse_query_lenient(query);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "Title query parsed leniently");
        }
        self.collect(parsed.as_ref(), limit)
    }

    fn fetch(&self, address: SeriesAddress) -> AppResult<Series> {
        if !self.is_live(address) {
            return Err(AppError::NotFound(format!("series {}", address)));
        }

        let doc: TantivyDocument = self.searcher.doc(DocAddress::from(address))?;
        decode_series(&doc, &self.fields)
            .ok_or_else(|| AppError::NotFound(format!("series {} has no id or title", address)))
    }

    fn similar_to(&self, seed: &Series, limit: usize) -> AppResult<Vec<Candidate>> {
        let query = similarity::similarity_query(&self.index, &self.fields, seed);
        if query.clauses().is_empty() {
            return Ok(Vec::new());
        }
        self.collect(&query, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str, title: &str, genres: &[&str], genre_ids: &[i64], overview: &str) -> Series {
        Series {
            id: id.to_string(),
            title: title.to_string(),
            url: format!("https://example.org/{}", id),
            description: overview.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            tmdb_genre_ids: genre_ids.to_vec(),
            tmdb_overview: Some(overview.to_string()),
            ..Series::default()
        }
    }

    fn catalog() -> SeriesIndex {
        SeriesIndex::in_memory(&[
            series("S1", "Breaking Bad", &["Drama"], &[18], "A chemistry teacher turns to crime."),
            series("A", "Ozark", &["Thriller"], &[80], "Financial advisor launders money."),
            series("B", "The Wire", &["Drama"], &[], "Baltimore police and drug dealers."),
            series("C", "Chemistry Club", &["Comedy"], &[35], "Students and their chemistry teachers."),
            series("D", "Doctor Who", &["Science Fiction"], &[10765], "Time lord travels through space."),
            series("E", "Heartland", &["Family"], &[18], "Life on a horse ranch."),
        ])
        .unwrap()
    }

    // One writer thread and one commit leave every document in segment 0
    fn address_of(index: &SeriesIndex, id: &str) -> SeriesAddress {
        (0..index.num_docs() as u32)
            .map(|doc| SeriesAddress::new(0, doc))
            .find(|address| index.fetch(*address).map(|s| s.id == id).unwrap_or(false))
            .unwrap_or_else(|| panic!("no address for {}", id))
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let missing = std::env::temp_dir().join("series-recs-no-such-index");
        let result = SeriesIndex::open(&missing);
        assert!(matches!(result, Err(AppError::Index(_))));
    }

    #[test]
    fn test_in_memory_counts_documents() {
        assert_eq!(catalog().num_docs(), 6);
    }

    #[test]
    fn test_search_titles_matches_stemmed_title() {
        let index = catalog();
        let hits = index.search_titles("breaking", 5).unwrap();
        assert_eq!(hits[0].series.id, "S1");
    }

    #[test]
    fn test_search_titles_no_match_is_empty() {
        let index = catalog();
        assert!(index.search_titles("zzzqqq", 5).unwrap().is_empty());
    }

    #[test]
    fn test_similar_to_matches_genre_genre_id_or_synopsis() {
        let index = catalog();
        let seed = series("S1", "Breaking Bad", &["Drama"], &[18], "A chemistry teacher turns to crime.");
        let ids: Vec<String> = index
            .similar_to(&seed, 25)
            .unwrap()
            .into_iter()
            .map(|c| c.series.id)
            .collect();

        // genre label, genre id and stemmed synopsis overlap
        assert!(ids.contains(&"S1".to_string()));
        assert!(ids.contains(&"B".to_string()));
        assert!(ids.contains(&"E".to_string()));
        assert!(ids.contains(&"C".to_string()));
        assert!(!ids.contains(&"A".to_string()));
        assert!(!ids.contains(&"D".to_string()));
        assert_eq!(ids[0], "S1");
    }

    #[test]
    fn test_similar_to_respects_limit() {
        let index = catalog();
        let seed = series("S1", "Breaking Bad", &["Drama"], &[18], "A chemistry teacher turns to crime.");
        assert_eq!(index.similar_to(&seed, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_similar_to_empty_seed_returns_nothing() {
        let index = catalog();
        let seed = Series {
            id: "Z".to_string(),
            title: "Nothing".to_string(),
            ..Series::default()
        };
        assert!(index.similar_to(&seed, 25).unwrap().is_empty());
    }

    #[test]
    fn test_multi_word_genre_matches_as_phrase() {
        let index = catalog();
        let seed = Series {
            id: "Z".to_string(),
            title: "Seed".to_string(),
            genres: vec!["Science Fiction".to_string()],
            ..Series::default()
        };
        let ids: Vec<String> = index
            .similar_to(&seed, 25)
            .unwrap()
            .into_iter()
            .map(|c| c.series.id)
            .collect();
        assert_eq!(ids, vec!["D"]);
    }

    #[test]
    fn test_fetch_round_trips_address() {
        let index = catalog();
        let address = address_of(&index, "S1");
        let fetched = index.fetch(address).unwrap();
        assert_eq!(fetched.title, "Breaking Bad");
    }

    #[test]
    fn test_fetch_unknown_address_is_not_found() {
        let index = catalog();
        assert!(matches!(
            index.fetch(SeriesAddress::new(0, 999)),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            index.fetch(SeriesAddress::new(42, 0)),
            Err(AppError::NotFound(_))
        ));
    }
}
