use std::sync::OnceLock;

use regex::Regex;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{FieldType, IndexRecordOption};
use tantivy::{Index, Term};

use super::schema::SeriesFields;
use crate::models::Series;

fn bracketed_annotation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[[^\]]*\]").expect("static regex"))
}

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"))
}

/// Turns a seed's overview and description into plain query text
///
/// Blank lines are dropped, `[...]` annotations removed, and anything other
/// than ASCII letters, digits and whitespace stripped, so the result can be
/// handed to the query parser without operator syntax leaking through.
pub fn clean_synopsis(overview: &str, description: &str) -> String {
    let joined = format!("{} {}", overview, description);
    let without_blank_lines = joined
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .replace(':', "");
    let without_annotations = bracketed_annotation().replace_all(&without_blank_lines, "");
    non_alphanumeric()
        .replace_all(&without_annotations, "")
        .into_owned()
}

/// Builds the disjunctive "more like this" query for a seed series
///
/// Clauses are added synopsis first, then local genres, then TMDB genre ids.
/// The synopsis is matched against `description` only, so a series whose
/// text lives solely in `tmdb_overview` can only be found through its genres.
pub fn similarity_query(index: &Index, fields: &SeriesFields, seed: &Series) -> BooleanQuery {
    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

    let synopsis = clean_synopsis(seed.tmdb_overview.as_deref().unwrap_or(""), &seed.description);
    if !synopsis.trim().is_empty() {
        let parser = QueryParser::for_index(index, vec![fields.description]);
        let (query, errors) = parser.parse_query_lenient(&synopsis);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "Synopsis query parsed leniently");
        }
        clauses.push((Occur::Should, query));
    }

    let genre_parser = QueryParser::for_index(index, vec![fields.genres]);
    for genre in &seed.genres {
        match genre_parser.parse_query(&quoted(genre)) {
            Ok(query) => clauses.push((Occur::Should, query)),
            Err(e) => tracing::warn!(genre = %genre, error = %e, "Skipping unparsable genre"),
        }
    }

    let genre_id_type = index
        .schema()
        .get_field_entry(fields.tmdb_genre_ids)
        .field_type()
        .clone();
    for genre_id in &seed.tmdb_genre_ids {
        let term = match genre_id_type {
            FieldType::U64(_) => match u64::try_from(*genre_id) {
                Ok(id) => Term::from_field_u64(fields.tmdb_genre_ids, id),
                Err(_) => continue,
            },
            _ => Term::from_field_i64(fields.tmdb_genre_ids, *genre_id),
        };
        clauses.push((
            Occur::Should,
            Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
        ));
    }

    tracing::debug!(
        clauses = clauses.len(),
        genres = seed.genres.len(),
        genre_ids = seed.tmdb_genre_ids.len(),
        "Built similarity query"
    );

    BooleanQuery::new(clauses)
}

/// Quotes a genre label so it matches as one unit under the field's analyzer
fn quoted(label: &str) -> String {
    let inner: String = label.chars().filter(|c| *c != '"' && *c != '\\').collect();
    format!("\"{}\"", inner)
}
