use tantivy::schema::{Field, Value};
use tantivy::TantivyDocument;

use super::schema::SeriesFields;
use crate::models::Series;

/// Decodes a stored document into a `Series`
///
/// Returns `None` when the document has no `id` or `title`; every other
/// field degrades to empty or `None`.
pub fn decode_series(doc: &TantivyDocument, fields: &SeriesFields) -> Option<Series> {
    let id = first_text(doc, fields.id).filter(|id| !id.is_empty())?;
    let title = first_text(doc, fields.title)?;

    Some(Series {
        id,
        title,
        url: first_text(doc, fields.url).unwrap_or_default(),
        description: first_text(doc, fields.description).unwrap_or_default(),
        image: first_text(doc, fields.image),
        genres: all_text(doc, fields.genres),
        tmdb_genre_ids: all_integers(doc, fields.tmdb_genre_ids),
        tmdb_overview: first_text(doc, fields.tmdb_overview),
        tmdb_poster_path: first_text(doc, fields.tmdb_poster_path),
        tmdb_popularity: first_number(doc, fields.tmdb_popularity),
        tmdb_vote_average: first_number(doc, fields.tmdb_vote_average),
        males: first_number(doc, fields.males),
        females: first_number(doc, fields.females),
        other: first_number(doc, fields.other),
    })
}

/// Encodes a `Series` with the field layout `decode_series` expects
pub fn encode_series(series: &Series, fields: &SeriesFields) -> TantivyDocument {
    let mut doc = TantivyDocument::default();
    doc.add_text(fields.id, &series.id);
    doc.add_text(fields.url, &series.url);
    doc.add_text(fields.title, &series.title);
    doc.add_text(fields.description, &series.description);
    if let Some(image) = &series.image {
        doc.add_text(fields.image, image);
    }
    for genre in &series.genres {
        doc.add_text(fields.genres, genre);
    }
    for genre_id in &series.tmdb_genre_ids {
        doc.add_i64(fields.tmdb_genre_ids, *genre_id);
    }
    if let Some(overview) = &series.tmdb_overview {
        doc.add_text(fields.tmdb_overview, overview);
    }
    if let Some(poster) = &series.tmdb_poster_path {
        doc.add_text(fields.tmdb_poster_path, poster);
    }
    if let Some(popularity) = series.tmdb_popularity {
        doc.add_f64(fields.tmdb_popularity, popularity);
    }
    if let Some(vote_average) = series.tmdb_vote_average {
        doc.add_f64(fields.tmdb_vote_average, vote_average);
    }
    for (field, count) in [
        (fields.males, series.males),
        (fields.females, series.females),
        (fields.other, series.other),
    ] {
        if let Some(count) = count {
            doc.add_f64(field, count);
        }
    }
    doc
}

fn first_text(doc: &TantivyDocument, field: Field) -> Option<String> {
    doc.get_first(field)
        .and_then(|value| value.as_str().map(str::to_string))
}

fn all_text(doc: &TantivyDocument, field: Field) -> Vec<String> {
    doc.get_all(field)
        .filter_map(|value| value.as_str().map(str::to_string))
        .collect()
}

fn all_integers(doc: &TantivyDocument, field: Field) -> Vec<i64> {
    doc.get_all(field)
        .filter_map(|value| {
            value
                .as_i64()
                .or_else(|| value.as_u64().and_then(|v| i64::try_from(v).ok()))
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        })
        .collect()
}

/// First value of `field` as a float, whatever numeric form it was stored in
///
/// Only absent, non-numeric and NaN values come back as `None`; negative,
/// fractional and infinite numbers are kept.
fn first_number(doc: &TantivyDocument, field: Field) -> Option<f64> {
    let value = doc.get_first(field)?;
    value
        .as_f64()
        .or_else(|| value.as_i64().map(|v| v as f64))
        .or_else(|| value.as_u64().map(|v| v as f64))
        .or_else(|| value.as_str().and_then(parse_number))
        .filter(|v| !v.is_nan())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
