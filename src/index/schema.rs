use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, FAST, INDEXED, STORED,
    STRING, TEXT,
};

use crate::error::AppResult;

pub const ID: &str = "id";
pub const URL: &str = "url";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const IMAGE: &str = "image";
pub const GENRES: &str = "genres";
pub const TMDB_GENRE_IDS: &str = "tmdb_genre_ids";
pub const TMDB_OVERVIEW: &str = "tmdb_overview";
pub const TMDB_POSTER_PATH: &str = "tmdb_poster_path";
pub const TMDB_POPULARITY: &str = "tmdb_popularity";
pub const TMDB_VOTE_AVERAGE: &str = "tmdb_vote_average";
pub const MALES: &str = "males";
pub const FEMALES: &str = "females";
pub const OTHER: &str = "other";

/// Fields the recommendation core reads, resolved against an index schema
#[derive(Debug, Clone, Copy)]
pub struct SeriesFields {
    pub id: Field,
    pub url: Field,
    pub title: Field,
    pub description: Field,
    pub image: Field,
    pub genres: Field,
    pub tmdb_genre_ids: Field,
    pub tmdb_overview: Field,
    pub tmdb_poster_path: Field,
    pub tmdb_popularity: Field,
    pub tmdb_vote_average: Field,
    pub males: Field,
    pub females: Field,
    pub other: Field,
}

impl SeriesFields {
    /// Looks every required field up by name; a missing one is an error
    pub fn resolve(schema: &Schema) -> AppResult<Self> {
        Ok(Self {
            id: schema.get_field(ID)?,
            url: schema.get_field(URL)?,
            title: schema.get_field(TITLE)?,
            description: schema.get_field(DESCRIPTION)?,
            image: schema.get_field(IMAGE)?,
            genres: schema.get_field(GENRES)?,
            tmdb_genre_ids: schema.get_field(TMDB_GENRE_IDS)?,
            tmdb_overview: schema.get_field(TMDB_OVERVIEW)?,
            tmdb_poster_path: schema.get_field(TMDB_POSTER_PATH)?,
            tmdb_popularity: schema.get_field(TMDB_POPULARITY)?,
            tmdb_vote_average: schema.get_field(TMDB_VOTE_AVERAGE)?,
            males: schema.get_field(MALES)?,
            females: schema.get_field(FEMALES)?,
            other: schema.get_field(OTHER)?,
        })
    }
}

/// Schema of the series index as produced by the ingestion job
///
/// Free-text fields use the `en_stem` analyzer; genres are tokenized text so
/// label matching goes through the same analyzer at query time.
pub fn build_schema() -> Schema {
    let stemmed = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("en_stem")
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();

    let mut builder = Schema::builder();
    builder.add_text_field(ID, STRING | STORED);
    builder.add_text_field(URL, STRING | STORED);
    builder.add_text_field(TITLE, stemmed.clone());
    builder.add_text_field(DESCRIPTION, stemmed.clone());
    builder.add_text_field(IMAGE, STRING | STORED);
    builder.add_i64_field("follower", STORED | FAST);
    builder.add_i64_field("score", STORED | FAST);
    builder.add_i64_field("start", STORED | FAST);
    builder.add_text_field("locations", TEXT | STORED);
    builder.add_text_field("countries", TEXT | STORED);
    builder.add_text_field(GENRES, TEXT | STORED);
    builder.add_f64_field(MALES, STORED | FAST);
    builder.add_f64_field(FEMALES, STORED | FAST);
    builder.add_f64_field(OTHER, STORED | FAST);
    builder.add_f64_field("non_males", STORED | FAST);
    builder.add_text_field(TMDB_OVERVIEW, stemmed);
    builder.add_text_field(TMDB_POSTER_PATH, STRING | STORED);
    builder.add_i64_field(TMDB_GENRE_IDS, STORED | INDEXED);
    builder.add_f64_field(TMDB_POPULARITY, STORED | FAST);
    builder.add_f64_field(TMDB_VOTE_AVERAGE, STORED | FAST);
    builder.add_i64_field("tmdb_vote_count", STORED | FAST);
    builder.build()
}
