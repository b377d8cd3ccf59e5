/// Catalog loader
///
/// Reads the static JSON snapshot of the movie table into an ordered, immutable
/// [`Catalog`]. Three layouts are accepted, matching the common ways a dataframe
/// gets exported:
///
/// 1. A list of records: `[{"title": "Avatar", "genres": "..."}, ...]`
/// 2. Column lists: `{"title": ["Avatar", ...], "genres": [...]}`
/// 3. Column maps keyed by row index: `{"title": {"0": "Avatar"}, ...}`
///
/// Anything else is rejected with a [`LoadError`] rather than coerced.
use crate::{
    error::LoadError,
    models::{Movie, MovieId},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

type Row = Map<String, Value>;

/// Text columns accept a plain string or a list of words
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Words(Vec<String>),
}

impl TextValue {
    fn into_text(self) -> String {
        match self {
            TextValue::Text(text) => text,
            TextValue::Words(words) => words.join(" "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    title: String,
    #[serde(default)]
    genres: Option<TextValue>,
    #[serde(default)]
    overview: Option<TextValue>,
    #[serde(default)]
    keywords: Option<TextValue>,
    #[serde(default)]
    cast: Option<TextValue>,
    #[serde(default)]
    crew: Option<TextValue>,
    #[serde(default)]
    movie_id: Option<MovieId>,
}

fn text(value: Option<TextValue>) -> String {
    value.map(TextValue::into_text).unwrap_or_default()
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Movie {
            title: raw.title,
            genres: text(raw.genres),
            overview: text(raw.overview),
            keywords: text(raw.keywords),
            cast: text(raw.cast),
            crew: text(raw.crew),
            movie_id: raw.movie_id,
        }
    }
}

/// Ordered movie table, fixed at load time
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    /// Title → position of its first occurrence
    positions: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Loads and validates a catalog snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(value)?;

        tracing::info!(
            path = %path.display(),
            movies = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Validates an already-parsed snapshot
    pub fn from_json(value: Value) -> Result<Self, LoadError> {
        let rows = into_rows(value)?;

        let movies = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| parse_row(index, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_movies(movies))
    }

    /// Builds a catalog from records already in memory
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut positions = HashMap::with_capacity(movies.len());
        let mut duplicates = 0usize;

        for (index, movie) in movies.iter().enumerate() {
            if positions.contains_key(&movie.title) {
                duplicates += 1;
            } else {
                positions.insert(movie.title.clone(), index);
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "Catalog contains duplicate titles; lookups use the first occurrence"
            );
        }

        if movies.is_empty() {
            tracing::warn!("Catalog is empty; no recommendations can be made");
        }

        Self {
            movies,
            positions,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Position of the first record with exactly this title
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|movie| movie.title.as_str())
    }

    /// One document per record, aligned with catalog positions
    pub fn documents(&self) -> Vec<String> {
        self.movies.iter().map(Movie::document).collect()
    }

    /// First `count` records, for display
    pub fn preview(&self, count: usize) -> &[Movie] {
        &self.movies[..count.min(self.movies.len())]
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn schema(message: impl Into<String>) -> LoadError {
    LoadError::Schema(message.into())
}

fn parse_row(index: usize, row: Row) -> Result<Movie, LoadError> {
    let raw: RawMovie = serde_json::from_value(Value::Object(row))
        .map_err(|e| schema(format!("row {}: {}", index, e)))?;

    if raw.title.trim().is_empty() {
        return Err(schema(format!("row {}: title is empty", index)));
    }

    Ok(Movie::from(raw))
}

/// Normalizes any accepted layout into one JSON object per record
fn into_rows(value: Value) -> Result<Vec<Row>, LoadError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(row) => Ok(row),
                _ => Err(schema(format!("row {} is not an object", index))),
            })
            .collect(),
        Value::Object(columns) => columns_to_rows(columns),
        _ => Err(schema(
            "expected a list of records or an object of columns",
        )),
    }
}

fn columns_to_rows(mut columns: Map<String, Value>) -> Result<Vec<Row>, LoadError> {
    let titles = columns
        .remove("title")
        .ok_or_else(|| schema("missing required column `title`"))?;

    match titles {
        Value::Array(titles) => {
            let mut rows: Vec<Row> = titles
                .into_iter()
                .map(|title| {
                    let mut row = Row::new();
                    row.insert("title".to_string(), title);
                    row
                })
                .collect();

            for (name, column) in columns {
                let Value::Array(values) = column else {
                    return Err(schema(format!("column `{}` is not a list", name)));
                };

                if values.len() != rows.len() {
                    return Err(schema(format!(
                        "column `{}` has {} values but `title` has {}",
                        name,
                        values.len(),
                        rows.len()
                    )));
                }

                for (row, value) in rows.iter_mut().zip(values) {
                    row.insert(name.clone(), value);
                }
            }

            Ok(rows)
        }
        Value::Object(titles) => {
            let mut keyed: BTreeMap<u64, Row> = BTreeMap::new();

            for (key, title) in titles {
                let index = parse_row_key(&key)?;
                let mut row = Row::new();
                row.insert("title".to_string(), title);
                if keyed.insert(index, row).is_some() {
                    return Err(schema(format!("duplicate row key `{}`", key)));
                }
            }

            for (name, column) in columns {
                let Value::Object(values) = column else {
                    return Err(schema(format!(
                        "column `{}` is not an object keyed by row",
                        name
                    )));
                };

                for (key, value) in values {
                    let index = parse_row_key(&key)?;
                    let row = keyed.get_mut(&index).ok_or_else(|| {
                        schema(format!(
                            "column `{}` has row `{}` which has no title",
                            name, key
                        ))
                    })?;
                    row.insert(name.clone(), value);
                }
            }

            Ok(keyed.into_values().collect())
        }
        _ => Err(schema(
            "column `title` must be a list or an object keyed by row",
        )),
    }
}

fn parse_row_key(key: &str) -> Result<u64, LoadError> {
    key.parse::<u64>()
        .map_err(|_| schema(format!("row key `{}` is not a non-negative integer", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_list_of_records() {
        let catalog = Catalog::from_json(json!([
            {"title": "Avatar", "genres": "Action", "movie_id": 19995},
            {"title": "Spectre", "overview": null}
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let avatar = catalog.get(0).unwrap();
        assert_eq!(avatar.genres, "Action");
        assert_eq!(avatar.overview, "");
        assert_eq!(avatar.movie_id, Some(MovieId::Integer(19995)));

        let spectre = catalog.get(1).unwrap();
        assert_eq!(spectre.overview, "");
        assert_eq!(spectre.crew, "");
        assert_eq!(spectre.movie_id, None);
    }

    #[test]
    fn test_column_lists() {
        let catalog = Catalog::from_json(json!({
            "title": ["Avatar", "Spectre"],
            "genres": ["Action Adventure", "Action Crime"],
            "movie_id": [19995, "206647"]
        }))
        .unwrap();

        assert_eq!(catalog.titles().collect::<Vec<_>>(), vec!["Avatar", "Spectre"]);
        assert_eq!(catalog.get(1).unwrap().genres, "Action Crime");
        assert_eq!(catalog.get(1).unwrap().tmdb_id(), Some(206647));
        assert_eq!(catalog.get(0).unwrap().cast, "");
    }

    #[test]
    fn test_column_maps_are_ordered_by_row_index() {
        let catalog = Catalog::from_json(json!({
            "title": {"10": "Tangled", "2": "Avatar", "7": "Spectre"},
            "overview": {"2": "alien moon", "10": "tower hair"}
        }))
        .unwrap();

        assert_eq!(
            catalog.titles().collect::<Vec<_>>(),
            vec!["Avatar", "Spectre", "Tangled"]
        );
        assert_eq!(catalog.get(0).unwrap().overview, "alien moon");
        assert_eq!(catalog.get(1).unwrap().overview, "");
        assert_eq!(catalog.get(2).unwrap().overview, "tower hair");
    }

    #[test]
    fn test_word_lists_are_joined() {
        let catalog = Catalog::from_json(json!([
            {"title": "Avatar", "genres": ["Action", "Adventure"], "cast": []}
        ]))
        .unwrap();

        assert_eq!(catalog.get(0).unwrap().genres, "Action Adventure");
        assert_eq!(catalog.get(0).unwrap().cast, "");
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let catalog = Catalog::from_json(json!([
            {"title": "Avatar", "tags": "action alien", "vote_average": 7.2}
        ]))
        .unwrap();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_title_column() {
        let err = Catalog::from_json(json!({"genres": ["Action"]})).unwrap_err();
        assert!(matches!(err, LoadError::Schema(msg) if msg.contains("title")));
    }

    #[test]
    fn test_record_without_title() {
        let err = Catalog::from_json(json!([{"title": "Avatar"}, {"genres": "Action"}]))
            .unwrap_err();
        assert!(matches!(err, LoadError::Schema(msg) if msg.starts_with("row 1")));
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = Catalog::from_json(json!([{"title": "  "}])).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_unequal_columns_rejected() {
        let err = Catalog::from_json(json!({
            "title": ["Avatar", "Spectre"],
            "genres": ["Action"]
        }))
        .unwrap_err();
        assert!(matches!(err, LoadError::Schema(msg) if msg.contains("genres")));
    }

    #[test]
    fn test_bad_text_type_rejected() {
        let err = Catalog::from_json(json!([{"title": "Avatar", "overview": 42}])).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_scalar_snapshot_rejected() {
        let err = Catalog::from_json(json!("movies")).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_non_numeric_row_key_rejected() {
        let err = Catalog::from_json(json!({"title": {"first": "Avatar"}})).unwrap_err();
        assert!(matches!(err, LoadError::Schema(msg) if msg.contains("first")));
    }

    #[test]
    fn test_orphan_row_key_rejected() {
        let err = Catalog::from_json(json!({
            "title": {"0": "Avatar"},
            "genres": {"0": "Action", "1": "Drama"}
        }))
        .unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let catalog = Catalog::from_movies(vec![
            Movie::new("Heat"),
            Movie::new("Alien"),
            Movie::new("Heat"),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position("Heat"), Some(0));
        assert_eq!(catalog.position("Alien"), Some(1));
        assert_eq!(catalog.position("heat"), None);
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = Catalog::from_json(json!({"title": []})).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.preview(5).is_empty());
    }

    #[test]
    fn test_preview_is_bounded() {
        let catalog = Catalog::from_movies(vec![Movie::new("Heat"), Movie::new("Alien")]);
        assert_eq!(catalog.preview(5).len(), 2);
        assert_eq!(catalog.preview(1)[0].title, "Heat");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Avatar", "movie_id": 19995}}]"#).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.position("Avatar"), Some(0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("movies.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
