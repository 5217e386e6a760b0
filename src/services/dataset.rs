use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::core::RecordStore;
use crate::models::RawListing;

/// Columns every dataset must provide (after header normalization)
const REQUIRED_COLUMNS: &[&[&str]] = &[&["company"], &["internship_title", "title"], &["field"]];

/// Errors that can occur while loading the internship dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Load the dataset file at `path` into a record store
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<RecordStore, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let rows = read_listings(file)?;
    tracing::info!("Loaded {} listings from {}", rows.len(), path.display());

    Ok(RecordStore::from_listings(rows))
}

/// Read raw listings from CSV data
///
/// Header names are trimmed, lower-cased and have spaces replaced by `_`, so
/// `" Internship Title"` is read as `internship_title`.
pub fn read_listings<R: Read>(source: R) -> Result<Vec<RawListing>, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = canonical_headers(reader.headers()?);

    for alternatives in REQUIRED_COLUMNS {
        if !alternatives.iter().any(|name| headers.iter().any(|h| h == *name)) {
            return Err(DatasetError::MissingColumn(alternatives[0].to_string()));
        }
    }

    reader.set_headers(headers);

    let rows = reader
        .deserialize::<RawListing>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Normalize header names and blank out repeats of a listing field
///
/// `title` is read as `internship_title`, so whichever of the two comes
/// first wins and later columns for the same field are ignored.
fn canonical_headers(raw: &StringRecord) -> StringRecord {
    let mut seen = HashSet::new();
    raw.iter()
        .enumerate()
        .map(|(index, name)| {
            let name = normalize_header(name);
            let field = if name == "title" { "internship_title".to_string() } else { name.clone() };
            if seen.insert(field) {
                name
            } else {
                tracing::warn!("Ignoring duplicate dataset column {:?}", name);
                format!("__ignored_{}", index)
            }
        })
        .collect()
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Company,Internship Title,Location,Skills,Field,Apply Link
Acme,Data Intern,NYC,\"python, sql\",Data Science,https://acme.io/1
Globex,Backend Intern,Boston,java,Backend,
";

    #[test]
    fn test_read_listings_normalizes_headers() {
        let rows = read_listings(SAMPLE.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].company.as_deref(), Some("Acme"));
        assert_eq!(rows[0].internship_title.as_deref(), Some("Data Intern"));
        assert_eq!(rows[0].skills.as_deref(), Some("python, sql"));
        assert_eq!(rows[0].apply_link.as_deref(), Some("https://acme.io/1"));
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let data = "company,internship_title,field\nAcme,Intern,Backend\n";
        let rows = read_listings(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert!(rows[0].location.is_none());
        assert!(rows[0].skills.is_none());
    }

    #[test]
    fn test_title_alias() {
        let data = "company,title,field\nAcme,Intern,Backend\n";
        let rows = read_listings(data.as_bytes()).unwrap();

        assert_eq!(rows[0].internship_title.as_deref(), Some("Intern"));
    }

    #[test]
    fn test_title_alongside_internship_title() {
        let data = "company,internship_title,title,field\nAcme,Data Intern,Intern,Backend\n";
        let rows = read_listings(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].internship_title.as_deref(), Some("Data Intern"));
    }

    #[test]
    fn test_repeated_column_keeps_first() {
        let data = "company,title,internship_title,field,Field\nAcme,Intern,Data Intern,Backend,Other\n";
        let rows = read_listings(data.as_bytes()).unwrap();

        assert_eq!(rows[0].internship_title.as_deref(), Some("Intern"));
        assert_eq!(rows[0].field.as_deref(), Some("Backend"));
    }

    #[test]
    fn test_missing_required_column() {
        let data = "company,location\nAcme,NYC\n";
        let err = read_listings(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "internship_title"));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let data = "company,internship_title,field\nAcme,Intern,Backend,extra\n";
        assert!(matches!(read_listings(data.as_bytes()), Err(DatasetError::Csv(_))));
    }

    #[test]
    fn test_load_store_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = load_store(file.path()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[1].apply_link, "https://company.com/apply/Backend-Intern");
    }

    #[test]
    fn test_load_store_missing_file() {
        let err = load_store("/nonexistent/internships.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Open { .. }));
    }
}
