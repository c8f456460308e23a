//! Header-first CSV tables on disk
//!
//! Every write replaces the whole file: rows are serialized into a temporary
//! file next to the target, flushed, then renamed over it. A table whose
//! content is empty or whose header cannot be parsed is reset to a
//! header-only table instead of failing.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use truckreg_types::StoreError;

/// Column layout of a table
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Canonical header, in on-disk column order
    pub header: &'static [&'static str],
    /// Column that identifies a row
    pub key_column: &'static str,
}

/// Result of reading a table
#[derive(Debug)]
pub enum LoadedTable<R> {
    /// Table parsed; `skipped` counts rows that could not be decoded
    Rows { rows: Vec<R>, skipped: usize },
    /// Header is present but lacks the key column, treated as no rows
    MissingKeyColumn,
    /// Content was empty or unparsable and the file was rewritten header-only
    Reset,
}

impl<R> LoadedTable<R> {
    pub fn into_rows(self) -> Vec<R> {
        match self {
            LoadedTable::Rows { rows, .. } => rows,
            LoadedTable::MissingKeyColumn | LoadedTable::Reset => Vec::new(),
        }
    }
}

/// Create the table with only its header if the file does not exist yet
pub fn ensure_table(path: &Path, schema: &TableSchema) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if !path.exists() {
        debug!(path = %path.display(), "Creating empty table");
        reset_table(path, schema)?;
    }

    Ok(())
}

/// Overwrite the table with only its header
pub fn reset_table(path: &Path, schema: &TableSchema) -> Result<(), StoreError> {
    write_table::<(), _>(path, schema, std::iter::empty())
}

/// Load all rows, creating or resetting the file as needed
pub fn read_table<R: DeserializeOwned>(
    path: &Path,
    schema: &TableSchema,
) -> Result<LoadedTable<R>, StoreError> {
    ensure_table(path, schema)?;

    let content = fs::read(path)?;
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        warn!(path = %path.display(), "Table is empty, rewriting header");
        reset_table(path, schema)?;
        return Ok(LoadedTable::Reset);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_slice());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Table header unreadable, resetting");
            reset_table(path, schema)?;
            return Ok(LoadedTable::Reset);
        }
    };

    if headers.iter().all(|h| h.trim().is_empty()) {
        warn!(path = %path.display(), "Table has no header, resetting");
        reset_table(path, schema)?;
        return Ok(LoadedTable::Reset);
    }

    if !headers.iter().any(|h| h == schema.key_column) {
        warn!(
            path = %path.display(),
            key_column = schema.key_column,
            "Table has no key column, treating as empty"
        );
        return Ok(LoadedTable::MissingKeyColumn);
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (row_idx, result) in reader.deserialize::<R>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                // +2: 0-based index plus the header line
                warn!(path = %path.display(), row = row_idx + 2, error = %e, "Skipping undecodable row");
                skipped += 1;
            }
        }
    }

    debug!(path = %path.display(), rows = rows.len(), skipped, "Loaded table");
    Ok(LoadedTable::Rows { rows, skipped })
}

/// Atomically replace the table with `rows`
pub fn write_table<'a, R, I>(path: &Path, schema: &TableSchema, rows: I) -> Result<(), StoreError>
where
    R: Serialize + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer.write_record(schema.header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    const SCHEMA: TableSchema = TableSchema {
        header: &["Name", "Note"],
        key_column: "Name",
    };

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Note")]
        note: String,
    }

    fn row(name: &str, note: &str) -> Row {
        Row {
            name: name.to_string(),
            note: note.to_string(),
        }
    }

    #[test]
    fn test_missing_file_is_created_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("table.csv");

        let loaded = read_table::<Row>(&path, &SCHEMA).unwrap();
        assert!(loaded.into_rows().is_empty());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Name,Note");
    }

    #[test]
    fn test_empty_file_is_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "").unwrap();

        let loaded = read_table::<Row>(&path, &SCHEMA).unwrap();
        assert!(matches!(loaded, LoadedTable::Reset));
        assert_eq!(fs::read_to_string(&path).unwrap().trim_end(), "Name,Note");
    }

    #[test]
    fn test_missing_key_column_is_empty_not_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "Other,Note\nx,y\n").unwrap();

        let loaded = read_table::<Row>(&path, &SCHEMA).unwrap();
        assert!(matches!(loaded, LoadedTable::MissingKeyColumn));
        // file left as is
        assert_eq!(fs::read_to_string(&path).unwrap(), "Other,Note\nx,y\n");
    }

    #[test]
    fn test_quoting_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let rows = vec![
            row("a,b", "say \"hi\""),
            row("plain", "line one\nline two"),
            row("unicode", "熊本 100 あ 1234"),
        ];

        write_table(&path, &SCHEMA, &rows).unwrap();
        let loaded = read_table::<Row>(&path, &SCHEMA).unwrap().into_rows();
        assert_eq!(loaded, rows);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"a,b\""));
        assert!(content.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "Note,Name\nhello,alice\n").unwrap();

        let loaded = read_table::<Row>(&path, &SCHEMA).unwrap().into_rows();
        assert_eq!(loaded, vec![row("alice", "hello")]);
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "Name,Note\nalice,one\nbob\ncarol,three\n").unwrap();

        match read_table::<Row>(&path, &SCHEMA).unwrap() {
            LoadedTable::Rows { rows, skipped } => {
                assert_eq!(rows, vec![row("alice", "one"), row("carol", "three")]);
                assert_eq!(skipped, 1);
            }
            other => panic!("unexpected load result: {:?}", other),
        }
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_table(&path, &SCHEMA, &[row("a", "b")]).unwrap();
        write_table(&path, &SCHEMA, &[row("c", "d")]).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            read_table::<Row>(&path, &SCHEMA).unwrap().into_rows(),
            vec![row("c", "d")]
        );
    }
}
