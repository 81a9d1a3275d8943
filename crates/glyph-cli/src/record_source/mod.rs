//! Transcription sources: turn raw files into [`RawRecord`]s for the builder.

mod csv_source;

use std::path::{Path, PathBuf};

use glyph_core::builder::DictionaryBuilder;

pub use csv_source::CsvSource;

/// A pluggable record source.
pub trait RecordSource {
    /// Parse `path` and feed every row to `builder` in file order.
    ///
    /// Rows missing required columns are reported to the builder as
    /// malformed; only unreadable files are errors.
    fn read_into(
        &self,
        path: &Path,
        builder: &mut DictionaryBuilder<'_>,
    ) -> Result<FileStats, SourceError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    pub rows: usize,
    pub malformed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

/// Feed `inputs` to `builder` strictly in the given order.
pub fn read_all(
    source: &dyn RecordSource,
    inputs: &[PathBuf],
    builder: &mut DictionaryBuilder<'_>,
) -> Result<FileStats, SourceError> {
    let mut total = FileStats::default();
    for path in inputs {
        let stats = source.read_into(path, builder)?;
        total.rows += stats.rows;
        total.malformed += stats.malformed;
    }
    Ok(total)
}

/// Create a `RecordSource` by name. Returns `None` for unknown source names.
pub fn from_name(name: &str) -> Option<Box<dyn RecordSource>> {
    match name {
        "csv" => Some(Box::new(CsvSource::comma())),
        "tsv" => Some(Box::new(CsvSource::tab())),
        _ => None,
    }
}
