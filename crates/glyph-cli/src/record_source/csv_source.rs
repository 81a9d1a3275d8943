use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use glyph_core::builder::{DictionaryBuilder, RawRecord};

use super::{FileStats, RecordSource, SourceError};

const GLYPHS: usize = 3;
const TRANSLITERATION: usize = 4;
const TRANSLATION: usize = 5;

/// Delimited transcription tables.
///
/// Columns: `unknown1, unknown2, illustration, glyphs, transliteration,
/// translation, notes`. The first row is a header. Rows may be ragged; a row
/// too short to carry a translation is reported as malformed.
pub struct CsvSource {
    delimiter: u8,
}

impl CsvSource {
    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }
}

/// Drop whitespace at the start of every unquoted field so that a field
/// written as `, "a, b"` still parses as quoted. Whitespace inside quotes is
/// kept.
pub(crate) fn ltrim_fields(text: &str, delimiter: u8) -> String {
    let delimiter = char::from(delimiter);
    let mut out = String::with_capacity(text.len());
    let mut in_quotes = false;
    let mut field_start = true;
    for c in text.chars() {
        if !in_quotes && (c == delimiter || c == '\n') {
            field_start = true;
        } else if field_start && c != '\r' && c.is_whitespace() {
            continue;
        } else {
            field_start = false;
            if c == '"' {
                in_quotes = !in_quotes;
            }
        }
        out.push(c);
    }
    out
}

fn field(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index)
}

fn to_raw(row: &StringRecord) -> Result<RawRecord, (String, &'static str)> {
    let glyphs = field(row, GLYPHS).ok_or((String::new(), "glyphs"))?;
    let transliteration =
        field(row, TRANSLITERATION).ok_or((glyphs.to_string(), "transliteration"))?;
    let translation = field(row, TRANSLATION).ok_or((glyphs.to_string(), "translation"))?;
    Ok(RawRecord::new(glyphs, transliteration, translation))
}

impl RecordSource for CsvSource {
    fn read_into(
        &self,
        path: &Path,
        builder: &mut DictionaryBuilder<'_>,
    ) -> Result<FileStats, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = ltrim_fields(&text, self.delimiter);
        let csv_err = |source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut stats = FileStats::default();
        for row in reader.records() {
            let row = row.map_err(csv_err)?;
            stats.rows += 1;
            match to_raw(&row) {
                Ok(raw) => builder.push(raw),
                Err((glyphs, missing)) => {
                    debug!(line = row.position().map(|p| p.line()), missing, "short row");
                    stats.malformed += 1;
                    builder.skip_malformed(glyphs, missing);
                }
            }
        }

        info!(
            path = %path.display(),
            rows = stats.rows,
            malformed = stats.malformed,
            "read transcription file"
        );
        Ok(stats)
    }
}
