use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use serde::Serialize;
use tracing::info;

use glyph_core::builder::{BuildOutput, BuildStats, DictionaryBuilder, SkipDiagnostic};
use glyph_core::dict::{DictError, GlyphTrie, TrieFormat};

use super::{load_catalog, load_settings};
use crate::record_source;

pub struct BuildOptions<'a> {
    pub catalog_file: &'a str,
    pub config: Option<&'a str>,
    pub source: &'a str,
    pub diagnostics_file: Option<&'a str>,
}

#[derive(Serialize)]
struct DiagnosticsReport<'a> {
    stats: &'a BuildStats,
    skipped: &'a [SkipDiagnostic],
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Error writing dictionary: {0}")]
    Dict(#[from] DictError),

    #[error("Error encoding diagnostics: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Error writing {}: {source}", path.display())]
    Diagnostics { path: PathBuf, source: io::Error },
}

const SHOWN_SKIPS: usize = 20;

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the trie to `output` and, if requested, the diagnostics report.
///
/// Both files are written or neither is: the report is staged next to its
/// destination before the trie is saved and only renamed into place after.
pub fn write_outputs(
    out: &BuildOutput,
    output: &Path,
    diagnostics: Option<&Path>,
) -> Result<TrieFormat, OutputError> {
    let format = TrieFormat::from_path(output);
    let Some(diag_path) = diagnostics else {
        out.trie.save(output, format)?;
        return Ok(format);
    };

    let report = DiagnosticsReport {
        stats: &out.stats,
        skipped: &out.diagnostics,
    };
    let json = serde_json::to_vec_pretty(&report)?;
    let diag_err = |source| OutputError::Diagnostics {
        path: diag_path.to_path_buf(),
        source,
    };

    let staged = tmp_sibling(diag_path);
    fs::write(&staged, json).map_err(diag_err)?;
    if let Err(e) = out.trie.save(output, format) {
        let _ = fs::remove_file(&staged);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&staged, diag_path) {
        let _ = fs::remove_file(&staged);
        let _ = fs::remove_file(output);
        return Err(diag_err(e));
    }
    Ok(format)
}

pub fn build(opts: &BuildOptions<'_>, output_file: &str, inputs: &[String]) {
    let source = record_source::from_name(opts.source).unwrap_or_else(|| {
        eprintln!("Error: unknown source '{}' (available: csv, tsv)", opts.source);
        process::exit(1);
    });
    let settings = load_settings(opts.config);
    let catalog = load_catalog(opts.catalog_file);
    info!(
        signs = catalog.len(),
        aliases = settings.aliases().len(),
        dedup = settings.build.dedup.as_str(),
        "loaded catalog"
    );

    let inputs: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
    let mut builder = DictionaryBuilder::new(&catalog, &settings);
    die!(
        record_source::read_all(&*source, &inputs, &mut builder),
        "Error reading records: {}"
    );
    let out = builder.finish();

    let output = Path::new(output_file);
    let format = die!(
        write_outputs(&out, output, opts.diagnostics_file.map(Path::new)),
        "{}"
    );

    let (nodes, entries) = out.trie.stats();
    let file_size = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({}, {nodes} nodes, {entries} entries, {:.1} KB)",
        format.as_str(),
        file_size as f64 / 1024.0
    );

    let stats = out.stats;
    eprintln!(
        "Records: {} read, {} inserted, {} skipped ({} duplicates)",
        stats.records, stats.inserted, stats.skipped, stats.duplicates
    );

    match opts.diagnostics_file {
        Some(file) => eprintln!("Wrote diagnostics to {file}"),
        None => {
            for d in out.diagnostics.iter().take(SHOWN_SKIPS) {
                eprintln!("  skipped #{} {:?}: {}", d.record, d.raw_glyphs, d.reason);
            }
            if out.diagnostics.len() > SHOWN_SKIPS {
                eprintln!(
                    "  ... {} more (use --diagnostics to write all)",
                    out.diagnostics.len() - SHOWN_SKIPS
                );
            }
        }
    }
}

pub fn info(file: &str) {
    let data = die!(fs::read(file), "Error reading {file}: {}");
    let Some(format) = TrieFormat::detect(&data) else {
        eprintln!("Unknown file format: {file}");
        process::exit(1);
    };
    let trie = die!(GlyphTrie::decode(&data), "Error opening dictionary: {}");
    let (nodes, entries) = trie.stats();

    println!("Dictionary: {file}");
    println!("Format:     {}", format.as_str());
    println!("File size:  {:.1} KB", data.len() as f64 / 1024.0);
    println!("Roots:      {}", trie.root().children().count());
    println!("Nodes:      {nodes}");
    println!("Entries:    {entries}");

    println!();
    println!("Sample words:");
    for (glyphs, node_entries) in trie.iter().take(5) {
        let words: Vec<&str> = node_entries
            .iter()
            .take(3)
            .map(|e| e.translation.as_str())
            .collect();
        println!("  {glyphs} → {}", words.join(", "));
    }
}

pub fn lookup(dict_file: &str, text: &str, longest_first: bool) {
    let trie = die!(
        GlyphTrie::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    );
    let results = if longest_first {
        trie.lookup_longest_first(text)
    } else {
        trie.lookup_text(text)
    };

    if results.is_empty() {
        println!("{text} → (no matches)");
        return;
    }
    for entry in &results {
        println!(
            "{}\t{}\t{}",
            entry.glyphs, entry.transliteration, entry.translation
        );
    }
}

pub fn convert(input_file: &str, output_file: &str) {
    let trie = die!(
        GlyphTrie::open(Path::new(input_file)),
        "Error opening dictionary: {}"
    );
    let output = Path::new(output_file);
    let format = TrieFormat::from_path(output);
    die!(trie.save(output, format), "Error writing dictionary: {}");

    let (nodes, entries) = trie.stats();
    eprintln!(
        "Wrote {output_file} ({}, {nodes} nodes, {entries} entries)",
        format.as_str()
    );
}

#[cfg(test)]
mod tests {
    use glyph_core::builder::RawRecord;
    use glyph_core::catalog::{Catalog, CatalogEntry};
    use glyph_core::settings::Settings;

    use super::*;

    fn build_output() -> BuildOutput {
        let catalog = Catalog::from_entries([CatalogEntry::new("A1", "𓀀")]);
        let settings = Settings::default();
        DictionaryBuilder::build(
            &catalog,
            &settings,
            [
                RawRecord::new("A1", "s", "man"),
                RawRecord::new("Z9", "x", "unknown"),
            ],
        )
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_trie_and_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.gldx");
        let diag = dir.path().join("diag.json");
        let out = build_output();

        let format = write_outputs(&out, &output, Some(&diag)).unwrap();
        assert_eq!(format, TrieFormat::Binary);
        assert_eq!(file_names(dir.path()), ["diag.json", "out.gldx"]);
        assert_eq!(GlyphTrie::open(&output).unwrap(), out.trie);

        let report: serde_json::Value =
            serde_json::from_slice(&fs::read(&diag).unwrap()).unwrap();
        assert_eq!(report["stats"]["records"], 2);
        assert_eq!(report["skipped"][0]["record"], 1);
        assert_eq!(report["skipped"][0]["reason"]["code"], "unresolved-glyph");
        assert_eq!(report["skipped"][0]["reason"]["token"], "Z9");
    }

    #[test]
    fn test_write_trie_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let format = write_outputs(&build_output(), &output, None).unwrap();
        assert_eq!(format, TrieFormat::Json);
        assert_eq!(file_names(dir.path()), ["out.json"]);
    }

    #[test]
    fn test_unwritable_diagnostics_leaves_no_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.gldx");
        let diag = dir.path().join("missing").join("diag.json");

        let err = write_outputs(&build_output(), &output, Some(&diag)).unwrap_err();
        assert!(matches!(err, OutputError::Diagnostics { ref path, .. } if *path == diag));
        assert!(file_names(dir.path()).is_empty());
    }

    #[test]
    fn test_unwritable_dictionary_leaves_no_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("out.gldx");
        let diag = dir.path().join("diag.json");

        let err = write_outputs(&build_output(), &output, Some(&diag)).unwrap_err();
        assert!(matches!(err, OutputError::Dict(_)));
        assert!(file_names(dir.path()).is_empty());
    }
}
