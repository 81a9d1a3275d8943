use glyph_core::builder::normalize_codes;
use glyph_core::resolver::AliasResolver;

use super::{load_catalog, load_settings};

/// Print how each code resolves, after the same normalization the builder
/// applies.
pub fn resolve(catalog_file: &str, config: Option<&str>, codes: &[String]) {
    let catalog = load_catalog(catalog_file);
    let settings = load_settings(config);
    let resolver = AliasResolver::new(&catalog, settings.aliases());

    for raw in codes {
        for code in normalize_codes(raw, &settings.build.delimiter, &settings.category_remap) {
            match resolver.resolve_traced(&code) {
                Some(res) => println!(
                    "{code}\t{}\t{} ({})",
                    res.glyph(),
                    res.entry.code,
                    res.path.as_str()
                ),
                None => println!("{code}\t(unresolved)"),
            }
        }
    }
}

pub fn search(catalog_file: &str, text: &str) {
    let catalog = load_catalog(catalog_file);
    if text.chars().count() < 2 {
        eprintln!("Error: search text must be at least 2 characters");
        std::process::exit(1);
    }

    let found = catalog.search(text);
    if found.is_empty() {
        println!("(no matches)");
        return;
    }
    for entry in &found {
        println!("{}\t{}\t{}", entry.code, entry.symbol, entry.description);
    }
    eprintln!("{} matches", found.len());
}
