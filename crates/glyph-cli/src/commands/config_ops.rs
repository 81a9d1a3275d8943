use std::fs;

use glyph_core::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: build.delimiter={:?}, build.dedup={}, category_remap={}, aliases={}",
        s.build.delimiter,
        s.build.dedup.as_str(),
        s.category_remap.len(),
        s.aliases().len()
    );
}
