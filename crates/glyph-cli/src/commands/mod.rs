use std::fs;
use std::path::Path;
use std::process;

use glyph_core::catalog::Catalog;
use glyph_core::settings::{self, Settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod catalog_ops;
pub mod config_ops;
pub mod dict_ops;

/// Embedded defaults, or the given TOML file.
pub(crate) fn load_settings(config: Option<&str>) -> Settings {
    let Some(file) = config else {
        return Settings::default();
    };
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::parse_settings_toml(&content), "Error in {file}: {}")
}

pub(crate) fn load_catalog(file: &str) -> Catalog {
    let catalog = die!(Catalog::open(Path::new(file)), "Error loading catalog: {}");
    if catalog.is_empty() {
        eprintln!("Error: catalog {file} has no entries");
        process::exit(1);
    }
    catalog
}
