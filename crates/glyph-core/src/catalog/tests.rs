use super::*;

const SCRAPED_JSON: &str = r#"{
  "glyphCategories": {
    "A": "Man and his occupations",
    "Aa": "Unclassified"
  },
  "glyphMap": {
    "A": [
      {
        "glyph": "𓀀",
        "gardiner": "A1",
        "unicode": "U+13000",
        "hex": 77824,
        "description": "Seated man",
        "transliteration": "",
        "phonetic": "",
        "notes": "determinative for man"
      },
      {
        "glyph": "",
        "gardiner": "A2",
        "unicode": "U+13001",
        "hex": 77825,
        "description": "Man with hand to mouth",
        "transliteration": "",
        "phonetic": "",
        "notes": ""
      }
    ],
    "Aa": [
      {
        "glyph": "𓐍",
        "gardiner": "Aa1",
        "unicode": "U+1340D",
        "hex": 78861,
        "description": "Placenta (?)",
        "transliteration": "ḫ",
        "phonetic": "kh",
        "notes": ""
      }
    ]
  }
}"#;

#[test]
fn test_category_key() {
    assert_eq!(category_key("A1"), Some("A"));
    assert_eq!(category_key("Aa15"), Some("Aa"));
    assert_eq!(category_key("NL12"), Some("NL"));
    assert_eq!(category_key("O90A"), Some("O"));
    assert_eq!(category_key("Aa"), Some("Aa"));
    assert_eq!(category_key("12"), None);
    assert_eq!(category_key("a1"), None);
    assert_eq!(category_key(""), None);
}

#[test]
fn test_load_scraper_format() {
    let catalog = Catalog::from_json(SCRAPED_JSON).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.label("A"), Some("Man and his occupations"));
    assert_eq!(catalog.find("A1").unwrap().symbol, "𓀀");
    assert_eq!(catalog.find("Aa1").unwrap().unicode_value, "U+1340D");
}

#[test]
fn test_missing_symbol_filled_from_hex() {
    let catalog = Catalog::from_json(SCRAPED_JSON).unwrap();
    assert_eq!(catalog.find("A2").unwrap().symbol, "\u{13001}");
}

#[test]
fn test_missing_symbol_without_hex() {
    let json = r#"{"glyphMap": {"A": [
        {"code": "A1", "symbol": ""},
        {"code": "A2", "symbol": "", "hex": 4294967295},
        {"code": "A3", "symbol": "𓀂"}
    ]}}"#;
    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.entries("A")[0].symbol, "");
    assert!(catalog.find("A1").is_none());
    assert!(catalog.find("A2").is_none());
    assert_eq!(catalog.find("A3").unwrap().symbol, "𓀂");
}

#[test]
fn test_load_documented_field_names() {
    let json = r#"{
        "categories": {"G": "Birds"},
        "glyphs": {"G": [{"code": "G1", "symbol": "𓄿", "unicodeValue": "U+1313F"}]}
    }"#;
    let catalog = Catalog::from_json(json).unwrap();
    let entry = catalog.find("G1").unwrap();
    assert_eq!(entry.symbol, "𓄿");
    assert_eq!(entry.unicode_value, "U+1313F");
    assert_eq!(entry.category(), Some("G"));
}

#[test]
fn test_invalid_json() {
    let err = Catalog::from_json("{not json").unwrap_err();
    assert!(matches!(err, CatalogError::Json(_)));
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::open(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_find_is_scoped_to_category() {
    // An entry filed under the wrong category is not found by code.
    let json = r#"{"glyphMap": {"B": [{"code": "A1", "symbol": "x"}]}}"#;
    let catalog = Catalog::from_json(json).unwrap();
    assert!(catalog.find("A1").is_none());
    assert_eq!(catalog.entries("B").len(), 1);
    assert!(catalog.entries("Z").is_empty());
}

#[test]
fn test_from_entries_groups_by_category() {
    let catalog = Catalog::from_entries([
        CatalogEntry::new("A1", "𓀀"),
        CatalogEntry::new("Aa1", "𓐍"),
        CatalogEntry::new("A2", "𓀁"),
        CatalogEntry::new("17", "?"),
    ]);
    let codes: Vec<&str> = catalog.entries("A").iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, ["A1", "A2"]);
    assert_eq!(catalog.entries("Aa").len(), 1);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_search_description_case_insensitive() {
    let catalog = Catalog::from_json(SCRAPED_JSON).unwrap();
    let codes: Vec<&str> = catalog
        .search("SEATED")
        .iter()
        .map(|e| e.code.as_str())
        .collect();
    assert_eq!(codes, ["A1"]);
}

#[test]
fn test_search_phonetic_and_notes() {
    let catalog = Catalog::from_json(SCRAPED_JSON).unwrap();
    assert_eq!(catalog.search("kh")[0].code, "Aa1");
    assert_eq!(catalog.search("Determinative")[0].code, "A1");
    // Readings are compared against the lowercased query.
    assert!(catalog.search("ḫx").is_empty());
}

#[test]
fn test_search_too_short() {
    let catalog = Catalog::from_json(SCRAPED_JSON).unwrap();
    assert!(catalog.search("m").is_empty());
    assert!(catalog.search("").is_empty());
}
