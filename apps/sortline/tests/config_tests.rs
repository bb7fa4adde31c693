//! Unit tests for plant configuration parsing and loading.

use sortline::cli::{load_plant, parse_plant};
use sortline_core::{Category, Material, Outcome, Plant, Signature, SortlineError};
use std::io::Write;

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_empty_document_is_standard_plant() {
    let plant = parse_plant("").expect("parse");
    assert_eq!(plant, Plant::standard());
}

#[test]
fn test_belt_section_only() {
    let plant = parse_plant(
        r#"
[belt]
travel_millis = 250
seed = 42
max_items = 10
"#,
    )
    .expect("parse");

    assert_eq!(plant.belt.travel_millis, 250);
    assert_eq!(plant.belt.seed, Some(42));
    assert_eq!(plant.belt.max_items, Some(10));
    assert_eq!(plant.line.len(), 4);
}

#[test]
fn test_custom_plant() {
    let plant = parse_plant(
        r#"
[[signatures]]
material = "glass"
signature = 1200

[[signatures]]
material = "metal"
signature = 1050

[[signatures]]
material = "unknown"
signature = 0

[[stages]]
material = "glass"
destination = "cullet bunker"
category = "recycled"

[[stages]]
material = "metal"
destination = "melting process"
category = "dumped"
"#,
    )
    .expect("parse");

    assert_eq!(
        plant.table.material_for(Signature::new(1200)),
        &Material::new("glass")
    );
    assert!(plant.table.material_for(Signature::new(680)).is_unknown());
    let metal = plant.line.route(&Material::new("metal")).outcome;
    assert_eq!(metal, Outcome::Sorted { stage_index: 1 });
    assert_eq!(plant.line.category_of(metal), Category::Dumped);
}

#[test]
fn test_colliding_signature_is_rejected() {
    let result = parse_plant(
        r#"
stages = []

[[signatures]]
material = "glass"
signature = 850

[[signatures]]
material = "plastic"
signature = 850

[[signatures]]
material = "unknown"
signature = 0
"#,
    );

    assert!(matches!(
        result,
        Err(SortlineError::DuplicateSignature(sig, _, _)) if sig == Signature::new(850)
    ));
}

#[test]
fn test_stage_targeting_unknown_is_rejected() {
    let result = parse_plant(
        r#"
[[stages]]
material = "unknown"
destination = "anywhere"
category = "dumped"
"#,
    );
    assert_eq!(result, Err(SortlineError::StageTargetsUnknown(1)));
}

#[test]
fn test_stage_without_category_is_config_error() {
    let result = parse_plant(
        r#"
[[stages]]
material = "metal"
destination = "melting process"
"#,
    );
    assert!(matches!(result, Err(SortlineError::ConfigError(_))));
}

#[test]
fn test_misspelled_stage_key_is_config_error() {
    let result = parse_plant(
        r#"
[[stages]]
material = "metal"
destination = "melting process"
category = "recycled"
destinaton = "crushers"
"#,
    );
    assert!(matches!(result, Err(SortlineError::ConfigError(_))));
}

#[test]
fn test_misspelled_signature_key_is_config_error() {
    let result = parse_plant(
        r#"
[[signatures]]
material = "glass"
signature = 1200
signatur = 1300
"#,
    );
    assert!(matches!(result, Err(SortlineError::ConfigError(_))));
}

#[test]
fn test_unknown_field_is_config_error() {
    let result = parse_plant(
        r#"
[belt]
speed = 3
"#,
    );
    assert!(matches!(result, Err(SortlineError::ConfigError(_))));
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_without_path_is_standard() {
    let plant = load_plant(None).expect("load");
    assert_eq!(plant, Plant::standard());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[belt]\ntravel_millis = 10").expect("write");

    let plant = load_plant(Some(file.path())).expect("load");
    assert_eq!(plant.belt.travel_millis, 10);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_plant(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(SortlineError::IoError(_))));
}

#[test]
fn test_load_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = load_plant(Some(dir.path()));
    assert!(matches!(result, Err(SortlineError::IoError(_))));
}
