use std::path::Path;

use medium_density_selector::medium_db::{DensityTable, TableError, OTHER_MEDIUM};

#[test]
fn built_in_table_shape() {
    let table = DensityTable::built_in();
    let names: Vec<&str> = table.media().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Wasser",
            "Cooling water with antifreeze (20% Ethylene glycol, pH >=7,5)",
            "Thermal oil (Example: BP Transcal N)",
            OTHER_MEDIUM,
        ]
    );

    let wasser = table.buckets_for("Wasser");
    assert_eq!(wasser.len(), 18);
    assert_eq!(wasser.first(), Some(&"0 ℃"));
    assert_eq!(wasser.last(), Some(&"240 ℃"));
    assert_eq!(table.density_for("Wasser", "0 ℃"), Some(1000.0));
    assert_eq!(table.density_for("Wasser", "240 ℃"), Some(814.0));

    // 매질마다 눈금이 다르다.
    assert_eq!(
        table
            .buckets_for("Cooling water with antifreeze (20% Ethylene glycol, pH >=7,5)")
            .len(),
        8
    );
    assert_eq!(
        table.buckets_for("Thermal oil (Example: BP Transcal N)").len(),
        13
    );
}

#[test]
fn other_offers_scale_without_values() {
    let table = DensityTable::built_in();
    let buckets = table.buckets_for(OTHER_MEDIUM);
    assert_eq!(buckets.len(), 36);
    assert_eq!(buckets.first(), Some(&"-30 ℃"));
    assert_eq!(buckets.last(), Some(&"320 ℃"));
    for bucket in buckets {
        assert_eq!(table.density_for(OTHER_MEDIUM, bucket), None);
    }
}

#[test]
fn unknown_medium_yields_empty_enumeration() {
    let table = DensityTable::built_in();
    assert!(table.buckets_for("Glycerin").is_empty());
    assert!(table.buckets_for("").is_empty());
    assert_eq!(table.density_for("Glycerin", "20 ℃"), None);
}

#[test]
fn lookup_is_exact_key_only() {
    let table = DensityTable::built_in();
    assert_eq!(table.density_for("Wasser", "25 ℃"), None);
    // 다른 매질로의 폴백 없음: -10 ℃는 부동액 냉각수에만 있다.
    assert_eq!(
        table.density_for(
            "Cooling water with antifreeze (20% Ethylene glycol, pH >=7,5)",
            "-10 ℃"
        ),
        Some(1034.0)
    );
    assert_eq!(table.density_for("Wasser", "-10 ℃"), None);
}

#[test]
fn toml_artifact_preserves_order() {
    let table = DensityTable::from_toml_str(
        r#"
        [[medium]]
        name = "Brine"
        notes = "test data"
        points = [
            { bucket = "20 ℃", density = 1180.0 },
            { bucket = "0 ℃", density = 1190.0 },
            { bucket = "-10 ℃", density = 1195.0 },
        ]

        [[medium]]
        name = "Other"
        points = [{ bucket = "0 ℃" }, { bucket = "10 ℃" }]
        "#,
    )
    .expect("table parses");
    assert_eq!(table.buckets_for("Brine"), ["20 ℃", "0 ℃", "-10 ℃"]);
    assert_eq!(table.density_for("Brine", "0 ℃"), Some(1190.0));
    assert_eq!(table.density_for("Other", "0 ℃"), None);
}

#[test]
fn negative_density_is_rejected() {
    let err = DensityTable::from_toml_str(
        r#"
        [[medium]]
        name = "Brine"
        points = [{ bucket = "0 ℃", density = -1.0 }]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::InvalidDensity { .. }));
}

#[test]
fn duplicate_medium_is_rejected() {
    let err = DensityTable::from_toml_str(
        r#"
        [[medium]]
        name = "Brine"
        points = [{ bucket = "0 ℃", density = 1190.0 }]

        [[medium]]
        name = "Brine"
        points = [{ bucket = "20 ℃", density = 1180.0 }]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::DuplicateMedium(name) if name == "Brine"));
}

#[test]
fn duplicate_bucket_is_rejected() {
    let err = DensityTable::from_toml_str(
        r#"
        [[medium]]
        name = "Brine"
        points = [
            { bucket = "0 ℃", density = 1190.0 },
            { bucket = "0 ℃", density = 1191.0 },
        ]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::DuplicateBucket { .. }));
}

#[test]
fn empty_table_is_rejected() {
    let err = DensityTable::from_toml_str("").unwrap_err();
    assert!(matches!(err, TableError::Empty));

    let err = DensityTable::from_toml_str("medium = []").unwrap_err();
    assert!(matches!(err, TableError::Empty));
}

#[test]
fn broken_toml_is_a_parse_error() {
    let err = DensityTable::from_toml_str("[[medium]\nname = ").unwrap_err();
    assert!(matches!(err, TableError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = DensityTable::load(Path::new("definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}
