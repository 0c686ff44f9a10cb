use medium_density_selector::{
    medium_db::{DensityTable, OTHER_MEDIUM},
    selection::{Notice, SelectionError, SelectionPhase, SelectionState, UiSignal},
};

const THERMAL_OIL: &str = "Thermal oil (Example: BP Transcal N)";

#[test]
fn wasser_20c_auto_derives_998() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    assert_eq!(sel.phase(), SelectionPhase::MediumChosen);
    let signal = sel
        .select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    assert_eq!(signal, UiSignal::FocusDensity);
    assert_eq!(sel.density(), Some(998.0));
    assert_eq!(sel.status(), Some(Notice::AutoDerived));
    assert_eq!(sel.phase(), SelectionPhase::FullySpecified);
}

#[test]
fn derivation_matches_table_for_non_other_media() {
    let table = DensityTable::built_in();
    for m in table.media() {
        if m.name == OTHER_MEDIUM {
            continue;
        }
        for bucket in table.buckets_for(&m.name) {
            let mut sel = SelectionState::new();
            sel.select_medium(&m.name);
            sel.select_temperature(&table, bucket)
                .expect("bucket accepted");
            assert_eq!(
                sel.density(),
                table.density_for(&m.name, bucket),
                "{} / {bucket}",
                m.name
            );
        }
    }
}

#[test]
fn other_medium_never_derives() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium(OTHER_MEDIUM);
    sel.select_temperature(&table, "50 ℃")
        .expect("bucket accepted");
    assert_eq!(sel.density(), None);
    assert_eq!(sel.status(), None);

    assert!(sel.set_density("850"));
    sel.select_temperature(&table, "60 ℃")
        .expect("bucket accepted");
    assert_eq!(sel.density(), Some(850.0), "manual value must survive");
    assert_eq!(sel.status(), None);
}

#[test]
fn second_identical_temperature_select_is_noop() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "40 ℃")
        .expect("bucket accepted");
    let once = sel.clone();
    sel.select_temperature(&table, "40 ℃")
        .expect("bucket accepted");
    assert_eq!(sel.density(), once.density());
    assert_eq!(sel.temperature(), once.temperature());
    assert_eq!(sel.status(), once.status());
}

#[test]
fn medium_change_clears_dependent_fields() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    sel.select_medium(THERMAL_OIL);
    assert_eq!(sel.temperature(), None);
    assert_eq!(sel.density(), None);
    assert_eq!(sel.status(), None);
    assert_eq!(sel.phase(), SelectionPhase::MediumChosen);
}

#[test]
fn reselecting_same_medium_also_resets() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    sel.select_medium("Wasser");
    assert_eq!(sel.temperature(), None);
    assert_eq!(sel.density(), None);
    assert_eq!(sel.status(), None);
}

#[test]
fn manual_density_overrides_and_clears_notice() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    assert_eq!(sel.status(), Some(Notice::AutoDerived));
    assert!(sel.set_density("1005.5"));
    assert_eq!(sel.density(), Some(1005.5));
    assert_eq!(sel.status(), None);
}

#[test]
fn invalid_density_inputs_are_ignored() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    for raw in ["-5", "abc", "1,2", "NaN", "inf"] {
        assert!(!sel.set_density(raw), "{raw} must be rejected");
        assert_eq!(sel.density(), Some(998.0), "{raw} must not change density");
    }
    assert_eq!(sel.status(), Some(Notice::AutoDerived));
}

#[test]
fn blank_density_input_clears_value() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    assert!(sel.set_density("  "));
    assert_eq!(sel.density(), None);
    assert_eq!(sel.status(), None);
}

#[test]
fn bucket_outside_medium_scale_is_rejected_without_change() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    sel.select_medium(THERMAL_OIL);
    sel.select_temperature(&table, "120 ℃")
        .expect("bucket accepted");
    // 140 ℃는 열매체유 눈금에 없는 값이다.
    let err = sel.select_temperature(&table, "140 ℃").unwrap_err();
    assert!(matches!(
        err,
        SelectionError::BucketNotInMedium { .. }
    ));
    assert_eq!(sel.temperature(), Some("120 ℃"));
    assert_eq!(sel.density(), Some(811.0));
}

#[test]
fn temperature_before_medium_is_rejected() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    let err = sel.select_temperature(&table, "20 ℃").unwrap_err();
    assert!(matches!(err, SelectionError::MediumNotChosen));
    assert_eq!(sel.phase(), SelectionPhase::Empty);
}

#[test]
fn lookup_miss_keeps_existing_density() {
    // 값이 없는 구간은 선택지로는 나오지만 기존 밀도를 건드리지 않아야 한다.
    let table = DensityTable::from_toml_str(
        r#"
        [[medium]]
        name = "Brine"
        points = [
            { bucket = "0 ℃", density = 1180.0 },
            { bucket = "20 ℃" },
        ]
        "#,
    )
    .expect("table parses");
    let mut sel = SelectionState::new();
    sel.select_medium("Brine");
    sel.select_temperature(&table, "0 ℃").expect("bucket accepted");
    assert_eq!(sel.density(), Some(1180.0));
    let signal = sel
        .select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    assert_eq!(signal, UiSignal::FocusDensity);
    assert_eq!(sel.temperature(), Some("20 ℃"));
    assert_eq!(sel.density(), Some(1180.0), "miss must not clear density");
    assert_eq!(sel.status(), Some(Notice::AutoDerived), "notice from first derivation stays");
}

#[test]
fn density_text_formats_plain_numbers() {
    let table = DensityTable::built_in();
    let mut sel = SelectionState::new();
    assert_eq!(sel.density_text(), "");
    sel.select_medium("Wasser");
    sel.select_temperature(&table, "20 ℃")
        .expect("bucket accepted");
    assert_eq!(sel.density_text(), "998");
    assert!(sel.set_density("997.25"));
    assert_eq!(sel.density_text(), "997.25");
}
