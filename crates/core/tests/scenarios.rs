//! End-to-end engine scenarios: resolve -> evaluate -> aggregate on small
//! panels with hand-checked outcomes.

use aquacheck_core::compliance::{
    aggregate, evaluate, MeasurementSet, OverallTier, Reading, StatusTier,
};
use aquacheck_core::measurement_import::import_csv;
use aquacheck_core::parameters::Panel;
use aquacheck_core::registry::{ThresholdSet, ThresholdSpec};
use aquacheck_core::report_export::build_csv;

fn two_parameter_setup() -> (Panel, ThresholdSet) {
    let panel = Panel::new(["nitrates", "pH"]);
    let mut thresholds = ThresholdSet::new();
    thresholds.insert("nitrates", ThresholdSpec::scalar(50.0));
    thresholds.insert("pH", ThresholdSpec::range(6.5, 8.5));
    (panel, thresholds)
}

// ---------------------------------------------------------------------------
// Scenario A: everything within limits
// ---------------------------------------------------------------------------

#[test]
fn all_compliant_is_ok() {
    let (panel, thresholds) = two_parameter_setup();
    let measurements = MeasurementSet::new()
        .with("nitrates", 45.0)
        .with("pH", 7.0);

    let rows = evaluate(&measurements, &thresholds, &panel).unwrap();
    assert!(rows.iter().all(|r| r.status == StatusTier::Compliant));

    let verdict = aggregate(&rows);
    assert_eq!(verdict.tier, OverallTier::Ok);
    assert_eq!(verdict.headline, "2 parameters compliant — water is drinkable");
    assert_eq!(verdict.detail, None);
}

// ---------------------------------------------------------------------------
// Scenario B: one value in the near-limit band
// ---------------------------------------------------------------------------

#[test]
fn near_limit_is_warn_with_detail() {
    let (panel, thresholds) = two_parameter_setup();
    let measurements = MeasurementSet::new()
        .with("nitrates", 48.0)
        .with("pH", 7.0);

    let rows = evaluate(&measurements, &thresholds, &panel).unwrap();
    assert_eq!(rows[0].status, StatusTier::NearLimit);
    assert_eq!(rows[1].status, StatusTier::Compliant);

    let verdict = aggregate(&rows);
    assert_eq!(verdict.tier, OverallTier::Warn);
    assert_eq!(verdict.headline, "near regulatory limit on nitrates");
    assert_eq!(verdict.detail.as_deref(), Some("nitrates = 48 (limit 50)"));
}

// ---------------------------------------------------------------------------
// Scenario C: scalar and range violations together
// ---------------------------------------------------------------------------

#[test]
fn scalar_and_range_violations_pick_panel_first() {
    let (panel, thresholds) = two_parameter_setup();
    let measurements = MeasurementSet::new()
        .with("nitrates", 60.0)
        .with("pH", 9.0);

    let rows = evaluate(&measurements, &thresholds, &panel).unwrap();
    assert_eq!(rows[0].status, StatusTier::NonCompliant);
    assert_eq!(rows[1].status, StatusTier::NonCompliant);
    assert_eq!(rows[0].ratio(), Some(1.2));
    assert_eq!(rows[1].ratio(), None);

    let verdict = aggregate(&rows);
    assert_eq!(verdict.tier, OverallTier::Bad);
    assert_eq!(verdict.headline, "non-compliance on nitrates: unsafe");
    assert_eq!(verdict.detail.as_deref(), Some("nitrates = 60 (limit 50)"));

    // Same inputs, same answer.
    assert_eq!(aggregate(&rows), verdict);
}

// ---------------------------------------------------------------------------
// Scenario D: nothing measured
// ---------------------------------------------------------------------------

#[test]
fn absent_only_parameter_is_missing_and_ok() {
    let panel = Panel::new(["nitrates"]);
    let mut thresholds = ThresholdSet::new();
    thresholds.insert("nitrates", ThresholdSpec::scalar(50.0));
    let measurements = MeasurementSet::new().with("nitrates", Reading::Absent);

    let rows = evaluate(&measurements, &thresholds, &panel).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, StatusTier::Missing);

    let verdict = aggregate(&rows);
    assert_eq!(verdict.tier, OverallTier::Ok);
    assert_eq!(verdict.headline, "0 parameters compliant — water is drinkable");
}

// ---------------------------------------------------------------------------
// Import -> evaluate -> export
// ---------------------------------------------------------------------------

#[test]
fn imported_file_flows_through_to_export() {
    let (panel, thresholds) = two_parameter_setup();
    let csv = "Test,Valeur mesurée\nNitrates,61\nturbidity,3\n";

    let import = import_csv(csv.as_bytes(), &panel).unwrap();
    assert_eq!(import.unrecognized, vec!["turbidity"]);

    let rows = evaluate(&import.measurements, &thresholds, &panel).unwrap();
    let exported = build_csv(&rows).unwrap();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(
        lines,
        vec![
            "parameter,measured_value,limit,status",
            "nitrates,61,50,non_compliant",
            "pH,,6.5-8.5,missing",
        ]
    );
}
