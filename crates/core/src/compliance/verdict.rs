//! Verdict aggregation and per-tier summary counts.

use serde::{Deserialize, Serialize};

use super::evaluator::EvaluationRow;
use super::measurement::Reading;
use super::status::{OverallTier, StatusTier};
use crate::parameters::ParameterLabels;

/// Overall outcome of a run with a worst-offender explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub tier: OverallTier,
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Panel key of the worst offender, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_parameter: Option<String>,
}

/// Aggregate rows into a verdict, displaying parameters by their raw key.
pub fn aggregate(rows: &[EvaluationRow]) -> Verdict {
    aggregate_with_labels(rows, &ParameterLabels::empty())
}

/// Aggregate rows into a verdict.
///
/// Only Compliant, NearLimit and NonCompliant rows take part; Missing,
/// Indicative and Invalid rows never change the tier.
///
/// The worst offender is picked among the NonCompliant rows, or the
/// NearLimit rows when there are none. Scalar candidates are ranked by
/// `value / max` with ties going to the earliest row. Range violations have
/// no ratio; the top-ranked scalar competes with them by panel order.
pub fn aggregate_with_labels(rows: &[EvaluationRow], labels: &ParameterLabels) -> Verdict {
    let non_compliant: Vec<&EvaluationRow> = rows
        .iter()
        .filter(|r| r.status == StatusTier::NonCompliant)
        .collect();
    let (tier, candidates) = if non_compliant.is_empty() {
        let near_limit: Vec<&EvaluationRow> = rows
            .iter()
            .filter(|r| r.status == StatusTier::NearLimit)
            .collect();
        (OverallTier::Warn, near_limit)
    } else {
        (OverallTier::Bad, non_compliant)
    };

    let Some((first, rest)) = candidates.split_first() else {
        let compliant = rows
            .iter()
            .filter(|r| r.status == StatusTier::Compliant)
            .count();
        return Verdict {
            tier: OverallTier::Ok,
            headline: format!("{compliant} parameters compliant — water is drinkable"),
            detail: None,
            worst_parameter: None,
        };
    };

    let worst = worst_offender(*first, rest);
    let name = labels.display_name(&worst.parameter);
    let headline = match tier {
        OverallTier::Bad => format!("non-compliance on {name}: unsafe"),
        _ => format!("near regulatory limit on {name}"),
    };
    let detail = format!(
        "{name} = {} (limit {})",
        format_reading(&worst.reading),
        worst.threshold
    );

    Verdict {
        tier,
        headline,
        detail: Some(detail),
        worst_parameter: Some(worst.parameter.clone()),
    }
}

/// Candidates arrive in panel order.
fn worst_offender<'a>(first: &'a EvaluationRow, rest: &[&'a EvaluationRow]) -> &'a EvaluationRow {
    let mut top_scalar: Option<(usize, &'a EvaluationRow, f64)> = None;
    let mut first_range: Option<(usize, &'a EvaluationRow)> = None;

    for (i, row) in std::iter::once(first).chain(rest.iter().copied()).enumerate() {
        match row.ratio() {
            // Strictly greater keeps the earliest row on ties.
            Some(ratio) if top_scalar.map_or(true, |(_, _, best)| ratio > best) => {
                top_scalar = Some((i, row, ratio));
            }
            Some(_) => {}
            None => {
                first_range.get_or_insert((i, row));
            }
        }
    }

    match (top_scalar, first_range) {
        (Some((i, scalar, _)), Some((j, range))) => {
            if i < j {
                scalar
            } else {
                range
            }
        }
        (Some((_, scalar, _)), None) => scalar,
        (None, Some((_, range))) => range,
        (None, None) => first,
    }
}

fn format_reading(reading: &Reading) -> String {
    match reading {
        Reading::Absent => "—".to_string(),
        Reading::Value(v) => v.to_string(),
        Reading::Unparseable(s) => s.clone(),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Row counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub total: usize,
    pub compliant: usize,
    pub near_limit: usize,
    pub non_compliant: usize,
    pub indicative: usize,
    pub missing: usize,
    pub invalid: usize,
}

impl TierSummary {
    pub fn count(&self, tier: StatusTier) -> usize {
        match tier {
            StatusTier::Compliant => self.compliant,
            StatusTier::NearLimit => self.near_limit,
            StatusTier::NonCompliant => self.non_compliant,
            StatusTier::Indicative => self.indicative,
            StatusTier::Missing => self.missing,
            StatusTier::Invalid => self.invalid,
        }
    }

    /// The most severe tier present, by [`StatusTier::severity`].
    pub fn most_severe(&self) -> Option<StatusTier> {
        StatusTier::ALL
            .into_iter()
            .filter(|t| self.count(*t) > 0)
            .max_by_key(|t| t.severity())
    }
}

/// Count rows per tier.
pub fn summarize(rows: &[EvaluationRow]) -> TierSummary {
    let mut summary = TierSummary {
        total: rows.len(),
        ..TierSummary::default()
    };

    for row in rows {
        match row.status {
            StatusTier::Compliant => summary.compliant += 1,
            StatusTier::NearLimit => summary.near_limit += 1,
            StatusTier::NonCompliant => summary.non_compliant += 1,
            StatusTier::Indicative => summary.indicative += 1,
            StatusTier::Missing => summary.missing += 1,
            StatusTier::Invalid => summary.invalid += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ThresholdSpec;

    fn row(
        parameter: &str,
        value: f64,
        threshold: ThresholdSpec,
        status: StatusTier,
    ) -> EvaluationRow {
        EvaluationRow {
            parameter: parameter.to_string(),
            reading: Reading::Value(value),
            threshold,
            status,
        }
    }

    #[test]
    fn ok_when_nothing_near_or_over() {
        let rows = vec![
            row("a", 1.0, ThresholdSpec::scalar(10.0), StatusTier::Compliant),
            row("b", 7.0, ThresholdSpec::range(6.5, 8.5), StatusTier::Compliant),
            row("c", 3.0, ThresholdSpec::Indicative, StatusTier::Indicative),
        ];
        let verdict = aggregate(&rows);
        assert_eq!(verdict.tier, OverallTier::Ok);
        assert_eq!(verdict.headline, "2 parameters compliant — water is drinkable");
        assert_eq!(verdict.detail, None);
    }

    #[test]
    fn invalid_and_missing_do_not_change_tier() {
        let rows = vec![
            EvaluationRow {
                parameter: "a".into(),
                reading: Reading::Unparseable("??".into()),
                threshold: ThresholdSpec::scalar(10.0),
                status: StatusTier::Invalid,
            },
            EvaluationRow {
                parameter: "b".into(),
                reading: Reading::Absent,
                threshold: ThresholdSpec::scalar(10.0),
                status: StatusTier::Missing,
            },
        ];
        let verdict = aggregate(&rows);
        assert_eq!(verdict.tier, OverallTier::Ok);
        assert!(verdict.headline.starts_with("0 parameters compliant"));
    }

    #[test]
    fn non_compliant_dominates_near_limit() {
        let rows = vec![
            row("a", 9.9, ThresholdSpec::scalar(10.0), StatusTier::NearLimit),
            row("b", 11.0, ThresholdSpec::scalar(10.0), StatusTier::NonCompliant),
        ];
        let verdict = aggregate(&rows);
        assert_eq!(verdict.tier, OverallTier::Bad);
        assert_eq!(verdict.headline, "non-compliance on b: unsafe");
        assert_eq!(verdict.detail.as_deref(), Some("b = 11 (limit 10)"));
        assert_eq!(verdict.worst_parameter.as_deref(), Some("b"));
    }

    #[test]
    fn highest_ratio_wins() {
        let rows = vec![
            row("a", 55.0, ThresholdSpec::scalar(50.0), StatusTier::NonCompliant),
            row("b", 0.5, ThresholdSpec::scalar(0.3), StatusTier::NonCompliant),
        ];
        let verdict = aggregate(&rows);
        assert_eq!(verdict.worst_parameter.as_deref(), Some("b"));
        assert_eq!(verdict.detail.as_deref(), Some("b = 0.5 (limit 0.3)"));
    }

    #[test]
    fn equal_ratio_ties_go_to_earliest_row() {
        let rows = vec![
            row("first", 60.0, ThresholdSpec::scalar(50.0), StatusTier::NonCompliant),
            row("second", 12.0, ThresholdSpec::scalar(10.0), StatusTier::NonCompliant),
        ];
        for _ in 0..10 {
            assert_eq!(aggregate(&rows).worst_parameter.as_deref(), Some("first"));
        }
    }

    #[test]
    fn range_violation_falls_back_to_panel_order() {
        let ph_first = vec![
            row("pH", 9.0, ThresholdSpec::range(6.5, 8.5), StatusTier::NonCompliant),
            row("nitrates", 60.0, ThresholdSpec::scalar(50.0), StatusTier::NonCompliant),
        ];
        assert_eq!(aggregate(&ph_first).worst_parameter.as_deref(), Some("pH"));
        assert_eq!(
            aggregate(&ph_first).detail.as_deref(),
            Some("pH = 9 (limit 6.5-8.5)")
        );
    }

    #[test]
    fn range_violation_does_not_disturb_scalar_ranking() {
        let rows = vec![
            row("nitrates", 55.0, ThresholdSpec::scalar(50.0), StatusTier::NonCompliant),
            row("lead", 100.0, ThresholdSpec::scalar(10.0), StatusTier::NonCompliant),
            row("pH", 9.0, ThresholdSpec::range(6.5, 8.5), StatusTier::NonCompliant),
        ];
        let verdict = aggregate(&rows);
        assert_eq!(verdict.worst_parameter.as_deref(), Some("lead"));
        assert_eq!(verdict.detail.as_deref(), Some("lead = 100 (limit 10)"));
    }

    #[test]
    fn earlier_range_violation_beats_later_scalar() {
        let rows = vec![
            row("nitrates", 55.0, ThresholdSpec::scalar(50.0), StatusTier::NonCompliant),
            row("pH", 9.0, ThresholdSpec::range(6.5, 8.5), StatusTier::NonCompliant),
            row("lead", 100.0, ThresholdSpec::scalar(10.0), StatusTier::NonCompliant),
        ];
        assert_eq!(aggregate(&rows).worst_parameter.as_deref(), Some("pH"));
    }

    #[test]
    fn near_limit_verdict_uses_labels() {
        let rows = vec![row(
            "nitrates (mg/L)",
            48.0,
            ThresholdSpec::scalar(50.0),
            StatusTier::NearLimit,
        )];
        let mut labels = ParameterLabels::empty();
        labels.insert("nitrates (mg/L)", "Nitrates");
        let verdict = aggregate_with_labels(&rows, &labels);
        assert_eq!(verdict.tier, OverallTier::Warn);
        assert_eq!(verdict.headline, "near regulatory limit on Nitrates");
        assert_eq!(verdict.detail.as_deref(), Some("Nitrates = 48 (limit 50)"));
    }

    #[test]
    fn aggregate_is_idempotent() {
        let rows = vec![
            row("a", 48.0, ThresholdSpec::scalar(50.0), StatusTier::NearLimit),
            row("b", 9.5, ThresholdSpec::scalar(10.0), StatusTier::NearLimit),
        ];
        assert_eq!(aggregate(&rows), aggregate(&rows));
    }

    #[test]
    fn summary_counts_every_tier() {
        let rows = vec![
            row("a", 1.0, ThresholdSpec::scalar(10.0), StatusTier::Compliant),
            row("b", 9.5, ThresholdSpec::scalar(10.0), StatusTier::NearLimit),
            row("c", 11.0, ThresholdSpec::scalar(10.0), StatusTier::NonCompliant),
            row("d", f64::NAN, ThresholdSpec::scalar(10.0), StatusTier::Missing),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.compliant, 1);
        assert_eq!(summary.near_limit, 1);
        assert_eq!(summary.non_compliant, 1);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.invalid, 0);
        assert_eq!(summary.most_severe(), Some(StatusTier::NonCompliant));
    }

    #[test]
    fn empty_summary_has_no_severe_tier() {
        assert_eq!(summarize(&[]).most_severe(), None);
    }
}
