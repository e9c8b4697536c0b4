//! Built-in threshold tables.
//!
//! Values per standard and water category. pH is bounded below at 6.5 in
//! every table; its upper bound is the table's pH ceiling.

use super::spec::{ThresholdSet, ThresholdSpec};
use super::{CategoryEntry, StandardEntry};
use crate::parameters::{
    PARAM_CHLORINE, PARAM_IRON, PARAM_LEAD, PARAM_MAGNESIUM, PARAM_NITRATES, PARAM_PH,
    PARAM_TURBIDITY,
};

pub const STANDARD_WHO: &str = "who";
pub const STANDARD_FR: &str = "fr";

pub const CATEGORY_TAP: &str = "tap";
pub const CATEGORY_MINERAL: &str = "mineral";

const PH_FLOOR: f64 = 6.5;

/// One row of a built-in table: nitrates, lead, pH ceiling, turbidity,
/// iron, magnesium, chlorine.
struct Limits {
    nitrates: f64,
    lead: f64,
    ph_max: f64,
    turbidity: f64,
    iron: f64,
    magnesium: f64,
    chlorine: f64,
}

impl Limits {
    fn into_set(self) -> ThresholdSet {
        [
            (PARAM_NITRATES, ThresholdSpec::scalar(self.nitrates)),
            (PARAM_LEAD, ThresholdSpec::scalar(self.lead)),
            (PARAM_PH, ThresholdSpec::range(PH_FLOOR, self.ph_max)),
            (PARAM_TURBIDITY, ThresholdSpec::scalar(self.turbidity)),
            (PARAM_IRON, ThresholdSpec::scalar(self.iron)),
            (PARAM_MAGNESIUM, ThresholdSpec::scalar(self.magnesium)),
            (PARAM_CHLORINE, ThresholdSpec::scalar(self.chlorine)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

fn category(id: &str, label: &str, limits: Limits) -> CategoryEntry {
    CategoryEntry {
        id: id.to_string(),
        label: label.to_string(),
        thresholds: limits.into_set(),
    }
}

pub(super) fn standards() -> Vec<StandardEntry> {
    vec![
        StandardEntry {
            id: STANDARD_WHO.to_string(),
            label: "World Health Organization (OMS)".to_string(),
            categories: vec![
                category(
                    CATEGORY_TAP,
                    "Tap water",
                    Limits {
                        nitrates: 50.0,
                        lead: 10.0,
                        ph_max: 8.5,
                        turbidity: 1.0,
                        iron: 0.3,
                        magnesium: 50.0,
                        chlorine: 0.5,
                    },
                ),
                category(
                    CATEGORY_MINERAL,
                    "Mineral water",
                    Limits {
                        nitrates: 75.0,
                        lead: 15.0,
                        ph_max: 8.5,
                        turbidity: 5.0,
                        iron: 1.0,
                        magnesium: 125.0,
                        chlorine: 1.0,
                    },
                ),
            ],
        },
        StandardEntry {
            id: STANDARD_FR.to_string(),
            label: "French regulation (Normes françaises)".to_string(),
            categories: vec![
                category(
                    CATEGORY_TAP,
                    "Tap water",
                    Limits {
                        nitrates: 50.0,
                        lead: 10.0,
                        ph_max: 8.5,
                        turbidity: 1.0,
                        iron: 0.2,
                        magnesium: 60.0,
                        chlorine: 0.4,
                    },
                ),
                category(
                    CATEGORY_MINERAL,
                    "Mineral water",
                    Limits {
                        nitrates: 40.0,
                        lead: 5.0,
                        ph_max: 7.5,
                        turbidity: 3.0,
                        iron: 0.3,
                        magnesium: 100.0,
                        chlorine: 0.6,
                    },
                ),
            ],
        },
    ]
}
