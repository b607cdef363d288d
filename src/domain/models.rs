use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated weight measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
    pub date: NaiveDate,
    pub weight: f64,
}

/// A contest participant with their full weigh-in history.
///
/// `name` is the identity key for every mutation. `baseline_weight` and
/// `current_weight` are display fallbacks; once two or more weigh-ins
/// exist the ranking engine resolves both from the dated series instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorEntry {
    pub name: String,
    pub baseline_weight: f64,
    pub current_weight: f64,
    #[serde(default)]
    pub cheerer: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_photo: Option<String>,
    #[serde(default)]
    pub weigh_ins: Vec<WeighIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wa_applied: Option<bool>,
}

impl CompetitorEntry {
    /// Weigh-in series sorted ascending by date, insertion order preserved
    /// within a day.
    pub fn sorted_weigh_ins(&self) -> Vec<WeighIn> {
        let mut sorted = self.weigh_ins.clone();
        sorted.sort_by_key(|w| w.date);
        sorted
    }
}
