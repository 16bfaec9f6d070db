//! StatResult - Per-stat output of a resolution

use serde::{Deserialize, Serialize};

/// Round to two decimal places, halves rounding up
pub fn round2(value: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    (value * 100.0 + 0.5).floor() / 100.0 + 0.0
}

/// Catalog value, resolved value and difference for one stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatResult {
    pub stat: String,
    /// Catalog base (0 when the weapon doesn't list the stat)
    pub base_value: f64,
    pub modified_value: f64,
    pub change: f64,
}

impl StatResult {
    /// Build from an unrounded resolved value
    pub fn new(stat: impl Into<String>, base_value: f64, resolved: f64) -> Self {
        StatResult {
            stat: stat.into(),
            base_value,
            modified_value: round2(resolved),
            change: round2(resolved - base_value),
        }
    }

    /// Whether the modifiers moved this stat
    pub fn is_changed(&self) -> bool {
        self.change != 0.0
    }
}

/// Full output of a resolution, sorted by stat name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatSheet {
    results: Vec<StatResult>,
}

impl StatSheet {
    pub fn new(mut results: Vec<StatResult>) -> Self {
        results.sort_by(|a, b| a.stat.cmp(&b.stat));
        StatSheet { results }
    }

    /// Get the result for a stat
    pub fn get(&self, stat: &str) -> Option<&StatResult> {
        self.results
            .binary_search_by(|r| r.stat.as_str().cmp(stat))
            .ok()
            .map(|i| &self.results[i])
    }

    /// Resolved value of a stat, if present
    pub fn value(&self, stat: &str) -> Option<f64> {
        self.get(stat).map(|r| r.modified_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a StatSheet {
    type Item = &'a StatResult;
    type IntoIter = std::slice::Iter<'a, StatResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
