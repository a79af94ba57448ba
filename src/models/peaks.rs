use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PeakRow — A closing-price peak with the drawdown and recovery after it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakRow {
    #[serde(default, deserialize_with = "crate::de::opt_label")]
    pub peak: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Close", deserialize_with = "crate::de::f64")]
    pub close: f64,
    #[serde(rename = "timeDiff", default, deserialize_with = "crate::de::opt_label")]
    pub time_diff: Option<String>,
    #[serde(default)]
    pub time_diff_str: Option<String>,
    /// Drawdown from the peak, in price units.
    #[serde(deserialize_with = "crate::de::f64")]
    pub change: f64,
    #[serde(rename = "percentageChange", deserialize_with = "crate::de::f64")]
    pub percentage_change: f64,
    /// Recovery after the drawdown, in price units.
    #[serde(rename = "reverseChange", deserialize_with = "crate::de::f64")]
    pub reverse_change: f64,
    #[serde(rename = "reversePercentageChange", deserialize_with = "crate::de::f64")]
    pub reverse_percentage_change: f64,
}

// ---------------------------------------------------------------------------
// PeaksResult — `result` object of the `peaks` endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeaksResult {
    #[serde(rename = "peakData", default)]
    pub peak_data: Vec<PeakRow>,
}
