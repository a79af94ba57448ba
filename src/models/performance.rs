use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PerformanceRow — Price and valuation change as of one reference date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub date: String,
    /// Label of the look-back period, e.g. `"1 Week"`.
    #[serde(default, deserialize_with = "crate::de::opt_label")]
    pub day: Option<String>,
    #[serde(deserialize_with = "crate::de::f64")]
    pub current_price: f64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub change: f64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub change_pct: f64,
    #[serde(default, deserialize_with = "crate::de::opt_f64")]
    pub pe: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_f64")]
    pub pe_change_pct: Option<f64>,
}
