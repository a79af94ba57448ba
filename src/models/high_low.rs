use serde::{Deserialize, Serialize};

/// Windows (in weeks) the high/low statistics row always shows, in order.
pub const HIGH_LOW_WINDOWS: [&str; 4] = ["13", "26", "52", "104"];

// ---------------------------------------------------------------------------
// HighLowWindow — Trading high and low over one N-week window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighLowWindow {
    /// Window length in weeks, normalized to a string (`"52"`).
    #[serde(deserialize_with = "crate::de::label")]
    pub week: String,
    #[serde(deserialize_with = "crate::de::f64")]
    pub high: f64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub low: f64,
    pub high_date: String,
    pub low_date: String,
    /// Upside from the current price to the window high.
    #[serde(deserialize_with = "crate::de::f64")]
    pub high_percentage: f64,
    /// Downside from the current price to the window low.
    #[serde(deserialize_with = "crate::de::f64")]
    pub low_percentage: f64,
    #[serde(deserialize_with = "crate::de::i64")]
    pub high_days_ago: i64,
    #[serde(deserialize_with = "crate::de::i64")]
    pub low_days_ago: i64,
}

/// Find the entry for a window such as `"52"`.
pub fn find_window<'a>(windows: &'a [HighLowWindow], week: &str) -> Option<&'a HighLowWindow> {
    windows.iter().find(|w| w.week == week)
}
