use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MovingAverageRow — DMA for one day-window, relative to the current price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageRow {
    #[serde(deserialize_with = "crate::de::i64")]
    pub day: i64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub dma_price: f64,
    pub date: String,
    #[serde(default, deserialize_with = "crate::de::opt_f64")]
    pub upward_percent: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_f64")]
    pub downward_percent: Option<f64>,
}
