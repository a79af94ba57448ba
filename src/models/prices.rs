use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClosingPrice — One row of the `closing-prices` series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingPrice {
    pub date: String,
    #[serde(deserialize_with = "crate::de::f64")]
    pub close: f64,
}

// ---------------------------------------------------------------------------
// PricePoint — Chart point embedded in the `overview` payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,
    #[serde(deserialize_with = "crate::de::f64")]
    pub value: f64,
}

impl From<&ClosingPrice> for PricePoint {
    fn from(row: &ClosingPrice) -> Self {
        Self {
            time: row.date.clone(),
            value: row.close,
        }
    }
}
