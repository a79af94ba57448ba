use serde::{Deserialize, Serialize};

use super::overview::MetricValue;

// ---------------------------------------------------------------------------
// SymbolInfo — Identity and latest quote of the instrument
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub ticker: String,
    /// Display name of the company.
    #[serde(rename = "nm")]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(deserialize_with = "crate::de::f64")]
    pub latest_close: f64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub percentage_change: f64,
    #[serde(deserialize_with = "crate::de::f64")]
    pub change: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

// ---------------------------------------------------------------------------
// HedgedCurrency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgedCurrency {
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Indicators — Quote plus the computed indicators served by `info`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(flatten)]
    pub quote: SymbolInfo,
    #[serde(default, deserialize_with = "crate::de::opt_f64")]
    pub remaining_opportunity: Option<f64>,
    #[serde(rename = "hedgedCurrency", default)]
    pub hedged_currency: Option<Vec<HedgedCurrency>>,
    #[serde(rename = "RSI", default, deserialize_with = "crate::de::opt_f64")]
    pub rsi: Option<f64>,
    #[serde(rename = "DMA_200", default, deserialize_with = "crate::de::opt_f64")]
    pub dma_200: Option<f64>,
    #[serde(rename = "SRT_124", default)]
    pub srt_124: Option<MetricValue>,
    #[serde(rename = "nextEarningsDate", default)]
    pub next_earnings_date: Option<String>,
}

impl Indicators {
    /// Percentage distance of the latest close from the 200-day DMA.
    ///
    /// `None` when the DMA is missing or zero.
    pub fn dma_200_deviation(&self) -> Option<f64> {
        match self.dma_200 {
            Some(dma) if dma != 0.0 => Some((self.quote.latest_close - dma) / dma * 100.0),
            _ => None,
        }
    }
}
