//! Typed access to the ticker analytics endpoints.
//!
//! Every endpoint answers with a `{ message, result }` envelope. The client
//! checks the HTTP status before trusting the body, decodes the envelope into
//! the endpoint's declared schema, and hands back only `result`.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::{DashboardConfig, Endpoint};
use crate::error::{DashboardError, Result};
use crate::models::{
    ClosingPrice, Envelope, HighLowWindow, Indicators, MovingAverageRow, Overview, PeakRow,
    PeaksResult, PerformanceRow, SymbolInfo,
};
use crate::transport::{HttpTransport, Transport};

/// Client for the read-only analytics API of a single symbol.
pub struct ApiClient {
    config: DashboardConfig,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: DashboardConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// GET an endpoint for the configured symbol and decode its `result`.
    ///
    /// A non-2xx status yields [`DashboardError::Status`]; a body that does
    /// not match `T` yields [`DashboardError::Validation`].
    pub fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let url = self.config.url_for(endpoint);
        log::debug!("GET {}?symbol={}", url, self.config.symbol);

        let resp = self
            .transport
            .get(&url, &[("symbol", self.config.symbol.as_str())])?;
        if !resp.is_success() {
            return Err(DashboardError::Status {
                endpoint: endpoint.name(),
                status: resp.status,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&resp.body).map_err(|source| DashboardError::Validation {
                endpoint: endpoint.name(),
                source,
            })?;
        if let Some(message) = &envelope.message {
            log::trace!("{} says: {}", endpoint.name(), message);
        }
        Ok(envelope.result)
    }

    // -- Endpoints ---------------------------------------------------------

    /// Identity and latest quote, from `info`.
    pub fn symbol_info(&self) -> Result<SymbolInfo> {
        self.fetch(Endpoint::Info)
    }

    /// Quote plus computed indicators (RSI, DMA, earnings), from `info`.
    pub fn indicators(&self) -> Result<Indicators> {
        self.fetch(Endpoint::Info)
    }

    pub fn closing_prices(&self) -> Result<Vec<ClosingPrice>> {
        self.fetch(Endpoint::ClosingPrices)
    }

    pub fn trading_high_low(&self) -> Result<Vec<HighLowWindow>> {
        self.fetch(Endpoint::TradingHighLow)
    }

    pub fn moving_averages(&self) -> Result<Vec<MovingAverageRow>> {
        self.fetch(Endpoint::MovingAverage)
    }

    pub fn performance(&self) -> Result<Vec<PerformanceRow>> {
        self.fetch(Endpoint::Performance)
    }

    /// Peak rows from `result.peakData`.
    ///
    /// A `null` result or a missing `peakData` key decodes to an empty list.
    pub fn peaks(&self) -> Result<Vec<PeakRow>> {
        let result: Option<PeaksResult> = self.fetch(Endpoint::Peaks)?;
        Ok(result.unwrap_or_default().peak_data)
    }

    pub fn overview(&self) -> Result<Overview> {
        self.fetch(Endpoint::Overview)
    }
}
