//! Ticker analytics dashboard for Rust.
//!
//! Provides the view-model behind a single-symbol analytics page. A
//! [`Dashboard`] issues eight independent reads against the analytics API
//! (symbol info, closing prices, trading high/low, moving averages,
//! performance, peaks, overview and indicators), tracks each one as pending,
//! loaded or failed, and projects the results through purely local view
//! state: tab, trading range and grid/table toggles.
//!
//! # Quick start
//!
//! ```no_run
//! use ticker_dashboard::{Dashboard, TradingRange};
//!
//! let mut dashboard = Dashboard::builder().symbol("MSFT").build().unwrap();
//! dashboard.activate().unwrap();
//! dashboard.wait_settled();
//!
//! dashboard.select_range(TradingRange::OneYear);
//! println!("{}", dashboard.render());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
mod de;
pub mod error;
pub mod fetch;
pub mod format;
pub mod models;
pub mod range;
pub mod render;
pub mod state;
pub mod transport;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncDashboard;
pub use client::ApiClient;
pub use config::{DashboardConfig, Endpoint};
pub use error::{DashboardError, Result};
pub use fetch::{FetchUnit, Liveness};
pub use range::TradingRange;
pub use state::{DashboardSnapshot, FetchState, Phase, Section, Transition};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use view::{Tab, ViewMode, ViewState};

use std::borrow::Cow;
use std::fmt;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use fetch::{Notifier, UnitContext};
use models::{
    ClosingPrice, HighLowWindow, Indicators, MovingAverageRow, Overview, PeakRow, PerformanceRow,
    PricePoint, SymbolInfo,
};

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Starts from [`DashboardConfig::default()`]. Pass a loaded config with
/// [`config()`](DashboardBuilder::config) to pick up file and environment
/// settings; the individual setters override whatever it contains.
#[derive(Default)]
pub struct DashboardBuilder {
    config: DashboardConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl DashboardBuilder {
    /// Replace the whole configuration, e.g. with [`DashboardConfig::load()`].
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.symbol = symbol.into();
        self
    }

    /// Set a per-request timeout. Requests never time out by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Route requests through a custom [`Transport`] instead of reqwest.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and build an inactive dashboard.
    ///
    /// No request is issued until [`Dashboard::activate()`].
    pub fn build(self) -> Result<Dashboard> {
        let config = self.config.validate()?;
        let client = match self.transport {
            Some(transport) => ApiClient::with_transport(config, transport),
            None => ApiClient::new(config)?,
        };
        Ok(Dashboard::new(client))
    }
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// The eight fetch units, one per [`Section`].
#[derive(Debug, Clone)]
pub struct Units {
    pub symbol_info: FetchUnit<SymbolInfo>,
    pub closing_prices: FetchUnit<Vec<ClosingPrice>>,
    pub trading_high_low: FetchUnit<Vec<HighLowWindow>>,
    pub moving_average: FetchUnit<Vec<MovingAverageRow>>,
    pub performance: FetchUnit<Vec<PerformanceRow>>,
    pub peaks: FetchUnit<Vec<PeakRow>>,
    pub overview: FetchUnit<Overview>,
    pub info: FetchUnit<Indicators>,
}

impl Units {
    fn new() -> Self {
        Self {
            symbol_info: FetchUnit::new(Section::SymbolInfo),
            closing_prices: FetchUnit::new(Section::ClosingPrices),
            trading_high_low: FetchUnit::new(Section::TradingHighLow),
            moving_average: FetchUnit::new(Section::MovingAverage),
            performance: FetchUnit::new(Section::Performance),
            peaks: FetchUnit::new(Section::Peaks),
            overview: FetchUnit::new(Section::Overview),
            info: FetchUnit::new(Section::Info),
        }
    }

    fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            symbol_info: self.symbol_info.state(),
            closing_prices: self.closing_prices.state(),
            trading_high_low: self.trading_high_low.state(),
            moving_average: self.moving_average.state(),
            performance: self.performance.state(),
            peaks: self.peaks.state(),
            overview: self.overview.state(),
            info: self.info.state(),
        }
    }

    fn fence(&self) {
        self.symbol_info.fence();
        self.closing_prices.fence();
        self.trading_high_low.fence();
        self.moving_average.fence();
        self.performance.fence();
        self.peaks.fence();
        self.overview.fence();
        self.info.fence();
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// The dashboard view-model for one symbol.
///
/// Owns the eight fetch units and the local [`ViewState`]. Fetches run on
/// background threads and publish into the units; everything else here is
/// synchronous and never touches the network.
///
/// Created via [`Dashboard::builder()`].
pub struct Dashboard {
    client: Arc<ApiClient>,
    units: Units,
    view: ViewState,
    notifier: Arc<Notifier>,
    liveness: Liveness,
    handles: Vec<JoinHandle<()>>,
}

impl Dashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
            units: Units::new(),
            view: ViewState::default(),
            notifier: Arc::new(Notifier::default()),
            liveness: Liveness::new(),
            handles: Vec::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        self.client.config()
    }

    pub fn symbol(&self) -> &str {
        self.client.symbol()
    }

    // -- Lifecycle ---------------------------------------------------------

    /// Start all eight fetches.
    ///
    /// Every unit is pending when this returns. Results arrive in any order.
    /// Calling it again refetches everything; results still in flight from
    /// the previous activation are discarded.
    pub fn activate(&mut self) -> Result<()> {
        self.liveness.revoke();
        self.liveness = Liveness::new();
        let ctx = UnitContext {
            liveness: self.liveness.clone(),
            notifier: Arc::clone(&self.notifier),
        };
        log::info!("Activating dashboard for {}", self.client.symbol());

        let units = &self.units;
        let c = &self.client;
        let handles = [
            units.symbol_info.spawn(ctx.clone(), with(c, ApiClient::symbol_info))?,
            units.closing_prices.spawn(ctx.clone(), with(c, ApiClient::closing_prices))?,
            units.trading_high_low.spawn(ctx.clone(), with(c, ApiClient::trading_high_low))?,
            units.moving_average.spawn(ctx.clone(), with(c, ApiClient::moving_averages))?,
            units.performance.spawn(ctx.clone(), with(c, ApiClient::performance))?,
            units.peaks.spawn(ctx.clone(), with(c, ApiClient::peaks))?,
            units.overview.spawn(ctx.clone(), with(c, ApiClient::overview))?,
            units.info.spawn(ctx, with(c, ApiClient::indicators))?,
        ];
        self.handles.extend(handles);
        Ok(())
    }

    /// Stop publishing. Fetches still in flight complete but change nothing,
    /// and no unit changes after this returns.
    pub fn teardown(&mut self) {
        if self.liveness.is_alive() {
            log::info!("Tearing down dashboard for {}", self.client.symbol());
        }
        self.liveness.revoke();
        self.units.fence();
    }

    pub fn is_active(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Block until every fetch thread started so far has finished.
    pub fn wait_settled(&mut self) {
        join_all(self.take_handles());
    }

    /// Hand over the fetch threads started so far, so they can be joined
    /// without borrowing the dashboard.
    pub fn take_handles(&mut self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut self.handles)
    }

    /// `true` once no unit is pending.
    pub fn is_settled(&self) -> bool {
        self.snapshot().is_settled()
    }

    /// Receive a [`Transition`] every time a unit changes phase.
    pub fn subscribe(&self) -> Receiver<Transition> {
        self.notifier.subscribe()
    }

    // -- State -------------------------------------------------------------

    /// Point-in-time copy of every unit's state. Payloads are shared, not copied.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.units.snapshot()
    }

    pub fn units(&self) -> &Units {
        &self.units
    }

    /// Chart series, see [`DashboardSnapshot::price_series`].
    pub fn price_series(&self) -> Vec<PricePoint> {
        self.snapshot().price_series().into_owned()
    }

    /// Chart series cut down to the selected range.
    pub fn filtered_prices(&self) -> Vec<PricePoint> {
        let snapshot = self.snapshot();
        let series: Cow<'_, [PricePoint]> = snapshot.filtered_prices(self.view.range);
        series.into_owned()
    }

    // -- View state --------------------------------------------------------

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.view.tab = tab;
    }

    pub fn select_range(&mut self, range: TradingRange) {
        self.view.range = range;
    }

    pub fn set_trends_view(&mut self, mode: ViewMode) {
        self.view.trends = mode;
    }

    pub fn set_peaks_view(&mut self, mode: ViewMode) {
        self.view.peaks = mode;
    }

    /// Flip the trends layout and return the new one.
    pub fn toggle_trends(&mut self) -> ViewMode {
        self.view.trends = self.view.trends.toggled();
        self.view.trends
    }

    /// Flip the peaks layout and return the new one.
    pub fn toggle_peaks(&mut self) -> ViewMode {
        self.view.peaks = self.view.peaks.toggled();
        self.view.peaks
    }

    /// Render the current snapshot under the current view state.
    pub fn render(&self) -> String {
        render::render(&self.snapshot(), &self.view)
    }
}

/// Join fetch threads, logging any that panicked.
pub fn join_all(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        let name = handle.thread().name().unwrap_or("fetch").to_string();
        if handle.join().is_err() {
            log::warn!("{} thread panicked", name);
        }
    }
}

/// Bind a client method into a fetch closure for a unit thread.
fn with<T: 'static>(
    client: &Arc<ApiClient>,
    f: fn(&ApiClient) -> Result<T>,
) -> impl FnOnce() -> Result<T> + Send + 'static {
    let client = Arc::clone(client);
    move || f(&client)
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.liveness.revoke();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        let pending = Section::all()
            .iter()
            .filter(|s| snapshot.phase(**s) == Phase::Pending)
            .count();
        write!(
            f,
            "Dashboard(symbol={}, base_url={}, pending={}, tab={}, range={})",
            self.client.symbol(),
            self.client.config().base_url,
            pending,
            self.view.tab,
            self.view.range
        )
    }
}
