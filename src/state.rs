//! Observable state of the dashboard's fetch units.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::config::Endpoint;
use crate::models::{
    ClosingPrice, HighLowWindow, Indicators, MovingAverageRow, Overview, PeakRow, PerformanceRow,
    PricePoint, SymbolInfo,
};
use crate::range::TradingRange;

// ---------------------------------------------------------------------------
// FetchState
// ---------------------------------------------------------------------------

/// State of one fetch unit: exactly one of pending, loaded or failed.
///
/// A loaded payload sits behind an [`Arc`], so cloning a state (or a whole
/// [`DashboardSnapshot`]) never copies the data, and two observations of the
/// same load compare equal under [`Arc::ptr_eq`].
#[derive(Debug)]
pub enum FetchState<T> {
    Pending,
    Loaded(Arc<T>),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Pending
    }
}

impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            FetchState::Pending => FetchState::Pending,
            FetchState::Loaded(data) => FetchState::Loaded(Arc::clone(data)),
            FetchState::Failed(msg) => FetchState::Failed(msg.clone()),
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn payload(&self) -> Option<&Arc<T>> {
        match self {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            FetchState::Pending => Phase::Pending,
            FetchState::Loaded(_) => Phase::Loaded,
            FetchState::Failed(_) => Phase::Failed,
        }
    }
}

/// Payload-free view of a [`FetchState`], carried by [`Transition`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Loaded,
    Failed,
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// The eight independent fetch units of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    SymbolInfo,
    ClosingPrices,
    TradingHighLow,
    MovingAverage,
    Performance,
    Peaks,
    Overview,
    Info,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::SymbolInfo,
            Section::ClosingPrices,
            Section::TradingHighLow,
            Section::MovingAverage,
            Section::Performance,
            Section::Peaks,
            Section::Overview,
            Section::Info,
        ]
    }

    /// Endpoint the unit reads. `SymbolInfo` and `Info` share `info`.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Section::SymbolInfo | Section::Info => Endpoint::Info,
            Section::ClosingPrices => Endpoint::ClosingPrices,
            Section::TradingHighLow => Endpoint::TradingHighLow,
            Section::MovingAverage => Endpoint::MovingAverage,
            Section::Performance => Endpoint::Performance,
            Section::Peaks => Endpoint::Peaks,
            Section::Overview => Endpoint::Overview,
        }
    }

    /// Message shown when the endpoint answers with a non-2xx status.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Section::SymbolInfo => "Failed to fetch symbol info",
            Section::ClosingPrices => "Failed to fetch closing prices",
            Section::TradingHighLow => "Failed to fetch trading highs and lows",
            Section::MovingAverage => "Failed to fetch moving average",
            Section::Performance => "Failed to fetch performance data",
            Section::Peaks => "Failed to fetch peaks data",
            Section::Overview => "Failed to fetch overview data",
            Section::Info => "Failed to fetch info data",
        }
    }

    /// Placeholder shown while the unit is pending.
    pub fn loading_message(&self) -> &'static str {
        match self {
            Section::SymbolInfo => "Loading symbol...",
            Section::ClosingPrices => "Loading chart...",
            Section::TradingHighLow => "Loading high/low statistics...",
            Section::MovingAverage => "Loading moving average...",
            Section::Performance => "Loading performance...",
            Section::Peaks => "Loading peaks...",
            Section::Overview => "Loading overview...",
            Section::Info => "Loading stats...",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::SymbolInfo => "symbol info",
            Section::ClosingPrices => "closing prices",
            Section::TradingHighLow => "trading high/low",
            Section::MovingAverage => "moving average",
            Section::Performance => "performance",
            Section::Peaks => "peaks",
            Section::Overview => "overview",
            Section::Info => "info",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Published to subscribers each time a unit changes phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub section: Section,
    pub phase: Phase,
}

// ---------------------------------------------------------------------------
// DashboardSnapshot
// ---------------------------------------------------------------------------

/// Point-in-time copy of every unit's state.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub symbol_info: FetchState<SymbolInfo>,
    pub closing_prices: FetchState<Vec<ClosingPrice>>,
    pub trading_high_low: FetchState<Vec<HighLowWindow>>,
    pub moving_average: FetchState<Vec<MovingAverageRow>>,
    pub performance: FetchState<Vec<PerformanceRow>>,
    pub peaks: FetchState<Vec<PeakRow>>,
    pub overview: FetchState<Overview>,
    pub info: FetchState<Indicators>,
}

impl DashboardSnapshot {
    pub fn phase(&self, section: Section) -> Phase {
        match section {
            Section::SymbolInfo => self.symbol_info.phase(),
            Section::ClosingPrices => self.closing_prices.phase(),
            Section::TradingHighLow => self.trading_high_low.phase(),
            Section::MovingAverage => self.moving_average.phase(),
            Section::Performance => self.performance.phase(),
            Section::Peaks => self.peaks.phase(),
            Section::Overview => self.overview.phase(),
            Section::Info => self.info.phase(),
        }
    }

    pub fn error(&self, section: Section) -> Option<&str> {
        match section {
            Section::SymbolInfo => self.symbol_info.error(),
            Section::ClosingPrices => self.closing_prices.error(),
            Section::TradingHighLow => self.trading_high_low.error(),
            Section::MovingAverage => self.moving_average.error(),
            Section::Performance => self.performance.error(),
            Section::Peaks => self.peaks.error(),
            Section::Overview => self.overview.error(),
            Section::Info => self.info.error(),
        }
    }

    /// `true` once no unit is pending.
    pub fn is_settled(&self) -> bool {
        Section::all()
            .iter()
            .all(|s| self.phase(*s) != Phase::Pending)
    }

    /// Chart series for the price panel.
    ///
    /// Uses the series embedded in the overview payload; when that is absent
    /// or empty, falls back to the dedicated `closing-prices` series.
    pub fn price_series(&self) -> Cow<'_, [PricePoint]> {
        if let Some(overview) = self.overview.payload() {
            if !overview.closing_prices.is_empty() {
                return Cow::Borrowed(&overview.closing_prices);
            }
        }
        match self.closing_prices.payload() {
            Some(rows) => Cow::Owned(rows.iter().map(PricePoint::from).collect()),
            None => Cow::Borrowed(&[]),
        }
    }

    /// [`price_series`](Self::price_series) cut down to the selected range.
    pub fn filtered_prices(&self, range: TradingRange) -> Cow<'_, [PricePoint]> {
        match self.price_series() {
            Cow::Borrowed(series) => Cow::Borrowed(range.filter(series)),
            Cow::Owned(series) => Cow::Owned(range.filter(&series).to_vec()),
        }
    }
}
