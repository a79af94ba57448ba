//! Named trading ranges for slicing a price series.

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// A named window of trading days, as offered by the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TradingRange {
    #[default]
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    /// Approximated as a fixed 180 trading days, not the calendar year so far.
    YearToDate,
    OneYear,
    ThreeYears,
    FiveYears,
    TenYears,
    Max,
}

impl TradingRange {
    pub fn label(&self) -> &'static str {
        match self {
            TradingRange::FiveDays => "5D",
            TradingRange::OneMonth => "1M",
            TradingRange::ThreeMonths => "3M",
            TradingRange::SixMonths => "6M",
            TradingRange::YearToDate => "YTD",
            TradingRange::OneYear => "1Y",
            TradingRange::ThreeYears => "3Y",
            TradingRange::FiveYears => "5Y",
            TradingRange::TenYears => "10Y",
            TradingRange::Max => "MAX",
        }
    }

    /// Number of trading days covered, `None` for [`TradingRange::Max`].
    pub fn days(&self) -> Option<usize> {
        match self {
            TradingRange::FiveDays => Some(5),
            TradingRange::OneMonth => Some(22),
            TradingRange::ThreeMonths => Some(66),
            TradingRange::SixMonths => Some(132),
            TradingRange::YearToDate => Some(180),
            TradingRange::OneYear => Some(252),
            TradingRange::ThreeYears => Some(756),
            TradingRange::FiveYears => Some(1260),
            TradingRange::TenYears => Some(2520),
            TradingRange::Max => None,
        }
    }

    pub fn all() -> &'static [TradingRange] {
        &[
            TradingRange::FiveDays,
            TradingRange::OneMonth,
            TradingRange::ThreeMonths,
            TradingRange::SixMonths,
            TradingRange::YearToDate,
            TradingRange::OneYear,
            TradingRange::ThreeYears,
            TradingRange::FiveYears,
            TradingRange::TenYears,
            TradingRange::Max,
        ]
    }

    /// The most recent `days()` entries of `series`, or all of it.
    pub fn filter<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        match self.days() {
            Some(days) if days < series.len() => &series[series.len() - days..],
            _ => series,
        }
    }
}

/// Free-function form of [`TradingRange::filter`].
pub fn filter<T>(series: &[T], range: TradingRange) -> &[T] {
    range.filter(series)
}

impl fmt::Display for TradingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TradingRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TradingRange::all()
            .iter()
            .copied()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DashboardError::InvalidArgument(format!(
                    "unknown range {:?}, expected one of {}",
                    s,
                    TradingRange::all()
                        .iter()
                        .map(|r| r.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
