//! Local view state: tab, range selection and grid/table toggles.
//!
//! None of this triggers a fetch. Changing it only changes how the
//! already-fetched snapshot is projected by [`crate::render`].

use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::range::TradingRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Overview,
    Performance,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Performance => "Performance",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Performance]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "performance" => Ok(Tab::Performance),
            _ => Err(DashboardError::InvalidArgument(format!(
                "unknown tab {s:?}, expected overview or performance"
            ))),
        }
    }
}

/// Layout of a dataset that can be shown either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    Table,
}

impl ViewMode {
    pub fn toggled(&self) -> ViewMode {
        match self {
            ViewMode::Grid => ViewMode::Table,
            ViewMode::Table => ViewMode::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "table" => Ok(ViewMode::Table),
            _ => Err(DashboardError::InvalidArgument(format!(
                "unknown view mode {s:?}, expected grid or table"
            ))),
        }
    }
}

/// Everything the user can change without refetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub range: TradingRange,
    /// Layout of the performance "trends" column.
    pub trends: ViewMode,
    /// Layout of the peaks column.
    pub peaks: ViewMode,
}
