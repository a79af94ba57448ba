use std::path::PathBuf;

use clap::Parser;
use ticker_dashboard::{Tab, TradingRange, ViewMode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Instrument symbol, e.g. AAPL.
    #[arg(long)]
    pub symbol: Option<String>,

    /// Analytics API host.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Chart range: 5D, 1M, 3M, 6M, YTD, 1Y, 3Y, 5Y, 10Y or MAX.
    #[arg(long, default_value = "5D")]
    pub range: TradingRange,

    /// Tab to render: overview or performance.
    #[arg(long, default_value = "overview")]
    pub tab: Tab,

    /// Layout of the trends section: grid or table.
    #[arg(long, default_value = "grid")]
    pub trends: ViewMode,

    /// Layout of the peaks section: grid or table.
    #[arg(long, default_value = "grid")]
    pub peaks: ViewMode,

    /// Render both tabs instead of only the selected one.
    #[arg(long)]
    pub all_tabs: bool,
}
