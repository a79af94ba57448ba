//! Text rendering and formatting tests.

mod common;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use ticker_dashboard::format;
use ticker_dashboard::models::{HighLowWindow, Indicators, MovingAverageRow, PeakRow, PerformanceRow};
use ticker_dashboard::render::{self, high_low_card, NO_DATA};
use ticker_dashboard::{DashboardSnapshot, FetchState, Tab, TradingRange, ViewMode, ViewState};

fn loaded<T: DeserializeOwned>(value: Value) -> FetchState<T> {
    FetchState::Loaded(Arc::new(serde_json::from_value(value).unwrap()))
}

fn windows(weeks: &[&str]) -> Vec<HighLowWindow> {
    serde_json::from_value(common::high_low_json(weeks)).unwrap()
}

fn peaks() -> FetchState<Vec<PeakRow>> {
    loaded(common::peaks_json()["peakData"].clone())
}

fn full_snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        symbol_info: loaded(common::info_json()),
        closing_prices: loaded(common::closing_prices_json(10)),
        trading_high_low: loaded(common::high_low_json(&["13", "26", "52", "104"])),
        moving_average: loaded(common::moving_average_json()),
        performance: loaded(common::performance_json()),
        peaks: peaks(),
        overview: loaded(common::overview_json()),
        info: loaded(common::info_json()),
    }
}

// ---------------------------------------------------------------------------
// Section states
// ---------------------------------------------------------------------------

#[test]
fn pending_sections_show_loading_messages() {
    let snapshot = DashboardSnapshot::default();
    let text = render::render(&snapshot, &ViewState::default());
    assert!(text.contains("Loading symbol..."));
    assert!(text.contains("Loading stats..."));
    assert!(text.contains("Loading chart..."));
    assert!(text.contains("Loading overview..."));
    assert!(text.contains("Loading high/low statistics..."));
    assert!(text.contains("Loading moving average..."));
}

#[test]
fn failed_performance_shows_literal_and_peaks_still_render() {
    let snapshot = DashboardSnapshot {
        performance: FetchState::Failed("Failed to fetch performance data".into()),
        peaks: peaks(),
        ..DashboardSnapshot::default()
    };
    let view = ViewState {
        tab: Tab::Performance,
        ..ViewState::default()
    };
    let text = render::render(&snapshot, &view);
    assert!(text.contains("Failed to fetch performance data"));
    assert!(text.contains("$199.62"));
}

#[test]
fn empty_collections_show_no_data() {
    let empty: FetchState<Vec<PerformanceRow>> = FetchState::Loaded(Arc::new(Vec::new()));
    assert!(render::trends(&empty, ViewMode::Table).contains(NO_DATA));

    let empty: FetchState<Vec<MovingAverageRow>> = FetchState::Loaded(Arc::new(Vec::new()));
    assert!(render::moving_average_table(&empty).contains(NO_DATA));

    let empty: FetchState<Vec<PeakRow>> = FetchState::Loaded(Arc::new(Vec::new()));
    assert_eq!(render::peaks(&empty, ViewMode::Grid), format!("Peak Data (grid)\n{}", NO_DATA));
}

// ---------------------------------------------------------------------------
// High / low
// ---------------------------------------------------------------------------

#[test]
fn missing_window_renders_placeholders() {
    let card = high_low_card(&windows(&["13", "26", "104"]), "52");
    assert_eq!(card.week, "52");
    for field in [
        &card.low,
        &card.downside,
        &card.low_date,
        &card.low_days_ago,
        &card.high,
        &card.upside,
        &card.high_date,
        &card.high_days_ago,
    ] {
        assert_eq!(field, "--");
    }
}

#[test]
fn present_window_renders_values() {
    let card = high_low_card(&windows(&["13", "26", "52", "104"]), "26");
    assert_eq!(card.high, "$199.62");
    assert_eq!(card.upside, "+4.79% upside");
    assert_eq!(card.low, "$164.08");
    assert_eq!(card.downside, "-13.87% downside");
    assert_eq!(card.low_days_ago, "120 days ago");
}

#[test]
fn high_low_section_always_shows_four_windows() {
    let state: FetchState<Vec<HighLowWindow>> = FetchState::Loaded(Arc::new(windows(&["13"])));
    let text = render::high_low(&state);
    for week in ["13 Week", "26 Week", "52 Week", "104 Week"] {
        assert!(text.contains(week), "{}", week);
    }
    assert!(text.contains("--"));
}

// ---------------------------------------------------------------------------
// Moving average
// ---------------------------------------------------------------------------

#[test]
fn dma_table_is_pivoted_by_window() {
    let state: FetchState<Vec<MovingAverageRow>> = loaded(common::moving_average_json());
    let text = render::moving_average_table(&state);
    for label in ["Days", "DMA Price", "Date", "Upwards from CP", "Downwards CP"] {
        assert!(text.contains(label), "{}", label);
    }
    let days_line = text.lines().find(|l| l.contains("Days")).unwrap();
    assert!(days_line.contains("50"));
    assert!(days_line.contains("100"));
    assert!(days_line.contains("200"));

    let down_line = text.lines().find(|l| l.contains("Downwards CP")).unwrap();
    assert!(down_line.contains(" - "));
    assert!(down_line.contains("2.4%"));
}

// ---------------------------------------------------------------------------
// Performance tab
// ---------------------------------------------------------------------------

#[test]
fn trends_grid_and_table_differ_only_in_layout() {
    let state: FetchState<Vec<PerformanceRow>> = loaded(common::performance_json());

    let grid = render::trends(&state, ViewMode::Grid);
    assert!(grid.starts_with("Trends (grid)"));
    assert!(grid.contains("1 Week"));
    assert!(grid.contains("↓ -2.1 (-1.09%)"));
    assert!(grid.contains("↑ +3.4 (1.82%)"));
    assert!(!grid.contains("PRICE CHANGE"));

    let table = render::trends(&state, ViewMode::Table);
    assert!(table.starts_with("Trends (table)"));
    for header in ["DATE", "PRICE", "PRICE CHANGE", "% CHANGE", "PE % CHANGE", "PE"] {
        assert!(table.contains(header), "{}", header);
    }
    assert!(table.contains("2024-06-07"));
    assert!(table.contains("+3.4"));
}

#[test]
fn peaks_grid_and_table() {
    let state = peaks();

    let grid = render::peaks(&state, ViewMode::Grid);
    assert!(grid.contains("15 March 2024"));
    assert!(grid.contains("45 (1 month 15 days)"));
    assert!(grid.contains("↑ 15.2 (8.46%)"));
    assert!(grid.contains("↓ -20.1 (-10.07%)"));

    let table = render::peaks(&state, ViewMode::Table);
    for header in ["PEAK NO", "TIMELINE", "PEAK PRICE", "DOWNWARDS CHANGE", "UPSIDE CHANGE"] {
        assert!(table.contains(header), "{}", header);
    }
    assert!(table.contains("15 March 2024"));
    assert!(table.contains("-10.07%"));
}

// ---------------------------------------------------------------------------
// Header, stats and overview
// ---------------------------------------------------------------------------

#[test]
fn stats_row() {
    let state: FetchState<Indicators> = loaded(common::info_json());
    let text = render::stats(&state);
    assert!(text.contains("USD 190.5 +2.35 (1.25%)"));
    assert!(text.contains("12.5%"));
    assert!(text.contains("CAD EUR"));
    assert!(text.contains(">55"));
    assert!(text.contains("5.83% ($180)"));
    assert!(text.contains("Jan 30, 2025"));
}

#[test]
fn hedged_currency_empty_list_is_blank_and_missing_key_is_placeholder() {
    let mut info = common::info_json();
    info["hedgedCurrency"] = serde_json::json!([]);
    let text = render::stats(&loaded::<Indicators>(info.clone()));
    let line = text.lines().find(|l| l.contains("Currency Hedged")).unwrap();
    assert!(!line.contains("--"), "{}", line);
    assert!(!line.contains("CAD"), "{}", line);

    info.as_object_mut().unwrap().remove("hedgedCurrency");
    let text = render::stats(&loaded::<Indicators>(info));
    let line = text.lines().find(|l| l.contains("Currency Hedged")).unwrap();
    assert!(line.contains("--"), "{}", line);
}

#[test]
fn overview_cards_render_all_categories() {
    let text = render::overview_cards(&loaded(common::overview_json()));
    for title in [
        "Profile",
        "Valuation (TTM)",
        "Valuation (NTM)",
        "Financial Health",
        "Growth (CAGR)",
        "Dividends",
    ] {
        assert!(text.contains(title), "{}", title);
    }
    assert!(text.contains("$2.9T"));
    assert!(text.contains("161000"));
    assert!(text.contains("$2.4M"));
    assert!(text.contains("8.2%"));
}

#[test]
fn overview_tab_page() {
    let text = render::render(&full_snapshot(), &ViewState::default());
    assert!(text.contains("Apple Inc.  AAPL"));
    assert!(text.contains("[Overview]  Performance"));
    assert!(text.contains("[5D]"));
    assert!(text.contains("Price (5D)"));
    assert!(text.contains("2024-06-07  196.89"));
    assert!(text.contains("High Low Statistics"));
    assert!(!text.contains("Trends"));
}

#[test]
fn chart_follows_selected_range() {
    let snapshot = DashboardSnapshot {
        overview: loaded(common::overview_without_prices_json()),
        closing_prices: loaded(common::closing_prices_json(10)),
        ..DashboardSnapshot::default()
    };
    let five = render::price_chart(&snapshot, TradingRange::FiveDays);
    assert_eq!(five.lines().count(), 6);
    assert!(!five.contains("2024-01-05"));

    let max = render::price_chart(&snapshot, TradingRange::Max);
    assert_eq!(max.lines().count(), 11);
}

#[test]
fn performance_tab_page() {
    let view = ViewState {
        tab: Tab::Performance,
        trends: ViewMode::Table,
        ..ViewState::default()
    };
    let text = render::render(&full_snapshot(), &view);
    assert!(text.contains("Overview  [Performance]"));
    assert!(text.contains("Trends (table)"));
    assert!(text.contains("Peak Data (grid)"));
    assert!(!text.contains("High Low Statistics"));
}

// ---------------------------------------------------------------------------
// format
// ---------------------------------------------------------------------------

#[test]
fn signed_numbers() {
    assert_eq!(format::signed(0.0), "+0");
    assert_eq!(format::signed(2.5), "+2.5");
    assert_eq!(format::signed(-1.5), "-1.5");
    assert_eq!(format::signed_percent(1.25), "+1.25%");
    assert_eq!(format::arrow(-0.1), "↓");
}

#[test]
fn dates() {
    assert_eq!(format::gb_long_date("2024-03-05").as_deref(), Some("05 March 2024"));
    assert_eq!(
        format::us_short_date("2025-01-30T00:00:00.000Z").as_deref(),
        Some("Jan 30, 2025")
    );
    assert_eq!(
        format::us_short_date("2025-01-30T14:00:00").as_deref(),
        Some("Jan 30, 2025")
    );
    assert_eq!(format::gb_long_date("soon"), None);
}

#[test]
fn placeholders() {
    assert_eq!(format::or_placeholder(None::<f64>, format::PLACEHOLDER), "--");
    assert_eq!(format::or_placeholder(Some(3.5), format::PLACEHOLDER), "3.5");
}
