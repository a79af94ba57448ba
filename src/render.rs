//! Plain-text presentation of a [`DashboardSnapshot`].
//!
//! Renderers are pure functions of the snapshot and the [`ViewState`]. Each
//! section shows its loading placeholder while pending, its error message
//! when failed, and `No data available.` for an empty collection.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::format::{self, CELL_PLACEHOLDER, PLACEHOLDER};
use crate::models::{
    find_window, HighLowWindow, Indicators, MetricValue, MovingAverageRow, Overview, PeakRow,
    PerformanceRow, HIGH_LOW_WINDOWS,
};
use crate::range::TradingRange;
use crate::state::{DashboardSnapshot, FetchState, Section};
use crate::view::{Tab, ViewMode, ViewState};

pub const NO_DATA: &str = "No data available.";

/// Render the whole page for the current view.
pub fn render(snapshot: &DashboardSnapshot, view: &ViewState) -> String {
    let mut parts = vec![header(snapshot), stats(&snapshot.info), tab_bar(view.tab)];
    match view.tab {
        Tab::Overview => {
            parts.push(range_bar(view.range));
            parts.push(price_chart(snapshot, view.range));
            parts.push(overview_cards(&snapshot.overview));
            parts.push(high_low(&snapshot.trading_high_low));
            parts.push(moving_average_table(&snapshot.moving_average));
        }
        Tab::Performance => {
            parts.push(trends(&snapshot.performance, view.trends));
            parts.push(peaks(&snapshot.peaks, view.peaks));
        }
    }
    parts.join("\n\n")
}

/// Common loading/error wrapper around a section body.
fn section<T>(section: Section, state: &FetchState<T>, body: impl FnOnce(&T) -> String) -> String {
    match state {
        FetchState::Pending => section.loading_message().to_string(),
        FetchState::Failed(msg) => msg.clone(),
        FetchState::Loaded(data) => body(data),
    }
}

fn card(title: &str, rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::from(title);
    for (label, value) in rows {
        out.push_str(&format!("\n  {:<width$}  {}", label, value, width = width));
    }
    out
}

fn table(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

fn metric(value: &Option<MetricValue>) -> String {
    format::or_placeholder(value.as_ref(), PLACEHOLDER)
}

fn money_metric(value: &Option<MetricValue>) -> String {
    match value {
        Some(v) => format!("${}", v),
        None => PLACEHOLDER.to_string(),
    }
}

fn percent_metric(value: &Option<MetricValue>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => PLACEHOLDER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

pub fn header(snapshot: &DashboardSnapshot) -> String {
    section(Section::SymbolInfo, &snapshot.symbol_info, |info| {
        let mut out = format!("{}  {}", info.name, info.ticker);
        if let Some(exchange) = &info.exchange {
            out.push('\n');
            out.push_str(exchange);
        }
        out
    })
}

/// Stats row: price, opportunity, hedging, RSI, DMA, SRT and earnings.
pub fn stats(state: &FetchState<Indicators>) -> String {
    section(Section::Info, state, |info| {
        let quote = &info.quote;
        let price = format!(
            "{} {} {} ({}%)",
            quote.currency.as_deref().unwrap_or(""),
            quote.latest_close,
            format::signed(quote.change),
            quote.percentage_change
        );
        // An empty list means no hedging and shows nothing; only a missing
        // key is unknown.
        let hedged = match &info.hedged_currency {
            Some(list) => list
                .iter()
                .map(|c| c.currency.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            None => PLACEHOLDER.to_string(),
        };
        let rsi = match info.rsi {
            Some(rsi) if rsi != 0.0 => format!(">{}", rsi),
            _ => PLACEHOLDER.to_string(),
        };
        let dma = match (info.dma_200_deviation(), info.dma_200) {
            (Some(deviation), Some(dma)) => format!("{:.2}% (${})", deviation, dma),
            _ => format!("{} ({})", PLACEHOLDER, PLACEHOLDER),
        };
        let earnings = info
            .next_earnings_date
            .as_deref()
            .and_then(format::us_short_date)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        card(
            "Stats",
            &[
                ("Price", price.trim_start().to_string()),
                (
                    "Opportunity Buy",
                    match info.remaining_opportunity {
                        Some(v) => format::percent(v),
                        None => PLACEHOLDER.to_string(),
                    },
                ),
                ("Currency Hedged", hedged),
                ("RSI", rsi),
                ("200 Day DMA", dma),
                ("SRT (124 DMA)", format::or_placeholder(info.srt_124.as_ref(), PLACEHOLDER)),
                ("Earnings", earnings),
            ],
        )
    })
}

pub fn tab_bar(active: Tab) -> String {
    Tab::all()
        .iter()
        .map(|t| {
            if *t == active {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn range_bar(active: TradingRange) -> String {
    TradingRange::all()
        .iter()
        .map(|r| {
            if *r == active {
                format!("[{}]", r.label())
            } else {
                r.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

/// Price series for the selected range, one `date  value` line per point.
pub fn price_chart(snapshot: &DashboardSnapshot, range: TradingRange) -> String {
    let series = snapshot.filtered_prices(range);
    if series.is_empty() {
        return match &snapshot.overview {
            FetchState::Pending => Section::ClosingPrices.loading_message().to_string(),
            FetchState::Failed(msg) => msg.clone(),
            FetchState::Loaded(_) => NO_DATA.to_string(),
        };
    }
    let mut out = format!("Price ({})", range.label());
    for point in series.iter() {
        out.push_str(&format!("\n  {}  {}", point.time, point.value));
    }
    out
}

/// The six fundamentals cards.
pub fn overview_cards(state: &FetchState<Overview>) -> String {
    section(Section::Overview, state, |o| {
        let cards = [
            card(
                "Profile",
                &[
                    ("Market Cap", money_metric(&o.profile.market_cap)),
                    ("EV", money_metric(&o.profile.ev)),
                    ("Shares Out", metric(&o.profile.shares_out)),
                    ("Revenue", money_metric(&o.profile.revenue)),
                    ("Employees", metric(&o.profile.employees)),
                ],
            ),
            card(
                "Valuation (TTM)",
                &[
                    ("P/E", metric(&o.valuation_ttm.pe)),
                    ("P/B", metric(&o.valuation_ttm.pb)),
                    ("EV/Sales", metric(&o.valuation_ttm.ev_sales)),
                    ("EV/EBITDA", metric(&o.valuation_ttm.ev_ebitda)),
                    ("P/FCF", metric(&o.valuation_ttm.p_fcf)),
                    ("EV/Gross Profit", metric(&o.valuation_ttm.ev_gross_profit)),
                ],
            ),
            card(
                "Valuation (NTM)",
                &[
                    ("Price Target", metric(&o.valuation_ntm.price_target)),
                    ("P/E", metric(&o.valuation_ntm.pe)),
                    ("PEG", metric(&o.valuation_ntm.peg)),
                    ("EV/Sales", metric(&o.valuation_ntm.ev_sales)),
                    ("EV/EBITDA", metric(&o.valuation_ntm.ev_ebitda)),
                    ("P/FCF", metric(&o.valuation_ntm.p_fcf)),
                ],
            ),
            card(
                "Financial Health",
                &[
                    ("Revenue Per Employee", money_metric(&o.profile.revenue_per_employee)),
                    ("Cash", money_metric(&o.financial_health.cash)),
                    ("Net Debt", money_metric(&o.financial_health.net_debt)),
                    ("Debt/Equity", metric(&o.financial_health.debt_equity)),
                    ("EBIT/Interest", metric(&o.financial_health.ebit_interest)),
                ],
            ),
            card(
                "Growth (CAGR)",
                &[
                    ("Rev 3Yr", percent_metric(&o.growth.revenue_3yr)),
                    ("Rev 5Yr", percent_metric(&o.growth.revenue_5yr)),
                    ("Rev 10Yr", percent_metric(&o.growth.revenue_10yr)),
                    ("Dil EPS 3Yr", percent_metric(&o.growth.diluted_eps_3yr)),
                    ("Dil EPS 5Yr", percent_metric(&o.growth.diluted_eps_5yr)),
                    ("Dil EPS 10Yr", percent_metric(&o.growth.diluted_eps_10yr)),
                ],
            ),
            card(
                "Dividends",
                &[
                    ("Yield", metric(&o.dividends.dividend_yield)),
                    ("Payout", metric(&o.dividends.payout_ratio)),
                    ("DPS", metric(&o.dividends.dps)),
                    ("DPS Growth 3yr", metric(&o.dividends.dps_growth_3yr)),
                    ("DPS Growth 5yr", metric(&o.dividends.dps_growth_5yr)),
                    ("DPS Growth 10yr", metric(&o.dividends.dps_growth_10yr)),
                ],
            ),
        ];
        cards.join("\n\n")
    })
}

/// Display fields of one high/low window. Every field is `--` when the
/// window is missing from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighLowCard {
    pub week: String,
    pub low: String,
    pub downside: String,
    pub low_date: String,
    pub low_days_ago: String,
    pub high: String,
    pub upside: String,
    pub high_date: String,
    pub high_days_ago: String,
}

pub fn high_low_card(windows: &[HighLowWindow], week: &str) -> HighLowCard {
    match find_window(windows, week) {
        Some(w) => HighLowCard {
            week: week.to_string(),
            low: format::dollars(w.low),
            downside: format!("{}% downside", w.low_percentage),
            low_date: w.low_date.clone(),
            low_days_ago: format!("{} days ago", w.low_days_ago),
            high: format::dollars(w.high),
            upside: format!("+{}% upside", w.high_percentage),
            high_date: w.high_date.clone(),
            high_days_ago: format!("{} days ago", w.high_days_ago),
        },
        None => HighLowCard {
            week: week.to_string(),
            low: PLACEHOLDER.to_string(),
            downside: PLACEHOLDER.to_string(),
            low_date: PLACEHOLDER.to_string(),
            low_days_ago: PLACEHOLDER.to_string(),
            high: PLACEHOLDER.to_string(),
            upside: PLACEHOLDER.to_string(),
            high_date: PLACEHOLDER.to_string(),
            high_days_ago: PLACEHOLDER.to_string(),
        },
    }
}

/// High/low statistics for the 13, 26, 52 and 104 week windows.
pub fn high_low(state: &FetchState<Vec<HighLowWindow>>) -> String {
    section(Section::TradingHighLow, state, |windows| {
        if windows.is_empty() {
            return NO_DATA.to_string();
        }
        let cards: Vec<String> = HIGH_LOW_WINDOWS
            .iter()
            .map(|week| {
                let c = high_low_card(windows, week);
                card(
                    &format!("{} Week", c.week),
                    &[
                        ("Low", format!("{}  {}", c.low, c.downside)),
                        ("", format!("{}  {}", c.low_date, c.low_days_ago)),
                        ("High", format!("{}  {}", c.high, c.upside)),
                        ("", format!("{}  {}", c.high_date, c.high_days_ago)),
                    ],
                )
            })
            .collect();
        format!("High Low Statistics\n\n{}", cards.join("\n\n"))
    })
}

fn opt_percent_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format::percent(v),
        None => CELL_PLACEHOLDER.to_string(),
    }
}

/// DMA table pivoted so that each day-window is a column.
pub fn moving_average_table(state: &FetchState<Vec<MovingAverageRow>>) -> String {
    section(Section::MovingAverage, state, |rows| {
        if rows.is_empty() {
            return NO_DATA.to_string();
        }
        let mut days = vec!["Days".to_string()];
        let mut prices = vec!["DMA Price".to_string()];
        let mut dates = vec!["Date".to_string()];
        let mut upwards = vec!["Upwards from CP".to_string()];
        let mut downwards = vec!["Downwards CP".to_string()];
        for row in rows.iter() {
            days.push(row.day.to_string());
            prices.push(format::dollars(row.dma_price));
            dates.push(row.date.clone());
            upwards.push(opt_percent_cell(row.upward_percent));
            downwards.push(opt_percent_cell(row.downward_percent));
        }
        let mut builder = Builder::default();
        for record in [days, prices, dates, upwards, downwards] {
            builder.push_record(record);
        }
        let mut table = builder.build();
        table.with(Style::psql());
        format!("Daily Moving Average (DMA)\n{}", table)
    })
}

// ---------------------------------------------------------------------------
// Performance tab
// ---------------------------------------------------------------------------

fn opt_cell(value: Option<f64>) -> String {
    format::or_placeholder(value, CELL_PLACEHOLDER)
}

fn trend_card(row: &PerformanceRow) -> String {
    let mut out = row.date.clone();
    if let Some(day) = &row.day {
        out.push('\n');
        out.push_str(day);
    }
    out.push_str(&format!(
        "\n{}\n{} {} ({}%)",
        format::dollars(row.current_price),
        format::arrow(row.change),
        format::signed(row.change),
        row.change_pct
    ));
    out
}

/// Performance rows as cards or as a table.
pub fn trends(state: &FetchState<Vec<PerformanceRow>>, mode: ViewMode) -> String {
    let body = section(Section::Performance, state, |rows| {
        if rows.is_empty() {
            return NO_DATA.to_string();
        }
        match mode {
            ViewMode::Grid => rows.iter().map(trend_card).collect::<Vec<_>>().join("\n\n"),
            ViewMode::Table => table(
                &["DATE", "PRICE", "PRICE CHANGE", "% CHANGE", "PE % CHANGE", "PE"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.date.clone(),
                            r.current_price.to_string(),
                            format::signed(r.change),
                            format::percent(r.change_pct),
                            opt_cell(r.pe_change_pct),
                            opt_cell(r.pe),
                        ]
                    })
                    .collect(),
            ),
        }
    });
    format!("Trends ({})\n{}", mode, body)
}

fn peak_date(row: &PeakRow) -> String {
    row.date
        .as_deref()
        .and_then(format::gb_long_date)
        .unwrap_or_else(|| CELL_PLACEHOLDER.to_string())
}

fn peak_card(row: &PeakRow) -> String {
    format!(
        "{}\n{} ({})\n{}\n↑ {} ({}%)\n↓ {} ({}%)",
        peak_date(row),
        row.time_diff.as_deref().unwrap_or(CELL_PLACEHOLDER),
        row.time_diff_str.as_deref().unwrap_or(CELL_PLACEHOLDER),
        format::dollars(row.close),
        row.reverse_change,
        row.reverse_percentage_change,
        row.change,
        row.percentage_change
    )
}

/// Peak rows as cards or as a table.
pub fn peaks(state: &FetchState<Vec<PeakRow>>, mode: ViewMode) -> String {
    let body = section(Section::Peaks, state, |rows| {
        if rows.is_empty() {
            return NO_DATA.to_string();
        }
        match mode {
            ViewMode::Grid => rows.iter().map(peak_card).collect::<Vec<_>>().join("\n\n"),
            ViewMode::Table => table(
                &[
                    "PEAK NO",
                    "DATE",
                    "TIMELINE",
                    "PEAK PRICE",
                    "DOWNWARDS CHANGE",
                    "UPSIDE CHANGE",
                ],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.peak.clone().unwrap_or_else(|| CELL_PLACEHOLDER.to_string()),
                            peak_date(r),
                            format!(
                                "{}\n{}",
                                r.time_diff.as_deref().unwrap_or(CELL_PLACEHOLDER),
                                r.time_diff_str.as_deref().unwrap_or("")
                            ),
                            r.close.to_string(),
                            format::percent(r.percentage_change),
                            format::percent(r.reverse_percentage_change),
                        ]
                    })
                    .collect(),
            ),
        }
    });
    format!("Peak Data ({})\n{}", mode, body)
}
