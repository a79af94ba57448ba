//! Shared test fixtures for the dashboard integration tests.
//!
//! Provides `StubTransport`, an in-memory [`Transport`] that answers each
//! endpoint with a canned `(status, body)` pair, plus sample payloads for
//! every endpoint wrapped in the `{message, result}` envelope.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};

use serde_json::{json, Value};
use ticker_dashboard::{Dashboard, DashboardSnapshot, RawResponse, Result, Transport};

pub const BASE_URL: &str = "http://stub.local";

// ---------------------------------------------------------------------------
// StubTransport
// ---------------------------------------------------------------------------

/// Blocks requests until opened.
#[derive(Default)]
struct Gate {
    open: Mutex<bool>,
    cv: Condvar,
}

impl Gate {
    fn wait(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cv.wait(open).unwrap();
        }
    }

    fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.cv.notify_all();
    }
}

/// Canned responses keyed by endpoint name (`"info"`, `"peaks"`, ...).
///
/// Unknown endpoints answer 404. Every request is recorded as
/// `url?key=value`.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, (u16, String)>>,
    calls: Mutex<Vec<String>>,
    gate: Option<Gate>,
}

impl StubTransport {
    /// Every endpoint answers 200 with its sample payload.
    pub fn healthy() -> Self {
        let stub = Self::default();
        for (name, body) in sample_routes() {
            stub.set_route(name, 200, body);
        }
        stub
    }

    /// Like [`healthy`](Self::healthy), but every request blocks until
    /// [`release`](Self::release) is called.
    pub fn gated() -> Self {
        let mut stub = Self::healthy();
        stub.gate = Some(Gate::default());
        stub
    }

    pub fn with_route(self, endpoint: &str, status: u16, body: impl Into<String>) -> Self {
        self.set_route(endpoint, status, body);
        self
    }

    pub fn set_route(&self, endpoint: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), (status, body.into()));
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release();
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}?{}", url, qs.join("&")));

        if let Some(gate) = &self.gate {
            gate.wait();
        }

        let endpoint = url.rsplit('/').next().unwrap_or_default();
        let routes = self.routes.lock().unwrap();
        Ok(match routes.get(endpoint) {
            Some((status, body)) => RawResponse::new(*status, body.clone()),
            None => RawResponse::new(404, r#"{"message":"not found"}"#),
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboards
// ---------------------------------------------------------------------------

/// An inactive dashboard for AAPL on top of `stub`.
pub fn dashboard_with(stub: Arc<StubTransport>) -> Dashboard {
    Dashboard::builder()
        .base_url(BASE_URL)
        .symbol("AAPL")
        .transport(stub)
        .build()
        .unwrap()
}

/// Activate, wait for every fetch thread, and return the final snapshot.
pub fn settle(dashboard: &mut Dashboard) -> DashboardSnapshot {
    dashboard.activate().unwrap();
    dashboard.wait_settled();
    dashboard.snapshot()
}

// ---------------------------------------------------------------------------
// Sample payloads
// ---------------------------------------------------------------------------

pub fn envelope(result: Value) -> String {
    json!({ "message": "success", "result": result }).to_string()
}

pub fn sample_routes() -> Vec<(&'static str, String)> {
    vec![
        ("info", envelope(info_json())),
        ("closing-prices", envelope(closing_prices_json(10))),
        ("trading-high-low", envelope(high_low_json(&["13", "26", "52", "104"]))),
        ("moving-average", envelope(moving_average_json())),
        ("performance", envelope(performance_json())),
        ("peaks", envelope(peaks_json())),
        ("overview", envelope(overview_json())),
    ]
}

pub fn info_json() -> Value {
    json!({
        "ticker": "AAPL",
        "nm": "Apple Inc.",
        "logo": null,
        "exchange": "NASDAQ",
        "latestClose": 190.5,
        "percentageChange": 1.25,
        "change": 2.35,
        "currency": "USD",
        "remaining_opportunity": 12.5,
        "hedgedCurrency": [{ "currency": "CAD" }, { "currency": "EUR" }],
        "RSI": 55,
        "DMA_200": 180.0,
        "SRT_124": "1.2",
        "nextEarningsDate": "2025-01-30"
    })
}

/// `count` consecutive daily closes starting at 100.
pub fn closing_prices_json(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| json!({ "date": format!("2024-01-{:02}", i + 1), "close": 100 + i }))
            .collect(),
    )
}

/// One entry per requested window. `week` alternates between string and
/// number encodings, as the API does.
pub fn high_low_json(weeks: &[&str]) -> Value {
    Value::Array(
        weeks
            .iter()
            .enumerate()
            .map(|(i, week)| {
                let week_value = if i % 2 == 0 {
                    json!(week)
                } else {
                    json!(week.parse::<u64>().unwrap())
                };
                json!({
                    "week": week_value,
                    "high": 199.62,
                    "low": 164.08,
                    "highDate": "2024-03-15",
                    "lowDate": "2024-01-04",
                    "highPercentage": 4.79,
                    "lowPercentage": -13.87,
                    "highDaysAgo": 45,
                    "lowDaysAgo": 120
                })
            })
            .collect(),
    )
}

pub fn moving_average_json() -> Value {
    json!([
        { "day": 50, "dma_price": 185.2, "date": "2024-06-01", "upward_percent": 2.9, "downward_percent": null },
        { "day": 100, "dma_price": 182.75, "date": "2024-06-01", "upward_percent": "4.2", "downward_percent": "" },
        { "day": 200, "dma_price": 195.1, "date": "2024-06-01", "upward_percent": null, "downward_percent": 2.4 }
    ])
}

pub fn performance_json() -> Value {
    json!([
        { "date": "2024-06-07", "day": "1 Week", "current_price": 190.5, "change": -2.1, "change_pct": -1.09, "pe": 29.3, "pe_change_pct": null },
        { "date": "2024-05-14", "day": "1 Month", "current_price": 190.5, "change": 3.4, "change_pct": 1.82, "pe": 29.3, "pe_change_pct": 1.1 }
    ])
}

pub fn peaks_json() -> Value {
    json!({
        "peakData": [
            {
                "peak": 1,
                "Date": "2024-03-15",
                "Close": 199.62,
                "timeDiff": 45,
                "time_diff_str": "1 month 15 days",
                "change": -20.1,
                "percentageChange": -10.07,
                "reverseChange": 15.2,
                "reversePercentageChange": 8.46
            }
        ]
    })
}

pub fn overview_json() -> Value {
    json!({
        "Profile": {
            "Market Cap": "2.9T",
            "EV": "2.95T",
            "Share Out": "15.4B",
            "Revenue": "383B",
            "Employees": 161000,
            "RPE (Revenue per Employee)": "2.4M"
        },
        "Valuation (TTM)": { "P/E": 29.5, "P/B": 45.1, "EV/Sales": 7.7 },
        "Valuation (NTM)": { "Price Target": 210, "PEG": 2.6 },
        "Financial Health": { "Cash": "73B", "Net Debt": "31B" },
        "Growth (CAGR)": { "Revenue 3Yr CAGR": 8.2, "Diluted EPS 5Yr CAGR": 15.4 },
        "Dividends": { "Yield": "0.5%", "DPS": 0.96 },
        "closingPrices": [
            { "time": "2024-06-05", "value": 195.87 },
            { "time": "2024-06-06", "value": 194.48 },
            { "time": "2024-06-07", "value": 196.89 }
        ]
    })
}

/// Overview payload without the embedded price series.
pub fn overview_without_prices_json() -> Value {
    let mut overview = overview_json();
    if let Value::Object(map) = &mut overview {
        map.remove("closingPrices");
    }
    overview
}
