use serde::{Deserialize, Serialize};
use std::fmt;

use super::prices::PricePoint;

// ---------------------------------------------------------------------------
// MetricValue — A fundamentals figure, either numeric or pre-formatted text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "Market Cap", default)]
    pub market_cap: Option<MetricValue>,
    #[serde(rename = "EV", default)]
    pub ev: Option<MetricValue>,
    #[serde(rename = "Share Out", default)]
    pub shares_out: Option<MetricValue>,
    #[serde(rename = "Revenue", default)]
    pub revenue: Option<MetricValue>,
    #[serde(rename = "Employees", default)]
    pub employees: Option<MetricValue>,
    #[serde(rename = "RPE (Revenue per Employee)", default)]
    pub revenue_per_employee: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// ValuationTtm — Trailing twelve months
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationTtm {
    #[serde(rename = "P/E", default)]
    pub pe: Option<MetricValue>,
    #[serde(rename = "P/B", default)]
    pub pb: Option<MetricValue>,
    #[serde(rename = "EV/Sales", default)]
    pub ev_sales: Option<MetricValue>,
    #[serde(rename = "EV/EBITDA", default)]
    pub ev_ebitda: Option<MetricValue>,
    #[serde(rename = "P/FCF", default)]
    pub p_fcf: Option<MetricValue>,
    #[serde(rename = "EV/Gross Profit", default)]
    pub ev_gross_profit: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// ValuationNtm — Next twelve months
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationNtm {
    #[serde(rename = "Price Target", default)]
    pub price_target: Option<MetricValue>,
    #[serde(rename = "P/E", default)]
    pub pe: Option<MetricValue>,
    #[serde(rename = "PEG", default)]
    pub peg: Option<MetricValue>,
    #[serde(rename = "EV/Sales", default)]
    pub ev_sales: Option<MetricValue>,
    #[serde(rename = "EV/EBITDA", default)]
    pub ev_ebitda: Option<MetricValue>,
    #[serde(rename = "P/FCF", default)]
    pub p_fcf: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// FinancialHealth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    #[serde(rename = "Cash", default)]
    pub cash: Option<MetricValue>,
    #[serde(rename = "Net Debt", default)]
    pub net_debt: Option<MetricValue>,
    #[serde(rename = "Debt/Equity", default)]
    pub debt_equity: Option<MetricValue>,
    #[serde(rename = "EBIT/Interest", default)]
    pub ebit_interest: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// Growth — Compound annual growth rates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    #[serde(rename = "Revenue 3Yr CAGR", default)]
    pub revenue_3yr: Option<MetricValue>,
    #[serde(rename = "Revenue 5Yr CAGR", default)]
    pub revenue_5yr: Option<MetricValue>,
    #[serde(rename = "Revenue 10Yr CAGR", default)]
    pub revenue_10yr: Option<MetricValue>,
    #[serde(rename = "Diluted EPS 3Yr CAGR", default)]
    pub diluted_eps_3yr: Option<MetricValue>,
    #[serde(rename = "Diluted EPS 5Yr CAGR", default)]
    pub diluted_eps_5yr: Option<MetricValue>,
    #[serde(rename = "Diluted EPS 10Yr CAGR", default)]
    pub diluted_eps_10yr: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// Dividends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dividends {
    #[serde(rename = "Yield", default)]
    pub dividend_yield: Option<MetricValue>,
    #[serde(rename = "Payout Ratio", default)]
    pub payout_ratio: Option<MetricValue>,
    #[serde(rename = "DPS", default)]
    pub dps: Option<MetricValue>,
    #[serde(rename = "DPS Growth 3Yr", default)]
    pub dps_growth_3yr: Option<MetricValue>,
    #[serde(rename = "DPS Growth 5Yr", default)]
    pub dps_growth_5yr: Option<MetricValue>,
    #[serde(rename = "DPS Growth 10Yr", default)]
    pub dps_growth_10yr: Option<MetricValue>,
}

// ---------------------------------------------------------------------------
// Overview — Fundamentals by category plus an embedded price series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(rename = "Profile", default)]
    pub profile: Profile,
    #[serde(rename = "Valuation (TTM)", default)]
    pub valuation_ttm: ValuationTtm,
    #[serde(rename = "Valuation (NTM)", default)]
    pub valuation_ntm: ValuationNtm,
    #[serde(rename = "Financial Health", default)]
    pub financial_health: FinancialHealth,
    #[serde(rename = "Growth (CAGR)", default)]
    pub growth: Growth,
    #[serde(rename = "Dividends", default)]
    pub dividends: Dividends,
    #[serde(rename = "closingPrices", default)]
    pub closing_prices: Vec<PricePoint>,
}
