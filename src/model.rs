// 📒 Data Model - one financial snapshot per calendar month
// MonthRecord = net-worth balances + ordered income/expense line items

use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// MONTH INDEX
// ============================================================================

/// Month index 0-11 (0 = January)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u8);

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Month {
    pub const JANUARY: Month = Month(0);
    pub const DECEMBER: Month = Month(11);

    pub fn new(index: u32) -> LedgerResult<Self> {
        if index < 12 {
            Ok(Month(index as u8))
        } else {
            Err(LedgerError::InvalidMonth(index))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Previous month within the same year (None for January)
    pub fn previous(self) -> Option<Month> {
        self.0.checked_sub(1).map(Month)
    }

    /// Next month within the same year (None for December)
    pub fn next(self) -> Option<Month> {
        if self.0 < 11 {
            Some(Month(self.0 + 1))
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        MONTH_LABELS[self.index()]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl DoubleEndedIterator<Item = Month> {
        (0..12u8).map(Month)
    }
}

impl TryFrom<u32> for Month {
    type Error = LedgerError;

    fn try_from(value: u32) -> LedgerResult<Self> {
        Month::new(value)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> u32 {
        month.0 as u32
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// Three independent balances; negatives allowed, always finite
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorth {
    #[serde(default, alias = "banco", deserialize_with = "lenient_amount")]
    pub bank: f64,

    #[serde(default, alias = "efectivo", deserialize_with = "lenient_amount")]
    pub cash: f64,

    #[serde(default, alias = "inversiones", deserialize_with = "lenient_amount")]
    pub investments: f64,
}

impl NetWorth {
    pub fn new(bank: f64, cash: f64, investments: f64) -> Self {
        Self {
            bank: finite_or_zero(bank),
            cash: finite_or_zero(cash),
            investments: finite_or_zero(investments),
        }
    }

    pub fn total(&self) -> f64 {
        self.bank + self.cash + self.investments
    }
}

/// A labeled amount. No identity beyond its position in the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, alias = "concepto", deserialize_with = "lenient_label")]
    pub label: String,

    #[serde(default, alias = "valor", deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount: finite_or_zero(amount),
        }
    }
}

/// Financial snapshot for one calendar month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    #[serde(
        rename = "netWorth",
        alias = "patrimonio",
        default,
        deserialize_with = "lenient_net_worth"
    )]
    pub net_worth: NetWorth,

    /// Display order = insertion order
    #[serde(default, alias = "ingresos", deserialize_with = "lenient_items")]
    pub income: Vec<LineItem>,

    #[serde(default, alias = "gastos", deserialize_with = "lenient_items")]
    pub expenses: Vec<LineItem>,
}

impl MonthRecord {
    pub fn income_total(&self) -> f64 {
        self.income.iter().map(|item| item.amount).sum()
    }

    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|item| item.amount).sum()
    }

    pub fn net_worth_total(&self) -> f64 {
        self.net_worth.total()
    }
}

// ============================================================================
// NUMERIC COERCION
// ============================================================================

/// Coerce user input to an amount.
///
/// Takes the longest leading decimal number (sign, digits, fraction,
/// exponent) after leading whitespace. Anything without a numeric prefix,
/// and anything that overflows to infinity, is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if mantissa_digits + (frac_end - frac_start) > 0 {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Coerce an arbitrary JSON value to an amount (persisted blobs)
pub fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(finite_or_zero).unwrap_or(0.0),
        Value::String(s) => parse_amount(s),
        _ => 0.0,
    }
}

fn coerce_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&value))
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_label(&value))
}

fn lenient_net_worth<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NetWorth, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
        _ => Ok(NetWorth::default()),
    }
}

fn lenient_items<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<LineItem>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(elements) = value else {
        return Ok(Vec::new());
    };

    Ok(elements
        .into_iter()
        .map(|element| match element {
            Value::Object(_) => serde_json::from_value(element).unwrap_or_default(),
            _ => LineItem::default(),
        })
        .collect())
}
