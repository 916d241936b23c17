//! Selected company and investment amount

use serde::{Deserialize, Serialize};

/// Amount used when the user has not entered a valid one
pub const DEFAULT_INVESTMENT_AMOUNT: f64 = 1000.0;

/// Strictly positive, finite investment amount
///
/// Construction never fails: anything non-positive, non-finite or
/// unparseable collapses to [`DEFAULT_INVESTMENT_AMOUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAmount(f64);

impl Default for InvestmentAmount {
    fn default() -> Self {
        Self(DEFAULT_INVESTMENT_AMOUNT)
    }
}

impl From<f64> for InvestmentAmount {
    fn from(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self::default()
        }
    }
}

impl InvestmentAmount {
    /// Coerce raw field text into an amount
    pub fn parse(raw: &str) -> Self {
        let cleaned = strip_leading_zeros(raw);
        match cleaned.parse::<f64>() {
            Ok(value) => Self::from(value),
            Err(_) => Self::default(),
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_default(self) -> bool {
        self.0 == DEFAULT_INVESTMENT_AMOUNT
    }
}

impl std::fmt::Display for InvestmentAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim whitespace and drop leading zeros from amount field text
///
/// A zero directly before the decimal point is kept (`"0.5"` stays
/// `"0.5"`, `"007"` becomes `"7"`).
pub fn strip_leading_zeros(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.starts_with('.') {
        format!("0{}", stripped)
    } else if stripped.is_empty() && !trimmed.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Selection owned by the fetch coordinator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Set only through an explicit selection event
    pub selected_company: Option<String>,
    pub investment_amount: InvestmentAmount,
}
