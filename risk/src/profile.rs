//! Financial profile input and validation
//!
//! A `FinancialProfile` can only be built through validation, so every
//! profile that reaches the scorer already has finite, non-negative
//! amounts and a recognized volatility level. Untyped payloads (JSON
//! objects from a form, YAML fixtures) go through the same checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{RiskError, RiskResult};

/// Cashflow volatility level
///
/// Serializes lowercase; deserializes through `FromStr`, so any casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    /// Wire name of the level
    pub fn as_str(&self) -> &'static str {
        match self {
            Volatility::Low => "low",
            Volatility::Medium => "medium",
            Volatility::High => "high",
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Volatility {
    type Err = RiskError;

    /// Parse a level, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> RiskResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Volatility::Low),
            "medium" => Ok(Volatility::Medium),
            "high" => Ok(Volatility::High),
            other => Err(RiskError::invalid_input(
                "volatility",
                format!("expected one of low, medium, high, got {:?}", other),
            )),
        }
    }
}

impl TryFrom<String> for Volatility {
    type Error = RiskError;

    fn try_from(s: String) -> RiskResult<Self> {
        s.parse()
    }
}

/// One reporting period's cashflow inputs
///
/// Immutable once built. Zero revenue is accepted here and rejected by the
/// scorer, which keeps `DivisionByZero` distinct from other invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct FinancialProfile {
    revenue: f64,
    expenses: f64,
    debt: f64,
    emi: f64,
    volatility: Volatility,
}

impl FinancialProfile {
    /// Build a validated profile
    ///
    /// # Example
    ///
    /// ```
    /// use msme_risk::{FinancialProfile, Volatility};
    ///
    /// let profile = FinancialProfile::new(100_000.0, 60_000.0, 40_000.0, 10_000.0, Volatility::Medium).unwrap();
    /// assert_eq!(profile.revenue(), 100_000.0);
    ///
    /// assert!(FinancialProfile::new(100_000.0, -1.0, 0.0, 0.0, Volatility::Low).is_err());
    /// ```
    pub fn new(
        revenue: f64,
        expenses: f64,
        debt: f64,
        emi: f64,
        volatility: Volatility,
    ) -> RiskResult<Self> {
        check_amount("revenue", revenue)?;
        check_amount("expenses", expenses)?;
        check_amount("debt", debt)?;
        check_amount("emi", emi)?;

        Ok(Self {
            revenue,
            expenses,
            debt,
            emi,
            volatility,
        })
    }

    /// Validate an untyped JSON object into a profile
    ///
    /// Numbers may arrive as JSON numbers or numeric strings, since form
    /// submissions frequently send the latter.
    pub fn from_json_value(value: &Value) -> RiskResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            RiskError::invalid_input("profile", "expected a JSON object")
        })?;

        let revenue = number_field(object, "revenue")?;
        let expenses = number_field(object, "expenses")?;
        let debt = number_field(object, "debt")?;
        let emi = number_field(object, "emi")?;
        let volatility = match object.get("volatility") {
            Some(Value::String(s)) => s.parse()?,
            Some(Value::Null) | None => {
                return Err(RiskError::invalid_input("volatility", "field is missing"))
            }
            Some(other) => {
                return Err(RiskError::invalid_input(
                    "volatility",
                    format!("expected a string, got {}", other),
                ))
            }
        };

        Self::new(revenue, expenses, debt, emi, volatility)
    }

    /// Validate a JSON document into a profile
    pub fn from_json_str(json: &str) -> RiskResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| RiskError::invalid_input("profile", format!("malformed JSON: {}", e)))?;
        Self::from_json_value(&value)
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn debt(&self) -> f64 {
        self.debt
    }

    /// Monthly loan installment obligations
    pub fn emi(&self) -> f64 {
        self.emi
    }

    pub fn volatility(&self) -> Volatility {
        self.volatility
    }
}

impl TryFrom<Value> for FinancialProfile {
    type Error = RiskError;

    fn try_from(value: Value) -> RiskResult<Self> {
        Self::from_json_value(&value)
    }
}

/// Amounts must be finite and non-negative
fn check_amount(field: &str, value: f64) -> RiskResult<()> {
    if !value.is_finite() {
        return Err(RiskError::invalid_input(field, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(RiskError::invalid_input(
            field,
            format!("{} must not be negative", value),
        ));
    }
    Ok(())
}

fn number_field(object: &Map<String, Value>, field: &str) -> RiskResult<f64> {
    match object.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| RiskError::invalid_input(field, format!("{} is not representable", n))),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            RiskError::invalid_input(field, format!("{:?} is not a number", s))
        }),
        Some(Value::Null) | None => Err(RiskError::invalid_input(field, "field is missing")),
        Some(other) => Err(RiskError::invalid_input(
            field,
            format!("expected a number, got {}", other),
        )),
    }
}
