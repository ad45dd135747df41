//! Loosely typed numeric form input.
//!
//! Form clients send numbers either as JSON numbers or as strings typed into
//! a text box. Both shapes are accepted here and interpreted by the value
//! types that own the rules (credits, scores).

use serde::{Deserialize, Serialize};

/// A numeric field as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    /// A JSON number.
    Number(f64),
    /// A string that should contain a number.
    Text(String),
}

impl NumericInput {
    /// `true` for blank text, which callers treat like an absent field.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    /// Interpret the input as a finite float.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(number) => *number,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Interpret the input as a whole number.
    ///
    /// Text must spell an integer (`"3"`, not `"3.0"`); JSON numbers may carry
    /// a zero fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Text(text) => text.trim().parse::<i64>().ok(),
            Self::Number(number) => {
                let number = *number;
                if !number.is_finite() || number.fract() != 0.0 {
                    return None;
                }
                if number < i64::MIN as f64 || number > i64::MAX as f64 {
                    return None;
                }
                // Integral and range checked; `as` saturates at the bounds.
                Some(number as i64)
            }
        }
    }

    /// Original text for error details.
    pub fn raw(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}
