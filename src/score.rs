//! Score extraction from free-text model output and the pass/fail gate.
//!
//! The model is asked for a "Security score (0-100)". Whatever it writes back,
//! the first `<digits>/100` is taken as that score, provided the text mentions
//! a score or security at all. Absence of a score is not a failure.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn score_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)/100").expect("Invalid score regex"))
}

fn decimal_digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d$").expect("Invalid digit regex"))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    decimal_digit_regex().is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a Unicode decimal digit (general category Nd).
///
/// Nd characters are only encoded in contiguous 0..9 runs, so the value is
/// the distance back to the start of the run, modulo 10.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut code = c as u32;
    let mut steps = 0;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        code -= 1;
        steps += 1;
    }
    Some(steps % 10)
}

/// A score as written by the model.
///
/// Keeps the normalized decimal text for display alongside a `u64` used by
/// the gate, which saturates when the digits do not fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    digits: String,
    value: u64,
    exact: bool,
}

impl Score {
    fn from_digits(raw: &str) -> Option<Self> {
        let mut digits = String::with_capacity(raw.len());
        for c in raw.chars() {
            let d = digit_value(c)?;
            if digits.is_empty() && d == 0 {
                continue;
            }
            digits.push(char::from_digit(d, 10)?);
        }
        if digits.is_empty() {
            digits.push('0');
        }

        let (value, exact) = match digits.parse::<u64>() {
            Ok(v) => (v, true),
            Err(_) => (u64::MAX, false),
        };
        Some(Self {
            digits,
            value,
            exact,
        })
    }

    /// Value used for the threshold comparison.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// False when the digits overflowed `u64` and `value` saturated.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// ASCII decimal digits, no leading zeros.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Pull the first `N/100` out of the response text.
///
/// Returns `None` when the text says nothing about a score or security, or
/// when no `N/100` appears. Any Unicode decimal digits count. Values above
/// 100 are returned as-is.
pub fn extract_score(text: &str) -> Option<Score> {
    let lower = text.to_lowercase();
    if !lower.contains("score") && !lower.contains("security") {
        return None;
    }

    let digits = score_pattern().captures(text)?.get(1)?.as_str();
    Score::from_digits(digits)
}

/// Result of comparing an extracted score to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Pass { score: u64, threshold: i64 },
    Fail { score: u64, threshold: i64 },
    NoScore,
}

impl GateOutcome {
    pub fn evaluate(score: Option<u64>, threshold: i64) -> Self {
        match score {
            Some(score) if i128::from(score) < i128::from(threshold) => {
                Self::Fail { score, threshold }
            }
            Some(score) => Self::Pass { score, threshold },
            None => Self::NoScore,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Fail { .. } => 1,
            Self::Pass { .. } | Self::NoScore => 0,
        }
    }

    pub fn score(&self) -> Option<u64> {
        match self {
            Self::Pass { score, .. } | Self::Fail { score, .. } => Some(*score),
            Self::NoScore => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass { .. } => "pass",
            Self::Fail { .. } => "fail",
            Self::NoScore => "no_score",
        }
    }
}
