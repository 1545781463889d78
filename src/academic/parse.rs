// src/academic/parse.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A year as the host hands it over: free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Text(String),
}

impl YearInput {
    /// Integer value with leading-prefix semantics for text:
    /// `" 2025"` → 2025, `"2025/26"` → 2025, `"-3x"` → -3, `"abc"` → None.
    pub fn parse(&self) -> Option<i64> {
        match self {
            YearInput::Number(n) => Some(*n),
            YearInput::Text(s) => parse_leading_int(s),
        }
    }
}

impl fmt::Display for YearInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearInput::Number(n) => write!(f, "{}", n),
            YearInput::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for YearInput {
    fn from(n: i64) -> Self {
        YearInput::Number(n)
    }
}

impl From<i32> for YearInput {
    fn from(n: i32) -> Self {
        YearInput::Number(n.into())
    }
}

impl From<u32> for YearInput {
    fn from(n: u32) -> Self {
        YearInput::Number(n.into())
    }
}

impl From<&str> for YearInput {
    fn from(s: &str) -> Self {
        YearInput::Text(s.to_owned())
    }
}

impl From<String> for YearInput {
    fn from(s: String) -> Self {
        YearInput::Text(s)
    }
}

/// Numbers are truncated toward zero. Strings go through prefix parsing.
/// Everything else (null, bools, arrays, objects) becomes unparseable text.
impl From<&Value> for YearInput {
    fn from(v: &Value) -> Self {
        match v {
            Value::Number(n) => match n.as_i64() {
                Some(i) => YearInput::Number(i),
                None => match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                        YearInput::Number(f.trunc() as i64)
                    }
                    _ => YearInput::Text(n.to_string()),
                },
            },
            Value::String(s) => YearInput::Text(s.clone()),
            other => YearInput::Text(other.to_string()),
        }
    }
}

impl From<Value> for YearInput {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => YearInput::Text(s),
            other => YearInput::from(&other),
        }
    }
}

/// Goes through [`Value`] so JSON floats truncate the same way
/// `From<&Value>` does.
impl<'de> Deserialize<'de> for YearInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(YearInput::from)
    }
}

/// Skip leading whitespace, accept one sign, then take digits up to the
/// first non-digit. No digits, or overflow, is a failure.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_prefix() {
        assert_eq!(parse_leading_int("2025"), Some(2025));
        assert_eq!(parse_leading_int("  2025"), Some(2025));
        assert_eq!(parse_leading_int("2025-26"), Some(2025));
        assert_eq!(parse_leading_int("2025.9"), Some(2025));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("-12ab"), Some(-12));
        assert_eq!(parse_leading_int("007"), Some(7));
    }

    #[test]
    fn unparseable_text() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("a2025"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[test]
    fn from_json_values() {
        assert_eq!(YearInput::from(&json!(2025)).parse(), Some(2025));
        assert_eq!(YearInput::from(&json!(2025.7)).parse(), Some(2025));
        assert_eq!(YearInput::from(&json!("2025")).parse(), Some(2025));
        assert_eq!(YearInput::from(&json!(null)).parse(), None);
        assert_eq!(YearInput::from(&json!(true)).parse(), None);
    }

    #[test]
    fn deserializes_text_and_numbers() -> anyhow::Result<()> {
        let n: YearInput = serde_json::from_value(json!(2025))?;
        let s: YearInput = serde_json::from_value(json!("2025"))?;
        assert_eq!(n, YearInput::Number(2025));
        assert_eq!(s, YearInput::Text("2025".into()));
        Ok(())
    }

    #[test]
    fn deserialize_matches_json_conversion() -> anyhow::Result<()> {
        for v in [json!(2025.5), json!(-3.9), json!("2025-26"), json!(null), json!([2025])] {
            let de: YearInput = serde_json::from_value(v.clone())?;
            assert_eq!(de, YearInput::from(&v), "{}", v);
        }

        let de: YearInput = serde_json::from_value(json!(2025.5))?;
        assert_eq!(de, YearInput::Number(2025));
        Ok(())
    }
}
