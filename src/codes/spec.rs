//! Parsing of a single status code specification.
//!
//! Accepted forms:
//! - `404` exact code
//! - `500-504` inclusive range, `-` separated
//! - `5xx` whole hundred-block (`x` is case-insensitive)

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Lowest status code a spec may name.
pub const MIN_CODE: u16 = 100;
/// Highest status code a spec may name.
pub const MAX_CODE: u16 = 599;

/// One compiled status code rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSpec {
    Exact(u16),
    Range { low: u16, high: u16 },
}

impl CodeSpec {
    /// Returns true if `code` is covered by this rule.
    #[inline]
    pub fn contains(&self, code: u16) -> bool {
        match *self {
            CodeSpec::Exact(c) => c == code,
            CodeSpec::Range { low, high } => low <= code && code <= high,
        }
    }
}

impl fmt::Display for CodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeSpec::Exact(c) => write!(f, "{}", c),
            CodeSpec::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

impl FromStr for CodeSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = |reason| ConfigError::InvalidCodeSpec {
            token: token.to_string(),
            reason,
        };

        if token.is_empty() {
            return Err(invalid("empty token"));
        }

        if let Some((low, high)) = token.split_once('-') {
            let low = parse_code(low.trim()).map_err(invalid)?;
            let high = parse_code(high.trim()).map_err(invalid)?;
            if low > high {
                return Err(invalid("range start is greater than range end"));
            }
            return Ok(CodeSpec::Range { low, high });
        }

        if let Some(class) = parse_class(token) {
            let low = class * 100;
            if !(MIN_CODE..=MAX_CODE).contains(&low) {
                return Err(invalid("status class out of bounds"));
            }
            return Ok(CodeSpec::Range { low, high: low + 99 });
        }

        parse_code(token).map(CodeSpec::Exact).map_err(invalid)
    }
}

fn parse_code(s: &str) -> Result<u16, &'static str> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a number");
    }
    let code: u16 = s.parse().map_err(|_| "status code out of bounds")?;
    if !(MIN_CODE..=MAX_CODE).contains(&code) {
        return Err("status code out of bounds");
    }
    Ok(code)
}

/// `Nxx` → `Some(N)`.
fn parse_class(s: &str) -> Option<u16> {
    let bytes = s.as_bytes();
    match bytes {
        [d, x1, x2] if d.is_ascii_digit() && x1.eq_ignore_ascii_case(&b'x') && x2.eq_ignore_ascii_case(&b'x') => {
            Some(u16::from(d - b'0'))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact() {
        assert_eq!("404".parse::<CodeSpec>().unwrap(), CodeSpec::Exact(404));
        assert_eq!("  401 ".parse::<CodeSpec>().unwrap(), CodeSpec::Exact(401));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            "500-504".parse::<CodeSpec>().unwrap(),
            CodeSpec::Range { low: 500, high: 504 }
        );
        assert_eq!(
            "400 - 404".parse::<CodeSpec>().unwrap(),
            CodeSpec::Range { low: 400, high: 404 }
        );
        assert_eq!(
            "418-418".parse::<CodeSpec>().unwrap(),
            CodeSpec::Range { low: 418, high: 418 }
        );
    }

    #[test]
    fn test_parse_class_wildcard() {
        assert_eq!(
            "5xx".parse::<CodeSpec>().unwrap(),
            CodeSpec::Range { low: 500, high: 599 }
        );
        assert_eq!(
            "4XX".parse::<CodeSpec>().unwrap(),
            CodeSpec::Range { low: 400, high: 499 }
        );
        assert!("6xx".parse::<CodeSpec>().is_err());
        assert!("0xx".parse::<CodeSpec>().is_err());
        assert!("5x".parse::<CodeSpec>().is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for token in ["abc", "600-700", "500-100", "", "  ", "99", "600", "-", "500-", "+404", "4o4"] {
            let err = token.parse::<CodeSpec>().unwrap_err();
            match err {
                ConfigError::InvalidCodeSpec { token: t, .. } => assert_eq!(t, token.trim()),
                other => panic!("unexpected error for {:?}: {:?}", token, other),
            }
        }
    }

    #[test]
    fn test_contains_and_display() {
        let range = CodeSpec::Range { low: 500, high: 502 };
        assert!(range.contains(500));
        assert!(range.contains(502));
        assert!(!range.contains(503));
        assert_eq!(range.to_string(), "500-502");
        assert_eq!(CodeSpec::Exact(401).to_string(), "401");
    }
}
