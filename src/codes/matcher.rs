//! Compiled status code matcher.
//!
//! # Design Decisions
//! - Pure set membership: declaration order never changes a result
//! - `matches` is on the per-request hot path and never allocates

use std::fmt;

use crate::codes::spec::CodeSpec;
use crate::error::ConfigError;

/// An immutable set of status code rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeRangeMatcher {
    specs: Vec<CodeSpec>,
}

impl CodeRangeMatcher {
    /// Compile a list of status code specifications.
    ///
    /// Fails on the first malformed token; nothing is kept in that case.
    pub fn build<S: AsRef<str>>(specs: &[S]) -> Result<Self, ConfigError> {
        let specs = specs
            .iter()
            .map(|s| s.as_ref().parse::<CodeSpec>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { specs })
    }

    /// Returns true if `code` is covered by at least one rule.
    #[inline]
    pub fn matches(&self, code: u16) -> bool {
        self.specs.iter().any(|spec| spec.contains(code))
    }

    /// True when no rule was configured; such a matcher never matches.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The compiled rules, in declaration order.
    pub fn specs(&self) -> &[CodeSpec] {
        &self.specs
    }
}

impl fmt::Display for CodeRangeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_codes(matcher: &CodeRangeMatcher) -> Vec<bool> {
        (100..=599).map(|c| matcher.matches(c)).collect()
    }

    #[test]
    fn test_exact_codes() {
        let matcher = CodeRangeMatcher::build(&["401", "402"]).unwrap();
        assert!(matcher.matches(401));
        assert!(matcher.matches(402));
        assert!(!matcher.matches(400));
        assert!(!matcher.matches(200));
    }

    #[test]
    fn test_mixed_rules() {
        let matcher = CodeRangeMatcher::build(&["404", "500-503", "3xx"]).unwrap();
        assert!(matcher.matches(404));
        assert!(matcher.matches(500));
        assert!(matcher.matches(503));
        assert!(!matcher.matches(504));
        assert!(matcher.matches(300));
        assert!(matcher.matches(399));
        assert!(!matcher.matches(200));
        assert_eq!(matcher.to_string(), "404,500-503,300-399");
    }

    #[test]
    fn test_empty_matches_nothing() {
        let matcher = CodeRangeMatcher::build::<&str>(&[]).unwrap();
        assert!(matcher.is_empty());
        assert!(all_codes(&matcher).iter().all(|m| !m));
    }

    #[test]
    fn test_order_independent() {
        let a = CodeRangeMatcher::build(&["5xx", "401", "403-404"]).unwrap();
        let b = CodeRangeMatcher::build(&["403-404", "5xx", "401"]).unwrap();
        assert_eq!(all_codes(&a), all_codes(&b));
    }

    #[test]
    fn test_build_is_deterministic() {
        let specs = vec!["4xx".to_string(), "502".to_string()];
        let a = CodeRangeMatcher::build(&specs).unwrap();
        let b = CodeRangeMatcher::build(&specs).unwrap();
        assert_eq!(a, b);
        assert_eq!(all_codes(&a), all_codes(&b));
    }

    #[test]
    fn test_membership_agrees_with_rules() {
        let matcher = CodeRangeMatcher::build(&["418", "500-504", "3xx"]).unwrap();
        for code in 100..=599u16 {
            let expected = code == 418 || (500..=504).contains(&code) || (300..=399).contains(&code);
            assert_eq!(matcher.matches(code), expected, "code {}", code);
        }
    }

    #[test]
    fn test_build_fails_atomically() {
        for bad in ["abc", "600-700", "500-100"] {
            let err = CodeRangeMatcher::build(&["401", bad]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidCodeSpec { ref token, .. } if token == bad),
                "unexpected error {:?}",
                err
            );
        }
    }
}
