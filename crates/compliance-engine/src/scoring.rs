//! Scoring function
//!
//! Start at 100 and subtract a fixed penalty per flag, clamped to 0..=100.
//! Penalties are additive with no diminishing returns.

use serde::{Deserialize, Serialize};
use shared_types::{Flag, RiskLevel, Severity};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub high_penalty: u32,
    pub medium_penalty: u32,
    pub low_penalty: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            high_penalty: 25,
            medium_penalty: 10,
            low_penalty: 5,
        }
    }
}

impl ScoringPolicy {
    pub fn penalty(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high_penalty,
            Severity::Medium => self.medium_penalty,
            Severity::Low => self.low_penalty,
        }
    }

    /// Safety score for a flag list.
    pub fn score(&self, flags: &[Flag]) -> u8 {
        let total: u64 = flags
            .iter()
            .map(|f| u64::from(self.penalty(f.severity)))
            .sum();
        let deducted = total.min(u64::from(MAX_SCORE)) as u8;
        MAX_SCORE - deducted
    }

    /// Score plus its risk tier.
    pub fn assess(&self, flags: &[Flag]) -> (u8, RiskLevel) {
        let score = self.score(flags);
        (score, RiskLevel::from_score(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::FlagSource;

    fn flag(severity: Severity) -> Flag {
        Flag {
            severity,
            matched_text: "x".to_string(),
            reason: String::new(),
            regulation_ref: None,
            span: None,
            suggestion: None,
            source: FlagSource::Pattern,
        }
    }

    fn severity_strategy() -> impl Strategy<Value = Severity> {
        prop_oneof![
            Just(Severity::High),
            Just(Severity::Medium),
            Just(Severity::Low)
        ]
    }

    #[test]
    fn test_no_flags_is_perfect() {
        assert_eq!(ScoringPolicy::default().score(&[]), 100);
        assert_eq!(
            ScoringPolicy::default().assess(&[]),
            (100, RiskLevel::Safe)
        );
    }

    #[test]
    fn test_mixed_penalties() {
        let flags = vec![flag(Severity::High), flag(Severity::Medium)];
        assert_eq!(
            ScoringPolicy::default().assess(&flags),
            (65, RiskLevel::Warning)
        );

        let flags = vec![flag(Severity::Low); 3];
        assert_eq!(ScoringPolicy::default().score(&flags), 85);
    }

    #[test]
    fn test_clamps_at_zero() {
        let flags = vec![flag(Severity::High); 5];
        assert_eq!(
            ScoringPolicy::default().assess(&flags),
            (0, RiskLevel::Danger)
        );
    }

    #[test]
    fn test_custom_policy() {
        let policy = ScoringPolicy {
            high_penalty: 40,
            medium_penalty: 0,
            low_penalty: 1,
        };
        let flags = vec![flag(Severity::High), flag(Severity::Medium), flag(Severity::Low)];
        assert_eq!(policy.score(&flags), 59);
    }

    #[test]
    fn test_huge_penalties_do_not_overflow() {
        let policy = ScoringPolicy {
            high_penalty: u32::MAX,
            medium_penalty: u32::MAX,
            low_penalty: u32::MAX,
        };
        let flags = vec![flag(Severity::High); 4];
        assert_eq!(policy.score(&flags), 0);
    }

    proptest! {
        /// Property: score follows the closed formula and tier always agrees with score
        #[test]
        fn score_matches_formula(severities in prop::collection::vec(severity_strategy(), 0..20)) {
            let flags: Vec<Flag> = severities.iter().copied().map(flag).collect();
            let high = severities.iter().filter(|s| **s == Severity::High).count() as i64;
            let medium = severities.iter().filter(|s| **s == Severity::Medium).count() as i64;
            let low = severities.iter().filter(|s| **s == Severity::Low).count() as i64;
            let expected = (100 - 25 * high - 10 * medium - 5 * low).clamp(0, 100) as u8;

            let (score, risk) = ScoringPolicy::default().assess(&flags);
            prop_assert_eq!(score, expected);
            prop_assert_eq!(risk, RiskLevel::from_score(score));
        }
    }
}
