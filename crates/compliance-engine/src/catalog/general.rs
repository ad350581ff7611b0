//! General rules - applied to every scan regardless of vertical
//!
//! Baseline truth-in-advertising concerns (FTC Act §5).

use lazy_static::lazy_static;
use shared_types::Severity;

use super::RulePattern;

lazy_static! {
    pub static ref RULES: Vec<RulePattern> = vec![
        RulePattern::phrases(
            &["best", "#1", "number one", "top"],
            Severity::Medium,
            "Superlative Claim",
            Some("FTC Act §5"),
        ),
        RulePattern::phrases(
            &["instant", "immediate", "overnight"],
            Severity::Medium,
            "Unrealistic Timeframe",
            Some("FTC Act §5"),
        ),
        RulePattern::phrases(
            &["free", "no cost", "zero cost"],
            Severity::Low,
            "Free Claim",
            Some("16 CFR 251"),
        ),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_claim_is_low() {
        let rule = RULES.iter().find(|r| r.category == "Free Claim").unwrap();
        assert_eq!(rule.severity, Severity::Low);
        assert!(rule.matcher.is_match("Get it FREE today"));
        assert!(rule.matcher.is_match("at zero cost to you"));
    }

    #[test]
    fn test_timeframe_phrases() {
        let rule = &RULES[1];
        assert!(rule.matcher.is_match("Overnight success"));
        assert!(!rule.matcher.is_match("instantaneous"));
    }
}
