//! Financial services marketing rules
//!
//! SEC marketing rule and FINRA communications concerns: return guarantees,
//! insider language, get-rich framing and pressure tactics.

use lazy_static::lazy_static;
use shared_types::Severity;

use super::RulePattern;

lazy_static! {
    pub static ref RULES: Vec<RulePattern> = vec![
        RulePattern::phrases(
            &["guaranteed return", "guaranteed profit", "no risk"],
            Severity::High,
            "SEC Violation",
            Some("SEC Rule 206(4)-1"),
        ),
        RulePattern::phrases(
            &["secret", "insider", "exclusive opportunity"],
            Severity::High,
            "FINRA Violation",
            Some("FINRA Rule 2210"),
        ),
        RulePattern::phrases(
            &["double your money", "get rich", "financial freedom"],
            Severity::High,
            "Misleading Claim",
            Some("FINRA Rule 2210(d)(1)"),
        ),
        RulePattern::phrases(
            &["can't lose", "sure thing", "100%", "guarantee", "guaranteed"],
            Severity::High,
            "False Guarantee",
            Some("SEC Rule 206(4)-1"),
        ),
        RulePattern::phrases(
            &["exclusive", "limited time", "act now", "hurry"],
            Severity::Medium,
            "Urgency Tactic",
            Some("FINRA Rule 2210(d)(1)"),
        ),
    ];
}
