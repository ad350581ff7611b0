//! Healthcare marketing rules
//!
//! FDA and FTC health-claim concerns: cure claims, unsubstantiated efficacy
//! and safety misrepresentation.

use lazy_static::lazy_static;
use shared_types::Severity;

use super::RulePattern;

lazy_static! {
    pub static ref RULES: Vec<RulePattern> = vec![
        RulePattern::phrases(
            &["cure", "cures", "cured", "miracle"],
            Severity::High,
            "FDA Violation",
            Some("21 U.S.C. §352"),
        ),
        RulePattern::phrases(
            &["guaranteed results", "proven to"],
            Severity::High,
            "Unsubstantiated Claim",
            Some("FTC Health Products Compliance Guidance"),
        ),
        RulePattern::phrases(
            &["no side effects", "completely safe"],
            Severity::High,
            "Safety Misrepresentation",
            Some("21 U.S.C. §352"),
        ),
    ];
}
