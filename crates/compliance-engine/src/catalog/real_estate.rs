//! Real estate marketing rules
//!
//! Fair housing and truth-in-advertising concerns for listings and
//! investment-property promotions (HUD, NAR Code of Ethics, FTC Act).

use lazy_static::lazy_static;
use shared_types::Severity;

use super::RulePattern;

lazy_static! {
    pub static ref RULES: Vec<RulePattern> = vec![
        RulePattern::phrases(
            &["guarantee", "guaranteed", "promise"],
            Severity::High,
            "False Promise",
            Some("FTC Act §5"),
        ),
        RulePattern::phrases(
            &["exclusive", "limited time", "act now", "hurry"],
            Severity::Medium,
            "Urgency Tactic",
            None,
        ),
        RulePattern::regex(
            r"(?i)\b\d+(?:\.\d+)?%\s*(?:returns?|profits?|gains?|appreciation)\b",
            Severity::High,
            "Return Projection",
            Some("NAR Code of Ethics Art. 12"),
        ),
        RulePattern::phrases(
            &["best", "#1", "number one", "top rated"],
            Severity::Medium,
            "Unsubstantiated Claim",
            Some("NAR Code of Ethics Art. 12"),
        ),
        RulePattern::phrases(
            &["no risk", "risk-free", "safe investment"],
            Severity::High,
            "Risk Misrepresentation",
            Some("FTC Act §5"),
        ),
    ];
}
