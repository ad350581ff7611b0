//! Rule catalog
//!
//! Industry-specific phrase rules plus a general set that is applied to every
//! scan. Rules for a vertical are followed by the general rules, in
//! declaration order, so scanner output is reproducible.

pub mod finance;
pub mod general;
pub mod healthcare;
pub mod real_estate;

use regex::Regex;
use shared_types::Severity;

use crate::industry::Industry;
use crate::patterns::phrase_regex;

/// A single phrase-matching rule.
#[derive(Debug)]
pub struct RulePattern {
    pub matcher: Regex,
    pub severity: Severity,
    pub category: &'static str,
    pub regulation: Option<&'static str>,
}

impl RulePattern {
    /// Rule matching any of the given literal phrases.
    pub fn phrases(
        phrases: &[&str],
        severity: Severity,
        category: &'static str,
        regulation: Option<&'static str>,
    ) -> Self {
        Self {
            matcher: phrase_regex(phrases),
            severity,
            category,
            regulation,
        }
    }

    /// Rule backed by a hand-written regex. Callers supply `(?i)` themselves.
    pub fn regex(
        pattern: &str,
        severity: Severity,
        category: &'static str,
        regulation: Option<&'static str>,
    ) -> Self {
        Self {
            matcher: Regex::new(pattern).unwrap(),
            severity,
            category,
            regulation,
        }
    }
}

/// Rules that are specific to a vertical (empty for `General`).
pub fn vertical_rules(industry: Industry) -> &'static [RulePattern] {
    match industry {
        Industry::RealEstate => real_estate::RULES.as_slice(),
        Industry::Finance => finance::RULES.as_slice(),
        Industry::Healthcare => healthcare::RULES.as_slice(),
        Industry::General => &[],
    }
}

/// Ordered rule list for a vertical: its own rules, then the general rules.
pub fn rules_for(industry: Industry) -> Vec<&'static RulePattern> {
    vertical_rules(industry)
        .iter()
        .chain(general::RULES.iter())
        .collect()
}
