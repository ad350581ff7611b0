//! Pattern scanner
//!
//! Applies the rule catalog to raw text. Every occurrence of every applicable
//! rule becomes its own flag; positional duplicates are kept at this stage.

use shared_types::{Flag, FlagSource, TextPosition};

use crate::catalog::{rules_for, RulePattern};
use crate::industry::Industry;
use crate::patterns::suggest_replacement;

/// Scan `text` with the rules for `industry` plus the general rules.
pub fn scan_text(text: &str, industry: Industry) -> Vec<Flag> {
    let mut flags = Vec::new();

    for rule in rules_for(industry) {
        flags.extend(scan_rule(text, rule));
    }

    flags
}

fn scan_rule<'a>(text: &'a str, rule: &'static RulePattern) -> impl Iterator<Item = Flag> + 'a {
    rule.matcher
        .find_iter(text)
        .filter(|m| m.end() > m.start())
        .map(move |m| Flag {
            severity: rule.severity,
            matched_text: m.as_str().to_string(),
            reason: format!(
                "{}: This phrase may violate compliance guidelines.",
                rule.category
            ),
            regulation_ref: rule.regulation.map(str::to_string),
            span: Some(TextPosition {
                start_offset: m.start(),
                end_offset: m.end(),
            }),
            suggestion: Some(suggest_replacement(m.as_str(), rule.category)),
            source: FlagSource::Pattern,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::Severity;

    fn texts(flags: &[Flag]) -> Vec<&str> {
        flags.iter().map(|f| f.matched_text.as_str()).collect()
    }

    #[test]
    fn test_empty_text_has_no_flags() {
        assert!(scan_text("", Industry::Finance).is_empty());
    }

    #[test]
    fn test_finance_investment_pitch() {
        let text = "Guaranteed 20% returns! Act now for this exclusive investment opportunity!";
        let flags = scan_text(text, Industry::Finance);

        assert_eq!(texts(&flags), vec!["Guaranteed", "Act now", "exclusive"]);

        let guaranteed = &flags[0];
        assert_eq!(guaranteed.severity, Severity::High);
        assert!(guaranteed.reason.starts_with("False Guarantee"));
        assert_eq!(guaranteed.regulation_ref.as_deref(), Some("SEC Rule 206(4)-1"));
        assert_eq!(guaranteed.suggestion.as_deref(), Some("may help"));

        let exclusive = &flags[2];
        assert_eq!(exclusive.severity, Severity::Medium);
        assert!(exclusive.reason.starts_with("Urgency Tactic"));
        assert_eq!(exclusive.suggestion.as_deref(), Some("special"));
    }

    #[test]
    fn test_spans_point_at_matched_text() {
        let text = "Our best plan is free. The best!";
        let flags = scan_text(text, Industry::General);
        assert_eq!(texts(&flags), vec!["best", "best", "free"]);
        for flag in &flags {
            let span = flag.span.unwrap();
            assert_eq!(&text[span.start_offset..span.end_offset], flag.matched_text);
            assert_eq!(flag.source, FlagSource::Pattern);
        }
        assert_ne!(flags[0].span, flags[1].span);
    }

    #[test]
    fn test_unicode_offsets_are_byte_offsets() {
        let text = "Ünïcödé café — miracle cure";
        let flags = scan_text(text, Industry::Healthcare);
        assert_eq!(texts(&flags), vec!["miracle", "cure"]);
        for flag in &flags {
            let span = flag.span.unwrap();
            assert_eq!(&text[span.start_offset..span.end_offset], flag.matched_text);
        }
    }

    #[test]
    fn test_unknown_suggestion_is_noop() {
        let flags = scan_text("A miracle in a bottle", Industry::Healthcare);
        assert_eq!(flags[0].suggestion.as_deref(), Some("miracle"));
    }

    #[test]
    fn test_unknown_industry_uses_general_rules() {
        let flags = scan_text("Guaranteed instant results", Industry::parse("automotive"));
        assert_eq!(texts(&flags), vec!["instant"]);
    }

    #[test]
    fn test_real_estate_listing() {
        let text = "Hurry! The best risk-free home, 10% appreciation guaranteed.";
        let flags = scan_text(text, Industry::RealEstate);
        assert_eq!(
            texts(&flags),
            vec![
                "guaranteed",
                "Hurry",
                "10% appreciation",
                "best",
                "risk-free",
                "best",
                "free"
            ]
        );
    }

    proptest! {
        /// Property: every span is a valid, non-empty range holding the matched text
        #[test]
        fn spans_are_valid(text in "\\PC{0,200}") {
            for industry in Industry::all() {
                for flag in scan_text(&text, industry) {
                    let span = flag.span.expect("pattern flags are anchored");
                    prop_assert!(span.start_offset < span.end_offset);
                    prop_assert!(span.end_offset <= text.len());
                    prop_assert_eq!(&text[span.start_offset..span.end_offset], flag.matched_text.as_str());
                }
            }
        }
    }
}
