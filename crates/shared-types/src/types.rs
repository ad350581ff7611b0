//! Data model shared between the compliance engine and its callers.
//!
//! An [`AnalysisResult`] is the unit the external scan store persists. It is
//! built once per `analyze` call and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Score at or above which content is considered safe.
pub const SAFE_THRESHOLD: u8 = 80;

/// Score at or above which content is a warning rather than a danger.
pub const WARNING_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse three-level classification of a safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    /// Tier for a safety score: safe >= 80, warning 50..=79, danger < 50.
    pub fn from_score(score: u8) -> Self {
        if score >= SAFE_THRESHOLD {
            RiskLevel::Safe
        } else if score >= WARNING_THRESHOLD {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range into the analysed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPosition {
    pub start_offset: usize, // Inclusive, on a char boundary
    pub end_offset: usize,   // Exclusive, always > start_offset
}

impl TextPosition {
    /// Locate the first verbatim occurrence of `needle` in `haystack`.
    ///
    /// Returns `None` for an empty needle or when the text does not occur, so
    /// callers never fabricate a span.
    pub fn locate(haystack: &str, needle: &str) -> Option<Self> {
        if needle.is_empty() {
            return None;
        }
        haystack.find(needle).map(|start| TextPosition {
            start_offset: start,
            end_offset: start + needle.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which stage of the pipeline produced a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSource {
    Pattern,
    Model,
}

/// A single compliance issue tied to a span of the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub severity: Severity,
    pub matched_text: String,
    pub reason: String,
    pub regulation_ref: Option<String>,
    /// `None` marks an unanchored flag: the text could not be found verbatim.
    pub span: Option<TextPosition>,
    pub suggestion: Option<String>,
    pub source: FlagSource,
}

impl Flag {
    pub fn is_anchored(&self) -> bool {
        self.span.is_some()
    }

    /// Lowercased matched text, the identity used when merging flag lists.
    pub fn dedup_key(&self) -> String {
        self.matched_text.to_lowercase()
    }
}

/// Document-wide search/replace recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub original: String,
    pub replacement: String,
    pub reason: String,
}

/// Which path through the pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    /// Model analysis merged with pattern hits
    Full,
    /// Input too short for the model; pattern hits only
    ShortCircuit,
    /// Model stage failed; pattern hits only
    Fallback,
}

impl AnalysisMode {
    /// True when the result was produced without the generative stage.
    pub fn is_pattern_only(&self) -> bool {
        !matches!(self, AnalysisMode::Full)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub safety_score: u8,
    pub risk_level: RiskLevel,
    pub flags: Vec<Flag>,
    pub suggestions: Vec<Suggestion>,
    pub rewritten_content: String,
    pub overall_assessment: String,
    pub mode: AnalysisMode,
}

impl AnalysisResult {
    /// Count flags of a given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.flags.iter().filter(|f| f.severity == severity).count()
    }

    pub fn unanchored_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter().filter(|f| !f.is_anchored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Safe);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Warning);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::Danger);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Danger);
    }

    #[test]
    fn test_locate_first_occurrence() {
        let pos = TextPosition::locate("best of the best", "best").unwrap();
        assert_eq!(
            pos,
            TextPosition {
                start_offset: 0,
                end_offset: 4
            }
        );
    }

    #[test]
    fn test_locate_missing_or_empty_is_none() {
        assert!(TextPosition::locate("Act now!", "act later").is_none());
        assert!(TextPosition::locate("Act now!", "").is_none());
    }

    #[test]
    fn test_locate_is_case_sensitive() {
        assert!(TextPosition::locate("Guaranteed returns", "guaranteed returns").is_none());
    }

    #[test]
    fn test_locate_multibyte_offsets() {
        let text = "Café guaranteed";
        let pos = TextPosition::locate(text, "guaranteed").unwrap();
        assert_eq!(&text[pos.start_offset..pos.end_offset], "guaranteed");
        assert_eq!(pos.start_offset, 6);
    }

    #[test]
    fn test_wire_format() {
        let flag = Flag {
            severity: Severity::High,
            matched_text: "risk-free".to_string(),
            reason: "Risk Misrepresentation".to_string(),
            regulation_ref: None,
            span: None,
            suggestion: None,
            source: FlagSource::Model,
        };
        let json = serde_json::to_value(&flag).unwrap();
        assert_eq!(json["severity"], "high");
        assert_eq!(json["source"], "model");
        assert!(json["span"].is_null());
        assert_eq!(
            serde_json::to_value(AnalysisMode::ShortCircuit).unwrap(),
            "short_circuit"
        );
    }

    proptest! {
        /// Property: tier boundaries are monotone in the score
        #[test]
        fn risk_level_monotone(a in 0u8..=100, b in 0u8..=100) {
            let rank = |r: RiskLevel| match r {
                RiskLevel::Danger => 0,
                RiskLevel::Warning => 1,
                RiskLevel::Safe => 2,
            };
            if a <= b {
                prop_assert!(rank(RiskLevel::from_score(a)) <= rank(RiskLevel::from_score(b)));
            }
        }
    }
}
