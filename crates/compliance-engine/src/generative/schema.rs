//! Structured response schema for the generative stage
//!
//! The model's reply is untrusted input: it is decoded with serde (missing
//! fields, wrong types, fractional or negative scores and unknown enum values
//! fail) and then range-checked. Nothing is coerced.

use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shared_types::{Flag, FlagSource, RiskLevel, Severity, Suggestion, TextPosition};

use super::error::ModelError;

/// Name under which the schema is offered to the model service.
pub const SCHEMA_NAME: &str = "compliance_analysis";

/// Complete compliance analysis returned by the model
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelAnalysis {
    #[schemars(description = "Brief 1-2 sentence overall compliance assessment")]
    pub overall_assessment: String,

    #[schemars(description = "Safety score from 0-100", range(min = 0, max = 100))]
    pub safety_score: u8,

    #[schemars(description = "Overall risk level")]
    pub risk_level: ModelRiskLevel,

    pub flags: Vec<ModelFlag>,

    #[schemars(description = "Fully rewritten compliant version of the content")]
    pub rewritten_content: String,

    pub suggestions: Vec<ModelSuggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelRiskLevel {
    Safe,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModelSeverity {
    High,
    Medium,
    Low,
}

/// A single issue reported by the model
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelFlag {
    #[serde(rename = "type")]
    pub severity: ModelSeverity,

    #[schemars(description = "The exact problematic text")]
    pub text: String,

    #[schemars(description = "Why this is a compliance issue")]
    pub reason: String,

    #[schemars(description = "Relevant regulation if applicable")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,

    #[schemars(description = "Compliant alternative text")]
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ModelSuggestion {
    pub original: String,
    pub replacement: String,
    pub reason: String,
}

/// A validated model analysis, converted to domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFindings {
    pub overall_assessment: String,
    pub safety_score: u8,
    pub risk_level: RiskLevel,
    pub flags: Vec<Flag>,
    pub suggestions: Vec<Suggestion>,
    pub rewritten_content: String,
}

impl ModelAnalysis {
    /// JSON schema handed to the model service, with sub-schemas inlined.
    pub fn json_schema() -> serde_json::Value {
        SchemaSettings::draft07()
            .with(|s| s.inline_subschemas = true)
            .into_generator()
            .into_root_schema_for::<ModelAnalysis>()
            .to_value()
    }

    /// Decode and validate a raw model response.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        let analysis: ModelAnalysis = serde_json::from_value(value)
            .map_err(|e| ModelError::invalid(e.to_string()))?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.safety_score > 100 {
            return Err(ModelError::invalid(format!(
                "safetyScore {} is outside 0-100",
                self.safety_score
            )));
        }
        Ok(())
    }

    /// Convert to domain types, anchoring each flag in `content`.
    ///
    /// Flags whose text does not occur verbatim stay in the list with no span.
    /// The risk tier is always derived from the score; a disagreeing tier
    /// from the model is logged and replaced.
    pub fn into_findings(self, content: &str) -> ModelFindings {
        let safety_score = self.safety_score;
        let risk_level = RiskLevel::from_score(safety_score);
        let reported = convert_risk_level(self.risk_level);
        if reported != risk_level {
            tracing::warn!(
                score = safety_score,
                reported = %reported,
                derived = %risk_level,
                "Model risk level disagrees with its score, using score-derived tier"
            );
        }

        let flags: Vec<Flag> = self
            .flags
            .into_iter()
            .map(|f| convert_flag(f, content))
            .collect();

        let unanchored = flags.iter().filter(|f| !f.is_anchored()).count();
        if unanchored > 0 {
            tracing::debug!(
                unanchored,
                total = flags.len(),
                "Model flags could not be located verbatim in content"
            );
        }

        ModelFindings {
            overall_assessment: self.overall_assessment,
            safety_score,
            risk_level,
            flags,
            suggestions: self
                .suggestions
                .into_iter()
                .map(|s| Suggestion {
                    original: s.original,
                    replacement: s.replacement,
                    reason: s.reason,
                })
                .collect(),
            rewritten_content: self.rewritten_content,
        }
    }
}

fn convert_risk_level(level: ModelRiskLevel) -> RiskLevel {
    match level {
        ModelRiskLevel::Safe => RiskLevel::Safe,
        ModelRiskLevel::Warning => RiskLevel::Warning,
        ModelRiskLevel::Danger => RiskLevel::Danger,
    }
}

fn convert_severity(severity: ModelSeverity) -> Severity {
    match severity {
        ModelSeverity::High => Severity::High,
        ModelSeverity::Medium => Severity::Medium,
        ModelSeverity::Low => Severity::Low,
    }
}

fn convert_flag(flag: ModelFlag, content: &str) -> Flag {
    Flag {
        severity: convert_severity(flag.severity),
        span: TextPosition::locate(content, &flag.text),
        matched_text: flag.text,
        reason: flag.reason,
        regulation_ref: flag.regulation.filter(|r| !r.trim().is_empty()),
        suggestion: Some(flag.suggestion),
        source: FlagSource::Model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_response() -> serde_json::Value {
        json!({
            "overallAssessment": "Contains a false guarantee.",
            "safetyScore": 20,
            "riskLevel": "danger",
            "flags": [{
                "type": "high",
                "text": "Guaranteed 20% returns",
                "reason": "Promises investment returns",
                "regulation": "SEC Rule 206(4)-1",
                "suggestion": "Potential returns"
            }],
            "rewrittenContent": "Explore potential returns.",
            "suggestions": [{
                "original": "Guaranteed",
                "replacement": "Potential",
                "reason": "No guarantees"
            }]
        })
    }

    #[test]
    fn test_valid_response_decodes() {
        let analysis = ModelAnalysis::from_value(valid_response()).unwrap();
        assert_eq!(analysis.safety_score, 20);
        assert_eq!(analysis.risk_level, ModelRiskLevel::Danger);
        assert_eq!(analysis.flags[0].severity, ModelSeverity::High);
    }

    #[test]
    fn test_regulation_is_optional() {
        let mut value = valid_response();
        value["flags"][0].as_object_mut().unwrap().remove("regulation");
        let analysis = ModelAnalysis::from_value(value).unwrap();
        assert!(analysis.flags[0].regulation.is_none());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut value = valid_response();
        value.as_object_mut().unwrap().remove("rewrittenContent");
        let err = ModelAnalysis::from_value(value).unwrap_err();
        assert!(matches!(err, ModelError::InvalidResponse(_)));
        assert!(err.to_string().contains("rewrittenContent"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut value = valid_response();
        value["safetyScore"] = json!("20");
        assert!(ModelAnalysis::from_value(value).is_err());
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let mut value = valid_response();
        value["riskLevel"] = json!("critical");
        assert!(ModelAnalysis::from_value(value).is_err());

        let mut value = valid_response();
        value["flags"][0]["type"] = json!("severe");
        assert!(ModelAnalysis::from_value(value).is_err());
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        for score in [json!(101), json!(255)] {
            let mut value = valid_response();
            value["safetyScore"] = score;
            let err = ModelAnalysis::from_value(value).unwrap_err();
            assert!(err.to_string().contains("outside 0-100"));
        }

        for score in [json!(-1), json!(250.5), json!(1000)] {
            let mut value = valid_response();
            value["safetyScore"] = score;
            let err = ModelAnalysis::from_value(value).unwrap_err();
            assert!(matches!(err, ModelError::InvalidResponse(_)));
        }
    }

    #[test]
    fn test_fractional_score_is_rejected() {
        for score in [json!(49.6), json!(80.5), json!(20.0000001)] {
            let mut value = valid_response();
            value["safetyScore"] = score;
            let err = ModelAnalysis::from_value(value).unwrap_err();
            assert!(matches!(err, ModelError::InvalidResponse(_)));
        }
    }

    #[test]
    fn test_findings_anchor_flags() {
        let content = "Guaranteed 20% returns! Act now.";
        let findings = ModelAnalysis::from_value(valid_response())
            .unwrap()
            .into_findings(content);

        let flag = &findings.flags[0];
        assert_eq!(
            flag.span,
            Some(TextPosition {
                start_offset: 0,
                end_offset: 22
            })
        );
        assert_eq!(flag.source, FlagSource::Model);
        assert_eq!(flag.regulation_ref.as_deref(), Some("SEC Rule 206(4)-1"));
        assert_eq!(findings.suggestions.len(), 1);
    }

    #[test]
    fn test_paraphrased_flag_is_unanchored() {
        let findings = ModelAnalysis::from_value(valid_response())
            .unwrap()
            .into_findings("We promise returns of twenty percent.");
        assert_eq!(findings.flags.len(), 1);
        assert!(findings.flags[0].span.is_none());
    }

    #[test]
    fn test_mismatched_tier_is_derived_from_score() {
        let mut value = valid_response();
        value["riskLevel"] = json!("safe");
        let findings = ModelAnalysis::from_value(value).unwrap().into_findings("");
        assert_eq!(findings.safety_score, 20);
        assert_eq!(findings.risk_level, RiskLevel::Danger);
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = ModelAnalysis::json_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for field in [
            "overallAssessment",
            "safetyScore",
            "riskLevel",
            "flags",
            "rewrittenContent",
            "suggestions",
        ] {
            assert!(required.contains(&field), "missing {}", field);
        }
        assert_eq!(
            schema["properties"]["safetyScore"]["maximum"].as_f64(),
            Some(100.0)
        );
        assert!(schema["properties"]["flags"]["items"]["properties"]["type"].is_object());
    }
}
