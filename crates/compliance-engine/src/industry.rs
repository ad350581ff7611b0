//! Industry verticals
//!
//! A vertical decides which rule subset and which regulatory context block
//! apply to a scan. Unknown identifiers silently downgrade to `General`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    RealEstate,
    Finance,
    Healthcare,
    #[default]
    General,
}

impl Industry {
    /// Parse an industry identifier (case-insensitive, `_`, `-` or space separated).
    ///
    /// Anything unrecognised falls back to [`Industry::General`].
    pub fn parse(s: &str) -> Self {
        Self::parse_known(s).unwrap_or_else(|| {
            if !s.trim().is_empty() {
                tracing::debug!(industry = %s, "Unknown industry, using general rules");
            }
            Industry::General
        })
    }

    /// Parse an identifier, returning `None` when it names no vertical.
    pub fn parse_known(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "real_estate" | "realestate" | "realty" => Some(Industry::RealEstate),
            "finance" | "financial" | "financial_services" => Some(Industry::Finance),
            "healthcare" | "health" | "medical" => Some(Industry::Healthcare),
            "general" => Some(Industry::General),
            _ => None,
        }
    }

    /// Canonical identifier, as stored alongside scans.
    pub fn key(&self) -> &'static str {
        match self {
            Industry::RealEstate => "real_estate",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::General => "general",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::RealEstate => "real estate",
            Industry::Finance => "financial services",
            Industry::Healthcare => "healthcare",
            Industry::General => "general",
        }
    }

    pub fn all() -> [Industry; 4] {
        [
            Industry::RealEstate,
            Industry::Finance,
            Industry::Healthcare,
            Industry::General,
        ]
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
