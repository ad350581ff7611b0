//! Data model shared by the compliance crates

pub mod types;

pub use types::{
    AnalysisMode, AnalysisResult, Flag, FlagSource, RiskLevel, Severity, Suggestion, TextPosition,
};
