use serde::{Deserialize, Serialize};

use crate::types::{AppError, AppResult};

/// Fallback analysis served whenever a real analysis cannot be produced
///
/// Encoded with `", "` and `": "` separators, the form existing clients
/// compare against byte for byte.
pub const FALLBACK_ANALYSIS_JSON: &str = r#"{"management_tone": "Cautiously Optimistic (Mock Data)", "tone_evidence": "We see strong demand but are monitoring raw material costs.", "key_concerns": ["Inflationary pressure impacting margins", "Supply chain delays in the EU region"], "key_positives": ["Record order book of $500M", "New plant operational ahead of schedule"], "guidance": {"Revenue": "10-12% growth", "Margins": "Expand by 50bps"}, "confidence_score": "High (Simulation Mode)"}"#;

/// Shape the prompt asks the model to return
///
/// Only used when output validation is switched on; by default the model's
/// text is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub management_tone: String,
    pub tone_evidence: String,
    pub key_concerns: Vec<String>,
    pub key_positives: Vec<String>,
    /// Metric name to target; the prompt allows either a mapping or a list
    pub guidance: serde_json::Value,
    pub confidence_score: String,
}

impl FinancialAnalysis {
    #[cfg(test)]
    pub(crate) fn fallback() -> Self {
        Self {
            management_tone: "Cautiously Optimistic (Mock Data)".to_string(),
            tone_evidence: "We see strong demand but are monitoring raw material costs.".to_string(),
            key_concerns: vec![
                "Inflationary pressure impacting margins".to_string(),
                "Supply chain delays in the EU region".to_string(),
            ],
            key_positives: vec![
                "Record order book of $500M".to_string(),
                "New plant operational ahead of schedule".to_string(),
            ],
            guidance: serde_json::json!({
                "Revenue": "10-12% growth",
                "Margins": "Expand by 50bps",
            }),
            confidence_score: "High (Simulation Mode)".to_string(),
        }
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        let analysis: Self = serde_json::from_str(raw)
            .map_err(|e| AppError::LLMApi(format!("Analysis does not match schema: {}", e)))?;

        if !(analysis.guidance.is_object() || analysis.guidance.is_array()) {
            return Err(AppError::LLMApi(
                "Analysis guidance must be an object or a list".to_string(),
            ));
        }

        Ok(analysis)
    }
}

pub fn fallback_json() -> String {
    FALLBACK_ANALYSIS_JSON.to_string()
}
