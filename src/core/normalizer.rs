//! Vulnerability Normalizer
//!
//! Maps raw detector records (arbitrary severity vocabulary) into the closed
//! [`Severity`] enum and attaches the templated remediation text for each
//! detector id. Unknown impact vocabulary degrades to `Low` rather than
//! failing - upstream analyzer quirks must never abort an audit.

use serde::Deserialize;
use tracing::debug;

use crate::models::config::EngineConfig;
use crate::models::types::{Severity, Vulnerability};

/// Raw finding as emitted by the static-analyzer adapter
#[derive(Debug, Clone, Deserialize)]
pub struct RawFinding {
    /// Detector id, e.g. "reentrancy-eth"
    pub check: String,
    /// Analyzer impact vocabulary, e.g. "High", "Informational"
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub function_name: Option<String>,
}

pub struct VulnerabilityNormalizer;

impl VulnerabilityNormalizer {
    /// Map one impact string into the closed severity enum.
    ///
    /// The static analyzer's own vocabulary never contains "Critical";
    /// Critical findings currently arrive only through the crime-detection
    /// path. The mapping still accepts the word so both paths share one
    /// normalizer.
    pub fn normalize_severity(raw: &str) -> Severity {
        match raw.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "informational" | "info" | "note" | "optimization" => Severity::Informational,
            _ => Severity::Low,
        }
    }

    /// Normalize a batch of raw findings, preserving input order.
    pub fn normalize(findings: &[RawFinding], config: &EngineConfig) -> Vec<Vulnerability> {
        let vulnerabilities: Vec<Vulnerability> = findings
            .iter()
            .map(|finding| Vulnerability {
                vuln_type: finding.check.clone(),
                severity: Self::normalize_severity(&finding.impact),
                description: if finding.description.is_empty() {
                    "No description available".to_string()
                } else {
                    finding.description.clone()
                },
                impact: finding.impact.clone(),
                recommendation: config.recommendation_for(&finding.check).to_string(),
                line_number: finding.line_number,
                function_name: finding.function_name.clone(),
            })
            .collect();

        debug!(
            count = vulnerabilities.len(),
            "Normalized analyzer findings"
        );
        vulnerabilities
    }
}
