//! Audit Engine
//!
//! Runs the scoring pipeline in dependency order and assembles the final
//! verdict:
//!
//! 1. normalize analyzer findings
//! 2. aggregate security metrics (+ contract-stat counters)
//! 3. behavioral analysis over the raw transaction list
//! 4. crime indicators (AI adapter result, else quick-pattern scan)
//! 5. trust score
//! 6. risk tier classification
//! 7. compliance report
//!
//! The pipeline is pure and synchronous: every entity is created fresh per
//! invocation and nothing here blocks or shares mutable state. All outward
//! I/O (explorer, analyzer subprocess, honeypot API, LLM, persistence)
//! happens upstream/downstream of this engine.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::core::behavioral::BehavioralAnalyzer;
use crate::core::compliance::ComplianceMapper;
use crate::core::crime_patterns::{resolve_crime_indicators, CrimePatternScanner};
use crate::core::normalizer::{RawFinding, VulnerabilityNormalizer};
use crate::core::risk_classifier::{RiskClassifier, RiskContext};
use crate::core::security_metrics::SecurityMetricsCalculator;
use crate::core::trust_score::{TrustContext, TrustScoreEngine};
use crate::models::config::EngineConfig;
use crate::models::types::{
    AuditVerdict, ContractInfo, ContractStats, CrimeIndicator, OwnershipAnalysis, Severity,
    SocialPresence, TradingAnalysis, Vulnerability,
};

/// Pre-normalized signal bundle for one audit. Every signal except the
/// address is optional; absent signals default to neutral values so a
/// degraded upstream never fails an audit.
#[derive(Debug, Deserialize)]
pub struct AuditInput {
    pub contract_address: String,
    #[serde(default = "default_chain")]
    pub chain: String,
    #[serde(default)]
    pub contract_info: ContractInfo,
    #[serde(default)]
    pub findings: Vec<RawFinding>,
    #[serde(default)]
    pub ownership: Option<OwnershipAnalysis>,
    #[serde(default)]
    pub trading: Option<TradingAnalysis>,
    #[serde(default)]
    pub social: Option<SocialPresence>,
    #[serde(default)]
    pub contract_stats: Option<ContractStats>,
    /// Crime indicators from the upstream AI adapter, if it responded
    #[serde(default)]
    pub ai_crime_indicators: Option<Vec<CrimeIndicator>>,
    /// Free text (source snippets, token metadata) for the quick-pattern
    /// crime scan
    #[serde(default)]
    pub metadata_text: String,
}

fn default_chain() -> String {
    "ethereum".to_string()
}

pub struct AuditEngine {
    config: EngineConfig,
}

impl AuditEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one full audit. Never fails: degraded inputs produce a
    /// best-effort verdict.
    pub fn evaluate(&self, input: &AuditInput) -> AuditVerdict {
        info!(
            contract_address = %input.contract_address,
            chain = %input.chain,
            findings = input.findings.len(),
            "🔍 Starting audit evaluation"
        );

        let ownership = input.ownership.clone().unwrap_or_default();
        let trading = input.trading.clone().unwrap_or_default();
        let social = input.social.clone().unwrap_or_default();

        // 1-2. Findings -> metrics
        let vulnerabilities = VulnerabilityNormalizer::normalize(&input.findings, &self.config);
        let mut metrics = SecurityMetricsCalculator::calculate(&vulnerabilities);
        if let Some(stats) = &input.contract_stats {
            metrics.attach_contract_stats(stats);
        }

        // 3. Behavioral signals
        let behavioral = BehavioralAnalyzer::new(&self.config).analyze(
            input
                .contract_stats
                .as_ref()
                .map(|s| s.transactions.as_slice())
                .unwrap_or(&[]),
        );

        // 4. Crime indicators: AI result if well-formed, else quick scan
        let quick = CrimePatternScanner::scan(&input.metadata_text);
        let crime_indicators =
            resolve_crime_indicators(input.ai_crime_indicators.clone(), quick);

        // 5. Trust score
        let trust_engine = TrustScoreEngine::new(&self.config);
        let trust_score = trust_engine.evaluate(&TrustContext {
            metrics: &metrics,
            is_verified: input.contract_info.is_verified,
            ownership: &ownership,
            trading: &trading,
            social: &social,
            stats: input.contract_stats.as_ref(),
            behavioral: behavioral.signal(),
        });

        // 6. Risk tier
        let estimated_tvl_usd = input
            .contract_stats
            .as_ref()
            .map(|s| self.config.estimate_tvl_usd(s.balance_native))
            .unwrap_or(0.0);
        let assessment = RiskClassifier::classify(&RiskContext {
            metrics: &metrics,
            trust_score: trust_score.total,
            is_verified: input.contract_info.is_verified,
            ownership: &ownership,
            trading: &trading,
            estimated_tvl_usd,
        });

        // 7. Compliance report
        let compliance_report = ComplianceMapper::new(&self.config).map(
            &input.contract_address,
            &vulnerabilities,
            &crime_indicators,
        );

        let recommendations = Self::generate_recommendations(&vulnerabilities);
        let gas_optimization_hints = Self::generate_gas_optimization_hints(&vulnerabilities);

        let verdict = AuditVerdict {
            audit_id: audit_id(&input.contract_address),
            contract_address: input.contract_address.clone(),
            chain: input.chain.clone(),
            audit_timestamp: chrono::Utc::now().to_rfc3339(),
            risk_level: assessment.level,
            risk_factors: assessment.factors,
            trust_score,
            security_metrics: metrics,
            vulnerabilities,
            behavioral,
            crime_indicators,
            compliance_report,
            recommendations,
            gas_optimization_hints,
        };

        info!(
            audit_id = %verdict.audit_id,
            risk_level = verdict.risk_level.as_str(),
            trust_score = verdict.trust_score.total,
            "📊 Audit complete {}",
            verdict.risk_level.emoji()
        );

        verdict
    }

    /// Prioritized remediation list: Critical/High first, then Medium, then
    /// the fixed general advice.
    fn generate_recommendations(vulnerabilities: &[Vulnerability]) -> Vec<String> {
        let mut recommendations = Vec::new();

        let severe: Vec<&Vulnerability> = vulnerabilities
            .iter()
            .filter(|v| matches!(v.severity, Severity::Critical | Severity::High))
            .collect();
        let medium: Vec<&Vulnerability> = vulnerabilities
            .iter()
            .filter(|v| v.severity == Severity::Medium)
            .collect();

        if !severe.is_empty() {
            recommendations.push(
                "🚨 PRIORITAS TINGGI: Segera perbaiki kerentanan Critical dan High severity"
                    .to_string(),
            );
            for vuln in severe.iter().take(3) {
                recommendations.push(format!("• {}: {}", vuln.vuln_type, vuln.recommendation));
            }
        }

        if !medium.is_empty() {
            recommendations.push(
                "⚠️ PRIORITAS MENENGAH: Tangani kerentanan Medium severity".to_string(),
            );
            for vuln in medium.iter().take(2) {
                recommendations.push(format!("• {}: {}", vuln.vuln_type, vuln.recommendation));
            }
        }

        recommendations.extend([
            "📋 Lakukan code review menyeluruh dengan tim development".to_string(),
            "🔍 Pertimbangkan audit profesional untuk kontrak yang akan di-deploy".to_string(),
            "📚 Implementasikan automated testing untuk mencegah regresi".to_string(),
        ]);

        recommendations
    }

    /// Templated gas-efficiency advice, at most five entries.
    /// Finding-specific hints go to the front of the list.
    fn generate_gas_optimization_hints(vulnerabilities: &[Vulnerability]) -> Vec<String> {
        let mut hints: Vec<String> = [
            "💡 Gunakan `uint256` instead of `uint8` untuk gas efficiency",
            "🔄 Implementasikan batch operations untuk mengurangi gas cost",
            "📦 Pertimbangkan storage packing untuk struct variables",
            "⚡ Gunakan `external` visibility untuk functions yang hanya dipanggil dari luar",
            "🗜️ Implementasikan lazy loading untuk data yang jarang diakses",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        if vulnerabilities
            .iter()
            .any(|v| v.vuln_type == "controlled-array-length")
        {
            hints.insert(
                0,
                "📊 Batasi ukuran array untuk menghindari gas limit issues".to_string(),
            );
        }

        hints.truncate(5);
        hints
    }
}

/// Collision-free audit identifier. Keeps the historical
/// `audit_{address-prefix}_` shape but replaces the timestamp-to-the-second
/// suffix (which collided under concurrent audits of the same address) with
/// a UUID.
fn audit_id(contract_address: &str) -> String {
    let prefix: String = contract_address.chars().take(10).collect();
    format!("audit_{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_id_shape_and_uniqueness() {
        let address = "0xef9f4c0c3403d269c867c908e7f66748cc17f28a";
        let first = audit_id(address);
        let second = audit_id(address);
        assert!(first.starts_with("audit_0xef9f4c0c_"));
        assert_ne!(first, second, "same address must not collide");
    }

    #[test]
    fn test_audit_id_short_address() {
        assert!(audit_id("0xabc").starts_with("audit_0xabc_"));
    }

    #[test]
    fn test_recommendations_prioritize_severe_findings() {
        let config = EngineConfig::default();
        let findings = vec![
            RawFinding {
                check: "reentrancy-eth".to_string(),
                impact: "High".to_string(),
                description: "Reentrancy in withdraw()".to_string(),
                line_number: Some(42),
                function_name: Some("withdraw".to_string()),
            },
            RawFinding {
                check: "timestamp".to_string(),
                impact: "Medium".to_string(),
                description: String::new(),
                line_number: None,
                function_name: None,
            },
        ];
        let vulnerabilities = VulnerabilityNormalizer::normalize(&findings, &config);
        let recommendations = AuditEngine::generate_recommendations(&vulnerabilities);

        assert!(recommendations[0].contains("PRIORITAS TINGGI"));
        assert!(recommendations[1].contains("reentrancy-eth"));
        assert!(recommendations
            .iter()
            .any(|r| r.contains("PRIORITAS MENENGAH")));
        // Fixed general tail is always present
        assert!(recommendations.len() >= 5);
    }

    #[test]
    fn test_gas_hints_capped_with_finding_specific_entry_first() {
        let config = EngineConfig::default();
        let findings = vec![RawFinding {
            check: "controlled-array-length".to_string(),
            impact: "Medium".to_string(),
            description: String::new(),
            line_number: None,
            function_name: None,
        }];
        let vulnerabilities = VulnerabilityNormalizer::normalize(&findings, &config);

        let hints = AuditEngine::generate_gas_optimization_hints(&vulnerabilities);
        assert_eq!(hints.len(), 5);
        assert!(hints[0].contains("Batasi ukuran array"));

        let generic = AuditEngine::generate_gas_optimization_hints(&[]);
        assert_eq!(generic.len(), 5);
        assert!(generic[0].contains("uint256"));
    }

    #[test]
    fn test_degraded_input_still_produces_verdict() {
        let engine = AuditEngine::new(EngineConfig::default());
        let input = AuditInput {
            contract_address: "0xabc".to_string(),
            chain: "ethereum".to_string(),
            contract_info: ContractInfo::default(),
            findings: vec![],
            ownership: None,
            trading: None,
            social: None,
            contract_stats: None,
            ai_crime_indicators: None,
            metadata_text: String::new(),
        };

        let verdict = engine.evaluate(&input);
        assert_eq!(verdict.security_metrics.security_score, 100);
        assert!(verdict.behavioral.signal().is_none());
        assert!(verdict.crime_indicators.is_empty());
    }
}
