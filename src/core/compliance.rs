//! Compliance Mapper
//!
//! Maps Critical/High vulnerabilities and crime indicators onto the
//! Indonesian regulatory-violation taxonomy and derives a compliance
//! verdict. Pure table lookup: identical inputs always yield identical
//! violation records, in input order.
//!
//! legal_risk_score accumulation:
//! - +25 per Critical vulnerability mapped
//! - +15 per High vulnerability mapped
//! - +risk_score/4 per crime indicator
//!
//! NON_COMPLIANT when the score reaches 70 or any mapped violation carries
//! satgas_priority; that same trigger requires a Satgas PASTI report.

use chrono::Utc;
use tracing::{debug, info};

use crate::models::config::EngineConfig;
use crate::models::types::{
    ComplianceAction, ComplianceReport, ComplianceStatus, CrimeIndicator, RegulatoryViolation,
    Severity, Vulnerability,
};
use crate::utils::constants::{
    clamp_score, LEGAL_RISK_CRIME_DIVISOR, LEGAL_RISK_NON_COMPLIANT, LEGAL_RISK_PER_CRITICAL,
    LEGAL_RISK_PER_HIGH, LEGAL_RISK_REQUIRES_REVIEW,
};

pub struct ComplianceMapper<'a> {
    config: &'a EngineConfig,
}

impl<'a> ComplianceMapper<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn map(
        &self,
        contract_address: &str,
        vulnerabilities: &[Vulnerability],
        crime_indicators: &[CrimeIndicator],
    ) -> ComplianceReport {
        let mut violations: Vec<RegulatoryViolation> = Vec::new();
        let mut legal_risk = 0.0;

        // Only Critical/High findings carry legal weight
        for vuln in vulnerabilities {
            match vuln.severity {
                Severity::Critical => {
                    violations.push(self.config.violation_for(&vuln.vuln_type, vuln.severity));
                    legal_risk += LEGAL_RISK_PER_CRITICAL;
                }
                Severity::High => {
                    violations.push(self.config.violation_for(&vuln.vuln_type, vuln.severity));
                    legal_risk += LEGAL_RISK_PER_HIGH;
                }
                _ => {}
            }
        }

        for indicator in crime_indicators {
            violations.push(
                self.config
                    .violation_for(&indicator.regulatory_violation, indicator.severity),
            );
            legal_risk += indicator.risk_score / LEGAL_RISK_CRIME_DIVISOR;
        }

        let legal_risk_score = clamp_score(legal_risk);
        let has_satgas_priority = violations.iter().any(|v| v.satgas_priority);

        let non_compliant =
            legal_risk >= LEGAL_RISK_NON_COMPLIANT || has_satgas_priority;
        let compliance_status = if non_compliant {
            ComplianceStatus::NonCompliant
        } else if legal_risk >= LEGAL_RISK_REQUIRES_REVIEW {
            ComplianceStatus::RequiresReview
        } else {
            ComplianceStatus::Compliant
        };

        let recommended_actions = Self::recommended_actions(&violations);

        if non_compliant {
            info!(
                contract_address,
                legal_risk_score, "Contract flagged NON_COMPLIANT, Satgas PASTI report required"
            );
        } else {
            debug!(contract_address, legal_risk_score, "Compliance mapping done");
        }

        ComplianceReport {
            contract_address: contract_address.to_string(),
            scan_timestamp: Utc::now().to_rfc3339(),
            total_violations: violations.len(),
            violations,
            compliance_status,
            satgas_report_required: non_compliant,
            recommended_actions,
            legal_risk_score,
        }
    }

    /// Templated actions per compliance_action value present in the
    /// violation set
    fn recommended_actions(violations: &[RegulatoryViolation]) -> Vec<String> {
        let mut actions = Vec::new();

        let has_block = violations
            .iter()
            .any(|v| v.compliance_action == ComplianceAction::ImmediateBlock);
        let has_investigate = violations
            .iter()
            .any(|v| v.compliance_action == ComplianceAction::Investigate);

        if has_block {
            actions.push(
                "🚫 Blokir akses kontrak dan laporkan ke Satgas PASTI dalam 1x24 jam".to_string(),
            );
            actions.push(
                "📢 Terbitkan peringatan publik melalui kanal resmi OJK".to_string(),
            );
        }
        if has_investigate {
            actions.push(
                "🔍 Lakukan investigasi mendalam terhadap aliran dana dan pihak terkait"
                    .to_string(),
            );
        }
        if !has_block && !has_investigate {
            actions.push(
                "👁️ Lanjutkan monitoring berkala terhadap aktivitas kontrak".to_string(),
            );
        }

        actions
    }
}
