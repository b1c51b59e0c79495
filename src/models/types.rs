//! Type definitions for GarudaShield
//! All core data structures for the risk & compliance scoring pipeline.
//!
//! Every entity here is a request-scoped value object: created fresh per
//! audit, consumed top-down through the pipeline, never mutated after
//! construction (except the one-shot contract-stat attachment on
//! `SecurityMetrics`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================
// Vulnerabilities
// ============================================

/// Closed severity vocabulary. Raw detector records use arbitrary impact
/// strings; `VulnerabilityNormalizer` maps them into this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }
}

/// Normalized static-analysis finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Detector id, e.g. "reentrancy-eth"
    #[serde(rename = "type")]
    pub vuln_type: String,
    pub severity: Severity,
    pub description: String,
    /// Raw impact vocabulary as reported by the analyzer
    pub impact: String,
    /// Templated remediation advice looked up by detector id
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

/// Aggregated vulnerability counts plus derived scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
    pub informational_issues: usize,
    /// 0-100, 100 = no findings
    pub security_score: u8,
    /// 0-100, penalized by finding volume and critical count
    pub code_quality_score: u8,
    // Contract-stat counters attached after creation, before scoring
    // consumers read them (additive field-setting only)
    pub contract_age_days: u32,
    pub transaction_count: u64,
    pub unique_users: u64,
}

impl SecurityMetrics {
    /// One-shot attachment of contract-stat counters. The metrics are
    /// otherwise immutable after calculation.
    pub fn attach_contract_stats(&mut self, stats: &ContractStats) {
        self.contract_age_days = stats.age_days;
        self.transaction_count = stats.transaction_count;
        self.unique_users = stats.unique_users;
    }
}

// ============================================
// Upstream signal objects (pre-normalized)
// ============================================

/// Verification status as reported by the block-explorer collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractInfo {
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
}

/// Qualitative measure of unilateral owner/admin control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CentralizationRisk {
    Low,
    Medium,
    High,
    Unknown,
}

/// Ownership / centralization signal.
/// `centralization_risk` is always derived from the other fields; callers
/// construct this via [`OwnershipAnalysis::derive`], never field-by-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnershipAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    pub is_multisig: bool,
    pub ownership_renounced: bool,
    pub admin_functions: BTreeSet<String>,
    pub centralization_risk: CentralizationRisk,
}

impl OwnershipAnalysis {
    /// Build an ownership signal, deriving the centralization tier.
    pub fn derive(
        owner_address: Option<String>,
        is_multisig: bool,
        ownership_renounced: bool,
        admin_functions: BTreeSet<String>,
    ) -> Self {
        let centralization_risk = if ownership_renounced {
            CentralizationRisk::Low
        } else if owner_address.is_none() {
            CentralizationRisk::Unknown
        } else if admin_functions.len() > 5 {
            CentralizationRisk::High
        } else if is_multisig || admin_functions.len() <= 2 {
            CentralizationRisk::Medium
        } else {
            CentralizationRisk::High
        };

        Self {
            owner_address,
            is_multisig,
            ownership_renounced,
            admin_functions,
            centralization_risk,
        }
    }
}

impl Default for OwnershipAnalysis {
    fn default() -> Self {
        Self::derive(None, false, false, BTreeSet::new())
    }
}

/// Trading behavior signal from the honeypot-detection collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingAnalysis {
    pub is_honeypot: bool,
    /// 0.0-1.0, only meaningful when a source reported is_honeypot
    pub honeypot_confidence: f64,
    /// Percent, e.g. 5.0 = 5%
    pub buy_tax: f64,
    pub sell_tax: f64,
    pub liquidity_locked: bool,
    pub trading_enabled: bool,
}

impl TradingAnalysis {
    pub fn total_tax(&self) -> f64 {
        self.buy_tax + self.sell_tax
    }
}

impl Default for TradingAnalysis {
    fn default() -> Self {
        Self {
            is_honeypot: false,
            honeypot_confidence: 0.0,
            buy_tax: 0.0,
            sell_tax: 0.0,
            liquidity_locked: false,
            trading_enabled: true,
        }
    }
}

/// Project social-presence signal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialPresence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    /// 0-100
    pub social_score: u8,
}

/// Single raw on-chain transaction (read-only input to the behavioral
/// analyzer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unix timestamp (UTC seconds)
    pub timestamp: i64,
    pub from: String,
    pub to: String,
    /// Value in wei
    pub value_wei: u128,
    pub gas: u64,
}

/// On-chain activity statistics plus the raw transaction list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractStats {
    pub age_days: u32,
    pub transaction_count: u64,
    pub unique_users: u64,
    /// Current balance in native token units
    pub balance_native: f64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

// ============================================
// Behavioral signal (derived only)
// ============================================

/// WIB hour-of-day activity profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimezoneProfile {
    /// Fraction of transactions in 19:00-22:59 WIB
    pub prime_time_ratio: f64,
    /// Fraction of transactions in 00:00-05:59 WIB
    pub night_ratio: f64,
    /// Fraction of transactions on WIB Saturday/Sunday
    pub weekend_ratio: f64,
}

/// A cluster of near-identical transfer amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringPattern {
    /// Representative amount in native units (first member of the cluster)
    pub amount_native: f64,
    pub occurrences: usize,
    /// Share of all value-bearing transactions, 0-100
    pub percentage: f64,
}

/// Amount-structuring analysis result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuringAnalysis {
    pub detected: bool,
    /// 0.0-1.0 composite structuring score
    pub confidence: f64,
    pub patterns: Vec<RecurringPattern>,
    /// Fraction of wei values divisible by 10^15 or 10^16
    pub round_number_ratio: f64,
    /// Fraction of values inside the 0.01-0.5 native-unit band
    pub consistency_ratio: f64,
}

/// Derived behavioral signal; never mutated externally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralSignal {
    pub timezone: TimezoneProfile,
    /// 0.0-1.0 probability that activity follows Indonesian hours
    pub indonesia_timezone_probability: f64,
    pub bot_behavior_detected: bool,
    pub structuring: StructuringAnalysis,
    /// Fraction of transactions touching a known Indonesian exchange
    pub exchange_interaction_ratio: f64,
    /// Composite behavior score, 0-100
    pub behavior_score: u8,
}

/// Behavioral analysis output. Fewer than the minimum value-bearing
/// transactions yields `InsufficientData` - a valid low-confidence result,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BehavioralVerdict {
    InsufficientData { value_transactions: usize },
    Analyzed(BehavioralSignal),
}

impl BehavioralVerdict {
    /// The signal, if enough data was available
    pub fn signal(&self) -> Option<&BehavioralSignal> {
        match self {
            BehavioralVerdict::Analyzed(signal) => Some(signal),
            BehavioralVerdict::InsufficientData { .. } => None,
        }
    }
}

// ============================================
// Trust score
// ============================================

/// Bounded trust score with its audit-trail breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustScore {
    /// 0-100
    pub total: u8,
    /// Technical component before multipliers (max 40)
    pub technical: f64,
    /// Economic component before multipliers (max 30)
    pub economic: f64,
    /// Operational component before multipliers (max 30)
    pub operational: f64,
    pub confidence_multiplier: f64,
    pub penalty_multiplier: f64,
    /// Ordered human-readable contributions
    pub factors: Vec<String>,
}

impl TrustScore {
    /// Short-circuit result from a guard rule; the reason is the sole factor.
    pub fn guard(total: u8, reason: impl Into<String>) -> Self {
        Self {
            total,
            technical: 0.0,
            economic: 0.0,
            operational: 0.0,
            confidence_multiplier: 1.0,
            penalty_multiplier: 1.0,
            factors: vec![reason.into()],
        }
    }
}

// ============================================
// Risk classification
// ============================================

/// Ordered risk tiers. The discriminants encode severity so that tests can
/// assert ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low = 0,
    Medium = 1,
    High = 2,
    Critical = 3,
    Emergency = 4,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Emergency => "Emergency",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "✅",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::Critical => "🔴",
            RiskLevel::Emergency => "🚨",
        }
    }
}

/// Selected tier plus the ordered factors that matched it (audit trail,
/// never used for control flow)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

// ============================================
// Compliance
// ============================================

/// Escalation action attached to a regulatory violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceAction {
    #[serde(rename = "IMMEDIATE_BLOCK")]
    ImmediateBlock,
    #[serde(rename = "INVESTIGATE")]
    Investigate,
    #[serde(rename = "MONITOR")]
    Monitor,
}

/// Indonesian administrative severity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationSeverity {
    #[serde(rename = "RINGAN")]
    Ringan,
    #[serde(rename = "SEDANG")]
    Sedang,
    #[serde(rename = "BERAT")]
    Berat,
}

/// Canonical regulatory-violation record, looked up from the static table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryViolation {
    pub violation_type: String,
    pub law_article: String,
    pub penalty_description: String,
    pub fine_amount: String,
    pub enforcement_agency: String,
    pub severity_level: ViolationSeverity,
    #[serde(rename = "satgas_pasti_priority")]
    pub satgas_priority: bool,
    pub compliance_action: ComplianceAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "REQUIRES_REVIEW")]
    RequiresReview,
    #[serde(rename = "NON_COMPLIANT")]
    NonCompliant,
}

/// Crime indicator from the pattern scanner or the (upstream) AI adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeIndicator {
    pub indicator_type: String,
    /// 0-100
    pub risk_score: f64,
    /// 0.0-1.0
    pub confidence: f64,
    pub severity: Severity,
    pub evidence: Vec<String>,
    /// Violation-type key into the regulatory table
    pub regulatory_violation: String,
}

/// Jurisdiction-specific compliance verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub contract_address: String,
    pub scan_timestamp: String,
    pub total_violations: usize,
    pub violations: Vec<RegulatoryViolation>,
    pub compliance_status: ComplianceStatus,
    #[serde(rename = "satgas_pasti_report_required")]
    pub satgas_report_required: bool,
    pub recommended_actions: Vec<String>,
    /// 0-100
    pub legal_risk_score: u8,
}

// ============================================
// Assembled verdict
// ============================================

/// Full audit verdict assembled by the engine, serialized as one JSON
/// document per audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditVerdict {
    /// Collision-free identifier: audit_{address-prefix}_{uuid}
    pub audit_id: String,
    pub contract_address: String,
    pub chain: String,
    pub audit_timestamp: String,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub trust_score: TrustScore,
    pub security_metrics: SecurityMetrics,
    pub vulnerabilities: Vec<Vulnerability>,
    pub behavioral: BehavioralVerdict,
    pub crime_indicators: Vec<CrimeIndicator>,
    pub compliance_report: ComplianceReport,
    pub recommendations: Vec<String>,
    /// Templated gas-efficiency advice, at most five entries
    pub gas_optimization_hints: Vec<String>,
}
