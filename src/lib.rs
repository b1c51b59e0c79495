//! Garuda Shield Library
//!
//! Risk & compliance scoring engine for deployed smart contracts,
//! tuned for the Indonesian regulatory landscape:
//! - Severity-weighted security scoring with compounding penalties
//! - Trust score with hard guard rules (honeypot, unverified TVL)
//! - Ordered risk-tier classification (Low..Emergency)
//! - Behavioral analysis: WIB activity locality & amount structuring
//! - Regulatory mapping (UU ITE, UU TPPU, UU P2SK, Satgas PASTI)

pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    AuditEngine, AuditInput, BehavioralAnalyzer, ComplianceMapper, CrimePatternScanner,
    RawFinding, RiskClassifier, RiskContext, SecurityMetricsCalculator, TrustContext,
    TrustScoreEngine, VulnerabilityNormalizer,
};
pub use models::config::{ChainId, EngineConfig};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{
    AuditVerdict, BehavioralSignal, BehavioralVerdict, ComplianceReport, ComplianceStatus,
    CrimeIndicator, RiskLevel, Severity, TrustScore, Vulnerability,
};
