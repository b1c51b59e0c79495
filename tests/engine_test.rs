//! End-to-end pipeline tests
//!
//! Drives the full audit pipeline through the public `AuditEngine` facade
//! and asserts the documented scoring behavior.
//! Run with: cargo test --test engine_test -- --nocapture

use chrono::TimeZone;

use garuda_shield::models::types::{
    ComplianceStatus, ContractInfo, ContractStats, CrimeIndicator, RiskLevel, Severity,
    TradingAnalysis, Transaction,
};
use garuda_shield::{AuditEngine, AuditInput, EngineConfig, RawFinding};

const TEST_ADDRESS: &str = "0xef9f4c0c3403d269c867c908e7f66748cc17f28a";

fn engine() -> AuditEngine {
    AuditEngine::new(EngineConfig::default())
}

fn finding(check: &str, impact: &str) -> RawFinding {
    RawFinding {
        check: check.to_string(),
        impact: impact.to_string(),
        description: format!("{} detected", check),
        line_number: Some(1),
        function_name: None,
    }
}

fn base_input() -> AuditInput {
    AuditInput {
        contract_address: TEST_ADDRESS.to_string(),
        chain: "ethereum".to_string(),
        contract_info: ContractInfo {
            is_verified: true,
            ..Default::default()
        },
        findings: vec![],
        ownership: None,
        trading: None,
        social: None,
        contract_stats: None,
        ai_crime_indicators: None,
        metadata_text: String::new(),
    }
}

/// Unix timestamp for the given WIB wall-clock hour on a weekday
/// (2025-06-02 is a Monday).
fn wib_ts(day: u32, hour: u32) -> i64 {
    chrono::Utc
        .with_ymd_and_hms(2025, 6, day, 0, 0, 0)
        .unwrap()
        .timestamp()
        + (hour as i64 - 7) * 3600
}

fn tx(timestamp: i64, value_wei: u128) -> Transaction {
    Transaction {
        timestamp,
        from: "0x1111111111111111111111111111111111111111".to_string(),
        to: "0x2222222222222222222222222222222222222222".to_string(),
        value_wei,
        gas: 21_000,
    }
}

// ============================================
// Score bounds & basic shape
// ============================================

#[test]
fn test_clean_verdict_bounds_and_shape() {
    let verdict = engine().evaluate(&base_input());

    assert!(verdict.security_metrics.security_score <= 100);
    assert!(verdict.trust_score.total <= 100);
    assert!(verdict.compliance_report.legal_risk_score <= 100);
    assert_eq!(verdict.security_metrics.security_score, 100);
    assert_eq!(verdict.risk_level, RiskLevel::Low);
    assert_eq!(
        verdict.compliance_report.compliance_status,
        ComplianceStatus::Compliant
    );
    assert!(verdict.audit_id.starts_with("audit_0xef9f4c0c_"));
    assert_eq!(verdict.chain, "ethereum");
    assert_eq!(verdict.gas_optimization_hints.len(), 5);
}

#[test]
fn test_two_criticals_one_high_floor_security_score() {
    let mut input = base_input();
    input.findings = vec![
        finding("reentrancy-eth", "Critical"),
        finding("arbitrary-send", "Critical"),
        finding("unchecked-transfer", "High"),
    ];

    let verdict = engine().evaluate(&input);

    // 50 + 75 + 25 > 100, floored at zero
    assert_eq!(verdict.security_metrics.security_score, 0);
    assert_eq!(verdict.security_metrics.critical_issues, 2);
    assert_eq!(verdict.security_metrics.high_issues, 1);
    // >= 2 criticals caps trust via the guard rule
    assert_eq!(verdict.trust_score.total, 20);
    assert!(verdict.risk_level >= RiskLevel::Critical);
}

// ============================================
// Guard rules & tier ladder
// ============================================

#[test]
fn test_confirmed_honeypot_zeroes_trust() {
    let mut input = base_input();
    input.trading = Some(TradingAnalysis {
        is_honeypot: true,
        honeypot_confidence: 0.75,
        ..Default::default()
    });

    let verdict = engine().evaluate(&input);

    assert_eq!(verdict.trust_score.total, 0);
    // 0.5 <= confidence < 0.8 lands in the Critical tier, not Emergency
    assert_eq!(verdict.risk_level, RiskLevel::Critical);
    assert!(verdict
        .risk_factors
        .iter()
        .any(|f| f.to_lowercase().contains("honeypot")));
}

#[test]
fn test_high_confidence_honeypot_is_emergency() {
    let mut input = base_input();
    input.trading = Some(TradingAnalysis {
        is_honeypot: true,
        honeypot_confidence: 0.9,
        ..Default::default()
    });

    let verdict = engine().evaluate(&input);
    assert_eq!(verdict.risk_level, RiskLevel::Emergency);
}

#[test]
fn test_unverified_tvl_tiers() {
    // 50 native * $3000 = $150k locked in unverified code
    let mut input = base_input();
    input.contract_info.is_verified = false;
    input.contract_stats = Some(ContractStats {
        age_days: 30,
        transaction_count: 100,
        unique_users: 20,
        balance_native: 50.0,
        transactions: vec![],
    });

    let verdict = engine().evaluate(&input);
    assert_eq!(verdict.trust_score.total, 30);
    assert_eq!(verdict.risk_level, RiskLevel::Critical);

    // 200 native * $3000 = $600k escalates to Emergency
    let mut input = base_input();
    input.contract_info.is_verified = false;
    input.contract_stats = Some(ContractStats {
        balance_native: 200.0,
        ..Default::default()
    });

    let verdict = engine().evaluate(&input);
    assert_eq!(verdict.risk_level, RiskLevel::Emergency);
}

#[test]
fn test_trust_never_increases_with_more_criticals() {
    let mut previous = u8::MAX;
    for criticals in 0..5 {
        let mut input = base_input();
        input.findings = (0..criticals)
            .map(|i| finding(&format!("critical-{}", i), "Critical"))
            .collect();

        let verdict = engine().evaluate(&input);
        assert!(
            verdict.trust_score.total <= previous,
            "{} criticals scored {} > previous {}",
            criticals,
            verdict.trust_score.total,
            previous
        );
        previous = verdict.trust_score.total;
    }
}

// ============================================
// Behavioral pipeline
// ============================================

#[test]
fn test_behavioral_insufficient_data_below_minimum() {
    let mut input = base_input();
    input.contract_stats = Some(ContractStats {
        transactions: (0..9).map(|i| tx(wib_ts(2, 20) + i, 10_u128.pow(18))).collect(),
        ..Default::default()
    });

    let verdict = engine().evaluate(&input);
    assert!(verdict.behavioral.signal().is_none());
}

#[test]
fn test_structuring_cluster_detected_end_to_end() {
    // Four near-identical amounts (0.3% mutual spread) among ten transfers,
    // mostly round-wei values, spread across prime-time evenings
    let values: [u128; 10] = [
        50_000_000_000_000_000,
        50_050_000_000_000_000,
        50_100_000_000_000_000,
        50_150_000_000_000_000,
        123_456_789_000_000_000,
        900_000_000_000_000_000,
        1_000_000_000_000_000_000,
        1_500_000_000_000_000_000,
        2_000_000_000_000_000_000,
        7_770_000_000_000_000_000,
    ];
    let mut input = base_input();
    input.contract_stats = Some(ContractStats {
        transactions: values
            .iter()
            .enumerate()
            .map(|(i, v)| tx(wib_ts(2 + (i as u32 % 5), 20), *v))
            .collect(),
        ..Default::default()
    });

    let verdict = engine().evaluate(&input);
    let signal = verdict.behavioral.signal().expect("ten value transfers");

    assert_eq!(signal.structuring.patterns.len(), 1);
    assert_eq!(signal.structuring.patterns[0].occurrences, 4);
    assert!((signal.structuring.patterns[0].percentage - 40.0).abs() < 1e-9);
    // patterns (0.4) + round-number ratio 0.6 (0.3) clears the 0.5 threshold
    assert!(signal.structuring.detected);
    assert!(signal.timezone.prime_time_ratio > 0.9);
}

// ============================================
// Compliance mapping
// ============================================

#[test]
fn test_compliance_requires_review_at_mid_score() {
    // Critical vuln (+25) plus a risk-80 crime indicator (+20) = 45
    let mut input = base_input();
    input.findings = vec![finding("reentrancy-eth", "Critical")];
    input.ai_crime_indicators = Some(vec![CrimeIndicator {
        indicator_type: "phishing".to_string(),
        risk_score: 80.0,
        confidence: 0.8,
        severity: Severity::High,
        evidence: vec!["fake airdrop claim page".to_string()],
        regulatory_violation: "phishing_fraud".to_string(),
    }]);

    let verdict = engine().evaluate(&input);

    assert_eq!(verdict.compliance_report.legal_risk_score, 45);
    assert_eq!(
        verdict.compliance_report.compliance_status,
        ComplianceStatus::RequiresReview
    );
    assert!(!verdict.compliance_report.satgas_report_required);
}

#[test]
fn test_satgas_priority_forces_non_compliant() {
    let mut input = base_input();
    input.ai_crime_indicators = Some(vec![CrimeIndicator {
        indicator_type: "money_laundering".to_string(),
        risk_score: 40.0,
        confidence: 0.6,
        severity: Severity::High,
        evidence: vec!["mixer-like fan-out".to_string()],
        regulatory_violation: "money_laundering".to_string(),
    }]);

    let verdict = engine().evaluate(&input);

    // Legal score is only 10, but a Satgas PASTI priority violation
    // overrides the threshold ladder
    assert_eq!(verdict.compliance_report.legal_risk_score, 10);
    assert_eq!(
        verdict.compliance_report.compliance_status,
        ComplianceStatus::NonCompliant
    );
    assert!(verdict.compliance_report.satgas_report_required);
}

#[test]
fn test_quick_pattern_scan_used_when_ai_absent() {
    let mut input = base_input();
    input.metadata_text =
        "Guaranteed daily profit 10%! Join our referral bonus program".to_string();

    let verdict = engine().evaluate(&input);

    assert_eq!(verdict.crime_indicators.len(), 1);
    assert_eq!(verdict.crime_indicators[0].indicator_type, "ponzi_scheme");
}

// ============================================
// Determinism & serialization
// ============================================

#[test]
fn test_pipeline_is_deterministic_modulo_identity_fields() {
    let mut input = base_input();
    input.findings = vec![
        finding("reentrancy-eth", "Critical"),
        finding("timestamp", "Medium"),
    ];
    input.metadata_text = "deposit togel online terpercaya".to_string();

    let engine = engine();
    let mut first = serde_json::to_value(engine.evaluate(&input)).unwrap();
    let mut second = serde_json::to_value(engine.evaluate(&input)).unwrap();

    for verdict in [&mut first, &mut second] {
        let obj = verdict.as_object_mut().unwrap();
        obj.remove("audit_id");
        obj.remove("audit_timestamp");
        obj.get_mut("compliance_report")
            .unwrap()
            .as_object_mut()
            .unwrap()
            .remove("scan_timestamp");
    }
    assert_eq!(first, second);
}

#[test]
fn test_verdict_serializes_wire_enum_values() {
    let mut input = base_input();
    input.ai_crime_indicators = Some(vec![CrimeIndicator {
        indicator_type: "gambling".to_string(),
        risk_score: 90.0,
        confidence: 0.9,
        severity: Severity::Critical,
        evidence: vec![],
        regulatory_violation: "online_gambling".to_string(),
    }]);

    let json = serde_json::to_string(&engine().evaluate(&input)).unwrap();

    assert!(json.contains("\"NON_COMPLIANT\""));
    assert!(json.contains("\"IMMEDIATE_BLOCK\""));
    assert!(json.contains("\"BERAT\""));
    assert!(json.contains("\"satgas_pasti_priority\":true"));
    assert!(json.contains("\"satgas_pasti_report_required\":true"));
}

#[test]
fn test_audit_input_deserializes_minimal_json() {
    let input: AuditInput = serde_json::from_str(
        r#"{"contract_address": "0xef9f4c0c3403d269c867c908e7f66748cc17f28a"}"#,
    )
    .unwrap();

    assert_eq!(input.chain, "ethereum");
    assert!(input.findings.is_empty());

    // is_verified defaults to false, so the unverified rule lands the
    // minimal input in the Medium tier
    let verdict = AuditEngine::new(EngineConfig::default()).evaluate(&input);
    assert_eq!(verdict.risk_level, RiskLevel::Medium);
    assert!(verdict
        .risk_factors
        .iter()
        .any(|f| f.contains("belum terverifikasi")));
}
