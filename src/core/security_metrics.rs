//! Security Metrics Calculator
//!
//! Aggregates normalized vulnerabilities into count-by-severity plus two
//! derived scores. The penalty curve is compounding: repeated Critical
//! findings escalate non-linearly (x1.5 per extra Critical), clusters of
//! High/Medium findings pick up flat multipliers.

use tracing::debug;

use crate::models::types::{SecurityMetrics, Severity, Vulnerability};
use crate::utils::constants::clamp_score;

pub struct SecurityMetricsCalculator;

impl SecurityMetricsCalculator {
    /// Aggregate vulnerabilities into metrics. Empty input scores 100.
    pub fn calculate(vulnerabilities: &[Vulnerability]) -> SecurityMetrics {
        let count = |severity: Severity| {
            vulnerabilities
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };

        let critical = count(Severity::Critical);
        let high = count(Severity::High);
        let medium = count(Severity::Medium);
        let low = count(Severity::Low);
        let informational = count(Severity::Informational);
        let total = vulnerabilities.len();

        let mut critical_penalty = critical as f64 * 50.0;
        if critical > 1 {
            critical_penalty *= 1.5_f64.powi(critical as i32 - 1);
        }
        critical_penalty = critical_penalty.min(100.0);

        let mut high_penalty = high as f64 * 25.0;
        if high > 2 {
            high_penalty *= 1.3;
        }

        let mut medium_penalty = medium as f64 * 10.0;
        if medium >= 5 {
            medium_penalty *= 1.4;
        }

        let low_penalty = low as f64 * 2.0;
        let info_penalty = informational as f64 * 0.5;

        let total_penalty =
            critical_penalty + high_penalty + medium_penalty + low_penalty + info_penalty;
        let security_score = clamp_score(100.0 - total_penalty);

        let code_quality_score = clamp_score(100.0 - total as f64 * 3.0 - critical as f64 * 20.0);

        debug!(
            total,
            critical,
            high,
            security_score,
            code_quality_score,
            "Calculated security metrics"
        );

        SecurityMetrics {
            total_issues: total,
            critical_issues: critical,
            high_issues: high,
            medium_issues: medium,
            low_issues: low,
            informational_issues: informational,
            security_score,
            code_quality_score,
            contract_age_days: 0,
            transaction_count: 0,
            unique_users: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vuln(severity: Severity) -> Vulnerability {
        Vulnerability {
            vuln_type: "test-check".to_string(),
            severity,
            description: "test".to_string(),
            impact: severity.as_str().to_string(),
            recommendation: String::new(),
            line_number: None,
            function_name: None,
        }
    }

    fn vulns(counts: &[(Severity, usize)]) -> Vec<Vulnerability> {
        counts
            .iter()
            .flat_map(|&(s, n)| std::iter::repeat_with(move || vuln(s)).take(n))
            .collect()
    }

    #[test]
    fn test_empty_input_scores_100() {
        let metrics = SecurityMetricsCalculator::calculate(&[]);
        assert_eq!(metrics.security_score, 100);
        assert_eq!(metrics.code_quality_score, 100);
        assert_eq!(metrics.total_issues, 0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let input = vulns(&[
            (Severity::Critical, 1),
            (Severity::High, 2),
            (Severity::Medium, 3),
            (Severity::Low, 4),
            (Severity::Informational, 5),
        ]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(
            metrics.critical_issues
                + metrics.high_issues
                + metrics.medium_issues
                + metrics.low_issues
                + metrics.informational_issues,
            metrics.total_issues
        );
        assert_eq!(metrics.total_issues, 15);
    }

    #[test]
    fn test_two_critical_one_high_floors_security_score() {
        // critical_penalty = 2*50 * 1.5 = 150, capped at 100
        // high_penalty = 25 => 100 - 125 clamps to 0
        let input = vulns(&[(Severity::Critical, 2), (Severity::High, 1)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 0);
    }

    #[test]
    fn test_single_critical() {
        let input = vulns(&[(Severity::Critical, 1)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 50);
        // 100 - 1*3 - 1*20 = 77
        assert_eq!(metrics.code_quality_score, 77);
    }

    #[test]
    fn test_high_cluster_multiplier() {
        // 3 highs: 75 * 1.3 = 97.5; 100 - 97.5 = 2.5 rounds away from zero
        let input = vulns(&[(Severity::High, 3)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 3);

        // 2 highs carry no multiplier
        let input = vulns(&[(Severity::High, 2)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 50);
    }

    #[test]
    fn test_medium_cluster_multiplier() {
        // 5 mediums: 50 * 1.4 = 70 => 30
        let input = vulns(&[(Severity::Medium, 5)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 30);

        // 4 mediums: 40 => 60
        let input = vulns(&[(Severity::Medium, 4)]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert_eq!(metrics.security_score, 60);
    }

    #[test]
    fn test_scores_always_bounded() {
        let input = vulns(&[
            (Severity::Critical, 10),
            (Severity::High, 10),
            (Severity::Medium, 10),
            (Severity::Low, 10),
            (Severity::Informational, 10),
        ]);
        let metrics = SecurityMetricsCalculator::calculate(&input);
        assert!(metrics.security_score <= 100);
        assert!(metrics.code_quality_score <= 100);
    }

    #[test]
    fn test_attach_contract_stats() {
        use crate::models::types::ContractStats;
        let mut metrics = SecurityMetricsCalculator::calculate(&[]);
        let stats = ContractStats {
            age_days: 420,
            transaction_count: 12_000,
            unique_users: 800,
            balance_native: 1.0,
            transactions: vec![],
        };
        metrics.attach_contract_stats(&stats);
        assert_eq!(metrics.contract_age_days, 420);
        assert_eq!(metrics.transaction_count, 12_000);
    }
}
