//! Risk Classifier
//!
//! Ordered, first-match-wins tier selection. The rule chain is a static
//! table of (predicate, factor-message) pairs grouped by tier and evaluated
//! top-down: once any rule inside a tier matches, that tier is selected and
//! every matching rule in it contributes a factor string to the audit
//! trail. Later tiers are never consulted.

use tracing::debug;

use crate::models::types::{
    CentralizationRisk, OwnershipAnalysis, RiskAssessment, RiskLevel, SecurityMetrics,
    TradingAnalysis,
};
use crate::utils::constants::{UNVERIFIED_TVL_CRITICAL_USD, UNVERIFIED_TVL_EMERGENCY_USD};

/// Inputs to one classification, borrowed from the audit pipeline
pub struct RiskContext<'a> {
    pub metrics: &'a SecurityMetrics,
    pub trust_score: u8,
    pub is_verified: bool,
    pub ownership: &'a OwnershipAnalysis,
    pub trading: &'a TradingAnalysis,
    pub estimated_tvl_usd: f64,
}

type Rule = (fn(&RiskContext) -> bool, fn(&RiskContext) -> String);

/// Rule chain, highest tier first. Order is part of the contract.
const TIER_RULES: &[(RiskLevel, &[Rule])] = &[
    (
        RiskLevel::Emergency,
        &[
            (
                |ctx| ctx.trading.is_honeypot && ctx.trading.honeypot_confidence >= 0.8,
                |ctx| {
                    format!(
                        "Honeypot terkonfirmasi (confidence {:.0}%)",
                        ctx.trading.honeypot_confidence * 100.0
                    )
                },
            ),
            (
                |ctx| !ctx.is_verified && ctx.estimated_tvl_usd > UNVERIFIED_TVL_EMERGENCY_USD,
                |ctx| {
                    format!(
                        "Kontrak tidak terverifikasi memegang estimasi TVL ${:.0}",
                        ctx.estimated_tvl_usd
                    )
                },
            ),
        ],
    ),
    (
        RiskLevel::Critical,
        &[
            (
                |ctx| ctx.metrics.critical_issues >= 2,
                |ctx| {
                    format!(
                        "{} kerentanan Critical ditemukan",
                        ctx.metrics.critical_issues
                    )
                },
            ),
            (
                |ctx| ctx.trading.is_honeypot && ctx.trading.honeypot_confidence >= 0.5,
                |ctx| {
                    format!(
                        "Indikasi honeypot (confidence {:.0}%)",
                        ctx.trading.honeypot_confidence * 100.0
                    )
                },
            ),
            (
                |ctx| !ctx.is_verified && ctx.estimated_tvl_usd > UNVERIFIED_TVL_CRITICAL_USD,
                |ctx| {
                    format!(
                        "Kontrak tidak terverifikasi dengan estimasi TVL ${:.0}",
                        ctx.estimated_tvl_usd
                    )
                },
            ),
        ],
    ),
    (
        RiskLevel::High,
        &[
            (
                |ctx| ctx.metrics.critical_issues >= 1,
                |_| "Kerentanan Critical ditemukan".to_string(),
            ),
            (
                |ctx| ctx.metrics.high_issues >= 3,
                |ctx| format!("{} kerentanan High severity", ctx.metrics.high_issues),
            ),
            (
                |ctx| {
                    ctx.ownership.centralization_risk == CentralizationRisk::High
                        && ctx.ownership.admin_functions.len() > 5
                },
                |ctx| {
                    format!(
                        "Sentralisasi tinggi dengan {} fungsi admin",
                        ctx.ownership.admin_functions.len()
                    )
                },
            ),
            (
                |ctx| ctx.trust_score < 30,
                |ctx| format!("Trust score sangat rendah ({})", ctx.trust_score),
            ),
        ],
    ),
    (
        RiskLevel::Medium,
        &[
            (
                |ctx| ctx.metrics.high_issues >= 1,
                |ctx| format!("{} kerentanan High severity", ctx.metrics.high_issues),
            ),
            (
                |ctx| ctx.metrics.medium_issues >= 5,
                |ctx| format!("{} kerentanan Medium severity", ctx.metrics.medium_issues),
            ),
            (
                |ctx| !ctx.is_verified,
                |_| "Source code belum terverifikasi".to_string(),
            ),
            (
                |ctx| ctx.ownership.centralization_risk == CentralizationRisk::High,
                |_| "Risiko sentralisasi tinggi".to_string(),
            ),
            (
                |ctx| ctx.trust_score < 50,
                |ctx| format!("Trust score rendah ({})", ctx.trust_score),
            ),
            (
                |ctx| ctx.trading.total_tax() > 10.0,
                |ctx| format!("Total pajak trading {:.1}%", ctx.trading.total_tax()),
            ),
        ],
    ),
];

/// Sub-notes attached to the default Low tier when minor issues exist
const LOW_TIER_NOTES: &[Rule] = &[
    (
        |ctx| ctx.metrics.medium_issues >= 1,
        |ctx| format!("{} kerentanan Medium severity", ctx.metrics.medium_issues),
    ),
    (
        |ctx| ctx.metrics.low_issues >= 3,
        |ctx| format!("{} kerentanan Low severity", ctx.metrics.low_issues),
    ),
    (
        |ctx| ctx.trading.total_tax() > 5.0,
        |ctx| format!("Pajak trading {:.1}%", ctx.trading.total_tax()),
    ),
    (
        |ctx| !ctx.trading.liquidity_locked,
        |_| "Liquidity belum terkunci".to_string(),
    ),
];

pub struct RiskClassifier;

impl RiskClassifier {
    /// Select exactly one tier, first match wins.
    pub fn classify(ctx: &RiskContext) -> RiskAssessment {
        for (level, rules) in TIER_RULES {
            let factors: Vec<String> = rules
                .iter()
                .filter(|(predicate, _)| predicate(ctx))
                .map(|(_, message)| message(ctx))
                .collect();
            if !factors.is_empty() {
                debug!(level = level.as_str(), ?factors, "Risk tier selected");
                return RiskAssessment {
                    level: *level,
                    factors,
                };
            }
        }

        let notes: Vec<String> = LOW_TIER_NOTES
            .iter()
            .filter(|(predicate, _)| predicate(ctx))
            .map(|(_, message)| message(ctx))
            .collect();
        debug!(?notes, "Default Low risk tier");
        RiskAssessment {
            level: RiskLevel::Low,
            factors: notes,
        }
    }
}
