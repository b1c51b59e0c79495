//! Trust Score Engine
//!
//! Fuses security metrics, ownership, trading, social and on-chain activity
//! signals into a single bounded trust score (0-100).
//!
//! Guard rules run first and short-circuit: a confident honeypot scores 0
//! no matter what else looks good, an unverified contract sitting on real
//! TVL caps at 30, and two or more Critical findings cap at 20. Only then
//! are the three weighted components (technical / economic / operational)
//! computed and shaped by confidence and penalty multipliers.
//!
//! All inputs are optional-with-neutral-defaults; the engine never errors.

use tracing::debug;

use crate::models::config::EngineConfig;
use crate::models::types::{
    BehavioralSignal, CentralizationRisk, ContractStats, OwnershipAnalysis, SecurityMetrics,
    SocialPresence, TradingAnalysis, TrustScore,
};
use crate::utils::constants::clamp_score;

/// Inputs to one trust evaluation, borrowed from the audit pipeline
pub struct TrustContext<'a> {
    pub metrics: &'a SecurityMetrics,
    pub is_verified: bool,
    pub ownership: &'a OwnershipAnalysis,
    pub trading: &'a TradingAnalysis,
    pub social: &'a SocialPresence,
    pub stats: Option<&'a ContractStats>,
    pub behavioral: Option<&'a BehavioralSignal>,
}

pub struct TrustScoreEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> TrustScoreEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, ctx: &TrustContext) -> TrustScore {
        // ============================================
        // GUARD RULES (each an immediate return)
        // ============================================

        if ctx.trading.is_honeypot && ctx.trading.honeypot_confidence >= 0.7 {
            debug!("Trust guard: confirmed honeypot");
            return TrustScore::guard(
                0,
                format!(
                    "Honeypot terkonfirmasi (confidence {:.0}%)",
                    ctx.trading.honeypot_confidence * 100.0
                ),
            );
        }

        let estimated_tvl = ctx
            .stats
            .map(|s| self.config.estimate_tvl_usd(s.balance_native))
            .unwrap_or(0.0);

        if !ctx.is_verified && estimated_tvl > self.config.unverified_tvl_critical_usd {
            debug!(estimated_tvl, "Trust guard: unverified high-value contract");
            return TrustScore::guard(
                30,
                format!(
                    "Kontrak belum terverifikasi dengan estimasi TVL ${:.0}",
                    estimated_tvl
                ),
            );
        }

        if ctx.metrics.critical_issues >= 2 {
            debug!(
                critical_issues = ctx.metrics.critical_issues,
                "Trust guard: multiple critical vulnerabilities"
            );
            return TrustScore::guard(
                20,
                format!(
                    "{} kerentanan Critical ditemukan",
                    ctx.metrics.critical_issues
                ),
            );
        }

        // ============================================
        // WEIGHTED COMPONENTS
        // ============================================

        let mut factors = Vec::new();

        let technical = self.technical_component(ctx, &mut factors);
        let economic = self.economic_component(ctx, &mut factors);
        let operational = self.operational_component(ctx, &mut factors);

        // Advisory notes only; behavioral findings never move the score
        if let Some(signal) = ctx.behavioral {
            if signal.structuring.detected {
                factors.push("Catatan: pola structuring terdeteksi pada transaksi".to_string());
            }
            if signal.bot_behavior_detected {
                factors.push("Catatan: aktivitas menyerupai bot terdeteksi".to_string());
            }
        }

        // ============================================
        // MULTIPLIERS
        // ============================================

        let mut confidence = 1.0;
        if !ctx.is_verified {
            confidence *= 0.85;
        }
        if ctx.trading.honeypot_confidence < 0.5 {
            confidence *= 0.9;
        }
        if ctx.social.social_score < 20 {
            confidence *= 0.95;
        }

        let mut penalty = 1.0;
        if ctx.trading.is_honeypot {
            penalty *= if ctx.trading.honeypot_confidence >= 0.5 {
                0.3
            } else {
                0.7
            };
        }
        let total_tax = ctx.trading.total_tax();
        if total_tax > 20.0 {
            penalty *= 0.6;
        } else if total_tax > 10.0 {
            penalty *= 0.8;
        }

        let total = clamp_score((technical + economic + operational) * confidence * penalty);

        debug!(
            technical,
            economic, operational, confidence, penalty, total, "Trust score computed"
        );

        TrustScore {
            total,
            technical,
            economic,
            operational,
            confidence_multiplier: confidence,
            penalty_multiplier: penalty,
            factors,
        }
    }

    /// Technical component, capped at 40: code health plus verification.
    fn technical_component(&self, ctx: &TrustContext, factors: &mut Vec<String>) -> f64 {
        let security = (ctx.metrics.security_score as f64 * 0.2).min(20.0);
        let quality = (ctx.metrics.code_quality_score as f64 * 0.1).min(10.0);
        let mut component = security + quality;

        factors.push(format!(
            "Security score berkontribusi {:.1} poin",
            security
        ));
        if ctx.is_verified {
            component += 10.0;
            factors.push("Source code terverifikasi (+10)".to_string());
        }

        component.min(40.0)
    }

    /// Economic component, capped at 30: liquidity, trading health, age and
    /// activity.
    fn economic_component(&self, ctx: &TrustContext, factors: &mut Vec<String>) -> f64 {
        let mut component: f64 = 0.0;

        if ctx.trading.liquidity_locked {
            component += 10.0;
            factors.push("Liquidity terkunci (+10)".to_string());
        } else if !ctx.trading.is_honeypot {
            component += 5.0;
        }

        if !ctx.trading.is_honeypot {
            component += 8.0;
            if ctx.trading.buy_tax <= 5.0 && ctx.trading.sell_tax <= 5.0 {
                component += 2.0;
                factors.push("Pajak trading wajar (+2)".to_string());
            }
        }

        if let Some(stats) = ctx.stats {
            let age_bonus = match stats.age_days {
                days if days >= 365 => 5.0,
                days if days >= 180 => 3.0,
                days if days >= 30 => 1.0,
                _ => 0.0,
            };
            if age_bonus > 0.0 {
                component += age_bonus;
                factors.push(format!(
                    "Umur kontrak {} hari (+{:.0})",
                    stats.age_days, age_bonus
                ));
            }

            let activity_bonus = match stats.transaction_count {
                n if n >= 10_000 => 5.0,
                n if n >= 1_000 => 3.0,
                n if n >= 100 => 1.0,
                _ => 0.0,
            };
            if activity_bonus > 0.0 {
                component += activity_bonus;
                factors.push(format!(
                    "{} transaksi tercatat (+{:.0})",
                    stats.transaction_count, activity_bonus
                ));
            }
        }

        component.min(30.0)
    }

    /// Operational component, capped at 30: ownership posture, social
    /// presence, transparency.
    fn operational_component(&self, ctx: &TrustContext, factors: &mut Vec<String>) -> f64 {
        let mut component = 0.0;

        let ownership_bonus = if ctx.ownership.ownership_renounced {
            factors.push("Ownership sudah di-renounce (+15)".to_string());
            15.0
        } else if ctx.ownership.is_multisig {
            factors.push("Owner menggunakan multisig (+10)".to_string());
            10.0
        } else {
            match ctx.ownership.centralization_risk {
                CentralizationRisk::Low => 5.0,
                CentralizationRisk::Medium => 2.0,
                CentralizationRisk::High | CentralizationRisk::Unknown => 0.0,
            }
        };
        component += ownership_bonus;

        component += (ctx.social.social_score as f64 * 0.1).min(10.0);

        if ctx.is_verified {
            component += 3.0;
        }
        if ctx.social.website.is_some() || ctx.social.github.is_some() {
            component += 2.0;
            factors.push("Website/GitHub tersedia (+2)".to_string());
        }

        component.min(30.0)
    }
}
