//! Behavioral Analyzer
//!
//! Derives timezone-locality and amount-structuring signals from a raw
//! transaction list. Timestamps are shifted to WIB (UTC+7) and bucketed by
//! hour-of-day; transfer amounts are clustered to surface recurring
//! near-identical transfers (structuring, a money-laundering technique of
//! splitting value below reporting thresholds).
//!
//! Fewer than 10 value-bearing transactions yields an explicit
//! "insufficient data" verdict - a valid low-confidence signal, not an
//! error.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use tracing::{debug, warn};

use crate::models::config::EngineConfig;
use crate::models::types::{
    BehavioralSignal, BehavioralVerdict, RecurringPattern, StructuringAnalysis, TimezoneProfile,
    Transaction,
};
use crate::utils::constants::{
    clamp_score, wei_to_native, CONSISTENCY_BAND_MAX, CONSISTENCY_BAND_MIN, NIGHT_END_HOUR,
    PRIME_TIME_END_HOUR, PRIME_TIME_START_HOUR, ROUND_WEI_DIVISORS,
    STRUCTURING_CLUSTER_TOLERANCE, STRUCTURING_DETECTION_THRESHOLD,
    STRUCTURING_MIN_CLUSTER_SIZE, WIB_UTC_OFFSET_SECS,
};

pub struct BehavioralAnalyzer<'a> {
    config: &'a EngineConfig,
}

impl<'a> BehavioralAnalyzer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Analyze a raw transaction list. Only value-bearing entries
    /// (value_wei > 0) participate.
    pub fn analyze(&self, transactions: &[Transaction]) -> BehavioralVerdict {
        let value_txs: Vec<&Transaction> =
            transactions.iter().filter(|t| t.value_wei > 0).collect();

        if value_txs.len() < self.config.min_behavioral_transactions {
            debug!(
                value_transactions = value_txs.len(),
                minimum = self.config.min_behavioral_transactions,
                "Insufficient transaction data for behavioral analysis"
            );
            return BehavioralVerdict::InsufficientData {
                value_transactions: value_txs.len(),
            };
        }

        let (timezone, probability, bot_detected) = self.analyze_timezone(&value_txs);
        let structuring = self.analyze_structuring(&value_txs);
        let exchange_ratio = self.exchange_interaction_ratio(&value_txs);

        let behavior_score = self.composite_score(
            probability,
            exchange_ratio,
            &structuring,
            bot_detected,
        );

        debug!(
            probability,
            exchange_ratio,
            structuring_detected = structuring.detected,
            behavior_score,
            "Behavioral analysis complete"
        );

        BehavioralVerdict::Analyzed(BehavioralSignal {
            timezone,
            indonesia_timezone_probability: probability,
            bot_behavior_detected: bot_detected,
            structuring,
            exchange_interaction_ratio: exchange_ratio,
            behavior_score,
        })
    }

    /// Bucket transactions by WIB hour-of-day and weekday.
    fn analyze_timezone(&self, txs: &[&Transaction]) -> (TimezoneProfile, f64, bool) {
        let wib = FixedOffset::east_opt(WIB_UTC_OFFSET_SECS)
            .expect("WIB offset is a valid fixed offset");

        let mut prime_time = 0usize;
        let mut night = 0usize;
        let mut weekend = 0usize;
        let mut counted = 0usize;

        for tx in txs {
            let Some(utc) = DateTime::from_timestamp(tx.timestamp, 0) else {
                warn!(timestamp = tx.timestamp, "Skipping out-of-range timestamp");
                continue;
            };
            let local = utc.with_timezone(&wib);
            let hour = local.hour();

            if (PRIME_TIME_START_HOUR..=PRIME_TIME_END_HOUR).contains(&hour) {
                prime_time += 1;
            }
            if hour <= NIGHT_END_HOUR {
                night += 1;
            }
            if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
                weekend += 1;
            }
            counted += 1;
        }

        if counted == 0 {
            return (TimezoneProfile::default(), 0.0, false);
        }

        let profile = TimezoneProfile {
            prime_time_ratio: prime_time as f64 / counted as f64,
            night_ratio: night as f64 / counted as f64,
            weekend_ratio: weekend as f64 / counted as f64,
        };

        // Indonesian retail activity: strong evening prime time, weekend
        // participation, quiet nights
        let mut probability = 0.0;
        if profile.prime_time_ratio > 0.3 {
            probability += 0.4;
        }
        if profile.weekend_ratio > 0.2 {
            probability += 0.2;
        }
        if profile.night_ratio < 0.2 {
            probability += 0.3;
        }

        // Sustained night-hour activity is a bot signature, not a human one
        let bot_detected = profile.night_ratio > 0.5;

        (profile, probability, bot_detected)
    }

    /// Group near-identical transfer amounts into clusters and measure
    /// round-number / small-amount consistency.
    fn analyze_structuring(&self, txs: &[&Transaction]) -> StructuringAnalysis {
        let total = txs.len();

        let mut values: Vec<u128> = txs.iter().map(|t| t.value_wei).collect();
        values.sort_unstable();

        // A value joins the current cluster when its relative difference to
        // the cluster's first member stays under the tolerance
        let mut patterns = Vec::new();
        let mut cluster_start = 0;
        for i in 1..=values.len() {
            let split = i == values.len() || {
                let base = values[cluster_start] as f64;
                let diff = (values[i] as f64 - base) / base;
                diff >= STRUCTURING_CLUSTER_TOLERANCE
            };
            if split {
                let occurrences = i - cluster_start;
                if occurrences >= STRUCTURING_MIN_CLUSTER_SIZE {
                    patterns.push(RecurringPattern {
                        amount_native: wei_to_native(values[cluster_start]),
                        occurrences,
                        percentage: occurrences as f64 / total as f64 * 100.0,
                    });
                }
                cluster_start = i;
            }
        }

        let round_count = values
            .iter()
            .filter(|v| ROUND_WEI_DIVISORS.iter().any(|d| *v % d == 0))
            .count();
        let round_number_ratio = round_count as f64 / total as f64;

        let consistent_count = values
            .iter()
            .map(|v| wei_to_native(*v))
            .filter(|native| (CONSISTENCY_BAND_MIN..=CONSISTENCY_BAND_MAX).contains(native))
            .count();
        let consistency_ratio = consistent_count as f64 / total as f64;

        let mut score = 0.0;
        if !patterns.is_empty() {
            score += 0.4;
        }
        if round_number_ratio > 0.2 {
            score += 0.3;
        }
        if consistency_ratio > 0.6 {
            score += 0.3;
        }

        StructuringAnalysis {
            detected: score > STRUCTURING_DETECTION_THRESHOLD,
            confidence: score,
            patterns,
            round_number_ratio,
            consistency_ratio,
        }
    }

    /// Fraction of transactions whose counterparty is a known Indonesian
    /// exchange deposit address.
    fn exchange_interaction_ratio(&self, txs: &[&Transaction]) -> f64 {
        let hits = txs
            .iter()
            .filter(|t| {
                self.config
                    .exchange_registry
                    .contains_key(&t.to.to_lowercase())
                    || self
                        .config
                        .exchange_registry
                        .contains_key(&t.from.to_lowercase())
            })
            .count();
        hits as f64 / txs.len() as f64
    }

    /// Composite behavior score, 0-100.
    fn composite_score(
        &self,
        timezone_probability: f64,
        exchange_ratio: f64,
        structuring: &StructuringAnalysis,
        bot_detected: bool,
    ) -> u8 {
        let mut score = 0.0;

        // Timezone locality contributes up to 40
        if timezone_probability > 0.7 {
            score += 40.0;
        } else if timezone_probability > 0.4 {
            score += 20.0;
        }

        // Exchange-interaction proxy contributes up to 30
        if exchange_ratio > 0.3 {
            score += 30.0;
        } else if exchange_ratio > 0.1 {
            score += 15.0;
        }

        // Structuring contributes up to 20, scaled by confidence
        if structuring.detected {
            score += 20.0 * structuring.confidence;
        }

        if bot_detected {
            score -= 10.0;
        }

        let indicators = [
            timezone_probability > 0.4,
            structuring.detected,
            exchange_ratio > 0.1,
            bot_detected,
        ]
        .into_iter()
        .filter(|&hit| hit)
        .count();
        if indicators >= 2 {
            score += 10.0;
        }

        clamp_score(score)
    }
}
