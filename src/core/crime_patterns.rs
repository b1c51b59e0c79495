//! Crime Pattern Scanner
//!
//! Data-driven keyword detection over contract metadata/source text.
//! Rules live in a static table `{pattern, weight, category, violation,
//! severity}` compiled once; adding a rule never touches control flow.
//!
//! The scanner is the quick path. An upstream AI adapter may supply its own
//! indicator list; [`resolve_crime_indicators`] picks between the two - the
//! AI result wins when well-formed, otherwise the quick-pattern result is
//! used. This is deliberately a fallback, not a merge.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::types::{CrimeIndicator, Severity};

/// One detection rule. Patterns are case-insensitive regexes matched
/// against the normalized text.
struct CrimeRule {
    category: &'static str,
    violation_type: &'static str,
    pattern: &'static str,
    weight: f64,
    severity: Severity,
}

const CRIME_RULES: &[CrimeRule] = &[
    // Ponzi / illegal investment
    CrimeRule {
        category: "ponzi_scheme",
        violation_type: "ponzi_scheme",
        pattern: r"guaranteed\s+(daily|weekly|monthly)?\s*(profit|return|roi)",
        weight: 40.0,
        severity: Severity::Critical,
    },
    CrimeRule {
        category: "ponzi_scheme",
        violation_type: "ponzi_scheme",
        pattern: r"(jaminan|dijamin)\s+(untung|keuntungan|profit)",
        weight: 40.0,
        severity: Severity::Critical,
    },
    CrimeRule {
        category: "ponzi_scheme",
        violation_type: "ponzi_scheme",
        pattern: r"referral\s+(bonus|reward|komisi)",
        weight: 25.0,
        severity: Severity::High,
    },
    CrimeRule {
        category: "illegal_investment",
        violation_type: "illegal_investment",
        pattern: r"investasi\s+bodong|(double|gandakan)\s+(your\s+)?(money|uang|dana)",
        weight: 45.0,
        severity: Severity::Critical,
    },
    CrimeRule {
        category: "illegal_investment",
        violation_type: "illegal_investment",
        pattern: r"high\s+yield|passive?\s+income\s+(setiap|every)",
        weight: 20.0,
        severity: Severity::High,
    },
    // Online gambling
    CrimeRule {
        category: "online_gambling",
        violation_type: "online_gambling",
        pattern: r"judi|togel|slot\s+gacor|jackpot",
        weight: 45.0,
        severity: Severity::Critical,
    },
    CrimeRule {
        category: "online_gambling",
        violation_type: "online_gambling",
        pattern: r"\b(betting|casino|lottery)\b",
        weight: 30.0,
        severity: Severity::High,
    },
    // Money laundering
    CrimeRule {
        category: "money_laundering",
        violation_type: "money_laundering",
        pattern: r"(pencucian\s+uang|money\s+launder|mixer|tumbler)",
        weight: 50.0,
        severity: Severity::Critical,
    },
    // Phishing / fraud
    CrimeRule {
        category: "phishing_fraud",
        violation_type: "phishing_fraud",
        pattern: r"(seed\s+phrase|private\s+key)\s*(recovery|claim|verification)",
        weight: 45.0,
        severity: Severity::Critical,
    },
    CrimeRule {
        category: "phishing_fraud",
        violation_type: "phishing_fraud",
        pattern: r"(airdrop|hadiah)\s+(claim|klaim)",
        weight: 20.0,
        severity: Severity::High,
    },
];

lazy_static! {
    static ref COMPILED_RULES: Vec<(Regex, &'static CrimeRule)> = CRIME_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(&format!("(?i){}", rule.pattern))
                .expect("crime rule patterns are valid regexes");
            (regex, rule)
        })
        .collect();
}

pub struct CrimePatternScanner;

impl CrimePatternScanner {
    /// Scan free text (contract source, token metadata, project
    /// description) and aggregate matched rules into per-category
    /// indicators. Categories are emitted in lexicographic order so the
    /// output is deterministic.
    pub fn scan(text: &str) -> Vec<CrimeIndicator> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        // category -> (violation_type, severity, total weight, evidence)
        let mut buckets: BTreeMap<&'static str, (&'static str, Severity, f64, Vec<String>)> =
            BTreeMap::new();

        for (regex, rule) in COMPILED_RULES.iter() {
            if let Some(found) = regex.find(text) {
                let entry = buckets.entry(rule.category).or_insert((
                    rule.violation_type,
                    rule.severity,
                    0.0,
                    Vec::new(),
                ));
                entry.2 += rule.weight;
                entry.3.push(found.as_str().to_string());
                // Keep the most severe rule severity for the bucket
                if severity_rank(rule.severity) > severity_rank(entry.1) {
                    entry.1 = rule.severity;
                }
            }
        }

        let indicators: Vec<CrimeIndicator> = buckets
            .into_iter()
            .map(|(category, (violation_type, severity, weight, evidence))| {
                let matches = evidence.len();
                CrimeIndicator {
                    indicator_type: category.to_string(),
                    risk_score: weight.min(100.0),
                    confidence: (0.5 + 0.15 * (matches as f64 - 1.0)).min(0.9),
                    severity,
                    evidence,
                    regulatory_violation: violation_type.to_string(),
                }
            })
            .collect();

        debug!(count = indicators.len(), "Crime pattern scan complete");
        indicators
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 4,
        Severity::High => 3,
        Severity::Medium => 2,
        Severity::Low => 1,
        Severity::Informational => 0,
    }
}

/// Pick between the AI adapter's indicators and the quick-pattern scan.
///
/// The AI result wins when it is well-formed (non-empty, every indicator
/// named and with a finite risk score in range); otherwise the quick result
/// stands. Fallback, not a merge.
pub fn resolve_crime_indicators(
    ai_indicators: Option<Vec<CrimeIndicator>>,
    quick_indicators: Vec<CrimeIndicator>,
) -> Vec<CrimeIndicator> {
    match ai_indicators {
        Some(indicators)
            if !indicators.is_empty()
                && indicators.iter().all(|i| {
                    !i.indicator_type.is_empty()
                        && i.risk_score.is_finite()
                        && (0.0..=100.0).contains(&i.risk_score)
                }) =>
        {
            debug!(count = indicators.len(), "Using AI crime indicators");
            indicators
        }
        _ => {
            debug!(
                count = quick_indicators.len(),
                "Using quick-pattern crime indicators"
            );
            quick_indicators
        }
    }
}
