//! Configuration module for GarudaShield
//!
//! All tunable parameters and static lookup tables are injected at
//! construction as an [`EngineConfig`] value. No module-level globals:
//! the recommendation texts, the regulatory-violation table and the
//! exchange registry all live here.

use std::collections::HashMap;

use crate::models::types::{
    ComplianceAction, RegulatoryViolation, Severity, ViolationSeverity,
};
use crate::utils::constants::{
    DEFAULT_NATIVE_PRICE_USD, MIN_BEHAVIORAL_TRANSACTIONS, UNVERIFIED_TVL_CRITICAL_USD,
    UNVERIFIED_TVL_EMERGENCY_USD,
};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    Ethereum = 1,
    BinanceSmartChain = 56,
    Polygon = 137,
    Arbitrum = 42161,
    Base = 8453,
}

impl ChainId {
    /// Resolve a chain from its lowercase name as used in audit requests
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ethereum" | "eth" | "mainnet" => Some(Self::Ethereum),
            "bsc" | "binance" => Some(Self::BinanceSmartChain),
            "polygon" | "matic" => Some(Self::Polygon),
            "arbitrum" => Some(Self::Arbitrum),
            "base" => Some(Self::Base),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::BinanceSmartChain => "BNB Smart Chain",
            Self::Polygon => "Polygon",
            Self::Arbitrum => "Arbitrum One",
            Self::Base => "Base",
        }
    }

    pub fn native_symbol(&self) -> &'static str {
        match self {
            Self::Ethereum | Self::Arbitrum | Self::Base => "ETH",
            Self::BinanceSmartChain => "BNB",
            Self::Polygon => "MATIC",
        }
    }
}

/// Engine configuration. Built once, shared by reference through the
/// pipeline components.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Assumed USD price per native token for TVL estimation
    pub native_price_usd: f64,
    /// Estimated TVL above which an unverified contract trips the trust
    /// guard and the Critical tier
    pub unverified_tvl_critical_usd: f64,
    /// Estimated TVL above which an unverified contract is an Emergency
    pub unverified_tvl_emergency_usd: f64,
    /// Minimum value-bearing transactions for behavioral analysis
    pub min_behavioral_transactions: usize,
    /// Lowercase deposit addresses of Indonesian exchanges, address -> name
    pub exchange_registry: HashMap<String, &'static str>,
    /// Remediation texts keyed by detector id
    pub recommendation_texts: HashMap<&'static str, &'static str>,
    /// Fallback remediation text for unknown detector ids
    pub generic_recommendation: &'static str,
    /// Regulatory-violation table keyed by normalized violation type
    pub violation_table: HashMap<&'static str, RegulatoryViolation>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            native_price_usd: DEFAULT_NATIVE_PRICE_USD,
            unverified_tvl_critical_usd: UNVERIFIED_TVL_CRITICAL_USD,
            unverified_tvl_emergency_usd: UNVERIFIED_TVL_EMERGENCY_USD,
            min_behavioral_transactions: MIN_BEHAVIORAL_TRANSACTIONS,
            exchange_registry: default_exchange_registry(),
            recommendation_texts: default_recommendation_texts(),
            generic_recommendation:
                "Tinjau kembali kode dan ikuti best practices keamanan smart contract",
            violation_table: default_violation_table(),
        }
    }
}

impl EngineConfig {
    /// Rough total-value-locked proxy: balance x assumed price
    pub fn estimate_tvl_usd(&self, balance_native: f64) -> f64 {
        balance_native * self.native_price_usd
    }

    /// Remediation text for a detector id
    pub fn recommendation_for(&self, vuln_type: &str) -> &'static str {
        self.recommendation_texts
            .get(vuln_type)
            .copied()
            .unwrap_or(self.generic_recommendation)
    }

    /// Canonical violation record for a violation type. Unmapped types fall
    /// back to a severity-keyed record so every Critical/High finding and
    /// crime indicator still maps to exactly one violation.
    pub fn violation_for(&self, violation_type: &str, severity: Severity) -> RegulatoryViolation {
        let key = normalize_violation_key(violation_type);
        if let Some(record) = self.violation_table.get(key.as_str()) {
            return record.clone();
        }
        fallback_violation(&key, severity)
    }
}

/// Lowercase, trimmed, spaces to underscores
pub fn normalize_violation_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace([' ', '-'], "_")
}

fn default_exchange_registry() -> HashMap<String, &'static str> {
    // Public deposit/hot-wallet addresses of the major Indonesian exchanges
    let entries: [(&str, &'static str); 5] = [
        ("0x91dca37856240e5e1906222ec79278b16420dc92", "Indodax"),
        ("0x3c02290922a3618a4646e3bbca65853ea45fe7c6", "Indodax"),
        ("0x9be89d2a4cd102d8fecc6bf9da793be995c22541", "Tokocrypto"),
        ("0x4e9ce36e442e55ecd9025b9a6e0d88485d628a67", "Tokocrypto"),
        ("0x0d0707963952f2fba59dd06f2b425ace40b492fe", "Pintu"),
    ];
    entries
        .into_iter()
        .map(|(addr, name)| (addr.to_string(), name))
        .collect()
}

fn default_recommendation_texts() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "reentrancy-eth",
            "Implementasikan checks-effects-interactions pattern dan gunakan ReentrancyGuard",
        ),
        (
            "tx-origin",
            "Gunakan msg.sender instead of tx.origin untuk otentikasi",
        ),
        (
            "unchecked-transfer",
            "Selalu periksa return value dari transfer() atau gunakan SafeERC20",
        ),
        (
            "uninitialized-state",
            "Inisialisasi semua state variables dengan nilai yang sesuai",
        ),
        (
            "locked-ether",
            "Tambahkan fungsi withdrawal atau pastikan ada cara untuk mengeluarkan Ether",
        ),
        (
            "arbitrary-send",
            "Validasi address tujuan sebelum mengirim Ether",
        ),
        (
            "controlled-array-length",
            "Implementasikan batasan maksimal untuk array yang dapat dimodifikasi user",
        ),
        (
            "timestamp",
            "Hindari penggunaan block.timestamp untuk logika kritis, gunakan alternatif yang lebih aman",
        ),
        (
            "weak-prng",
            "Gunakan oracle atau commit-reveal scheme untuk randomness yang aman",
        ),
    ])
}

fn default_violation_table() -> HashMap<&'static str, RegulatoryViolation> {
    let mut table = HashMap::new();

    table.insert(
        "illegal_investment",
        RegulatoryViolation {
            violation_type: "illegal_investment".to_string(),
            law_article: "UU P2SK No. 4 Tahun 2023 Pasal 237".to_string(),
            penalty_description: "Penghimpunan dana tanpa izin otoritas jasa keuangan"
                .to_string(),
            fine_amount: "Rp 1 triliun".to_string(),
            enforcement_agency: "OJK / Satgas PASTI".to_string(),
            severity_level: ViolationSeverity::Berat,
            satgas_priority: true,
            compliance_action: ComplianceAction::ImmediateBlock,
        },
    );

    table.insert(
        "ponzi_scheme",
        RegulatoryViolation {
            violation_type: "ponzi_scheme".to_string(),
            law_article: "UU No. 7 Tahun 2014 Pasal 105".to_string(),
            penalty_description: "Skema piramida dalam kegiatan perdagangan".to_string(),
            fine_amount: "Rp 10 miliar".to_string(),
            enforcement_agency: "Kementerian Perdagangan / Satgas PASTI".to_string(),
            severity_level: ViolationSeverity::Berat,
            satgas_priority: true,
            compliance_action: ComplianceAction::ImmediateBlock,
        },
    );

    table.insert(
        "online_gambling",
        RegulatoryViolation {
            violation_type: "online_gambling".to_string(),
            law_article: "UU ITE Pasal 27 ayat (2)".to_string(),
            penalty_description: "Distribusi konten perjudian melalui sistem elektronik"
                .to_string(),
            fine_amount: "Rp 1 miliar".to_string(),
            enforcement_agency: "Kominfo / Kepolisian RI".to_string(),
            severity_level: ViolationSeverity::Berat,
            satgas_priority: true,
            compliance_action: ComplianceAction::ImmediateBlock,
        },
    );

    table.insert(
        "money_laundering",
        RegulatoryViolation {
            violation_type: "money_laundering".to_string(),
            law_article: "UU TPPU No. 8 Tahun 2010 Pasal 3".to_string(),
            penalty_description: "Penempatan atau pelapisan harta hasil tindak pidana"
                .to_string(),
            fine_amount: "Rp 10 miliar".to_string(),
            enforcement_agency: "PPATK".to_string(),
            severity_level: ViolationSeverity::Berat,
            satgas_priority: true,
            compliance_action: ComplianceAction::ImmediateBlock,
        },
    );

    table.insert(
        "phishing_fraud",
        RegulatoryViolation {
            violation_type: "phishing_fraud".to_string(),
            law_article: "UU ITE Pasal 28 ayat (1)".to_string(),
            penalty_description: "Penyebaran berita bohong yang merugikan konsumen"
                .to_string(),
            fine_amount: "Rp 1 miliar".to_string(),
            enforcement_agency: "Bareskrim Polri".to_string(),
            severity_level: ViolationSeverity::Sedang,
            satgas_priority: false,
            compliance_action: ComplianceAction::Investigate,
        },
    );

    table.insert(
        "unlicensed_exchange",
        RegulatoryViolation {
            violation_type: "unlicensed_exchange".to_string(),
            law_article: "Peraturan Bappebti No. 8 Tahun 2021".to_string(),
            penalty_description: "Perdagangan aset kripto tanpa izin Bappebti".to_string(),
            fine_amount: "Rp 5 miliar".to_string(),
            enforcement_agency: "Bappebti".to_string(),
            severity_level: ViolationSeverity::Sedang,
            satgas_priority: false,
            compliance_action: ComplianceAction::Investigate,
        },
    );

    table
}

/// Severity-keyed fallback for violation types without a canonical record
fn fallback_violation(key: &str, severity: Severity) -> RegulatoryViolation {
    let (severity_level, compliance_action) = match severity {
        Severity::Critical => (ViolationSeverity::Berat, ComplianceAction::Investigate),
        Severity::High => (ViolationSeverity::Sedang, ComplianceAction::Investigate),
        _ => (ViolationSeverity::Ringan, ComplianceAction::Monitor),
    };
    RegulatoryViolation {
        violation_type: key.to_string(),
        law_article: "UU PDP No. 27 Tahun 2022 Pasal 46".to_string(),
        penalty_description: "Kelalaian pengamanan sistem elektronik".to_string(),
        fine_amount: "Rp 500 juta".to_string(),
        enforcement_agency: "Kominfo".to_string(),
        severity_level,
        satgas_priority: false,
        compliance_action,
    }
}
