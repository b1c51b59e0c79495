//! Constants Module - Single Source of Truth
//!
//! Semua konstanta scoring dan fungsi konversi yang digunakan di seluruh
//! aplikasi didefinisikan di sini. Tidak ada hardcoded values di modul lain!

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "GarudaShield";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// UNIT CONVERSION
// ============================================

/// Wei per native token unit (ETH, BNB, MATIC all use 18 decimals)
pub const WEI_PER_NATIVE: f64 = 1e18;

/// Convert a wei amount to native token units
pub fn wei_to_native(wei: u128) -> f64 {
    wei as f64 / WEI_PER_NATIVE
}

/// Clamp a floating point score into the canonical [0, 100] integer range
pub fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

// ============================================
// TVL ESTIMATION
// ============================================

/// Assumed USD price per native token for rough TVL estimation.
/// The engine never fetches live prices; this is deliberately coarse.
pub const DEFAULT_NATIVE_PRICE_USD: f64 = 3000.0;

/// Unverified contract holding more than this estimated TVL trips the
/// trust-score guard (returns 30) and the Critical risk tier
pub const UNVERIFIED_TVL_CRITICAL_USD: f64 = 100_000.0;

/// Unverified contract above this estimated TVL is an Emergency
pub const UNVERIFIED_TVL_EMERGENCY_USD: f64 = 500_000.0;

// ============================================
// BEHAVIORAL ANALYSIS (WIB = UTC+7)
// ============================================

/// Western Indonesia Time offset from UTC, in seconds
pub const WIB_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Minimum value-bearing transactions required before the behavioral
/// analyzer will produce a signal
pub const MIN_BEHAVIORAL_TRANSACTIONS: usize = 10;

/// Indonesian prime-time window in WIB (inclusive), 19:00-22:59
pub const PRIME_TIME_START_HOUR: u32 = 19;
pub const PRIME_TIME_END_HOUR: u32 = 22;

/// Night window in WIB (inclusive), 00:00-05:59
pub const NIGHT_END_HOUR: u32 = 5;

// ============================================
// STRUCTURING DETECTION
// ============================================

/// Two values belong to the same cluster when their relative difference
/// is below this tolerance (1%)
pub const STRUCTURING_CLUSTER_TOLERANCE: f64 = 0.01;

/// A cluster needs at least this many members to count as a suspicious
/// recurring pattern
pub const STRUCTURING_MIN_CLUSTER_SIZE: usize = 3;

/// Wei divisors that mark a transfer amount as a "round number"
/// (0.001 and 0.01 native units)
pub const ROUND_WEI_DIVISORS: [u128; 2] = [1_000_000_000_000_000, 10_000_000_000_000_000];

/// Structuring "consistency" band in native units: amounts kept small and
/// uniform, typical of threshold-evasion transfers
pub const CONSISTENCY_BAND_MIN: f64 = 0.01;
pub const CONSISTENCY_BAND_MAX: f64 = 0.5;

/// Structuring composite score above this flags structuring_detected
pub const STRUCTURING_DETECTION_THRESHOLD: f64 = 0.5;

// ============================================
// COMPLIANCE SCORING
// ============================================

/// Legal risk contribution per Critical vulnerability
pub const LEGAL_RISK_PER_CRITICAL: f64 = 25.0;

/// Legal risk contribution per High vulnerability
pub const LEGAL_RISK_PER_HIGH: f64 = 15.0;

/// Crime indicator risk scores are divided by this before accumulation
pub const LEGAL_RISK_CRIME_DIVISOR: f64 = 4.0;

/// legal_risk_score at or above this => NON_COMPLIANT
pub const LEGAL_RISK_NON_COMPLIANT: f64 = 70.0;

/// legal_risk_score at or above this => REQUIRES_REVIEW
pub const LEGAL_RISK_REQUIRES_REVIEW: f64 = 40.0;
