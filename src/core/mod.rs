//! Core Module - Scoring & Compliance Pipeline
//!
//! Otak aplikasi: security scoring, behavioral analysis, trust score,
//! risk classification, compliance mapping.

pub mod behavioral;
pub mod compliance;
pub mod crime_patterns;
pub mod engine;
pub mod normalizer;
pub mod risk_classifier;
pub mod security_metrics;
pub mod trust_score;

pub use behavioral::*;
pub use compliance::*;
pub use crime_patterns::*;
pub use engine::*;
pub use normalizer::*;
pub use risk_classifier::*;
pub use security_metrics::*;
pub use trust_score::*;
