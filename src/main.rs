//! Garuda Shield - Smart contract risk & compliance scoring engine
//!
//! Reads a pre-normalized signal bundle (JSON) for one deployed contract,
//! runs the full scoring pipeline, and prints the audit verdict as JSON.
//!
//! Usage: garuda_shield <signals.json> [--pretty]

use eyre::{eyre, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use garuda_shield::models::errors::AppError;
use garuda_shield::{AuditEngine, AuditInput, ChainId, EngineConfig};

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    println!(
        r#"
    ╔══════════════════════════════════════════════╗
    ║                                              ║
    ║        G A R U D A   S H I E L D             ║
    ║   Risk & Compliance Scoring Engine v0.1.0    ║
    ║                                              ║
    ╚══════════════════════════════════════════════╝
    "#
    );

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| eyre!("usage: garuda_shield <signals.json> [--pretty]"))?;
    let pretty = args.any(|a| a == "--pretty");

    let raw = std::fs::read_to_string(&path).map_err(AppError::from)?;
    let input: AuditInput = serde_json::from_str(&raw).map_err(AppError::from)?;

    if !input.contract_address.starts_with("0x") || input.contract_address.len() != 42 {
        return Err(AppError::invalid_address(format!(
            "Invalid contract address: {}",
            input.contract_address
        ))
        .into());
    }
    let chain = ChainId::from_name(&input.chain)
        .ok_or_else(|| AppError::unsupported_chain(&input.chain))?;

    info!(
        "🦅 Auditing {} on {} ({})",
        input.contract_address,
        chain.name(),
        chain.native_symbol()
    );

    let engine = AuditEngine::new(EngineConfig::default());
    let verdict = engine.evaluate(&input);

    let output = if pretty {
        serde_json::to_string_pretty(&verdict).map_err(AppError::from)?
    } else {
        serde_json::to_string(&verdict).map_err(AppError::from)?
    };
    println!("{}", output);

    Ok(())
}
