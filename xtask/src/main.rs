//! Custom cargo commands for sleuth.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests (default and minimal features)
//!   cargo xtask check     - Quick check
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (contracts + tests + clippy + tier alignment)
  test      Run all Rust tests, with and without default features
  check     Quick check (cargo check + test + clippy)
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("sleuth Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking contract checks...");
    check_contract_markers()?;
    println!("✓ Contract checks present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--no-default-features", "--lib"])?;
    println!("✓ Sequential build passes\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-features", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Verifying importance tier alignment...");
    verify_tiers()?;
    println!("✓ Tiers aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--no-default-features", "--lib"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-features"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_contract_markers() -> Result<()> {
    let root = project_root()?;
    let contracts = std::fs::read_to_string(root.join("src/contracts.rs"))
        .context("Failed to read contracts.rs")?;

    let count = contracts.matches("Contract violation").count();
    if count < 5 {
        bail!(
            "Expected at least 5 contract checks, found {}. Someone may have removed a contract!",
            count
        );
    }

    let search = std::fs::read_to_string(root.join("src/search/mod.rs"))
        .context("Failed to read search/mod.rs")?;
    if !search.contains("contracts::check_results") {
        bail!("SearchService::search no longer runs contracts::check_results");
    }

    Ok(())
}

/// The compile-time tier assertions in contracts.rs must use the same weights
/// as the tier table in scoring/importance.rs.
fn verify_tiers() -> Result<()> {
    let root = project_root()?;

    let importance = std::fs::read_to_string(root.join("src/scoring/importance.rs"))
        .context("Failed to read scoring/importance.rs")?;
    let contracts = std::fs::read_to_string(root.join("src/contracts.rs"))
        .context("Failed to read contracts.rs")?;

    let mut scoring_weights = extract_tier_weights(&importance);
    scoring_weights.push(extract_const(&importance, "RARE_COMMON_IMPORTANCE")?);
    scoring_weights.push(extract_const(&importance, "UNCOMMON_IMPORTANCE")?);

    let contract_weights = [
        extract_const(&contracts, "VERY_FREQUENT")?,
        extract_const(&contracts, "FREQUENT")?,
        extract_const(&contracts, "SOMEWHAT")?,
        extract_const(&contracts, "RARE_COMMON")?,
        extract_const(&contracts, "UNCOMMON")?,
    ];

    if scoring_weights != contract_weights {
        bail!(
            "importance weights {:?} != contract weights {:?}",
            scoring_weights,
            contract_weights
        );
    }

    Ok(())
}

fn extract_tier_weights(content: &str) -> Vec<f64> {
    // Look for "const FREQUENCY_TIERS: [(usize, f64); 3] = [(100, 0.2), (50, 0.4), (20, 0.6)];"
    let Some(line) = content
        .lines()
        .find(|l| l.trim_start().starts_with("const FREQUENCY_TIERS"))
    else {
        return Vec::new();
    };
    let Some(table) = line.split('=').nth(1) else {
        return Vec::new();
    };
    table
        .split("),")
        .filter_map(|pair| pair.split(',').nth(1))
        .filter_map(|w| w.trim().trim_end_matches(&[')', ']', ';'][..]).trim().parse().ok())
        .collect()
}

fn extract_const(content: &str, name: &str) -> Result<f64> {
    // Look for "const NAME: f64 = 0.8;" (optionally pub)
    let needle = format!("const {}: f64 =", name);
    for line in content.lines() {
        if let Some(rest) = line.split(&needle).nth(1) {
            let value = rest.trim().trim_end_matches(';').trim();
            return value
                .parse()
                .with_context(|| format!("Failed to parse {} = {:?}", name, value));
        }
    }
    bail!("constant {} not found", name)
}
