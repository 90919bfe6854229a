//! `wayfarer doctor` — Diagnose configuration and provider health.

use std::time::Duration;
use wayfarer_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Wayfarer Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ℹ️  No config file, using defaults (run `wayfarer init` to create one)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key: set WAYFARER_API_KEY or OPENAI_API_KEY for model-backed answers");
        issues += 1;
    }

    // Check the provider the agent will actually use
    let provider = wayfarer_providers::build_from_config(&config);
    println!("  ✅ Provider: {} (model {})", provider.name(), config.default_model);

    let deadline = Duration::from_secs(config.agent.request_timeout_secs.min(10));
    match tokio::time::timeout(deadline, provider.health_check()).await {
        Ok(Ok(true)) => println!("  ✅ Provider reachable"),
        Ok(Ok(false)) => {
            println!("  ❌ Provider responded but reported unhealthy");
            issues += 1;
        }
        Ok(Err(e)) => {
            println!("  ❌ Provider check failed: {e}");
            issues += 1;
        }
        Err(_) => {
            println!("  ❌ Provider did not respond within {}s", deadline.as_secs());
            issues += 1;
        }
    }

    let tools = wayfarer_tools::default_registry();
    println!("  ✅ {} tools registered", tools.len());

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
