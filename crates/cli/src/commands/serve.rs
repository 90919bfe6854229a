//! `wayfarer serve` — Start the HTTP API server.

use wayfarer_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.server.port = port;
    }

    println!("🧭 Wayfarer server");
    println!("   Listening: http://{}:{}", config.server.host, config.server.port);
    println!("   Chat API:  POST /api/chat");

    wayfarer_gateway::start(config).await?;

    Ok(())
}
