//! Provider selection from configuration.

use std::sync::Arc;
use tracing::{info, warn};
use wayfarer_config::AppConfig;
use wayfarer_core::provider::Provider;

use crate::offline::OfflineProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Providers that serve a local endpoint and need no API key.
const KEYLESS: &[&str] = &["ollama", "vllm", "llamacpp", "llama.cpp"];

/// Build the provider the agent should talk to.
///
/// Falls back to the offline keyword provider when `default_provider` is
/// "offline", when a hosted provider is selected without an API key, or
/// when an unknown provider has no `api_url`.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn Provider> {
    let name = config.default_provider.as_str();
    let keyless = KEYLESS.contains(&name);

    if name == "offline" || (!keyless && !config.has_api_key()) {
        info!(configured = %name, "No API key available, using the offline provider");
        return Arc::new(OfflineProvider::new());
    }

    let Some(base_url) = config.api_url.clone().or_else(|| default_base_url(name)) else {
        warn!(provider = %name, "Unknown provider without api_url, using the offline provider");
        return Arc::new(OfflineProvider::new());
    };
    let api_key = config.api_key.clone().unwrap_or_else(|| name.to_string());

    info!(provider = %name, base_url = %base_url, model = %config.default_model, "Using remote provider");
    Arc::new(OpenAiCompatProvider::new(name, base_url, api_key))
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> Option<String> {
    let url = match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1",
        "openai" => "https://api.openai.com/v1",
        "ollama" => "http://localhost:11434/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "together" => "https://api.together.xyz/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1",
        _ => return None,
    };
    Some(url.to_string())
}
