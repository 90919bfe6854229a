//! `wayfarer init` — Write a default config file.

use std::path::Path;
use wayfarer_config::AppConfig;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = AppConfig::config_dir().join("config.toml");
    if write_default(&path, force)? {
        println!("✅ Wrote {}", path.display());
        println!("   Set api_key there, or export WAYFARER_API_KEY / OPENAI_API_KEY.");
    } else {
        println!("ℹ️  {} already exists (use --force to overwrite)", path.display());
    }
    Ok(())
}

/// Returns false when the file exists and `force` is not set.
fn write_default(path: &Path, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, AppConfig::default_toml())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default(&path, false).unwrap());
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.agent.max_steps, 10);

        std::fs::write(&path, "default_model = \"custom\"\n").unwrap();
        assert!(!write_default(&path, false).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().default_model, "custom");

        assert!(write_default(&path, true).unwrap());
        assert_eq!(AppConfig::load_from(&path).unwrap().default_model, "gpt-3.5-turbo");
    }
}
