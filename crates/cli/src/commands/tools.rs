//! `wayfarer tools` — List the travel tools.

use wayfarer_core::tool::ToolRegistry;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = wayfarer_tools::default_registry();
    print!("{}", render(&registry));
    Ok(())
}

fn render(registry: &ToolRegistry) -> String {
    let mut out = format!("🧰 {} tools available\n\n", registry.len());
    for def in registry.definitions() {
        out.push_str(&format!("  {:<22} {}\n", def.name, def.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_tool() {
        let text = render(&wayfarer_tools::default_registry());
        assert!(text.starts_with("🧰 5 tools available"));
        for name in ["weather_query", "attraction_recommend", "hotel_search", "route_planning", "food_recommend"] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}
