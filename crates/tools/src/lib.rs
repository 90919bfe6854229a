//! Built-in travel tools for Wayfarer.
//!
//! Each tool takes a free-text `query`, recognises the city it mentions and
//! answers from static tables. Unknown destinations get general advice
//! instead of an error.

pub mod attraction;
pub mod city;
pub mod food;
pub mod hotel;
pub mod route;
pub mod weather;

use wayfarer_core::tool::ToolRegistry;

pub use attraction::AttractionRecommendTool;
pub use city::City;
pub use food::FoodRecommendTool;
pub use hotel::HotelSearchTool;
pub use route::RoutePlanningTool;
pub use weather::WeatherQueryTool;

/// Create a tool registry with all five travel tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WeatherQueryTool));
    registry.register(Box::new(AttractionRecommendTool));
    registry.register(Box::new(HotelSearchTool));
    registry.register(Box::new(RoutePlanningTool));
    registry.register(Box::new(FoodRecommendTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_tools_sorted() {
        let registry = default_registry();
        assert_eq!(
            registry.names(),
            vec![
                "attraction_recommend",
                "food_recommend",
                "hotel_search",
                "route_planning",
                "weather_query",
            ]
        );
    }

    #[test]
    fn every_tool_takes_a_single_query() {
        for def in default_registry().definitions() {
            assert_eq!(def.parameters["required"], serde_json::json!(["query"]), "{}", def.name);
        }
    }
}
