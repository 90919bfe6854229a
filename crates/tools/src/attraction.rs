//! Attraction recommendation tool.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs};

use crate::city::City;

pub struct AttractionRecommendTool;

struct Attraction {
    name: &'static str,
    kind: &'static str,
    stars: u8,
    tip: &'static str,
}

const fn spot(name: &'static str, kind: &'static str, stars: u8, tip: &'static str) -> Attraction {
    Attraction {
        name,
        kind,
        stars,
        tip,
    }
}

fn attractions_for(city: City) -> &'static [Attraction] {
    const BEIJING: &[Attraction] = &[
        spot("The Palace Museum", "History & culture", 5, "Book tickets ahead; allow 3-4 hours"),
        spot("Tiananmen Square", "Landmark", 5, "The dawn flag-raising ceremony is worth the early start"),
        spot("Great Wall (Badaling)", "World heritage", 5, "Physically demanding, wear comfortable shoes"),
        spot("Summer Palace", "Imperial garden", 4, "Best in spring and autumn"),
    ];
    const SHANGHAI: &[Attraction] = &[
        spot("The Bund", "City landmark", 5, "Go at dusk for the night skyline"),
        spot("Oriental Pearl Tower", "Modern architecture", 4, "Observation deck tickets sell out, buy early"),
        spot("Yu Garden", "Classical garden", 4, "A taste of traditional Jiangnan garden design"),
        spot("Nanjing Road", "Shopping street", 3, "Good for shopping and street snacks"),
    ];
    const GUANGZHOU: &[Attraction] = &[
        spot("Canton Tower", "Modern landmark", 5, "The evening light show is spectacular"),
        spot("Chen Clan Ancestral Hall", "Traditional architecture", 4, "A showcase of Lingnan craftsmanship"),
        spot("Shamian Island", "History & culture", 4, "European-style streets, great for photos"),
        spot("Baiyun Mountain", "Nature", 3, "Hike up for a view over the city"),
    ];
    const SHENZHEN: &[Attraction] = &[
        spot("Window of the World", "Theme park", 4, "Plan a full day; the evening shows are included"),
        spot("Dameisha Beach", "Seaside", 4, "Crowded on weekends, go on a weekday"),
        spot("OCT Loft", "Creative district", 3, "Galleries and cafes in converted factories"),
    ];
    const CHENGDU: &[Attraction] = &[
        spot("Giant Panda Breeding Base", "Wildlife", 5, "Arrive at opening time when the pandas are active"),
        spot("Jinli Ancient Street", "Historic street", 4, "Lively at night with lanterns and snacks"),
        spot("Wuhou Shrine", "History & culture", 4, "Pairs well with a walk to Jinli next door"),
        spot("Kuanzhai Alley", "Historic street", 4, "Try a teahouse and watch Sichuan opera face-changing"),
    ];
    const HANGZHOU: &[Attraction] = &[
        spot("West Lake", "Scenic lake", 5, "Rent a bike or take a boat across at sunset"),
        spot("Lingyin Temple", "Buddhist temple", 5, "Combine with the Feilai Feng rock carvings"),
        spot("Longjing Tea Village", "Countryside", 4, "Spring is picking season for Dragon Well tea"),
    ];

    match city {
        City::Beijing => BEIJING,
        City::Shanghai => SHANGHAI,
        City::Guangzhou => GUANGZHOU,
        City::Shenzhen => SHENZHEN,
        City::Chengdu => CHENGDU,
        City::Hangzhou => HANGZHOU,
    }
}

#[async_trait]
impl Tool for AttractionRecommendTool {
    fn name(&self) -> &str {
        "attraction_recommend"
    }

    fn description(&self) -> &str {
        "Recommend popular attractions, sights and sightseeing routes for a city or region."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = args.require_text("query")?;

        let Some(city) = City::find_in(query) else {
            return Ok(format!(
                "No specific attraction data for '{query}' yet. General sightseeing advice:\n\
                 1. Look up the best-known local sights in advance\n\
                 2. Check opening hours and ticket policies\n\
                 3. Group nearby sights into one route\n\
                 4. Bring a camera"
            ));
        };

        let mut out = format!("Top attractions in {}:\n\n", city.label());
        for (i, a) in attractions_for(city).iter().enumerate() {
            out.push_str(&format!(
                "{}. {}\n   Type: {} | Rating: {}/5\n   Tip: {}\n\n",
                i + 1,
                a.name,
                a.kind,
                a.stars,
                a.tip
            ));
        }
        Ok(out.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_attractions_in_order() {
        let args = ToolArgs::new().with("query", "推荐上海的景点");
        let output = AttractionRecommendTool.execute(&args).await.unwrap();

        assert!(output.starts_with("Top attractions in Shanghai (上海)"));
        let bund = output.find("The Bund").unwrap();
        let nanjing = output.find("Nanjing Road").unwrap();
        assert!(bund < nanjing);
    }

    #[test]
    fn every_city_has_attractions() {
        for city in City::ALL {
            assert!(!attractions_for(city).is_empty(), "{city}");
        }
    }

    #[tokio::test]
    async fn unknown_city_returns_general_advice() {
        let args = ToolArgs::new().with("query", "Atlantis");
        let output = AttractionRecommendTool.execute(&args).await.unwrap();
        assert!(output.contains("'Atlantis'"));
        assert!(output.contains("opening hours"));
    }
}
