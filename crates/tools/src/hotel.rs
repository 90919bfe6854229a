//! Hotel search tool — static listings across price ranges.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs};

use crate::city::City;

pub struct HotelSearchTool;

struct Hotel {
    name: &'static str,
    kind: &'static str,
    price: &'static str,
    area: &'static str,
    stars: u8,
}

const fn hotel(
    name: &'static str,
    kind: &'static str,
    price: &'static str,
    area: &'static str,
    stars: u8,
) -> Hotel {
    Hotel {
        name,
        kind,
        price,
        area,
        stars,
    }
}

fn hotels_for(city: City) -> Option<&'static [Hotel]> {
    const BEIJING: &[Hotel] = &[
        hotel("Beijing Hotel", "Luxury", "¥800-1200/night", "Wangfujing", 5),
        hotel("Atour Hotel", "Mid-range", "¥400-600/night", "Chaoyang", 4),
        hotel("Home Inn", "Budget", "¥200-350/night", "Citywide", 3),
        hotel("Hutong Youth Hostel", "Backpacker", "¥80-150/night", "Dongcheng", 3),
    ];
    const SHANGHAI: &[Hotel] = &[
        hotel("Fairmont Peace Hotel", "Historic", "¥1000-1500/night", "The Bund", 5),
        hotel("Atour Hotel", "Boutique", "¥500-800/night", "Jing'an", 4),
        hotel("Jinjiang Inn", "Budget", "¥250-400/night", "Citywide", 3),
        hotel("Shanghai Youth Hostel", "Backpacker", "¥100-200/night", "Xuhui", 3),
    ];
    const GUANGZHOU: &[Hotel] = &[
        hotel("White Swan Hotel", "Luxury", "¥900-1400/night", "Shamian Island", 5),
        hotel("Ji Hotel", "Mid-range", "¥350-550/night", "Tianhe", 4),
        hotel("7 Days Inn", "Budget", "¥180-300/night", "Citywide", 3),
    ];
    const CHENGDU: &[Hotel] = &[
        hotel("The Temple House", "Boutique", "¥1200-1800/night", "Taikoo Li", 5),
        hotel("Lavande Hotel", "Mid-range", "¥300-500/night", "Chunxi Road", 4),
        hotel("Mix Hostel", "Backpacker", "¥60-120/night", "Wenshufang", 3),
    ];

    match city {
        City::Beijing => Some(BEIJING),
        City::Shanghai => Some(SHANGHAI),
        City::Guangzhou => Some(GUANGZHOU),
        City::Chengdu => Some(CHENGDU),
        City::Shenzhen | City::Hangzhou => None,
    }
}

#[async_trait]
impl Tool for HotelSearchTool {
    fn name(&self) -> &str {
        "hotel_search"
    }

    fn description(&self) -> &str {
        "Search for hotel accommodation across price ranges and styles."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = args.require_text("query")?;

        let Some((city, hotels)) = City::find_in(query).and_then(|c| Some((c, hotels_for(c)?)))
        else {
            return Ok(format!(
                "Searching hotels for '{query}'...\n\n\
                 General accommodation advice:\n\
                 1. Pick a type that fits your budget\n\
                 2. Stay close to transit\n\
                 3. Read guest reviews and check facilities\n\
                 4. Compare prices across booking sites"
            ));
        };

        let mut out = format!("Hotels in {}:\n\n", city.label());
        for (i, h) in hotels.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({})\n   Price: {}\n   Area: {} | Rating: {}/5\n\n",
                i + 1,
                h.name,
                h.kind,
                h.price,
                h.area,
                h.stars
            ));
        }
        out.push_str(
            "Booking tips:\n\
             - Booking early is usually cheaper\n\
             - Check reviews and facilities\n\
             - Consider transport links\n\
             - Read the cancellation policy",
        );
        Ok(out)
    }
}
