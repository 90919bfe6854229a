//! Food recommendation tool.
//!
//! Known cities get their signature dishes; anything else gets a random
//! handful of general eating-out tips.

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs};

use crate::city::City;

pub struct FoodRecommendTool;

struct Dish {
    name: &'static str,
    where_to: &'static str,
    price: &'static str,
    note: &'static str,
}

const fn dish(
    name: &'static str,
    where_to: &'static str,
    price: &'static str,
    note: &'static str,
) -> Dish {
    Dish {
        name,
        where_to,
        price,
        note,
    }
}

fn dishes_for(city: City) -> &'static [Dish] {
    const BEIJING: &[Dish] = &[
        dish("Peking duck", "Quanjude, Bianyifang", "¥150-300", "Crisp skin, served with pancakes and sweet bean sauce"),
        dish("Zhajiangmian", "Old Beijing noodle houses", "¥25-40", "Noodles with fried soybean paste"),
        dish("Douzhi", "Huguosi Snacks", "¥8-15", "Fermented mung bean drink, an acquired taste"),
        dish("Tanghulu", "Wangfujing snack street", "¥10-20", "Candied hawthorn skewers, best in winter"),
    ];
    const SHANGHAI: &[Dish] = &[
        dish("Xiaolongbao", "Nanxiang Steamed Bun", "¥30-50", "Thin skin, full of soup"),
        dish("Shengjianbao", "Da Hu Chun", "¥20-35", "Pan-fried buns with a crisp base"),
        dish("Sweet and sour spare ribs", "Benbang restaurants", "¥35-60", "Glossy, tangy and sweet"),
    ];
    const GUANGZHOU: &[Dish] = &[
        dish("White cut chicken", "Taotaoju", "¥45-80", "A Cantonese classic, tender and fresh"),
        dish("Har gow", "Dian Dou De", "¥20-35", "Translucent shrimp dumplings"),
        dish("Beef chow fun", "Guangzhou Restaurant", "¥25-40", "Silky rice noodles with wok-seared beef"),
        dish("Double-skin milk", "Nanxin Desserts", "¥15-25", "Rich, smooth milk pudding"),
    ];
    const SHENZHEN: &[Dish] = &[
        dish("Chaoshan beef hotpot", "Futian hotpot houses", "¥80-150", "Hand-cut beef, cooked for seconds"),
        dish("Shajing oysters", "Bao'an seafood streets", "¥50-100", "Grilled with garlic"),
    ];
    const CHENGDU: &[Dish] = &[
        dish("Sichuan hotpot", "Shu Daxia", "¥100-180", "Numbing and spicy, ask for a split pot"),
        dish("Mapo tofu", "Chen Mapo Tofu", "¥20-40", "The original recipe, fiery and fragrant"),
        dish("Dan dan noodles", "Street stalls", "¥10-20", "Chili oil and minced pork"),
    ];
    const HANGZHOU: &[Dish] = &[
        dish("West Lake vinegar fish", "Louwailou", "¥80-150", "Sweet and sour grass carp"),
        dish("Dongpo pork", "Zhiweiguan", "¥40-70", "Slow-braised pork belly"),
        dish("Longjing shrimp", "Lakeside restaurants", "¥60-120", "River shrimp with Dragon Well tea leaves"),
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

const GENERAL_TIPS: &[&str] = &[
    "Look for long-established local restaurants",
    "Try the street snacks",
    "A busy place is usually a good place",
    "Check reviews in a food app",
    "Mind your dietary restrictions",
    "Choose restaurants with a good hygiene record",
];

const TIPS_PER_ANSWER: usize = 3;

#[async_trait]
impl Tool for FoodRecommendTool {
    fn name(&self) -> &str {
        "food_recommend"
    }

    fn description(&self) -> &str {
        "Recommend local specialities, restaurants and snack streets."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = args.require_text("query")?;

        if let Some(city) = City::find_in(query) {
            let mut out = format!("Local food in {}:\n\n", city.label());
            for (i, d) in dishes_for(city).iter().enumerate() {
                out.push_str(&format!(
                    "{}. {}\n   Where: {}\n   Price: {}\n   {}\n\n",
                    i + 1,
                    d.name,
                    d.where_to,
                    d.price,
                    d.note
                ));
            }
            out.push_str(
                "Dining tips:\n\
                 - Old, well-known names are a safe bet\n\
                 - Avoid the peak meal rush\n\
                 - Explore the local snack streets\n\
                 - Keep an eye on food hygiene",
            );
            return Ok(out);
        }

        tracing::debug!(query, "No food table entry, picking general tips");
        let mut out = format!("Food ideas for '{query}':\n\nGeneral tips:\n");
        let tips: Vec<&str> = GENERAL_TIPS
            .choose_multiple(&mut rand::rng(), TIPS_PER_ANSWER)
            .copied()
            .collect();
        for tip in tips {
            out.push_str(&format!("   {tip}\n"));
        }
        Ok(out.trim_end().to_string())
    }
}
