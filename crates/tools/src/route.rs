//! Route planning tool — canned itineraries plus general travel tips.

use async_trait::async_trait;
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::{Tool, ToolArgs};

use crate::city::City;

pub struct RoutePlanningTool;

struct Itinerary {
    title: &'static str,
    legs: &'static [(&'static str, &'static str)],
    transport: &'static str,
}

fn itinerary_for(city: City) -> Option<Itinerary> {
    let plan = match city {
        City::Beijing => Itinerary {
            title: "Beijing in one day",
            legs: &[
                ("Morning", "09:00 Tiananmen Square -> 10:30 The Palace Museum"),
                ("Afternoon", "14:00 Beihai Park -> 16:00 Nanluoguxiang"),
                ("Evening", "18:00 Wangfujing (dinner and shopping)"),
            ],
            transport: "Metro plus walking; a one-day transit card pays off",
        },
        City::Shanghai => Itinerary {
            title: "Shanghai in two days",
            legs: &[
                ("Day 1", "The Bund -> Nanjing Road -> Yu Garden -> City God Temple"),
                ("Day 2", "Oriental Pearl Tower -> Lujiazui -> Tianzifang -> Xintiandi"),
            ],
            transport: "Mostly metro; several sights are within walking distance",
        },
        City::Hangzhou => Itinerary {
            title: "Hangzhou in one day",
            legs: &[
                ("Morning", "Broken Bridge -> Bai Causeway -> Gushan"),
                ("Afternoon", "Lingyin Temple -> Longjing Tea Village"),
                ("Evening", "Hefang Street (snacks and souvenirs)"),
            ],
            transport: "Public bikes around the lake, taxi to the temple",
        },
        _ => return None,
    };
    Some(plan)
}

const TIPS: &[&str] = &[
    "Prefer public transport, it is cheaper and greener",
    "Leave slack in the schedule, avoid cramming",
    "Visit neighbouring sights on the same day",
    "Reserve time for meals and rest",
    "Install a navigation and transit app",
    "Buy attraction tickets in advance",
];

#[async_trait]
impl Tool for RoutePlanningTool {
    fn name(&self) -> &str {
        "route_planning"
    }

    fn description(&self) -> &str {
        "Plan a travel route, including transport options, timing and itinerary suggestions."
    }

    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
        let query = args.require_text("query")?;

        let mut out = format!("Route plan for '{query}':\n\n");
        match City::find_in(query).and_then(itinerary_for) {
            Some(plan) => {
                out.push_str(&format!("Suggested itinerary: {}\n\n", plan.title));
                for (label, stops) in plan.legs {
                    out.push_str(&format!("- {label}: {stops}\n"));
                }
                out.push_str(&format!("\nGetting around: {}\n\n", plan.transport));
            }
            None => out.push_str("General route planning advice:\n\n"),
        }

        out.push_str("Travel tips:\n");
        for tip in TIPS {
            out.push_str(&format!("   {tip}\n"));
        }
        Ok(out.trim_end().to_string())
    }
}
