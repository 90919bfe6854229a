//! Offline provider — a keyword router that stands in for a real model.
//!
//! Used when no API key is configured. It speaks the same protocol as a
//! real model: the first round answers a user message with a single tool
//! call picked by keyword, the next round turns the tool results into the
//! final answer. Input that matches no keyword gets a capability overview.

use async_trait::async_trait;
use tracing::debug;
use wayfarer_core::error::ProviderError;
use wayfarer_core::message::{Message, MessageToolCall, Role};
use wayfarer_core::provider::{Provider, ProviderRequest, ProviderResponse};

pub const OFFLINE_MODEL: &str = "offline-keywords";

pub const CAPABILITY_OVERVIEW: &str = "Hi! I'm your travel assistant. I can help you:\n\
• Check the weather\n\
• Recommend attractions and routes\n\
• Search for hotels\n\
• Plan itineraries\n\
• Recommend local food\n\n\
What would you like to know?";

/// Keywords for one tool. Chinese keywords match as substrings, English
/// keywords match the start of a word.
struct Keywords {
    tool: &'static str,
    local: &'static [&'static str],
    english: &'static [&'static str],
}

const WEATHER: Keywords = Keywords {
    tool: "weather_query",
    local: &["天气", "气温"],
    english: &["weather", "forecast", "temperature"],
};

const SIGHTS: Keywords = Keywords {
    tool: "attraction_recommend",
    local: &["景点"],
    english: &["attraction", "sight", "visit"],
};

/// A bare "recommend" means attractions unless food or lodging is mentioned.
const RECOMMEND: Keywords = Keywords {
    tool: "attraction_recommend",
    local: &["推荐"],
    english: &["recommend"],
};

const FOOD: Keywords = Keywords {
    tool: "food_recommend",
    local: &["美食", "吃", "小吃"],
    english: &["food", "eat", "dish", "restaurant", "cuisine"],
};

const HOTEL: Keywords = Keywords {
    tool: "hotel_search",
    local: &["酒店", "住宿", "宾馆"],
    english: &["hotel", "stay", "accommodation", "hostel"],
};

const ROUTE: Keywords = Keywords {
    tool: "route_planning",
    local: &["路线", "规划", "行程", "游"],
    english: &["route", "itinerary", "plan", "trip"],
};

impl Keywords {
    fn matches(&self, input: &str, words: &[&str]) -> bool {
        self.local.iter().any(|k| input.contains(k))
            || self
                .english
                .iter()
                .any(|k| words.iter().any(|w| w.starts_with(k)))
    }
}

/// Pick the tool for a user input, if any keyword matches.
///
/// Checked in order: weather, attractions, food, hotels, routes.
pub fn route(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let hit = |k: &Keywords| k.matches(input, &words);

    if hit(&WEATHER) {
        return Some(WEATHER.tool);
    }
    if hit(&SIGHTS) || (hit(&RECOMMEND) && !hit(&FOOD) && !hit(&HOTEL)) {
        return Some(SIGHTS.tool);
    }
    [FOOD, HOTEL, ROUTE]
        .into_iter()
        .find(|k| hit(k))
        .map(|k| k.tool)
}

#[derive(Debug, Default)]
pub struct OfflineProvider;

impl OfflineProvider {
    pub fn new() -> Self {
        Self
    }

    fn respond(message: Message) -> ProviderResponse {
        ProviderResponse {
            message,
            usage: None,
            model: OFFLINE_MODEL.into(),
        }
    }
}

#[async_trait]
impl Provider for OfflineProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let last = request.messages.last().ok_or(ProviderError::EmptyResponse)?;

        // Tool results are in: answer with them.
        if last.role == Role::Tool {
            let mut results: Vec<&str> = request
                .messages
                .iter()
                .rev()
                .take_while(|m| m.role == Role::Tool)
                .map(|m| m.content.as_str())
                .collect();
            results.reverse();
            debug!(results = results.len(), "Offline provider summarising tool results");
            return Ok(Self::respond(Message::assistant(results.join("\n\n"))));
        }

        let input = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let advertised = |name: &str| request.tools.iter().any(|t| t.name == name);
        match route(input).filter(|tool| advertised(*tool)) {
            Some(tool) => {
                debug!(tool, "Offline provider requesting tool");
                let call = MessageToolCall {
                    id: format!("call_{}", uuid::Uuid::new_v4().simple()),
                    name: tool.to_string(),
                    arguments: serde_json::json!({ "query": input }).to_string(),
                };
                Ok(Self::respond(Message::assistant_with_calls("", vec![call])))
            }
            None => Ok(Self::respond(Message::assistant(CAPABILITY_OVERVIEW))),
        }
    }
}
