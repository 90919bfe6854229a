//! The system prompt that opens every conversation.

use wayfarer_core::tool::ToolRegistry;

/// Build the default system prompt: the assistant's role plus the tools it
/// may call, listed in registry order.
pub fn system_prompt(tools: &ToolRegistry) -> String {
    let mut prompt = String::from(
        "You are a professional travel planning assistant. You help users plan trips, \
         check the weather, recommend attractions, find hotels and discover local food.\n",
    );

    if !tools.is_empty() {
        prompt.push_str("\nYou can use the following tools:\n");
        for def in tools.definitions() {
            prompt.push_str(&format!("- {}: {}\n", def.name, def.description));
        }
    }

    prompt.push_str(
        "\nChoose the tools that fit the user's request and give professional advice. \
         Keep replies friendly, detailed and practical.",
    );
    prompt
}
