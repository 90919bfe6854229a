//! The reasoning loop at the heart of Wayfarer.
//!
//! Each turn follows an **Ask → Act → Observe** cycle:
//!
//! 1. **Append** the user input (plus the system prompt on a fresh context)
//! 2. **Send** the whole context and the tool catalogue to the provider
//! 3. **If tool calls**: run each one, append the results, go back to step 2
//! 4. **If text**: that is the answer
//!
//! The cycle is bounded by a step ceiling so a model that never stops
//! calling tools cannot loop forever.

pub mod loop_runner;
pub mod prompt;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use loop_runner::{AgentLoop, CEILING_MESSAGE, LoopState, Outcome, TurnOutcome};
pub use session::{AgentFactory, SessionStore};
