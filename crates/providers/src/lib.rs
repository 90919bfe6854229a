//! Language-model providers for Wayfarer.
//!
//! All providers implement the `wayfarer_core::Provider` trait.
//! [`build_from_config`] selects one based on configuration.

pub mod offline;
pub mod openai_compat;
pub mod router;

pub use offline::OfflineProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::{build_from_config, default_base_url};
