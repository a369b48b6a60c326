mod client;
mod error;
mod hosted;
mod local;
pub mod prompt;

pub use client::{ContentGenerator, GenerationParams, LlmService};
pub use error::GenerationError;
