//! Text-generation provider protocol definitions.
//!
//! Providers wrap a remote generative-text API (Anthropic, OpenAI, ...)
//! behind a single prompt-in/text-out operation.

mod profile;
mod request;
mod response;
mod traits;

pub use profile::{AuthScheme, ProviderKind, ProviderProfile};
pub use request::GenerationRequest;
pub use response::GenerationResponse;
pub use traits::GenerationProvider;
