//! Generation provider trait definition.

use async_trait::async_trait;

use super::{GenerationRequest, GenerationResponse, ProviderKind};
use crate::error::GenerationError;

/// Core trait for text-generation backends.
///
/// A provider is an opaque prompt-in/text-out service. It never sees the
/// host page or the snapshot - only the fully rendered prompt string.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// Generate text for a prompt.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}
