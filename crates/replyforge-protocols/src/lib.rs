//! # Replyforge Protocols
//!
//! Shared type and trait definitions for the replyforge workspace.
//! Contains only data types and interface definitions - no implementations.
//!
//! ## Core Types
//!
//! - [`ConversationSnapshot`] - Point-in-time extraction of a conversation
//! - [`OpenConversation`] - Descriptor for one discovered conversation surface
//! - [`Tone`] - Caller-selected instruction modifier for generated replies
//! - [`GenerationProvider`] - Trait for text-generation backends

pub mod error;
pub mod provider;
pub mod snapshot;
pub mod tone;

pub use error::{ExtractionError, GenerationError, InsertionError};
pub use provider::{
    AuthScheme, GenerationProvider, GenerationRequest, GenerationResponse, ProviderKind,
    ProviderProfile,
};
pub use snapshot::{
    recent_window, ConversationSnapshot, NodeHandle, OpenConversation, SnapshotMessage,
    SurfaceKind,
};
pub use tone::Tone;
