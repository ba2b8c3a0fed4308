//! Conversation context resolution against a live host page.
//!
//! The host page renders conversations either in a primary full-page view
//! or in floating overlay bubbles, and it renders them asynchronously after
//! navigation. This crate locates those surfaces, extracts a normalized
//! [`ConversationSnapshot`] from one of them, and writes generated text back
//! into the surface's compose field.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────┐   HostPage trait   ┌─────────────────────┐
//! │  ContextResolver  │ ◄────────────────► │ CdpPage (WebSocket) │
//! │  hints + waits    │                    │ FakePage (tests)    │
//! └───────────────────┘                    └─────────────────────┘
//! ```
//!
//! All DOM access goes through the narrow [`HostPage`] trait. The
//! production backend is a Chrome DevTools Protocol page session
//! ([`cdp::CdpPage`]); tests use the in-memory [`testing::FakePage`].
//!
//! The host page's markup is a versioned, frequently-invalidated schema.
//! Every structural location the resolver depends on is an ordered
//! fallback chain in [`hints::StructuralHints`], tried first-match; hint
//! churn never touches resolution logic.
//!
//! [`ConversationSnapshot`]: replyforge_protocols::ConversationSnapshot

pub mod cdp;
pub mod hints;
pub mod page;
pub mod resolver;
pub mod testing;
pub mod wait;

pub use cdp::{CdpClient, CdpError, CdpPage};
pub use hints::StructuralHints;
pub use page::{HostPage, PageError};
pub use resolver::ContextResolver;
pub use wait::{wait_for, WaitOptions};
