//! Assist session for replyforge.
//!
//! One [`AssistSession`] is scoped to one open panel lifetime: it holds
//! which conversation is targeted, the latest snapshot and the chosen tone
//! as explicit state, and sequences resolver, prompt builder and provider
//! for each user action. Nothing here is global or shared.

mod advice;
mod session;

pub use advice::suggestion;
pub use session::{AssistError, AssistSession};
