//! Conversation snapshot and surface descriptor types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default bound on how many recent messages a snapshot keeps.
pub const DEFAULT_RECENT_WINDOW: usize = 5;

/// Which kind of conversation surface a snapshot or descriptor refers to.
///
/// The host page renders conversations either in a primary full-page view
/// or in floating overlay bubbles; several overlays can be open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceKind {
    /// The primary full-page conversation view.
    PrimarySurface,

    /// A floating overlay conversation bubble.
    OverlaySurface,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimarySurface => "primary-surface",
            Self::OverlaySurface => "overlay-surface",
        }
    }
}

/// Opaque handle to a DOM node, defined by the page backend.
///
/// The CDP backend stores a protocol node id here; test doubles store an
/// arena index. Handles are only valid for the page instance that issued
/// them and must not outlive one user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(pub i64);

/// One discovered conversation surface, valid for the current interaction.
///
/// The `container` handle scopes later extraction and insertion to this
/// specific surface. Host page state is dynamic, so descriptors must be
/// re-discovered rather than persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenConversation {
    pub id: String,
    pub display_name: String,
    pub surface: SurfaceKind,
    pub container: NodeHandle,
}

/// One message kept in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub text: String,
    /// True when the other participant sent it, false when the user did.
    pub from_participant: bool,
    /// Position in `recent_messages`, 0 for the oldest kept message.
    pub index: usize,
}

/// Normalized point-in-time extraction of one conversation.
///
/// Constructed fresh on every extraction and owned by the caller for the
/// duration of one user interaction. Either fully populated or not produced
/// at all - extraction failures surface as `ExtractionError`, never as a
/// partially filled snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub surface: SurfaceKind,
    /// `"Unknown"` when no structural hint resolved a name.
    pub participant_name: String,
    pub latest_message: Option<SnapshotMessage>,
    /// Oldest to newest, bounded to the most recent window.
    pub recent_messages: Vec<SnapshotMessage>,
    pub extracted_at: DateTime<Utc>,
}

impl ConversationSnapshot {
    /// Build a snapshot from raw `(text, from_participant)` pairs in
    /// chronological order, keeping only the last `window` messages.
    pub fn from_messages(
        surface: SurfaceKind,
        participant_name: impl Into<String>,
        messages: Vec<(String, bool)>,
        window: usize,
    ) -> Self {
        let recent_messages = recent_window(&messages, window);
        let latest_message = recent_messages.last().cloned();
        Self {
            surface,
            participant_name: participant_name.into(),
            latest_message,
            recent_messages,
            extracted_at: Utc::now(),
        }
    }

    /// Snapshot of a conversation with no visible messages. Not an error.
    pub fn empty(surface: SurfaceKind, participant_name: impl Into<String>) -> Self {
        Self::from_messages(surface, participant_name, Vec::new(), 0)
    }
}

/// Keep the last `limit` messages, renumbering `index` from 0 for the
/// oldest kept message. Chronological order is preserved.
pub fn recent_window(messages: &[(String, bool)], limit: usize) -> Vec<SnapshotMessage> {
    let skip = messages.len().saturating_sub(limit);
    messages[skip..]
        .iter()
        .enumerate()
        .map(|(index, (text, from_participant))| SnapshotMessage {
            text: text.clone(),
            from_participant: *from_participant,
            index,
        })
        .collect()
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
