//! Transcript rendering shared by both prompt builders.

use replyforge_protocols::{ConversationSnapshot, SnapshotMessage};

/// Line used when a conversation has no visible messages at all.
pub(crate) const EMPTY_TRANSCRIPT_PLACEHOLDER: &str = "[no messages visible yet]";

/// Render the snapshot's messages as a labelled transcript.
///
/// One line per message, `"<participant-name>: <text>"` for incoming and
/// `"Me: <text>"` for messages the user sent. Falls back to a single line
/// built from `latest_message` when the recent window is empty, and to an
/// explicit placeholder when even that is absent - the transcript section
/// is never empty.
pub fn render_transcript(snapshot: &ConversationSnapshot) -> String {
    let mut out = format!("CONVERSATION WITH: {}\n\n", snapshot.participant_name);

    if !snapshot.recent_messages.is_empty() {
        for message in &snapshot.recent_messages {
            out.push_str(&render_line(snapshot, message));
            out.push('\n');
        }
    } else if let Some(latest) = &snapshot.latest_message {
        out.push_str(&render_line(snapshot, latest));
        out.push('\n');
    } else {
        out.push_str(EMPTY_TRANSCRIPT_PLACEHOLDER);
        out.push('\n');
    }

    out
}

fn render_line(snapshot: &ConversationSnapshot, message: &SnapshotMessage) -> String {
    let speaker = if message.from_participant {
        snapshot.participant_name.as_str()
    } else {
        "Me"
    };
    format!("{}: {}", speaker, message.text)
}
