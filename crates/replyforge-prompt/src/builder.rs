//! Response and summary prompt builders.

use replyforge_protocols::{ConversationSnapshot, Tone};

use crate::transcript::render_transcript;

/// Build the instruction string for drafting a reply.
///
/// The speaker-orientation directive at the end is a correctness
/// requirement: generation quality collapses when the model conflates
/// "respond to X" with "speak as X", so the prompt states explicitly that
/// the output is written by the user to the participant.
pub fn build_response_prompt(
    snapshot: &ConversationSnapshot,
    user_intent: &str,
    tone: &Tone,
) -> String {
    let transcript = render_transcript(snapshot);

    format!(
        "You are helping me write a reply in a messaging conversation.\n\n\
         {transcript}\n\
         WHAT I WANT TO SAY: {user_intent}\n\n\
         TONE: {tone_instruction}\n\n\
         Write the reply as me, addressed to {participant}. I am the author; \
         do not echo or restate {participant}'s own words back as the reply. \
         Output only the reply text, with no preamble or quotation marks.",
        transcript = transcript,
        user_intent = user_intent,
        tone_instruction = tone.instruction(),
        participant = snapshot.participant_name,
    )
}

/// Build the instruction string for summarizing the conversation.
pub fn build_summary_prompt(snapshot: &ConversationSnapshot) -> String {
    let transcript = render_transcript(snapshot);

    format!(
        "Summarize the following messaging conversation.\n\n\
         {transcript}\n\
         Respond with:\n\
         1. A 1-2 sentence summary of the conversation.\n\
         2. Outstanding action items, or \"none\".\n\
         3. Key factual details worth remembering.\n\
         4. A suggested one-line intent for my next reply, or \"no response needed\".",
        transcript = transcript,
    )
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
