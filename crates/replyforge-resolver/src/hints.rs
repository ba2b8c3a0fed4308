//! Data-driven structural hints for the host page's markup.
//!
//! Every location the resolver cares about is an ordered list of candidate
//! CSS selectors tried first-match. The host page ships markup changes
//! without notice, so these chains are the crate's only defense: when the
//! page breaks, the fix is a new entry here, not new resolution logic.

use replyforge_protocols::{NodeHandle, SurfaceKind};

use crate::page::{HostPage, PageError};

/// An ordered fallback chain of candidate selectors.
pub type SelectorChain = &'static [&'static str];

/// Structural hints for one host page layout.
#[derive(Debug, Clone)]
pub struct StructuralHints {
    /// Container of the primary full-page conversation view.
    pub primary_container: SelectorChain,
    /// Containers of floating overlay conversation bubbles.
    pub overlay_container: SelectorChain,
    /// Overlay container variant the host marks as the active one.
    pub overlay_active: SelectorChain,
    /// URL substrings indicating the location is a conversation view.
    pub conversation_url_markers: SelectorChain,
    /// The list element messages are rendered into.
    pub message_list: SelectorChain,
    /// One message row.
    pub message_row: SelectorChain,
    /// The text body within a message row.
    pub message_body: SelectorChain,
    /// Marker present on rows the user sent ("sent by me").
    pub sent_by_me: SelectorChain,
    /// Participant avatar marker within a message row.
    pub participant_avatar: SelectorChain,
    /// Participant display name within a surface container.
    pub participant_name: SelectorChain,
    /// The compose field within a surface container.
    pub compose_field: SelectorChain,
}

impl Default for StructuralHints {
    fn default() -> Self {
        Self {
            primary_container: &[".msg-thread", ".messaging-thread", "main .msg-conversation"],
            overlay_container: &[
                ".msg-overlay-conversation-bubble",
                ".msg-overlay-container .conversation-bubble",
            ],
            overlay_active: &[
                ".msg-overlay-conversation-bubble--is-active",
                ".msg-overlay-conversation-bubble.active",
            ],
            conversation_url_markers: &["/messaging/thread", "/messaging/"],
            message_list: &[".msg-s-message-list", ".message-list"],
            message_row: &[".msg-s-event-listitem", ".message-list-item"],
            message_body: &[
                ".msg-s-event-listitem__body",
                ".msg-s-event__content p",
                ".message-body",
            ],
            sent_by_me: &[
                ".msg-s-event-listitem__message-bubble--is-sender",
                "[data-sent-by-me]",
            ],
            participant_avatar: &[
                ".msg-s-event-listitem__profile-picture",
                ".message-avatar img",
            ],
            participant_name: &[
                ".msg-s-message-group__name",
                ".msg-overlay-bubble-header__title",
                ".msg-thread__participant-name",
            ],
            compose_field: &[
                ".msg-form__contenteditable",
                "[contenteditable='true'][role='textbox']",
                "textarea.msg-form__textarea",
            ],
        }
    }
}

impl StructuralHints {
    /// Container chain for the given surface kind.
    pub fn container_chain(&self, surface: SurfaceKind) -> SelectorChain {
        match surface {
            SurfaceKind::PrimarySurface => self.primary_container,
            SurfaceKind::OverlaySurface => self.overlay_container,
        }
    }

    /// Whether this hint set can map the given surface kind to message
    /// structure at all.
    pub fn knows_surface(&self, surface: SurfaceKind) -> bool {
        !self.container_chain(surface).is_empty()
            && !self.message_list.is_empty()
            && !self.message_row.is_empty()
    }
}

/// First node matched by any selector in the chain, in chain order.
pub async fn first_match<P: HostPage + ?Sized>(
    page: &P,
    scope: Option<&NodeHandle>,
    chain: SelectorChain,
) -> Result<Option<NodeHandle>, PageError> {
    for selector in chain {
        if let Some(node) = page.query(scope, selector).await? {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// All nodes matched by the first selector in the chain that matches
/// anything. Later selectors are fallbacks, not unions.
pub async fn first_match_all<P: HostPage + ?Sized>(
    page: &P,
    scope: Option<&NodeHandle>,
    chain: SelectorChain,
) -> Result<Vec<NodeHandle>, PageError> {
    for selector in chain {
        let nodes = page.query_all(scope, selector).await?;
        if !nodes.is_empty() {
            return Ok(nodes);
        }
    }
    Ok(Vec::new())
}

/// First non-empty text produced by any selector in the chain.
pub async fn first_text<P: HostPage + ?Sized>(
    page: &P,
    scope: Option<&NodeHandle>,
    chain: SelectorChain,
) -> Result<Option<String>, PageError> {
    for selector in chain {
        if let Some(node) = page.query(scope, selector).await? {
            let text = page.text(&node).await?;
            let text = text.trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }
    Ok(None)
}
