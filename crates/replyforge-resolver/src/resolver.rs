//! Conversation surface discovery, extraction and insertion.

use tracing::debug;

use replyforge_protocols::{
    ConversationSnapshot, ExtractionError, InsertionError, NodeHandle, OpenConversation,
    SurfaceKind,
};

use crate::hints::{first_match, first_match_all, first_text, StructuralHints};
use crate::page::{HostPage, PageError};
use crate::wait::{wait_for, WaitOptions};

const UNKNOWN_PARTICIPANT: &str = "Unknown";

/// Locates conversation surfaces on the host page and produces snapshots.
///
/// Stateless between calls; descriptors returned by discovery are only
/// valid for the page instance they came from and the current interaction.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    hints: StructuralHints,
    wait: WaitOptions,
    recent_window: usize,
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextResolver {
    pub fn new() -> Self {
        Self {
            hints: StructuralHints::default(),
            wait: WaitOptions::default(),
            recent_window: replyforge_protocols::snapshot::DEFAULT_RECENT_WINDOW,
        }
    }

    pub fn with_hints(mut self, hints: StructuralHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_recent_window(mut self, recent_window: usize) -> Self {
        self.recent_window = recent_window;
        self
    }

    /// All conversation surfaces currently present on the page.
    ///
    /// Zero surfaces is a normal outcome ("nothing to do yet"), never an
    /// error. Overlays come first, the primary view last.
    pub async fn discover_open_conversations<P: HostPage + ?Sized>(
        &self,
        page: &P,
    ) -> Result<Vec<OpenConversation>, ExtractionError> {
        let mut conversations = Vec::new();

        let overlays = first_match_all(page, None, self.hints.overlay_container)
            .await
            .map_err(page_to_extraction)?;
        for container in overlays {
            conversations.push(
                self.describe(page, SurfaceKind::OverlaySurface, container)
                    .await
                    .map_err(page_to_extraction)?,
            );
        }

        if let Some(container) = first_match(page, None, self.hints.primary_container)
            .await
            .map_err(page_to_extraction)?
        {
            conversations.push(
                self.describe(page, SurfaceKind::PrimarySurface, container)
                    .await
                    .map_err(page_to_extraction)?,
            );
        }

        debug!(count = conversations.len(), "discovered conversation surfaces");
        Ok(conversations)
    }

    /// The surface a user action should target right now.
    ///
    /// Priority: an overlay the host page marks active, then any open
    /// overlay, then the primary view when the location is a conversation
    /// URL. `None` when nothing matches.
    pub async fn resolve_active_surface<P: HostPage + ?Sized>(
        &self,
        page: &P,
    ) -> Result<Option<OpenConversation>, ExtractionError> {
        if let Some(container) = first_match(page, None, self.hints.overlay_active)
            .await
            .map_err(page_to_extraction)?
        {
            let conversation = self
                .describe(page, SurfaceKind::OverlaySurface, container)
                .await
                .map_err(page_to_extraction)?;
            return Ok(Some(conversation));
        }

        let conversations = self.discover_open_conversations(page).await?;

        if let Some(overlay) = conversations
            .iter()
            .find(|c| c.surface == SurfaceKind::OverlaySurface)
        {
            return Ok(Some(overlay.clone()));
        }

        let location = page.location().await.map_err(page_to_extraction)?;
        let on_conversation_view = self
            .hints
            .conversation_url_markers
            .iter()
            .any(|marker| location.contains(marker));

        if on_conversation_view {
            if let Some(primary) = conversations
                .into_iter()
                .find(|c| c.surface == SurfaceKind::PrimarySurface)
            {
                return Ok(Some(primary));
            }
        }

        Ok(None)
    }

    /// Extract a normalized snapshot scoped to one discovered surface.
    ///
    /// Waits (bounded) for the message list to materialize, since the host
    /// renders it asynchronously after navigation. A conversation whose
    /// list is present but empty yields an empty snapshot, not an error.
    pub async fn extract_snapshot<P: HostPage + ?Sized>(
        &self,
        page: &P,
        conversation: &OpenConversation,
    ) -> Result<ConversationSnapshot, ExtractionError> {
        if !self.hints.knows_surface(conversation.surface) {
            return Err(ExtractionError::NoMessagingContext(
                conversation.surface.as_str().to_string(),
            ));
        }

        let container = &conversation.container;
        let attached = page
            .is_attached(container)
            .await
            .map_err(page_to_extraction)?;
        if !attached {
            return Err(ExtractionError::ContainerNotFound(conversation.id.clone()));
        }

        let list = wait_for(&self.wait, || {
            first_match(page, Some(container), self.hints.message_list)
        })
        .await
        .map_err(|e| match e {
            PageError::Detached(_) => ExtractionError::ContainerNotFound(conversation.id.clone()),
            other => page_to_extraction(other),
        })?
        .ok_or_else(|| ExtractionError::Timeout(self.wait.timeout_ms()))?;

        let rows = first_match_all(page, Some(&list), self.hints.message_row)
            .await
            .map_err(page_to_extraction)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let text = self.message_text(page, row).await.map_err(page_to_extraction)?;
            if text.is_empty() {
                continue;
            }
            let from_participant = self
                .classify_direction(page, row)
                .await
                .map_err(page_to_extraction)?;
            messages.push((text, from_participant));
        }

        let participant_name = first_text(page, Some(container), self.hints.participant_name)
            .await
            .map_err(page_to_extraction)?
            .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string());

        debug!(
            surface = conversation.surface.as_str(),
            messages = messages.len(),
            "extracted conversation snapshot"
        );

        Ok(ConversationSnapshot::from_messages(
            conversation.surface,
            participant_name,
            messages,
            self.recent_window,
        ))
    }

    /// Replace the compose field's content with `text`.
    ///
    /// Scoped to the conversation's container when one is given; falls
    /// back to an unscoped search otherwise. The page backend pairs the
    /// write with synthetic input/change notifications.
    pub async fn insert_text<P: HostPage + ?Sized>(
        &self,
        page: &P,
        text: &str,
        conversation: Option<&OpenConversation>,
    ) -> Result<(), InsertionError> {
        let scope = conversation.map(|c| &c.container);

        let compose = wait_for(&self.wait, || {
            first_match(page, scope, self.hints.compose_field)
        })
        .await
        .map_err(page_to_insertion)?
        .ok_or(InsertionError::NotFound)?;

        page.set_compose_value(&compose, text)
            .await
            .map_err(page_to_insertion)?;

        debug!(chars = text.len(), "inserted text into compose field");
        Ok(())
    }

    /// Build a descriptor for a discovered container.
    async fn describe<P: HostPage + ?Sized>(
        &self,
        page: &P,
        surface: SurfaceKind,
        container: NodeHandle,
    ) -> Result<OpenConversation, PageError> {
        let display_name = first_text(page, Some(&container), self.hints.participant_name)
            .await?
            .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string());

        Ok(OpenConversation {
            id: format!("{}-{}", surface.as_str(), container.0),
            display_name,
            surface,
            container,
        })
    }

    /// Text body of one message row, falling back to the row's own text.
    async fn message_text<P: HostPage + ?Sized>(
        &self,
        page: &P,
        row: &NodeHandle,
    ) -> Result<String, PageError> {
        if let Some(body) = first_text(page, Some(row), self.hints.message_body).await? {
            return Ok(body);
        }
        Ok(page.text(row).await?.trim().to_string())
    }

    /// Two-signal message direction heuristic.
    ///
    /// A row counts as coming from the participant only when BOTH hold:
    /// no "sent by me" marker is present, and a participant avatar is.
    /// The host's markers churn over time and neither signal is reliable
    /// alone; both must be consulted. Known-accepted fragility.
    async fn classify_direction<P: HostPage + ?Sized>(
        &self,
        page: &P,
        row: &NodeHandle,
    ) -> Result<bool, PageError> {
        let sent_by_me = first_match(page, Some(row), self.hints.sent_by_me)
            .await?
            .is_some();
        if sent_by_me {
            return Ok(false);
        }

        let avatar = first_match(page, Some(row), self.hints.participant_avatar)
            .await?
            .is_some();
        Ok(avatar)
    }
}

fn page_to_extraction(err: PageError) -> ExtractionError {
    match err {
        PageError::Detached(node) => {
            ExtractionError::ContainerNotFound(format!("node {}", node.0))
        }
        PageError::Backend(message) => ExtractionError::Page(message),
    }
}

fn page_to_insertion(err: PageError) -> InsertionError {
    match err {
        PageError::Detached(_) => InsertionError::NotFound,
        PageError::Backend(message) => InsertionError::Page(message),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
