//! Per-panel assist session.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use replyforge_prompt::{build_response_prompt, build_summary_prompt};
use replyforge_protocols::{
    ConversationSnapshot, ExtractionError, GenerationError, GenerationProvider,
    GenerationRequest, InsertionError, OpenConversation, Tone,
};
use replyforge_resolver::page::HostPage;
use replyforge_resolver::resolver::ContextResolver;

use crate::advice::suggestion;

/// Session-level failure.
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("no open conversation to work with")]
    NoConversation,

    #[error("no conversation matches id {0:?}")]
    UnknownConversation(String),

    #[error("custom tone text must not be empty")]
    EmptyCustomTone,

    #[error("no draft to insert; generate a reply first")]
    NoDraft,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Insertion(#[from] InsertionError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AssistError {
    /// User-facing remediation hint, when one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Generation(err) => suggestion(err),
            _ => None,
        }
    }
}

/// State for one assist panel against one host page.
///
/// Holds the targeted conversation, the latest snapshot, the selected tone
/// and the last generated draft. Every user action re-reads the page
/// through the resolver, so stale state is limited to what the caller
/// chose not to refresh.
pub struct AssistSession<P: HostPage> {
    page: P,
    resolver: ContextResolver,
    provider: Arc<dyn GenerationProvider>,
    tone: Tone,
    conversation: Option<OpenConversation>,
    snapshot: Option<ConversationSnapshot>,
    last_draft: Option<String>,
}

impl<P: HostPage> AssistSession<P> {
    pub fn new(page: P, resolver: ContextResolver, provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            page,
            resolver,
            provider,
            tone: Tone::default(),
            conversation: None,
            snapshot: None,
            last_draft: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    /// Select the tone used for subsequent drafts.
    ///
    /// Custom tone text is validated here, before any prompt is built.
    pub fn set_tone(&mut self, tone: Tone) -> Result<(), AssistError> {
        if let Tone::Custom(text) = &tone {
            if text.trim().is_empty() {
                return Err(AssistError::EmptyCustomTone);
            }
        }
        self.tone = tone;
        Ok(())
    }

    pub fn conversation(&self) -> Option<&OpenConversation> {
        self.conversation.as_ref()
    }

    pub fn snapshot(&self) -> Option<&ConversationSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_draft(&self) -> Option<&str> {
        self.last_draft.as_deref()
    }

    /// All conversation surfaces currently open on the page.
    pub async fn conversations(&self) -> Result<Vec<OpenConversation>, AssistError> {
        Ok(self.resolver.discover_open_conversations(&self.page).await?)
    }

    /// Target whichever surface the page currently treats as active.
    pub async fn open_active(&mut self) -> Result<&OpenConversation, AssistError> {
        let conversation = self
            .resolver
            .resolve_active_surface(&self.page)
            .await?
            .ok_or(AssistError::NoConversation)?;
        info!(
            id = %conversation.id,
            participant = %conversation.display_name,
            "targeting active conversation"
        );
        self.snapshot = None;
        self.last_draft = None;
        self.conversation = Some(conversation);
        Ok(self.conversation.as_ref().unwrap())
    }

    /// Target a conversation by the id discovery assigned to it.
    pub async fn open(&mut self, id: &str) -> Result<&OpenConversation, AssistError> {
        let conversation = self
            .conversations()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AssistError::UnknownConversation(id.to_string()))?;
        self.snapshot = None;
        self.last_draft = None;
        self.conversation = Some(conversation);
        Ok(self.conversation.as_ref().unwrap())
    }

    /// Re-extract the targeted conversation from the live page.
    pub async fn refresh(&mut self) -> Result<&ConversationSnapshot, AssistError> {
        let conversation = self
            .conversation
            .as_ref()
            .ok_or(AssistError::NoConversation)?;
        let snapshot = self.resolver.extract_snapshot(&self.page, conversation).await?;
        debug!(messages = snapshot.recent_messages.len(), "refreshed snapshot");
        self.snapshot = Some(snapshot);
        Ok(self.snapshot.as_ref().unwrap())
    }

    /// Draft a reply expressing `intent`, storing it as the current draft.
    ///
    /// Extracts a fresh snapshot when none is held; auto-targets the active
    /// surface when no conversation is targeted yet.
    pub async fn draft_reply(
        &mut self,
        intent: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, AssistError> {
        self.ensure_snapshot().await?;
        let snapshot = self.snapshot.as_ref().unwrap();
        let prompt = build_response_prompt(snapshot, intent, &self.tone);

        let mut request = GenerationRequest::new(prompt);
        if let Some(max_tokens) = max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self.provider.generate(request).await?;
        info!(
            provider = ?self.provider.kind(),
            model = %response.model,
            chars = response.text.len(),
            "drafted reply"
        );
        self.last_draft = Some(response.text.clone());
        Ok(response.text)
    }

    /// Summarize the targeted conversation.
    pub async fn summarize(&mut self) -> Result<String, AssistError> {
        let snapshot = self.ensure_snapshot().await?;
        let prompt = build_summary_prompt(snapshot);
        let response = self.provider.generate(GenerationRequest::new(prompt)).await?;
        Ok(response.text)
    }

    /// Place the stored draft into the conversation's compose field.
    ///
    /// The draft is never auto-sent; the user reviews and sends it in the
    /// host UI.
    pub async fn insert_draft(&mut self) -> Result<(), AssistError> {
        let draft = self.last_draft.clone().ok_or(AssistError::NoDraft)?;
        self.insert_text(&draft).await
    }

    /// Place arbitrary text into the conversation's compose field.
    pub async fn insert_text(&mut self, text: &str) -> Result<(), AssistError> {
        let conversation = self
            .conversation
            .as_ref()
            .ok_or(AssistError::NoConversation)?;
        self.resolver
            .insert_text(&self.page, text, Some(conversation))
            .await?;
        Ok(())
    }

    async fn ensure_snapshot(&mut self) -> Result<&ConversationSnapshot, AssistError> {
        if self.conversation.is_none() {
            self.open_active().await?;
        }
        if self.snapshot.is_none() {
            self.refresh().await?;
        }
        Ok(self.snapshot.as_ref().unwrap())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
